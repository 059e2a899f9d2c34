use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use super::state::{Field, FormState, TextInput};
use crate::state::FormAreas;
use crate::theme::Palette;

/// Text field grows with its content up to this many lines.
const MAX_TEXT_LINES: usize = 5;
/// Height of the font/width row, borders included.
const SELECTOR_ROW_HEIGHT: u16 = 3;
const WIDTH_FIELD_WIDTH: u16 = 12;
const TEXT_PLACEHOLDER: &str = "Type something...";

fn text_height(form: &FormState) -> u16 {
    form.text.line_count().clamp(1, MAX_TEXT_LINES) as u16 + 2
}

pub fn calculate_form_height(form: &FormState, max_height: u16) -> u16 {
    (text_height(form) + SELECTOR_ROW_HEIGHT).min(max_height)
}

fn field_block(field: Field, focus: Field, palette: &Palette) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(palette.border_style(field == focus))
        .title(format!(" {} ", field.title()))
        .title_style(palette.border_style(field == focus))
}

/// Draws the three fields and returns where they landed.
pub fn render_form(
    frame: &mut Frame,
    form: &FormState,
    area: Rect,
    palette: &Palette,
    show_cursor: bool,
) -> FormAreas {
    let [text_area, selector_row] =
        Layout::vertical([Constraint::Length(text_height(form)), Constraint::Min(0)]).areas(area);
    let [font_area, width_area] = Layout::horizontal([
        Constraint::Min(10),
        Constraint::Length(WIDTH_FIELD_WIDTH),
    ])
    .areas(selector_row);

    let text_block = field_block(Field::Text, form.focus, palette);
    let text_inner = text_block.inner(text_area);
    frame.render_widget(text_block, text_area);
    render_input(
        frame,
        &form.text,
        text_inner,
        palette,
        (form.text.is_empty() && form.focus != Field::Text).then_some(TEXT_PLACEHOLDER),
    );

    let font_block = field_block(Field::Font, form.focus, palette);
    let font_inner = font_block.inner(font_area);
    frame.render_widget(font_block, font_area);
    let options = FormState::font_options();
    let arrow_style = Style::default().fg(palette.accent);
    let line = Line::from(vec![
        Span::styled("◀ ", arrow_style),
        Span::styled(form.font(), palette.base()),
        Span::styled(" ▶", arrow_style),
        Span::styled(
            format!("  {}/{}", form.font_index + 1, options.len()),
            Style::default().fg(palette.muted),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), font_inner);

    let width_block = field_block(Field::Width, form.focus, palette);
    let width_inner = width_block.inner(width_area);
    frame.render_widget(width_block, width_area);
    render_input(frame, &form.width, width_inner, palette, None);

    if show_cursor {
        let focused = match form.focus {
            Field::Text => Some((&form.text, text_inner)),
            Field::Width => Some((&form.width, width_inner)),
            Field::Font => None,
        };
        if let Some((input, inner)) = focused {
            let (line, col) = input.cursor_position();
            let (row_offset, col_offset) = scroll_offsets(line, col, inner);
            frame.set_cursor_position(Position::new(
                inner.x + (col - usize::from(col_offset)) as u16,
                inner.y + (line - usize::from(row_offset)) as u16,
            ));
        }
    }

    FormAreas {
        text: text_area,
        font: font_area,
        width: width_area,
    }
}

/// Scroll needed to keep the cursor at (line, col) inside `inner`.
fn scroll_offsets(line: usize, col: usize, inner: Rect) -> (u16, u16) {
    let rows = usize::from(inner.height.max(1));
    let cols = usize::from(inner.width.max(1));
    let row_offset = (line + 1).saturating_sub(rows);
    let col_offset = (col + 1).saturating_sub(cols);
    (row_offset as u16, col_offset as u16)
}

fn render_input(
    frame: &mut Frame,
    input: &TextInput,
    inner: Rect,
    palette: &Palette,
    placeholder: Option<&str>,
) {
    if let Some(placeholder) = placeholder {
        let line = Line::styled(placeholder, Style::default().fg(palette.muted));
        frame.render_widget(Paragraph::new(line), inner);
        return;
    }
    let (line, col) = input.cursor_position();
    let offsets = scroll_offsets(line, col, inner);
    let lines: Vec<Line> = input.value().split('\n').map(Line::raw).collect();
    frame.render_widget(
        Paragraph::new(lines).style(palette.base()).scroll(offsets),
        inner,
    );
}
