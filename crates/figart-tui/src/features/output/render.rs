use std::time::Instant;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use unicode_width::UnicodeWidthStr;

use super::OutputState;
use crate::features::copy::{CopyFeedback, CopyTarget};
use crate::state::CopyAreas;
use crate::theme::Palette;

/// Draws the banner panel with both copy controls on its top border, right-aligned.
pub fn render_output(
    frame: &mut Frame,
    output: &OutputState,
    feedback: &CopyFeedback,
    area: Rect,
    palette: &Palette,
    now: Instant,
) -> CopyAreas {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border))
        .title(" Output ")
        .title_style(Style::default().fg(palette.muted));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let style = if output.is_failed() {
        Style::default().fg(palette.error)
    } else {
        palette.base()
    };
    let lines: Vec<Line> = output.text().split('\n').map(Line::raw).collect();
    frame.render_widget(Paragraph::new(lines).style(style), inner);

    // Laid out right to left: escaped sits at the corner, plain to its left.
    let mut right = area.right().saturating_sub(2);
    let mut areas = CopyAreas::default();
    for target in [CopyTarget::Escaped, CopyTarget::Plain] {
        let label = format!("[{}]", feedback.label(target, now));
        let width = label.width() as u16;
        let x = right.saturating_sub(width).max(area.x + 1);
        let rect = Rect::new(x, area.y, right.saturating_sub(x), 1);
        let label_style = Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::BOLD);
        frame.render_widget(Paragraph::new(Span::styled(label, label_style)), rect);
        match target {
            CopyTarget::Plain => areas.plain = rect,
            CopyTarget::Escaped => areas.escaped = rect,
        }
        right = x.saturating_sub(1);
    }
    areas
}
