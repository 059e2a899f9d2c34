use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::theme::Palette;

/// Keeps the end of `text`, replacing the cut-off start with `…`, within `max_width` columns.
pub fn truncate_start_with_ellipsis(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let budget = max_width - 1;
    let mut kept = Vec::new();
    let mut used = 0;
    for ch in text.chars().rev() {
        let width = ch.width().unwrap_or(0);
        if used + width > budget {
            break;
        }
        used += width;
        kept.push(ch);
    }
    std::iter::once('…').chain(kept.into_iter().rev()).collect()
}

/// Calculates the area for an overlay, centered within the available height.
pub fn calculate_overlay_area(area: Rect, available_height: u16, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(available_height.saturating_sub(2));

    let overlay_x = area.x + (area.width.saturating_sub(width)) / 2;
    let overlay_y = area.y + (available_height.saturating_sub(height)) / 2;
    Rect::new(overlay_x, overlay_y, width, height)
}

/// Clears `area` and draws the titled border.
pub fn render_overlay_container(frame: &mut Frame, area: Rect, title: &str, palette: &Palette) {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .style(palette.base())
        .border_style(Style::default().fg(palette.accent))
        .title(format!(" {title} "))
        .title_style(
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(block, area);
}

pub struct OverlayConfig<'a> {
    pub title: &'a str,
    pub width: u16,
    pub height: u16,
    pub hints: &'a [InputHint<'a>],
}

/// Where an overlay ended up: its whole popup and the area inside the border.
pub struct OverlayLayout {
    pub popup: Rect,
    pub body: Rect,
}

/// Clears, frames and titles a centered popup, then reserves the hint rows.
pub fn render_overlay(
    frame: &mut Frame,
    area: Rect,
    palette: &Palette,
    config: &OverlayConfig<'_>,
) -> OverlayLayout {
    let popup = calculate_overlay_area(area, area.height, config.width, config.height);
    render_overlay_container(frame, popup, config.title, palette);

    let inner = Rect::new(
        popup.x + 1,
        popup.y + 1,
        popup.width.saturating_sub(2),
        popup.height.saturating_sub(2),
    );

    if !config.hints.is_empty() {
        render_hints(frame, inner, config.hints, palette);
    }

    let footer_height = u16::from(!config.hints.is_empty());
    let body_height = inner.height.saturating_sub(footer_height);
    let body = Rect::new(inner.x, inner.y, inner.width, body_height);

    OverlayLayout { popup, body }
}

pub struct InputHint<'a> {
    pub key: &'a str,
    pub action: &'a str,
}

impl<'a> InputHint<'a> {
    pub fn new(key: &'a str, action: &'a str) -> Self {
        Self { key, action }
    }
}

/// A prompt-style input line, e.g. a filter.
pub struct InputLine<'a> {
    pub value: &'a str,
    pub placeholder: Option<&'a str>,
    pub prompt: &'a str,
}

/// Renders "> <text>█".
pub fn render_input_line(frame: &mut Frame, area: Rect, input: &InputLine<'_>, palette: &Palette) {
    let is_placeholder = input.value.is_empty() && input.placeholder.is_some();
    let max_text_width = usize::from(area.width).saturating_sub(input.prompt.width() + 1);

    let display_text = if is_placeholder {
        truncate_start_with_ellipsis(input.placeholder.unwrap_or(""), max_text_width)
    } else {
        truncate_start_with_ellipsis(input.value, max_text_width)
    };

    let cursor = Span::styled("█", Style::default().fg(palette.focus));
    let mut spans = vec![Span::styled(
        input.prompt,
        Style::default().fg(palette.accent),
    )];
    if is_placeholder {
        spans.push(cursor);
        spans.push(Span::styled(
            display_text,
            Style::default().fg(palette.muted),
        ));
    } else {
        spans.push(Span::styled(display_text, palette.base()));
        spans.push(cursor);
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Renders a line of keyboard hints on the last row of `area`.
pub fn render_hints(frame: &mut Frame, area: Rect, hints: &[InputHint], palette: &Palette) {
    let hints_y = area.y + area.height.saturating_sub(1);
    let hints_area = Rect::new(area.x, hints_y, area.width, 1);

    let mut spans = Vec::new();
    for (i, hint) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" • ", Style::default().fg(palette.muted)));
        }
        spans.push(Span::styled(hint.key, Style::default().fg(palette.accent)));
        spans.push(Span::styled(
            format!(" {}", hint.action),
            Style::default().fg(palette.muted),
        ));
    }

    let para = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    frame.render_widget(para, hints_area);
}

pub fn render_separator(frame: &mut Frame, area: Rect, y_offset: u16, palette: &Palette) {
    if y_offset >= area.height {
        return;
    }
    let separator = "─".repeat(usize::from(area.width));
    let separator_area = Rect::new(area.x, area.y + y_offset, area.width, 1);
    frame.render_widget(
        Paragraph::new(Span::styled(separator, Style::default().fg(palette.muted))),
        separator_area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_keeps_the_end() {
        assert_eq!(truncate_start_with_ellipsis("short", 10), "short");
        assert_eq!(truncate_start_with_ellipsis("smslant", 5), "…lant");
        assert_eq!(truncate_start_with_ellipsis("abc", 0), "");
        assert_eq!(truncate_start_with_ellipsis("日本語", 4), "…語");
    }

    #[test]
    fn overlay_is_centered_and_clamped() {
        let area = Rect::new(0, 0, 100, 40);
        assert_eq!(calculate_overlay_area(area, 40, 40, 20), Rect::new(30, 10, 40, 20));
        let small = Rect::new(0, 0, 20, 10);
        assert_eq!(calculate_overlay_area(small, 10, 40, 20), Rect::new(2, 1, 16, 8));
    }
}
