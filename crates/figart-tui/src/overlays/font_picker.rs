//! Font picker overlay: the catalog as a filterable list.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, ListState, Paragraph};

use super::OverlayUpdate;
use super::render_utils::{
    InputHint, InputLine, OverlayConfig, render_input_line, render_overlay, render_separator,
};
use crate::features::form::FormState;
use crate::mutations::{FormMutation, StateMutation};
use crate::state::TuiState;
use crate::theme::Palette;

const PICKER_WIDTH: u16 = 40;
const MAX_VISIBLE: u16 = 12;

#[derive(Debug, Clone, Default)]
pub struct FontPickerState {
    pub filter: String,
    /// Position within the filtered list.
    pub selected: usize,
}

impl FontPickerState {
    pub fn open(current: usize) -> Self {
        Self {
            filter: String::new(),
            selected: current,
        }
    }

    /// Catalog indices whose names contain the filter, case-insensitively.
    pub fn matches(&self) -> Vec<usize> {
        let needle = self.filter.to_lowercase();
        FormState::font_options()
            .iter()
            .enumerate()
            .filter(|(_, name)| name.to_lowercase().contains(&needle))
            .map(|(index, _)| index)
            .collect()
    }

    pub fn selected_font(&self) -> Option<usize> {
        self.matches().get(self.selected).copied()
    }

    pub fn handle_key(&mut self, _tui: &TuiState, key: KeyEvent) -> OverlayUpdate {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => OverlayUpdate::close(),
            KeyCode::Char('c') if ctrl => OverlayUpdate::close(),
            KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
                OverlayUpdate::stay()
            }
            KeyCode::Down => {
                if self.selected + 1 < self.matches().len() {
                    self.selected += 1;
                }
                OverlayUpdate::stay()
            }
            KeyCode::Enter => match self.selected_font() {
                Some(index) => OverlayUpdate::close().with_mutations(vec![StateMutation::Form(
                    FormMutation::SelectFont(index),
                )]),
                None => OverlayUpdate::stay(),
            },
            KeyCode::Backspace => {
                if self.filter.pop().is_some() {
                    self.selected = 0;
                }
                OverlayUpdate::stay()
            }
            KeyCode::Char(ch) if !ctrl => {
                self.filter.push(ch);
                self.selected = 0;
                OverlayUpdate::stay()
            }
            _ => OverlayUpdate::stay(),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let matches = self.matches();
        let visible = u16::try_from(matches.len())
            .unwrap_or(MAX_VISIBLE)
            .clamp(1, MAX_VISIBLE);

        let hints = [
            InputHint::new("↑↓", "navigate"),
            InputHint::new("Enter", "select"),
            InputHint::new("Esc", "cancel"),
        ];
        let layout = render_overlay(frame, area, palette, &OverlayConfig {
            title: "Font",
            width: PICKER_WIDTH,
            // filter + separator + list + separator + hints + borders
            height: visible + 6,
            hints: &hints,
        });
        let body = layout.body;
        if body.height < 3 {
            return;
        }

        render_input_line(
            frame,
            Rect::new(body.x, body.y, body.width, 1),
            &InputLine {
                value: &self.filter,
                placeholder: Some("type to filter"),
                prompt: "> ",
            },
            palette,
        );
        render_separator(frame, body, 1, palette);

        let list_height = body.height.saturating_sub(3);
        let list_area = Rect::new(body.x, body.y + 2, body.width, list_height);

        if matches.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    "  No matching fonts",
                    Style::default().fg(palette.muted),
                )),
                list_area,
            );
        } else {
            let total = matches.len();
            let items: Vec<ListItem> = matches
                .iter()
                .enumerate()
                .map(|(position, &index)| {
                    let name = FormState::font_options()[index];
                    let counter = format!("{}/{total}", position + 1);
                    let name_width = usize::from(body.width).saturating_sub(2 + counter.len());
                    ListItem::new(Line::from(vec![
                        Span::styled(format!("{name:<name_width$}"), palette.base()),
                        Span::styled(counter, Style::default().fg(palette.muted)),
                    ]))
                })
                .collect();

            let list = List::new(items)
                .highlight_style(palette.highlight())
                .highlight_symbol("▶ ");
            let mut list_state = ListState::default();
            list_state.select(Some(self.selected.min(total - 1)));
            frame.render_stateful_widget(list, list_area, &mut list_state);
        }

        render_separator(frame, body, body.height.saturating_sub(1), palette);
    }
}
