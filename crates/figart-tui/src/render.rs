//! Pure view functions.
//!
//! `render` reads `&AppState` and draws; the only thing it writes is the
//! `areas` cell used for mouse hit-testing.

use std::time::Instant;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::widgets::Block;

use crate::features::{form, output};
use crate::overlays::render_utils::{InputHint, render_hints};
use crate::state::{AppState, ScreenAreas};
use crate::theme::Palette;

/// Rows kept for the output panel, borders included.
const MIN_OUTPUT_HEIGHT: u16 = 3;
const HINTS_HEIGHT: u16 = 1;

pub fn render(app: &AppState, frame: &mut Frame) {
    let area = frame.area();
    let state = &app.tui;
    let palette = Palette::for_theme(state.theme);
    let now = Instant::now();

    frame.render_widget(Block::default().style(palette.base()), area);

    let form_height = form::calculate_form_height(
        &state.form,
        area.height.saturating_sub(MIN_OUTPUT_HEIGHT + HINTS_HEIGHT),
    );
    let [form_area, output_area, hints_area] = Layout::vertical([
        Constraint::Length(form_height),
        Constraint::Min(MIN_OUTPUT_HEIGHT),
        Constraint::Length(HINTS_HEIGHT),
    ])
    .areas(area);

    let form_areas = form::render_form(
        frame,
        &state.form,
        form_area,
        &palette,
        app.overlay.is_none(),
    );
    let copy_areas = output::render_output(
        frame,
        &state.output,
        &state.copy,
        output_area,
        &palette,
        now,
    );
    state.areas.set(ScreenAreas {
        form: form_areas,
        copy: copy_areas,
    });

    let hints = [
        InputHint::new("Tab", "next field"),
        InputHint::new("Enter", "render"),
        InputHint::new("^Y", "copy"),
        InputHint::new("^E", "copy escaped"),
        InputHint::new("^T", "theme"),
        InputHint::new("^Q", "quit"),
    ];
    render_hints(frame, hints_area, &hints, &palette);

    if let Some(overlay) = &app.overlay {
        overlay.render(frame, area, &palette);
    }
}
