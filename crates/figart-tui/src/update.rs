//! The reducer: events in, state changes and effects out.
//!
//! Nothing here touches the terminal, the clipboard or the font files.

use std::time::Instant;

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Position;

use crate::common::TaskKind;
use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::features::copy::CopyTarget;
use crate::features::form::{self, Field, FormAction};
use crate::mutations::{FormMutation, StateMutation};
use crate::overlays::{self, Overlay, OverlayRequest};
use crate::state::{AppState, TuiState};

/// Applies `event` to `app` and returns what the runtime should do next.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            app.tui.copy.expire(Instant::now());
            vec![]
        }
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
        UiEvent::TaskStarted { kind, started } => {
            if app.tui.tasks.state_mut(kind).on_started(&started) {
                vec![]
            } else {
                // Superseded before it started.
                vec![UiEffect::CancelTask {
                    kind,
                    token: started.cancel,
                }]
            }
        }
        UiEvent::TaskCompleted { kind, completed } => {
            if app.tui.tasks.state_mut(kind).finish_if_active(completed.id) {
                update(app, *completed.result)
            } else {
                tracing::trace!(?kind, id = completed.id.0, "dropping stale task result");
                vec![]
            }
        }
        UiEvent::BannerRendered { request, outcome } => {
            app.tui.output.show(request, outcome);
            vec![]
        }
        UiEvent::RenderCancelled => vec![],
    }
}

/// Effects to run once before the first event.
pub fn initial_effects(app: &mut AppState) -> Vec<UiEffect> {
    if app.tui.render_on_start {
        request_render(&mut app.tui)
    } else {
        vec![]
    }
}

/// Starts a render of the current form values, superseding any render in flight.
fn request_render(tui: &mut TuiState) -> Vec<UiEffect> {
    let mut effects = Vec::with_capacity(2);
    let state = tui.tasks.state_mut(TaskKind::Render);
    if state.is_running() {
        effects.push(UiEffect::CancelTask {
            kind: TaskKind::Render,
            token: state.cancel.take(),
        });
    }

    let id = tui.task_seq.next_id();
    tui.tasks.state_mut(TaskKind::Render).begin(id);
    effects.push(UiEffect::RenderBanner {
        task: Some(id),
        request: tui.form.request(),
    });
    effects
}

fn copy_output(tui: &mut TuiState, target: CopyTarget) -> Vec<UiEffect> {
    tui.copy.flash(target, Instant::now());
    vec![UiEffect::CopyToClipboard {
        target,
        text: target.clipboard_text(tui.output.text()),
    }]
}

fn toggle_theme(tui: &mut TuiState) -> Vec<UiEffect> {
    tui.theme = tui.theme.toggled();
    vec![UiEffect::PersistTheme { theme: tui.theme }]
}

// ============================================================================
// Mutations and overlays
// ============================================================================

fn apply_mutations(tui: &mut TuiState, mutations: Vec<StateMutation>) -> Vec<UiEffect> {
    let mut effects = Vec::new();
    for mutation in mutations {
        match mutation {
            StateMutation::Form(FormMutation::SelectFont(index)) => {
                tui.form.focus = Field::Font;
                if tui.form.select_font(index) {
                    effects.extend(request_render(tui));
                }
            }
        }
    }
    effects
}

fn apply_overlay_update(app: &mut AppState, update: overlays::OverlayUpdate) -> Vec<UiEffect> {
    let effects = apply_mutations(&mut app.tui, update.mutations);
    match update.transition {
        overlays::OverlayTransition::Stay => {}
        overlays::OverlayTransition::Close => app.overlay = None,
    }
    effects
}

fn open_overlay_request(app: &mut AppState, request: OverlayRequest) {
    app.overlay = Some(Overlay::open(request, &app.tui));
}

// ============================================================================
// Keyboard, mouse and paste
// ============================================================================

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key(app, key),
        Event::Mouse(mouse) => handle_mouse(app, mouse),
        Event::Paste(text) if app.overlay.is_none() => {
            match form::handle_paste(&mut app.tui.form, &text) {
                FormAction::Changed => request_render(&mut app.tui),
                _ => vec![],
            }
        }
        _ => vec![],
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && key.code == KeyCode::Char('q') {
        return vec![UiEffect::Quit];
    }

    // An open overlay takes every other key.
    if let Some(overlay) = app.overlay.as_mut() {
        let update = overlay.handle_key(&app.tui, key);
        return apply_overlay_update(app, update);
    }

    if ctrl {
        match key.code {
            KeyCode::Char('c') => return vec![UiEffect::Quit],
            KeyCode::Char('y') => return copy_output(&mut app.tui, CopyTarget::Plain),
            KeyCode::Char('e') => return copy_output(&mut app.tui, CopyTarget::Escaped),
            KeyCode::Char('t') => return toggle_theme(&mut app.tui),
            _ => {}
        }
    }

    match form::handle_key(&mut app.tui.form, key) {
        FormAction::Changed | FormAction::Submit => request_render(&mut app.tui),
        FormAction::OpenFontPicker => {
            open_overlay_request(app, OverlayRequest::FontPicker);
            vec![]
        }
        FormAction::Moved | FormAction::Ignored => vec![],
    }
}

fn handle_mouse(app: &mut AppState, mouse: MouseEvent) -> Vec<UiEffect> {
    if app.overlay.is_some() || mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return vec![];
    }

    let position = Position::new(mouse.column, mouse.row);
    let areas = app.tui.areas.get();
    if let Some(target) = areas.copy_target_at(position) {
        return copy_output(&mut app.tui, target);
    }
    if let Some(field) = areas.field_at(position) {
        let already_focused = app.tui.form.focus == field;
        app.tui.form.focus = field;
        if field == Field::Font && already_focused {
            open_overlay_request(app, OverlayRequest::FontPicker);
        }
    }
    vec![]
}
