//! Everything the generator screen knows.
//!
//! ```text
//! AppState
//! ├── tui: TuiState
//! │   ├── form: FormState        (text, font, width)
//! │   ├── output: OutputState    (latest banner)
//! │   ├── copy: CopyFeedback     ("Copied!" flash)
//! │   ├── task_seq / tasks       (render task lifecycle)
//! │   └── areas                  (last drawn positions, for mouse hits)
//! └── overlay: Option<Overlay>   (font picker)
//! ```
//!
//! Overlays live outside `TuiState` so their handlers can borrow both mutably.

use std::cell::Cell;

use figart_core::config::{Config, ThemeName};
use figart_core::generator::RenderSettings;
use ratatui::layout::{Position, Rect};

use crate::common::{TaskSeq, Tasks};
use crate::features::copy::{CopyFeedback, CopyTarget};
use crate::features::form::{Field, FormState, TextInput};
use crate::features::output::OutputState;
use crate::overlays::Overlay;

/// Form values supplied on the command line.
#[derive(Debug, Clone, Default)]
pub struct Prefill {
    pub text: Option<String>,
    pub font: Option<String>,
    pub width: Option<String>,
}

impl Prefill {
    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.font.is_none() && self.width.is_none()
    }
}

pub struct AppState {
    pub tui: TuiState,
    pub overlay: Option<Overlay>,
}

impl AppState {
    pub fn new(config: &Config, prefill: &Prefill) -> Self {
        Self {
            tui: TuiState::new(config, prefill),
            overlay: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FormAreas {
    pub text: Rect,
    pub font: Rect,
    pub width: Rect,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CopyAreas {
    pub plain: Rect,
    pub escaped: Rect,
}

/// Where things were drawn in the last frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScreenAreas {
    pub form: FormAreas,
    pub copy: CopyAreas,
}

impl ScreenAreas {
    pub fn copy_target_at(&self, position: Position) -> Option<CopyTarget> {
        if self.copy.plain.contains(position) {
            Some(CopyTarget::Plain)
        } else if self.copy.escaped.contains(position) {
            Some(CopyTarget::Escaped)
        } else {
            None
        }
    }

    pub fn field_at(&self, position: Position) -> Option<Field> {
        Field::ALL.into_iter().find(|field| {
            let area = match field {
                Field::Text => self.form.text,
                Field::Font => self.form.font,
                Field::Width => self.form.width,
            };
            area.contains(position)
        })
    }
}

pub struct TuiState {
    pub should_quit: bool,
    pub form: FormState,
    pub output: OutputState,
    pub copy: CopyFeedback,
    pub theme: ThemeName,
    pub settings: RenderSettings,
    /// Whether the form was prefilled, so startup renders once.
    pub render_on_start: bool,
    pub task_seq: TaskSeq,
    pub tasks: Tasks,
    /// Written by the render pass, read by mouse handling.
    pub areas: Cell<ScreenAreas>,
}

impl TuiState {
    pub fn new(config: &Config, prefill: &Prefill) -> Self {
        let font_name = prefill.font.as_deref().unwrap_or(&config.default_font);
        let mut form = FormState::new(figart_core::catalog::default_index(font_name));
        if let Some(text) = &prefill.text {
            form.text = TextInput::new(text.clone());
        }
        if let Some(width) = &prefill.width {
            form.width = TextInput::new(width.clone());
        }

        Self {
            should_quit: false,
            form,
            output: OutputState::default(),
            copy: CopyFeedback::default(),
            theme: config.theme,
            settings: config.render.clone(),
            render_on_start: !prefill.is_empty(),
            task_seq: TaskSeq::default(),
            tasks: Tasks::default(),
            areas: Cell::new(ScreenAreas::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefill_sets_fields() {
        let prefill = Prefill {
            text: Some("Hi".into()),
            font: Some("term".into()),
            width: Some("40".into()),
        };
        let state = TuiState::new(&Config::default(), &prefill);
        assert_eq!(state.form.text.value(), "Hi");
        assert_eq!(state.form.font(), "term");
        assert_eq!(state.form.width.value(), "40");
        assert!(state.render_on_start);
    }

    #[test]
    fn defaults_come_from_config() {
        let config = Config {
            default_font: "slant".into(),
            ..Config::default()
        };
        let state = TuiState::new(&config, &Prefill::default());
        assert_eq!(state.form.font(), "slant");
        assert!(state.form.text.is_empty());
        assert!(!state.render_on_start);
    }

    #[test]
    fn hit_testing() {
        let areas = ScreenAreas {
            form: FormAreas {
                text: Rect::new(0, 0, 10, 3),
                font: Rect::new(0, 3, 5, 3),
                width: Rect::new(5, 3, 5, 3),
            },
            copy: CopyAreas {
                plain: Rect::new(20, 6, 6, 1),
                escaped: Rect::new(27, 6, 14, 1),
            },
        };
        assert_eq!(areas.field_at(Position::new(6, 4)), Some(Field::Width));
        assert_eq!(areas.copy_target_at(Position::new(21, 6)), Some(CopyTarget::Plain));
        assert_eq!(areas.copy_target_at(Position::new(30, 6)), Some(CopyTarget::Escaped));
        assert_eq!(areas.copy_target_at(Position::new(26, 6)), None);
    }
}
