//! Modal overlays. An open overlay receives every key until it closes.
//!
//! - `font_picker.rs`: filterable list of the font catalog
//! - `render_utils.rs`: shared overlay rendering helpers

pub mod font_picker;
pub mod render_utils;

use crossterm::event::KeyEvent;
pub use font_picker::FontPickerState;
use ratatui::Frame;
use ratatui::layout::Rect;

use crate::mutations::StateMutation;
use crate::state::TuiState;
use crate::theme::Palette;

/// Which overlay to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayRequest {
    FontPicker,
}

#[derive(Debug)]
pub enum OverlayTransition {
    Stay,
    Close,
}

/// What an overlay key handler wants done: close or not, plus state changes.
#[derive(Debug)]
pub struct OverlayUpdate {
    pub transition: OverlayTransition,
    pub mutations: Vec<StateMutation>,
}

impl OverlayUpdate {
    fn new(transition: OverlayTransition) -> Self {
        Self {
            transition,
            mutations: Vec::new(),
        }
    }

    pub fn stay() -> Self {
        Self::new(OverlayTransition::Stay)
    }

    pub fn close() -> Self {
        Self::new(OverlayTransition::Close)
    }

    #[must_use]
    pub fn with_mutations(mut self, mutations: Vec<StateMutation>) -> Self {
        self.mutations = mutations;
        self
    }
}

#[derive(Debug)]
pub enum Overlay {
    FontPicker(FontPickerState),
}

impl Overlay {
    pub fn open(request: OverlayRequest, tui: &TuiState) -> Self {
        match request {
            OverlayRequest::FontPicker => {
                Overlay::FontPicker(FontPickerState::open(tui.form.font_index))
            }
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        match self {
            Overlay::FontPicker(picker) => picker.render(frame, area, palette),
        }
    }

    pub fn handle_key(&mut self, tui: &TuiState, key: KeyEvent) -> OverlayUpdate {
        match self {
            Overlay::FontPicker(picker) => picker.handle_key(tui, key),
        }
    }
}
