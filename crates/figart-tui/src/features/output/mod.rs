//! The output panel: the latest banner (or fallback message) and the copy controls.

mod render;

use figart_core::generator::{RenderOutcome, RenderRequest};
pub use render::render_output;

#[derive(Debug, Clone, Default)]
pub struct OutputState {
    outcome: Option<RenderOutcome>,
    /// The request that produced `outcome`.
    pub request: Option<RenderRequest>,
}

impl OutputState {
    pub fn show(&mut self, request: RenderRequest, outcome: RenderOutcome) {
        self.request = Some(request);
        self.outcome = Some(outcome);
    }

    /// Text currently in the output area; empty before the first render.
    pub fn text(&self) -> &str {
        self.outcome
            .as_ref()
            .map_or("", RenderOutcome::display_text)
    }

    pub fn is_failed(&self) -> bool {
        self.outcome.as_ref().is_some_and(RenderOutcome::is_failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_before_first_render() {
        assert_eq!(OutputState::default().text(), "");
    }

    #[test]
    fn shows_banner_or_fallback() {
        let mut output = OutputState::default();
        output.show(RenderRequest::default(), RenderOutcome::Banner("x\ny".into()));
        assert_eq!(output.text(), "x\ny");
        output.show(RenderRequest::default(), RenderOutcome::Failed);
        assert_eq!(output.text(), "Something went wrong...");
        assert!(output.is_failed());
    }
}
