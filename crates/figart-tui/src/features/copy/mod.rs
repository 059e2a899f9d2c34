//! The two copy controls on the output panel and their "Copied!" flash.

use std::time::{Duration, Instant};

use figart_core::escape::json_escape;

/// How long a control reads "Copied!" after being used.
pub const COPIED_FLASH: Duration = Duration::from_millis(500);
pub const COPIED_LABEL: &str = "Copied!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyTarget {
    Plain,
    Escaped,
}

impl CopyTarget {
    pub fn label(self) -> &'static str {
        match self {
            CopyTarget::Plain => "Copy",
            CopyTarget::Escaped => "Copy escaped",
        }
    }

    /// What lands on the clipboard for the given output text.
    pub fn clipboard_text(self, output: &str) -> String {
        match self {
            CopyTarget::Plain => output.to_string(),
            CopyTarget::Escaped => json_escape(output),
        }
    }
}

/// Which control is flashing, and since when. At most one flashes at a time.
#[derive(Debug, Default, Clone)]
pub struct CopyFeedback {
    flash: Option<(CopyTarget, Instant)>,
}

impl CopyFeedback {
    /// Starts (or restarts) the flash on `target`.
    pub fn flash(&mut self, target: CopyTarget, now: Instant) {
        self.flash = Some((target, now));
    }

    pub fn label(&self, target: CopyTarget, now: Instant) -> &'static str {
        match self.flash {
            Some((flashing, since)) if flashing == target && now.duration_since(since) < COPIED_FLASH => {
                COPIED_LABEL
            }
            _ => target.label(),
        }
    }

    pub fn is_flashing(&self) -> bool {
        self.flash.is_some()
    }

    /// Drops an expired flash. Returns true when something changed.
    pub fn expire(&mut self, now: Instant) -> bool {
        let expired = self
            .flash
            .is_some_and(|(_, since)| now.duration_since(since) >= COPIED_FLASH);
        if expired {
            self.flash = None;
        }
        expired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_default_to_original() {
        let feedback = CopyFeedback::default();
        let now = Instant::now();
        assert_eq!(feedback.label(CopyTarget::Plain, now), "Copy");
        assert_eq!(feedback.label(CopyTarget::Escaped, now), "Copy escaped");
    }

    #[test]
    fn flash_lasts_500ms() {
        let mut feedback = CopyFeedback::default();
        let start = Instant::now();
        feedback.flash(CopyTarget::Plain, start);

        assert_eq!(feedback.label(CopyTarget::Plain, start), "Copied!");
        assert_eq!(feedback.label(CopyTarget::Escaped, start), "Copy escaped");
        let almost = start + Duration::from_millis(499);
        assert_eq!(feedback.label(CopyTarget::Plain, almost), "Copied!");
        assert!(!feedback.expire(almost));

        let done = start + COPIED_FLASH;
        assert_eq!(feedback.label(CopyTarget::Plain, done), "Copy");
        assert!(feedback.expire(done));
        assert!(!feedback.is_flashing());
    }

    #[test]
    fn second_copy_restarts_and_moves_flash() {
        let mut feedback = CopyFeedback::default();
        let start = Instant::now();
        feedback.flash(CopyTarget::Plain, start);
        let later = start + Duration::from_millis(300);
        feedback.flash(CopyTarget::Escaped, later);

        let check = start + Duration::from_millis(600);
        assert_eq!(feedback.label(CopyTarget::Plain, check), "Copy");
        assert_eq!(feedback.label(CopyTarget::Escaped, check), "Copied!");
        assert_eq!(
            feedback.label(CopyTarget::Escaped, later + COPIED_FLASH),
            "Copy escaped"
        );
    }

    #[test]
    fn clipboard_text_per_target() {
        let output = "a\"b\n";
        assert_eq!(CopyTarget::Plain.clipboard_text(output), output);
        assert_eq!(CopyTarget::Escaped.clipboard_text(output), r#"a\"b\n"#);
    }
}
