//! Clipboard access with two transports:
//! 1. OSC 52, the terminal clipboard escape sequence (works over SSH)
//! 2. The system clipboard via `arboard`

use std::fmt;
use std::io::{self, Write};

use base64::Engine;

pub struct Clipboard;

impl Clipboard {
    /// Copies `text`, trying OSC 52 first and the system clipboard second.
    ///
    /// # Errors
    /// The system clipboard error when both transports fail.
    pub fn copy(text: &str) -> Result<(), ClipboardError> {
        if let Err(err) = Self::copy_osc52(text) {
            tracing::debug!(error = %err, "OSC 52 copy failed, trying system clipboard");
            return Self::copy_system(text);
        }
        Ok(())
    }

    /// Writes `ESC ] 52 ; c ; <base64> ESC \` to stdout; `c` selects the system clipboard.
    fn copy_osc52(text: &str) -> Result<(), ClipboardError> {
        let encoded = base64::engine::general_purpose::STANDARD.encode(text);
        let mut stdout = io::stdout();
        write!(stdout, "\x1b]52;c;{encoded}\x1b\\").map_err(ClipboardError::Osc52)?;
        stdout.flush().map_err(ClipboardError::Osc52)
    }

    fn copy_system(text: &str) -> Result<(), ClipboardError> {
        let mut clipboard = arboard::Clipboard::new().map_err(ClipboardError::System)?;
        clipboard.set_text(text).map_err(ClipboardError::System)
    }
}

#[derive(Debug)]
pub enum ClipboardError {
    Osc52(io::Error),
    System(arboard::Error),
}

impl fmt::Display for ClipboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClipboardError::Osc52(err) => write!(f, "OSC 52 clipboard failed: {err}"),
            ClipboardError::System(err) => write!(f, "System clipboard failed: {err}"),
        }
    }
}

impl std::error::Error for ClipboardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ClipboardError::Osc52(err) => Some(err),
            ClipboardError::System(err) => Some(err),
        }
    }
}
