//! Turning the form's raw values into a banner.

use std::fmt;
use std::str::FromStr;

use figart_font::{LayoutMode, Renderer};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::fonts::{FontLookupError, FontStore};

/// Shown in place of the banner whenever rendering fails, whatever the cause.
pub const FALLBACK_MESSAGE: &str = "Something went wrong...";

/// A layout mode override, or the font's own default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutChoice {
    #[default]
    Default,
    FullSize,
    Fitting,
    Smushing,
}

impl LayoutChoice {
    pub const ALL: [Self; 4] = [Self::Default, Self::FullSize, Self::Fitting, Self::Smushing];

    pub fn as_str(self) -> &'static str {
        match self {
            LayoutChoice::Default => "default",
            LayoutChoice::FullSize => "full-size",
            LayoutChoice::Fitting => "fitting",
            LayoutChoice::Smushing => "smushing",
        }
    }

    /// The override to apply, `None` to keep the font's layout.
    pub fn mode(self) -> Option<LayoutMode> {
        match self {
            LayoutChoice::Default => None,
            LayoutChoice::FullSize => Some(LayoutMode::FullSize),
            LayoutChoice::Fitting => Some(LayoutMode::Fitting),
            LayoutChoice::Smushing => Some(LayoutMode::Smushing),
        }
    }
}

impl fmt::Display for LayoutChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown layout {0:?} (expected default, full-size, fitting or smushing)")]
pub struct ParseLayoutChoiceError(String);

impl FromStr for LayoutChoice {
    type Err = ParseLayoutChoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|choice| choice.as_str() == s)
            .ok_or_else(|| ParseLayoutChoiceError(s.to_string()))
    }
}

/// Settings shared by every render, read from the `[render]` config table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub horizontal_layout: LayoutChoice,
    pub vertical_layout: LayoutChoice,
    /// Prefer breaking long lines at whitespace
    pub whitespace_break: bool,
    /// Width used when the request leaves it empty
    pub default_width: usize,
}

impl RenderSettings {
    const DEFAULT_WIDTH: usize = 80;
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            horizontal_layout: LayoutChoice::Default,
            vertical_layout: LayoutChoice::Default,
            whitespace_break: true,
            default_width: Self::DEFAULT_WIDTH,
        }
    }
}

/// Raw form values, captured when the render is requested.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderRequest {
    pub text: String,
    pub font: String,
    pub width: String,
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("invalid width {0:?}")]
    InvalidWidth(String),
    #[error(transparent)]
    Font(#[from] FontLookupError),
    #[error("{ch:?} does not fit within {width} columns")]
    TooNarrow { ch: char, width: usize },
}

impl From<figart_font::RenderError> for RenderError {
    fn from(err: figart_font::RenderError) -> Self {
        match err {
            figart_font::RenderError::TooNarrow { ch, width } => Self::TooNarrow { ch, width },
        }
    }
}

/// Parses the width field: blank means `default`, anything else must be a positive integer.
pub fn parse_width(raw: &str, default: usize) -> Result<usize, RenderError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(default);
    }
    trimmed
        .parse::<usize>()
        .ok()
        .filter(|width| *width > 0)
        .ok_or_else(|| RenderError::InvalidWidth(raw.to_string()))
}

/// Renders `request.text` with the requested font and width.
///
/// # Errors
/// See [`RenderError`]. Callers showing the result to a user collapse every error into
/// [`FALLBACK_MESSAGE`] through [`RenderOutcome`].
pub fn render(
    store: &FontStore,
    request: &RenderRequest,
    settings: &RenderSettings,
) -> Result<String, RenderError> {
    let width = parse_width(&request.width, settings.default_width)?;
    let font = store.load(&request.font)?;

    let mut renderer = Renderer::new(&font)
        .max_width(width)
        .whitespace_break(settings.whitespace_break);
    if let Some(mode) = settings.horizontal_layout.mode() {
        renderer = renderer.horizontal_layout(mode);
    }
    if let Some(mode) = settings.vertical_layout.mode() {
        renderer = renderer.vertical_layout(mode);
    }
    Ok(renderer.render(&request.text)?)
}

/// What the output area shows for a finished render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    Banner(String),
    Failed,
}

impl RenderOutcome {
    pub fn display_text(&self) -> &str {
        match self {
            RenderOutcome::Banner(banner) => banner,
            RenderOutcome::Failed => FALLBACK_MESSAGE,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, RenderOutcome::Failed)
    }
}

impl From<Result<String, RenderError>> for RenderOutcome {
    fn from(result: Result<String, RenderError>) -> Self {
        match result {
            Ok(banner) => RenderOutcome::Banner(banner),
            Err(err) => {
                tracing::debug!(error = %err, "render failed");
                RenderOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(text: &str, font: &str, width: &str) -> RenderRequest {
        RenderRequest {
            text: text.to_string(),
            font: font.to_string(),
            width: width.to_string(),
        }
    }

    fn run(text: &str, font: &str, width: &str) -> Result<String, RenderError> {
        render(
            &FontStore::new(Vec::new()),
            &request(text, font, width),
            &RenderSettings::default(),
        )
    }

    #[test]
    fn width_parsing() {
        assert_eq!(parse_width("", 80).unwrap(), 80);
        assert_eq!(parse_width("  ", 80).unwrap(), 80);
        assert_eq!(parse_width("40", 80).unwrap(), 40);
        assert_eq!(parse_width(" 12 ", 80).unwrap(), 12);
        for bad in ["0", "-3", "abc", "1.5"] {
            assert!(
                matches!(parse_width(bad, 80), Err(RenderError::InvalidWidth(raw)) if raw == bad),
                "{bad:?}"
            );
        }
    }

    #[test]
    fn renders_with_builtin_font() {
        assert_eq!(run("Hi there", "term", "").unwrap(), "Hi there");
        assert_eq!(
            run("HI", "blocky", "").unwrap(),
            "# # ###\n# #  #\n###  #\n# #  #\n# # ###"
        );
    }

    #[test]
    fn empty_text_is_empty_banner() {
        assert_eq!(run("", "blocky", "").unwrap(), "");
    }

    #[test]
    fn width_wraps_output() {
        assert_eq!(run("Hello world", "term", "8").unwrap(), "Hello\nworld");
    }

    #[test]
    fn layout_override_applies() {
        let settings = RenderSettings {
            horizontal_layout: LayoutChoice::FullSize,
            ..RenderSettings::default()
        };
        let banner = render(
            &FontStore::new(Vec::new()),
            &request("HI", "blocky", ""),
            &settings,
        )
        .unwrap();
        assert_eq!(banner.lines().next(), Some("# # ###"));
    }

    #[test]
    fn whitespace_break_can_be_disabled() {
        let settings = RenderSettings {
            whitespace_break: false,
            ..RenderSettings::default()
        };
        let banner = render(
            &FontStore::new(Vec::new()),
            &request("Hello world", "term", "8"),
            &settings,
        )
        .unwrap();
        assert_eq!(banner, "Hello wo\nrld");
    }

    #[test]
    fn failures_show_fallback_message() {
        let cases = [
            run("Hi", "no-such-font", ""),
            run("Hi", "blocky", "zero"),
            run("Hi", "blocky", "2"),
        ];
        for result in cases {
            let outcome = RenderOutcome::from(result);
            assert!(outcome.is_failed());
            assert_eq!(outcome.display_text(), "Something went wrong...");
        }
    }

    #[test]
    fn success_shows_banner_verbatim() {
        let banner = run("a b", "term", "").unwrap();
        let outcome = RenderOutcome::from(Ok(banner.clone()));
        assert_eq!(outcome.display_text(), banner);
    }

    #[test]
    fn layout_choice_parses() {
        assert_eq!("full-size".parse::<LayoutChoice>().unwrap(), LayoutChoice::FullSize);
        assert_eq!(LayoutChoice::Smushing.to_string(), "smushing");
        assert!("squash".parse::<LayoutChoice>().is_err());
    }
}
