use std::num::NonZero;
use std::str::{self, FromStr};

use bstr::BString;
use itertools::Itertools as _;
use thiserror::Error;

use crate::layout::{HorizontalLayout, LayoutDecodeError, VerticalLayout};

/// Decoded first line of a FIGfont.
#[derive(Clone, Copy, Debug)]
pub struct Header {
    /// Sub-character rendered as a blank that still blocks horizontal fitting.
    pub hardblank: Hardblank,
    /// Rows per FIGcharacter. Every FIGcharacter in a font has this height.
    pub height: NonZero<usize>,
    /// Rows from the top of the tallest FIGcharacter to the baseline. Informational only.
    pub baseline: usize,
    /// Declared upper bound of a FIGcharacter row, endmarks included.
    pub max_length: usize,
    /// Lines of comments between the header and the first FIGcharacter.
    pub comment_lines: usize,
    pub horizontal_layout: HorizontalLayout,
    pub vertical_layout: VerticalLayout,
    pub print_direction: PrintDirection,
    /// Number of code-tagged FIGcharacters after the required 102.
    pub code_tag_count: usize,
}

impl Header {
    /// Decodes a header line such as `flf2a$ 6 5 16 15 11 0 24463 229`.
    ///
    /// The first six parameters are required; print direction, full layout and the code tag
    /// count are optional.
    ///
    /// # Errors
    /// Returns `Err` if the signature, hardblank or any present parameter is malformed.
    pub fn decode(line: &[u8]) -> Result<Self, HeaderError> {
        let mut parameters = line
            .split(u8::is_ascii_whitespace)
            .filter(|parameter| !parameter.is_empty());
        let Some([signature, height, baseline, max_length, old_layout, comment_lines]) =
            parameters.next_array()
        else {
            return Err(HeaderError::NotEnoughParameters(line.into()));
        };
        let print_direction = parameters.next();
        let full_layout = parameters.next();
        let code_tag_count = parameters.next();

        let Some(hardblank) = signature.strip_prefix(b"flf2a") else {
            return Err(HeaderError::UnknownSignature(signature.into()));
        };
        let Ok(hardblank) = hardblank.iter().copied().exactly_one() else {
            return Err(HeaderError::HardblankLength(hardblank.into()));
        };
        let hardblank = Hardblank::try_from(hardblank).map_err(HeaderError::InvalidHardblank)?;

        let Some(height) = NonZero::new(Parameter::Height.parse(height)?) else {
            return Err(HeaderError::ZeroHeight);
        };
        // Some fonts in the wild carry a garbage baseline; it never affects output.
        let baseline = Parameter::Baseline.parse(baseline).unwrap_or(height.get());
        let max_length = Parameter::MaxLength.parse(max_length)?;
        let old_layout: i32 = Parameter::OldLayout.parse(old_layout)?;
        let comment_lines = Parameter::CommentLines.parse(comment_lines)?;
        let print_direction = PrintDirection::decode(print_direction)?;
        let full_layout: Option<u32> = full_layout
            .map(|value| Parameter::FullLayout.parse(value))
            .transpose()?;
        let code_tag_count = code_tag_count
            .map(|value| Parameter::CodeTagCount.parse(value))
            .transpose()?
            .unwrap_or(0);

        Ok(Self {
            hardblank,
            height,
            baseline,
            max_length,
            comment_lines,
            horizontal_layout: HorizontalLayout::decode(old_layout, full_layout)?,
            vertical_layout: VerticalLayout::decode(full_layout),
            print_direction,
            code_tag_count,
        })
    }
}

/// Direction in which FIGcharacters are laid out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PrintDirection {
    #[default]
    LeftToRight,
    RightToLeft,
}

impl PrintDirection {
    fn decode(value: Option<&[u8]>) -> Result<Self, HeaderError> {
        match value {
            None | Some(b"0") => Ok(Self::LeftToRight),
            Some(b"1") => Ok(Self::RightToLeft),
            Some(other) => Err(HeaderError::PrintDirection(other.into())),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Parameter {
    Height,
    Baseline,
    MaxLength,
    OldLayout,
    CommentLines,
    FullLayout,
    CodeTagCount,
}

impl Parameter {
    fn parse<T: FromStr>(self, bytes: &[u8]) -> Result<T, HeaderError> {
        str::from_utf8(bytes)
            .ok()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| HeaderError::Parse(self.name(), bytes.into()))
    }

    const fn name(self) -> &'static str {
        match self {
            Self::Height => "Height",
            Self::Baseline => "Baseline",
            Self::MaxLength => "Max_Length",
            Self::OldLayout => "Old_Layout",
            Self::CommentLines => "Comment_Lines",
            Self::FullLayout => "Full_Layout",
            Self::CodeTagCount => "Codetag_Count",
        }
    }
}

/// The hardblank sub-character of a font (usually `$`).
///
/// Rendered as a space, but treated as visible when fitting or smushing horizontally.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hardblank(u8);

impl Hardblank {
    pub const fn byte(self) -> u8 {
        self.0
    }
}

impl PartialEq<u8> for Hardblank {
    fn eq(&self, other: &u8) -> bool {
        self.0 == *other
    }
}

/// Compares as Latin-1, the same way glyph rows decode bytes that are not UTF-8.
impl PartialEq<char> for Hardblank {
    fn eq(&self, other: &char) -> bool {
        char::from(self.0) == *other
    }
}

impl TryFrom<u8> for Hardblank {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if matches!(value, b' ' | b'\r' | b'\n' | 0) {
            Err(value)
        } else {
            Ok(Self(value))
        }
    }
}

/// Fatal problems with a FIGfont header line.
#[derive(Debug, Error)]
pub enum HeaderError {
    #[error("missing header")]
    Missing,
    #[error(r#""{0}" does not include enough parameters"#)]
    NotEnoughParameters(BString),
    #[error(r#""{0}" does not begin with "flf2a""#)]
    UnknownSignature(BString),
    #[error(r#"hardblank "{0}" is not exactly one byte"#)]
    HardblankLength(BString),
    #[error("byte {0:#04x} cannot be the hardblank")]
    InvalidHardblank(u8),
    #[error("height parameter is 0")]
    ZeroHeight,
    #[error(r#""{1}" cannot be parsed as the parameter `{0}`"#)]
    Parse(&'static str, BString),
    #[error(r#""{0}" is an invalid print direction, expecting 0 or 1"#)]
    PrintDirection(BString),
    #[error(transparent)]
    Layout(#[from] LayoutDecodeError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{HorizontalRule, LayoutMode, VerticalRule};

    #[test]
    fn decodes_full_header() {
        let header = Header::decode(b"flf2a$ 6 5 16 15 11 0 24463 229").unwrap();
        assert_eq!(header.hardblank, b'$');
        assert_eq!(header.height.get(), 6);
        assert_eq!(header.baseline, 5);
        assert_eq!(header.max_length, 16);
        assert_eq!(header.comment_lines, 11);
        assert_eq!(header.print_direction, PrintDirection::LeftToRight);
        assert_eq!(header.code_tag_count, 229);

        let horizontal = header.horizontal_layout;
        assert_eq!(horizontal.mode(), LayoutMode::Smushing);
        assert!(horizontal.has_rule(HorizontalRule::EqualCharacter));
        assert!(horizontal.has_rule(HorizontalRule::Hierarchy));
        assert!(!horizontal.has_rule(HorizontalRule::BigX));

        let vertical = header.vertical_layout;
        assert_eq!(vertical.mode(), LayoutMode::Smushing);
        assert!(vertical.has_rule(VerticalRule::HorizontalLine));
    }

    #[test]
    fn optional_parameters_default() {
        let header = Header::decode(b"flf2a# 3 2 5 -1 0").unwrap();
        assert_eq!(header.hardblank, b'#');
        assert_eq!(header.code_tag_count, 0);
        assert_eq!(header.horizontal_layout.mode(), LayoutMode::FullSize);
        assert_eq!(header.vertical_layout.mode(), LayoutMode::FullSize);
    }

    #[test]
    fn right_to_left_direction() {
        let header = Header::decode(b"flf2a$ 1 1 3 0 0 1").unwrap();
        assert_eq!(header.print_direction, PrintDirection::RightToLeft);
    }

    #[test]
    fn rejects_bad_signature() {
        let err = Header::decode(b"flf2b$ 1 1 3 0 0").unwrap_err();
        assert!(matches!(err, HeaderError::UnknownSignature(_)));
    }

    #[test]
    fn rejects_nul_hardblank() {
        let err = Header::decode(b"flf2a\x00 1 1 3 0 0").unwrap_err();
        assert!(matches!(err, HeaderError::InvalidHardblank(0)));
    }

    #[test]
    fn rejects_short_header() {
        let err = Header::decode(b"flf2a$ 1 1 3").unwrap_err();
        assert!(matches!(err, HeaderError::NotEnoughParameters(_)));
    }

    #[test]
    fn rejects_zero_height() {
        let err = Header::decode(b"flf2a$ 0 1 3 0 0").unwrap_err();
        assert!(matches!(err, HeaderError::ZeroHeight));
    }

    #[test]
    fn garbage_baseline_falls_back_to_height() {
        let header = Header::decode(b"flf2a$ 4 x 3 0 0").unwrap();
        assert_eq!(header.baseline, 4);
    }
}
