//! Fonts compiled into the binary, usable without any font directory installed.

use std::fmt;

use crate::font::{Font, FontError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinFont {
    /// Five rows of `#` blocks.
    Blocky,
    /// One row, every character drawn as itself.
    Term,
}

impl BuiltinFont {
    pub const ALL: [Self; 2] = [Self::Blocky, Self::Term];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Blocky => "blocky",
            Self::Term => "term",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|font| font.name() == name)
    }

    /// Raw `.flf` source.
    pub const fn as_bytes(self) -> &'static [u8] {
        match self {
            Self::Blocky => include_bytes!("../fonts/blocky.flf"),
            Self::Term => include_bytes!("../fonts/term.flf"),
        }
    }

    /// # Errors
    /// Never fails for the shipped sources; the error type is kept so callers treat every font
    /// the same way.
    pub fn parse(self) -> Result<Font, FontError> {
        Font::parse(self.as_bytes())
    }
}

impl fmt::Display for BuiltinFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::REQUIRED_CODEPOINTS;

    #[test]
    fn builtins_parse_cleanly() {
        for builtin in BuiltinFont::ALL {
            let (font, warnings) = Font::parse_with_warnings(builtin.as_bytes()).unwrap();
            assert!(warnings.is_empty(), "{builtin}: {warnings:?}");
            for code in REQUIRED_CODEPOINTS {
                let ch = char::from_u32(code).unwrap();
                assert!(font.contains(ch), "{builtin} lacks {ch:?}");
            }
        }
    }

    #[test]
    fn names_round_trip() {
        assert_eq!(BuiltinFont::from_name("blocky"), Some(BuiltinFont::Blocky));
        assert_eq!(BuiltinFont::from_name("term"), Some(BuiltinFont::Term));
        assert_eq!(BuiltinFont::from_name("standard"), None);
    }

    #[test]
    fn term_draws_characters_as_themselves() {
        let font = BuiltinFont::Term.parse().unwrap();
        assert_eq!(font.header().height.get(), 1);
        assert_eq!(font.glyph('$').unwrap().rows(), [vec!['$']]);
        assert_eq!(font.glyph('@').unwrap().rows(), [vec!['@']]);
    }
}
