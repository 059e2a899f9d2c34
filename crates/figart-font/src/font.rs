//! FIGfont decoding.

mod header;

use std::collections::HashMap;
use std::str;

use bstr::{BString, ByteSlice as _};
pub use header::{Hardblank, Header, HeaderError, PrintDirection};
use thiserror::Error;

/// Codepoints every FIGfont provides, in file order: printable ASCII, then `ÄÖÜäöüß`.
pub const REQUIRED_CODEPOINTS: [u32; 102] = {
    let mut codes = [0; 102];
    let mut i = 0;
    while i < 95 {
        codes[i] = 32 + i as u32;
        i += 1;
    }
    let deutsch = [196, 214, 220, 228, 246, 252, 223];
    let mut j = 0;
    while j < deutsch.len() {
        codes[95 + j] = deutsch[j];
        j += 1;
    }
    codes
};

/// One FIGcharacter: `height` rows of sub-characters, all `width` chars long.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glyph {
    rows: Vec<Vec<char>>,
    width: usize,
}

impl Glyph {
    fn parse<'a>(
        rows: impl Iterator<Item = &'a [u8]>,
        code: u32,
        height: usize,
        warnings: &mut Vec<FontWarning>,
    ) -> Result<Self, FontError> {
        let mut rows: Vec<Vec<char>> = rows.map(strip_endmarks).collect();
        if rows.len() < height {
            return Err(FontError::Truncated {
                code,
                rows: rows.len(),
            });
        }
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        if rows.iter().any(|row| row.len() != width) {
            warnings.push(FontWarning::RaggedGlyph(code));
            for row in &mut rows {
                row.resize(width, ' ');
            }
        }
        Ok(Self { rows, width })
    }

    pub fn rows(&self) -> &[Vec<char>] {
        &self.rows
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    /// Same glyph with every row reversed, used for right-to-left layout.
    pub(crate) fn mirrored(&self) -> Self {
        Self {
            rows: self
                .rows
                .iter()
                .map(|row| row.iter().rev().copied().collect())
                .collect(),
            width: self.width,
        }
    }
}

/// Decodes a row to sub-characters, then strips trailing whitespace and every trailing copy
/// of the endmark (the last sub-character).
fn strip_endmarks(row: &[u8]) -> Vec<char> {
    let mut row = decode_row(row.trim_end_with(|c| c.is_ascii_whitespace()));
    if let Some(&endmark) = row.last() {
        let end = row
            .iter()
            .rposition(|&c| c != endmark)
            .map_or(0, |position| position + 1);
        row.truncate(end);
    }
    row
}

/// UTF-8 where valid; any other byte stands for itself as Latin-1.
fn decode_row(row: &[u8]) -> Vec<char> {
    let mut chars = Vec::with_capacity(row.len());
    for chunk in row.utf8_chunks() {
        chars.extend(chunk.valid().chars());
        chars.extend(chunk.invalid().iter().copied().map(char::from));
    }
    chars
}

/// A decoded FIGfont.
#[derive(Debug, Clone)]
pub struct Font {
    header: Header,
    comments: String,
    glyphs: HashMap<u32, Glyph>,
}

impl Font {
    /// Decodes the bytes of an `.flf` file, discarding warnings.
    ///
    /// # Errors
    /// Returns `Err` on a fatal decoding error; see [`FontError`].
    pub fn parse(bytes: &[u8]) -> Result<Self, FontError> {
        Self::parse_with_warnings(bytes).map(|(font, _)| font)
    }

    /// Decodes the bytes of an `.flf` file and reports recoverable problems.
    ///
    /// # Errors
    /// Returns `Err` on a fatal decoding error; see [`FontError`].
    pub fn parse_with_warnings(bytes: &[u8]) -> Result<(Self, Vec<FontWarning>), FontError> {
        let mut warnings = Vec::new();
        let mut lines = bytes.lines();
        let header_line = lines.next().ok_or(FontError::Header(HeaderError::Missing))?;
        let header = Header::decode(header_line)?;
        let height = header.height.get();

        let comments: Vec<&[u8]> = lines.by_ref().take(header.comment_lines).collect();
        let comments = String::from_utf8_lossy(&bstr::join("\n", comments)).into_owned();

        let mut glyphs = HashMap::new();
        for code in REQUIRED_CODEPOINTS {
            let rows: Vec<&[u8]> = lines.by_ref().take(height).collect();
            if rows.is_empty() {
                warnings.push(FontWarning::MissingRequired(glyphs.len()));
                break;
            }
            glyphs.insert(code, Glyph::parse(rows.into_iter(), code, height, &mut warnings)?);
        }

        let mut tagged = 0;
        while let Some(tag) = lines.next() {
            let tag = tag.trim();
            if tag.is_empty() {
                continue;
            }
            let number = tag.split_str(" ").next().unwrap_or(tag);
            let rows: Vec<&[u8]> = lines.by_ref().take(height).collect();
            match parse_code(number)? {
                Code::Character(code) => {
                    let glyph = Glyph::parse(rows.into_iter(), code, height, &mut warnings)?;
                    // The last FIGcharacter with a given code wins.
                    glyphs.insert(code, glyph);
                }
                Code::Ignored => {}
            }
            tagged += 1;
        }
        if tagged < header.code_tag_count {
            warnings.push(FontWarning::TooFewCodeTags {
                found: tagged,
                expected: header.code_tag_count,
            });
        }

        let font = Self {
            header,
            comments,
            glyphs,
        };
        Ok((font, warnings))
    }

    pub const fn header(&self) -> &Header {
        &self.header
    }

    pub fn comments(&self) -> &str {
        &self.comments
    }

    /// The FIGcharacter for `ch`, falling back to code 0 when the font defines one.
    pub fn glyph(&self, ch: char) -> Option<&Glyph> {
        self.glyphs
            .get(&u32::from(ch))
            .or_else(|| self.glyphs.get(&0))
    }

    pub fn contains(&self, ch: char) -> bool {
        self.glyphs.contains_key(&u32::from(ch))
    }

    /// Number of FIGcharacters, code 0 included.
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

enum Code {
    Character(u32),
    /// Negative codes tag translation tables and other non-glyph data.
    Ignored,
}

/// Parses a code tag number: decimal, `0x` hexadecimal or leading-zero octal, optionally
/// negative.
fn parse_code(bytes: &[u8]) -> Result<Code, FontError> {
    let invalid = || FontError::InvalidCode(BString::from(bytes));
    let text = str::from_utf8(bytes).ok().ok_or_else(invalid)?;
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let parsed = if let Some(hex) = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        u32::from_str_radix(hex, 16)
    } else if digits.len() > 1
        && let Some(octal) = digits.strip_prefix('0')
    {
        u32::from_str_radix(octal, 8)
    } else {
        digits.parse()
    };
    let value = parsed.ok().ok_or_else(invalid)?;

    if negative {
        // -1 is reserved and never a valid tag.
        if value < 2 {
            return Err(FontError::CodeOutOfRange(text.to_owned()));
        }
        Ok(Code::Ignored)
    } else {
        Ok(Code::Character(value))
    }
}

/// Fatal errors while decoding a FIGfont.
#[derive(Debug, Error)]
pub enum FontError {
    #[error("invalid header: {0}")]
    Header(#[from] HeaderError),
    #[error(r#""{0}" is not a valid character code"#)]
    InvalidCode(BString),
    #[error("character code {0} is out of range")]
    CodeOutOfRange(String),
    #[error("FIGcharacter {code} has only {rows} rows")]
    Truncated { code: u32, rows: usize },
}

/// Recoverable problems found while decoding a FIGfont.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FontWarning {
    /// The file ended before all required FIGcharacters; holds how many were read.
    #[error("file ends after {0} of the required FIGcharacters")]
    MissingRequired(usize),
    /// A FIGcharacter whose rows differ in width; the rows were padded with blanks.
    #[error("FIGcharacter {0} has rows of different widths")]
    RaggedGlyph(u32),
    #[error("header announces {expected} code-tagged FIGcharacters, found {found}")]
    TooFewCodeTags { found: usize, expected: usize },
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Builds a font source, filling the required characters with `fill` and overriding or
    /// appending the `extra` ones (codes outside the required set become code-tagged).
    pub(crate) fn font_source<const H: usize>(
        header: &str,
        fill: [&str; H],
        extra: &[(u32, [&str; H])],
    ) -> String {
        let mut out = format!("{header}\n");
        let mut pending: HashMap<u32, [&str; H]> = extra.iter().copied().collect();
        for code in REQUIRED_CODEPOINTS {
            let rows = pending.remove(&code).unwrap_or(fill);
            push_rows(&mut out, &rows);
        }
        let mut rest: Vec<_> = pending.into_iter().collect();
        rest.sort_by_key(|(code, _)| *code);
        for (code, rows) in rest {
            out.push_str(&format!("{code}  EXTRA\n"));
            push_rows(&mut out, &rows);
        }
        out
    }

    fn push_rows(out: &mut String, rows: &[&str]) {
        for (i, row) in rows.iter().enumerate() {
            let end = if i + 1 == rows.len() { "@@" } else { "@" };
            out.push_str(row);
            out.push_str(end);
            out.push('\n');
        }
    }

    pub(crate) fn subs(row: &str) -> Vec<char> {
        row.chars().collect()
    }

    #[test]
    fn strips_endmarks_and_whitespace() {
        assert_eq!(strip_endmarks(b" _ @@"), subs(" _ "));
        assert_eq!(strip_endmarks(b"|#  "), subs("|"));
        assert_eq!(strip_endmarks(b"@##"), subs("@"));
        assert_eq!(strip_endmarks(b""), subs(""));
    }

    #[test]
    fn rows_decode_to_sub_characters() {
        assert_eq!(strip_endmarks("╔═╗@@".as_bytes()), subs("╔═╗"));
        assert_eq!(strip_endmarks("éé€€".as_bytes()), subs("éé"));
        // Bytes that are not UTF-8 read as Latin-1.
        assert_eq!(strip_endmarks(b"\xe9a@"), subs("éa"));

        let source = font_source("flf2a$ 1 1 4 0 0", ["."], &[(u32::from('X'), ["éé"])]);
        let font = Font::parse(source.as_bytes()).unwrap();
        assert_eq!(font.glyph('X').unwrap().width(), 2);
    }

    #[test]
    fn parses_code_tags() {
        assert!(matches!(parse_code(b"196").unwrap(), Code::Character(196)));
        assert!(matches!(parse_code(b"0x2A").unwrap(), Code::Character(42)));
        assert!(matches!(parse_code(b"0177").unwrap(), Code::Character(127)));
        assert!(matches!(parse_code(b"0").unwrap(), Code::Character(0)));
        assert!(matches!(parse_code(b"-255").unwrap(), Code::Ignored));
        assert!(parse_code(b"-1").is_err());
        assert!(parse_code(b"abc").is_err());
    }

    #[test]
    fn parses_required_and_tagged_characters() {
        let source = font_source(
            "flf2a$ 2 2 4 0 1 0 64 2",
            ["..", ".."],
            &[
                (u32::from('A'), ["/\\", "||"]),
                (0x263A, ["()", "''"]),
                (0, ["??", "??"]),
            ],
        );
        let source = source.replacen('\n', "\na comment line\n", 1);
        let (font, warnings) = Font::parse_with_warnings(source.as_bytes()).unwrap();
        assert!(warnings.is_empty(), "{warnings:?}");
        assert_eq!(font.comments(), "a comment line");
        assert_eq!(font.len(), 104);

        let a = font.glyph('A').unwrap();
        assert_eq!(a.width(), 2);
        assert_eq!(a.rows(), &[subs("/\\"), subs("||")]);
        assert!(font.contains('\u{263A}'));
        // Unknown characters fall back to code 0.
        assert_eq!(font.glyph('\u{1F600}').unwrap().rows()[0], subs("??"));
    }

    #[test]
    fn short_file_warns_about_missing_characters() {
        let source = "flf2a$ 1 1 3 -1 0\n @@\n!@@\n";
        let (font, warnings) = Font::parse_with_warnings(source.as_bytes()).unwrap();
        assert_eq!(font.len(), 2);
        assert_eq!(warnings, vec![FontWarning::MissingRequired(2)]);
    }

    #[test]
    fn ragged_rows_are_padded() {
        let source = font_source("flf2a$ 2 2 4 0 0", ["ab", "c"], &[]);
        let (font, warnings) = Font::parse_with_warnings(source.as_bytes()).unwrap();
        assert!(warnings.contains(&FontWarning::RaggedGlyph(32)));
        assert_eq!(font.glyph(' ').unwrap().rows()[1], subs("c "));
    }

    #[test]
    fn truncated_glyph_is_fatal() {
        let source = "flf2a$ 3 3 3 -1 0\na@\nb@@\n";
        let err = Font::parse(source.as_bytes()).unwrap_err();
        assert!(matches!(err, FontError::Truncated { code: 32, rows: 2 }));
    }

    #[test]
    fn empty_input_has_no_header() {
        let err = Font::parse(b"").unwrap_err();
        assert!(matches!(err, FontError::Header(HeaderError::Missing)));
    }
}
