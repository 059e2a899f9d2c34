//! The fixed list of fonts offered by the generator.
//!
//! Entries are plain font names. Nothing here checks that a font is installed; an entry that
//! cannot be resolved renders as the fallback message.

pub const FONT_CATALOG: &[&str] = &[
    "blocky",
    "term",
    "standard",
    "banner",
    "big",
    "block",
    "bubble",
    "digital",
    "ivrit",
    "lean",
    "mini",
    "mnemonic",
    "script",
    "shadow",
    "slant",
    "small",
    "smscript",
    "smshadow",
    "smslant",
];

/// Catalog index of `name`, or 0 when the catalog does not list it.
pub fn default_index(name: &str) -> usize {
    FONT_CATALOG
        .iter()
        .position(|font| *font == name)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use figart_font::BuiltinFont;

    use super::*;

    #[test]
    fn builtins_lead_the_catalog() {
        let names: Vec<&str> = BuiltinFont::ALL.iter().map(|font| font.name()).collect();
        assert_eq!(&FONT_CATALOG[..names.len()], names.as_slice());
    }

    #[test]
    fn entries_are_distinct() {
        let unique: HashSet<_> = FONT_CATALOG.iter().collect();
        assert_eq!(unique.len(), FONT_CATALOG.len());
    }

    #[test]
    fn default_index_finds_entry() {
        assert_eq!(default_index("blocky"), 0);
        assert_eq!(default_index("slant"), 14);
        assert_eq!(default_index("Slant"), 0);
    }
}
