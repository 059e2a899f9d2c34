//! Layout modes and smushing rules.
//!
//! Horizontal layout bits (`Full_Layout`, low byte):
//! - bits 0..=5: horizontal smushing rules 1-6
//! - bit 6 (64): horizontal fitting
//! - bit 7 (128): horizontal smushing, takes priority over fitting
//!
//! Vertical layout bits (`Full_Layout`, high byte):
//! - bits 8..=12: vertical smushing rules 1-5
//! - bit 13 (8192): vertical fitting
//! - bit 14 (16384): vertical smushing, takes priority over fitting
//!
//! A smushing layout without any rule bits uses universal smushing.

use enumset::{EnumSet, EnumSetType};
use thiserror::Error;

use crate::font::Hardblank;

pub type HorizontalLayout = Layout<HorizontalRule>;
pub type VerticalLayout = Layout<VerticalRule>;

/// How much adjacent FIGcharacters (or lines of them) are moved together.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutMode {
    /// Each FIGcharacter occupies its full width (or height).
    FullSize,
    /// FIGcharacters are moved together until they touch.
    Fitting,
    /// FIGcharacters are moved one step further than fitting, merging one column (or row).
    Smushing,
}

/// A layout mode plus the controlled smushing rules active in smushing mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layout<R: EnumSetType> {
    mode: LayoutMode,
    rules: EnumSet<R>,
}

impl<R: EnumSetType> Layout<R> {
    pub fn new(mode: LayoutMode, rules: EnumSet<R>) -> Self {
        Self { mode, rules }
    }

    pub const fn mode(&self) -> LayoutMode {
        self.mode
    }

    /// Returns the same rules under a different mode.
    #[must_use]
    pub fn with_mode(self, mode: LayoutMode) -> Self {
        Self { mode, ..self }
    }

    pub fn has_rule(&self, rule: R) -> bool {
        self.rules.contains(rule)
    }

    pub fn rules(&self) -> EnumSet<R> {
        self.rules
    }

    /// True when smushing and no controlled rule is set.
    pub fn is_universal(&self) -> bool {
        self.mode == LayoutMode::Smushing && self.rules.is_empty()
    }
}

/// Controlled horizontal smushing rules, in bit order.
#[derive(Debug, EnumSetType)]
pub enum HorizontalRule {
    /// Two identical sub-characters become one (hardblanks excluded).
    EqualCharacter,
    /// `_` is replaced by any of `|/\[]{}()<>`.
    Underscore,
    /// The later class in `|`, `/\`, `[]`, `{}`, `()`, `<>` wins.
    Hierarchy,
    /// `[]`, `{}` and `()` pairs become `|`.
    OppositePair,
    /// `/\` becomes `|`, `\/` becomes `Y`, `><` becomes `X`.
    BigX,
    /// Two hardblanks become one.
    Hardblank,
}

/// Controlled vertical smushing rules, in bit order.
#[derive(Debug, EnumSetType)]
pub enum VerticalRule {
    EqualCharacter,
    Underscore,
    Hierarchy,
    /// `-` over `_` (or `_` over `-`) becomes `=`.
    HorizontalLine,
    /// `|` over `|` becomes `|`.
    VerticalLine,
}

const HIERARCHY: [&str; 6] = ["|", "/\\", "[]", "{}", "()", "<>"];

fn hierarchy_class(ch: char) -> Option<usize> {
    HIERARCHY.iter().position(|class| class.contains(ch))
}

/// Wins of the hierarchy rule: the sub-character from the later class.
fn hierarchy_winner(left: char, right: char) -> Option<char> {
    let (l, r) = (hierarchy_class(left)?, hierarchy_class(right)?);
    match l.cmp(&r) {
        std::cmp::Ordering::Less => Some(right),
        std::cmp::Ordering::Greater => Some(left),
        std::cmp::Ordering::Equal => None,
    }
}

fn underscore_winner(a: char, b: char) -> Option<char> {
    const REPLACES_UNDERSCORE: &str = "|/\\[]{}()<>";
    if a == '_' && REPLACES_UNDERSCORE.contains(b) {
        Some(b)
    } else if b == '_' && REPLACES_UNDERSCORE.contains(a) {
        Some(a)
    } else {
        None
    }
}

impl HorizontalRule {
    fn from_bits(bits: u32) -> EnumSet<Self> {
        EnumSet::from_u32_truncated(bits & 0b11_1111)
    }

    fn apply(self, left: char, right: char, hardblank: Hardblank) -> Option<char> {
        match self {
            Self::EqualCharacter => (left == right && hardblank != left).then_some(left),
            Self::Underscore => underscore_winner(left, right),
            Self::Hierarchy => hierarchy_winner(left, right),
            Self::OppositePair => matches!(
                (left, right),
                ('[', ']') | (']', '[') | ('{', '}') | ('}', '{') | ('(', ')') | (')', '(')
            )
            .then_some('|'),
            Self::BigX => match (left, right) {
                ('/', '\\') => Some('|'),
                ('\\', '/') => Some('Y'),
                ('>', '<') => Some('X'),
                _ => None,
            },
            Self::Hardblank => (hardblank == left && hardblank == right).then_some(left),
        }
    }
}

impl VerticalRule {
    fn from_bits(bits: u32) -> EnumSet<Self> {
        EnumSet::from_u32_truncated(bits & 0b1_1111)
    }

    fn apply(self, upper: char, lower: char) -> Option<char> {
        match self {
            Self::EqualCharacter => (upper == lower).then_some(upper),
            Self::Underscore => underscore_winner(upper, lower),
            Self::Hierarchy => hierarchy_winner(upper, lower),
            Self::HorizontalLine => {
                matches!((upper, lower), ('-', '_') | ('_', '-')).then_some('=')
            }
            Self::VerticalLine => (upper == '|' && lower == '|').then_some('|'),
        }
    }
}

impl HorizontalLayout {
    /// Decodes `Old_Layout` and the optional `Full_Layout` header parameters.
    ///
    /// When `Full_Layout` is present it determines the layout; `Old_Layout` is only
    /// range-checked.
    ///
    /// # Errors
    /// Returns `Err` if `Old_Layout` is outside `-1..=63` or `Full_Layout` exceeds 32767.
    pub fn decode(old_layout: i32, full_layout: Option<u32>) -> Result<Self, LayoutDecodeError> {
        if !(-1..=63).contains(&old_layout) {
            return Err(LayoutDecodeError::InvalidOld(old_layout));
        }
        if let Some(full) = full_layout {
            if full > 32767 {
                return Err(LayoutDecodeError::InvalidFull(full));
            }
            let mode = if full & 128 != 0 {
                LayoutMode::Smushing
            } else if full & 64 != 0 {
                LayoutMode::Fitting
            } else {
                LayoutMode::FullSize
            };
            return Ok(Self::new(mode, HorizontalRule::from_bits(full)));
        }
        let layout = match old_layout {
            -1 => Self::new(LayoutMode::FullSize, EnumSet::empty()),
            0 => Self::new(LayoutMode::Fitting, EnumSet::empty()),
            bits => Self::new(LayoutMode::Smushing, HorizontalRule::from_bits(bits as u32)),
        };
        Ok(layout)
    }

    /// Merges two overlapping sub-characters, or returns `None` if they cannot smush.
    ///
    /// `left` and `right` are in screen order. `later` says which of them belongs to the
    /// FIGcharacter added last, which wins under universal smushing.
    pub(crate) fn smush(
        &self,
        left: char,
        right: char,
        later: Side,
        hardblank: Hardblank,
    ) -> Option<char> {
        if left == ' ' {
            return Some(right);
        }
        if right == ' ' {
            return Some(left);
        }
        if self.mode != LayoutMode::Smushing {
            return None;
        }
        if self.rules.is_empty() {
            if hardblank == left {
                return Some(right);
            }
            if hardblank == right {
                return Some(left);
            }
            return Some(match later {
                Side::Left => left,
                Side::Right => right,
            });
        }
        // Hardblanks only ever smush with each other, and only under rule 6.
        if hardblank == left || hardblank == right {
            return HorizontalRule::Hardblank.apply(left, right, hardblank)
                .filter(|_| self.rules.contains(HorizontalRule::Hardblank));
        }
        self.rules
            .iter()
            .find_map(|rule| rule.apply(left, right, hardblank))
    }
}

impl VerticalLayout {
    /// Decodes the vertical half of `Full_Layout`. Without it, vertical layout is full size.
    pub fn decode(full_layout: Option<u32>) -> Self {
        let Some(full) = full_layout else {
            return Self::new(LayoutMode::FullSize, EnumSet::empty());
        };
        let mode = if full & 16384 != 0 {
            LayoutMode::Smushing
        } else if full & 8192 != 0 {
            LayoutMode::Fitting
        } else {
            LayoutMode::FullSize
        };
        Self::new(mode, VerticalRule::from_bits(full >> 8))
    }

    /// Merges an upper and a lower sub-character, or returns `None` if they cannot smush.
    pub(crate) fn smush(&self, upper: char, lower: char) -> Option<char> {
        if upper == ' ' {
            return Some(lower);
        }
        if lower == ' ' {
            return Some(upper);
        }
        if self.mode != LayoutMode::Smushing {
            return None;
        }
        if self.rules.is_empty() {
            return Some(lower);
        }
        self.rules.iter().find_map(|rule| rule.apply(upper, lower))
    }
}

/// Which of two sub-characters in screen order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}

#[derive(Debug, Error)]
pub enum LayoutDecodeError {
    #[error("Old_Layout {0} is outside -1..=63")]
    InvalidOld(i32),
    #[error("Full_Layout {0} is outside 0..=32767")]
    InvalidFull(u32),
}
