//! Horizontal assembly of one FIGline.

use crate::font::{Glyph, Hardblank, PrintDirection};
use crate::layout::{HorizontalLayout, LayoutMode, Side};

/// A row-aligned strip of FIGcharacters under construction.
///
/// For right-to-left text the strip is built mirrored (glyphs reversed, appended on the right)
/// and flipped back by [`FigLine::into_rows`].
#[derive(Debug, Clone)]
pub(crate) struct FigLine {
    rows: Vec<Vec<char>>,
    glyphs: usize,
    last_width: usize,
}

/// Horizontal layout settings shared by every FIGline of one render.
pub(crate) struct Composer {
    pub layout: HorizontalLayout,
    pub hardblank: Hardblank,
    pub direction: PrintDirection,
}

impl FigLine {
    pub(crate) fn new(height: usize) -> Self {
        Self {
            rows: vec![Vec::new(); height],
            glyphs: 0,
            last_width: 0,
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.glyphs == 0
    }

    /// Printed width: columns up to the last sub-character that is neither blank nor hardblank.
    pub(crate) fn visible_width(&self, hardblank: Hardblank) -> usize {
        self.rows
            .iter()
            .map(|row| {
                row.iter()
                    .rposition(|&c| c != ' ' && hardblank != c)
                    .map_or(0, |last| last + 1)
            })
            .max()
            .unwrap_or(0)
    }

    pub(crate) fn into_rows(self, direction: PrintDirection) -> Vec<Vec<char>> {
        match direction {
            PrintDirection::LeftToRight => self.rows,
            PrintDirection::RightToLeft => self
                .rows
                .into_iter()
                .map(|row| row.into_iter().rev().collect())
                .collect(),
        }
    }
}

impl Composer {
    /// Orders a (line, glyph) sub-character pair by screen position.
    fn on_screen(&self, line: char, glyph: char) -> (char, char, Side) {
        match self.direction {
            PrintDirection::LeftToRight => (line, glyph, Side::Right),
            PrintDirection::RightToLeft => (glyph, line, Side::Left),
        }
    }

    fn merge(&self, line: char, glyph: char) -> Option<char> {
        let (left, right, later) = self.on_screen(line, glyph);
        self.layout.smush(left, right, later, self.hardblank)
    }

    /// Columns the glyph may slide into the line.
    ///
    /// Per row this is the blank gap between the line's last visible sub-character and the
    /// glyph's first one, plus one when smushing can merge those two. Never more than the
    /// glyph's width.
    fn overlap(&self, line: &FigLine, glyph: &Glyph) -> usize {
        if self.layout.mode() == LayoutMode::FullSize {
            return 0;
        }
        let smushable_widths = line.last_width >= 2 && glyph.width() >= 2;
        let mut amount = glyph.width();
        for (row, glyph_row) in line.rows.iter().zip(glyph.rows()) {
            let Some(start) = glyph_row.iter().position(|&c| c != ' ') else {
                continue;
            };
            let row_amount = match row.iter().rposition(|&c| c != ' ') {
                None => row.len() + start,
                Some(end) => {
                    let gap = row.len() - 1 - end + start;
                    let merges = self.layout.mode() == LayoutMode::Smushing
                        && smushable_widths
                        && self.merge(row[end], glyph_row[start]).is_some();
                    gap + usize::from(merges)
                }
            };
            amount = amount.min(row_amount);
        }
        amount
    }

    /// Returns `line` with `glyph` appended at the closest allowed distance.
    pub(crate) fn append(&self, line: &FigLine, glyph: &Glyph) -> FigLine {
        let glyph = match self.direction {
            PrintDirection::LeftToRight => glyph.clone(),
            PrintDirection::RightToLeft => glyph.mirrored(),
        };
        let amount = self.overlap(line, &glyph);
        let mut next = line.clone();
        for (row, glyph_row) in next.rows.iter_mut().zip(glyph.rows()) {
            let len = row.len();
            for (k, &sub) in glyph_row.iter().enumerate().take(amount) {
                // Columns that would land before the start of the line are blank; drop them.
                let Some(pos) = (len + k).checked_sub(amount) else {
                    continue;
                };
                row[pos] = self.merge(row[pos], sub).unwrap_or(sub);
            }
            row.extend_from_slice(glyph_row.get(amount..).unwrap_or_default());
        }
        next.glyphs += 1;
        next.last_width = glyph.width();
        next
    }
}
