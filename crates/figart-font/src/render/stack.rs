//! Vertical stacking of finished FIGlines.

use crate::layout::{LayoutMode, VerticalLayout};

fn sub_at(row: &[char], col: usize) -> char {
    row.get(col).copied().unwrap_or(' ')
}

/// Rows the lower block may slide up into the upper one.
fn overlap(layout: VerticalLayout, upper: &[Vec<char>], lower: &[Vec<char>]) -> usize {
    if layout.mode() == LayoutMode::FullSize || upper.is_empty() {
        return 0;
    }
    let columns = upper.iter().chain(lower).map(Vec::len).max().unwrap_or(0);
    let mut amount = lower.len().min(upper.len());
    for col in 0..columns {
        let Some(start) = lower.iter().position(|row| sub_at(row, col) != ' ') else {
            continue;
        };
        let column_amount = match upper.iter().rposition(|row| sub_at(row, col) != ' ') {
            None => upper.len() + start,
            Some(end) => {
                let gap = upper.len() - 1 - end + start;
                let merges = layout.mode() == LayoutMode::Smushing
                    && layout
                        .smush(sub_at(&upper[end], col), sub_at(&lower[start], col))
                        .is_some();
                gap + usize::from(merges)
            }
        };
        amount = amount.min(column_amount);
    }
    amount
}

/// Appends `lower` under `upper`, fitting or smushing according to `layout`.
pub(crate) fn stack(layout: VerticalLayout, upper: &mut Vec<Vec<char>>, lower: Vec<Vec<char>>) {
    let amount = overlap(layout, upper, &lower);
    let base = upper.len() - amount;
    let mut lower = lower.into_iter();
    for (offset, row) in lower.by_ref().take(amount).enumerate() {
        let target = &mut upper[base + offset];
        let width = target.len().max(row.len());
        let merged: Vec<char> = (0..width)
            .map(|col| {
                let (above, below) = (sub_at(target, col), sub_at(&row, col));
                layout.smush(above, below).unwrap_or(below)
            })
            .collect();
        *target = merged;
    }
    upper.extend(lower);
}

#[cfg(test)]
mod tests {
    use enumset::EnumSet;

    use super::*;
    use crate::layout::VerticalRule;

    fn rows(lines: &[&str]) -> Vec<Vec<char>> {
        lines.iter().map(|line| line.chars().collect()).collect()
    }

    #[test]
    fn full_size_appends() {
        let layout = VerticalLayout::new(LayoutMode::FullSize, EnumSet::empty());
        let mut upper = rows(&["a", " "]);
        stack(layout, &mut upper, rows(&[" ", "b"]));
        assert_eq!(upper, rows(&["a", " ", " ", "b"]));
    }

    #[test]
    fn fitting_closes_blank_rows() {
        let layout = VerticalLayout::new(LayoutMode::Fitting, EnumSet::empty());
        let mut upper = rows(&["a", " "]);
        stack(layout, &mut upper, rows(&[" ", "b"]));
        assert_eq!(upper, rows(&["a", "b"]));
    }

    #[test]
    fn smushing_merges_one_row() {
        let layout = VerticalLayout::new(LayoutMode::Smushing, VerticalRule::HorizontalLine.into());
        let mut upper = rows(&["a", "-"]);
        stack(layout, &mut upper, rows(&["_", "b"]));
        assert_eq!(upper, rows(&["a", "=", "b"]));
    }

    #[test]
    fn first_block_is_kept_whole() {
        let layout = VerticalLayout::new(LayoutMode::Fitting, EnumSet::empty());
        let mut upper = Vec::new();
        stack(layout, &mut upper, rows(&[" ", "b"]));
        assert_eq!(upper, rows(&[" ", "b"]));
    }
}
