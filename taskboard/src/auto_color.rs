//! Color assignment for new columns.
//!
//! A new column takes the first palette color no existing column uses. Once
//! the palette is exhausted the pick cycles by column count.

use crate::types::{Column, ColumnColor};

/// Pick a color for a column appended after `existing`.
pub fn next_color(existing: &[Column]) -> ColumnColor {
    ColumnColor::PALETTE
        .into_iter()
        .find(|color| !existing.iter().any(|c| c.color == *color))
        .unwrap_or_else(|| cyclic_color(existing.len()))
}

/// Palette entry for position `index`, wrapping around.
pub fn cyclic_color(index: usize) -> ColumnColor {
    ColumnColor::PALETTE[index % ColumnColor::PALETTE.len()]
}
