//! Board-level types: Column, ColumnColor

use super::ids::ColumnId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Color token for a column header. The palette is fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnColor {
    Slate,
    Blue,
    Amber,
    Emerald,
    Violet,
    Rose,
    Cyan,
    Orange,
}

impl ColumnColor {
    /// The whole palette, in auto-assignment order
    pub const PALETTE: [ColumnColor; 8] = [
        ColumnColor::Slate,
        ColumnColor::Blue,
        ColumnColor::Amber,
        ColumnColor::Emerald,
        ColumnColor::Violet,
        ColumnColor::Rose,
        ColumnColor::Cyan,
        ColumnColor::Orange,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Slate => "slate",
            Self::Blue => "blue",
            Self::Amber => "amber",
            Self::Emerald => "emerald",
            Self::Violet => "violet",
            Self::Rose => "rose",
            Self::Cyan => "cyan",
            Self::Orange => "orange",
        }
    }
}

impl fmt::Display for ColumnColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A column defines a workflow stage. Its id is the bucket key tasks refer to.
///
/// Column order is the position in the board's column list, not a field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
    pub color: ColumnColor,
}

impl Column {
    pub fn new(id: impl Into<ColumnId>, title: impl Into<String>, color: ColumnColor) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            color,
        }
    }

    /// The built-in layout for a fresh board
    pub fn default_columns() -> Vec<Column> {
        vec![
            Column::new("backlog", "Backlog", ColumnColor::Slate),
            Column::new("ready", "Ready", ColumnColor::Blue),
            Column::new("in_progress", "In Progress", ColumnColor::Amber),
            Column::new("completed", "Completed", ColumnColor::Emerald),
        ]
    }
}

/// Derive a column id slug from a title: "In Progress" -> "in_progress".
pub fn column_slug(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for ch in title.trim().chars() {
        if ch.is_alphanumeric() {
            slug.extend(ch.to_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('_') {
            slug.push('_');
        }
    }
    while slug.ends_with('_') {
        slug.pop();
    }
    if slug.is_empty() {
        slug.push_str("column");
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_columns() {
        let cols = Column::default_columns();
        assert_eq!(cols.len(), 4);
        assert_eq!(cols[0].id.as_str(), "backlog");
        assert_eq!(cols[2].id.as_str(), "in_progress");
        assert_eq!(cols[3].title, "Completed");
    }

    #[test]
    fn test_column_slug() {
        assert_eq!(column_slug("In Progress"), "in_progress");
        assert_eq!(column_slug("  Code   Review! "), "code_review");
        assert_eq!(column_slug("To-Do"), "to_do");
        assert_eq!(column_slug("???"), "column");
    }

    #[test]
    fn test_color_serialization() {
        let col = Column::new("done", "Done", ColumnColor::Emerald);
        let json = serde_json::to_value(&col).unwrap();
        assert_eq!(json["color"], "emerald");
        assert_eq!(json["id"], "done");
    }
}
