//! Built-in board presets.
//!
//! Presets are named column layouts compiled into the crate from
//! `builtin/presets.yaml`.

use crate::auto_color::cyclic_color;
use crate::error::{BoardError, Result};
use crate::types::{column_slug, Column, ColumnId};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

const BUILTIN_PRESETS: &str = include_str!("../builtin/presets.yaml");

/// A predefined column layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardPreset {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Column titles, left to right
    pub columns: Vec<String>,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub color_scheme: String,
}

impl BoardPreset {
    /// Materialize the preset's columns. Ids are title slugs, made unique
    /// within the preset; colors walk the palette.
    pub fn build_columns(&self) -> Vec<Column> {
        let mut columns: Vec<Column> = Vec::with_capacity(self.columns.len());
        for (i, title) in self.columns.iter().enumerate() {
            let id = unique_column_id(&columns, title);
            columns.push(Column::new(id, title.clone(), cyclic_color(i)));
        }
        columns
    }
}

/// Parse a YAML list of presets
pub fn parse_presets(yaml: &str) -> Result<Vec<BoardPreset>> {
    let presets: Vec<BoardPreset> = serde_yaml_ng::from_str(yaml)?;
    for preset in &presets {
        if preset.columns.is_empty() {
            return Err(BoardError::invalid_value(
                "preset",
                format!("preset '{}' has no columns", preset.id),
            ));
        }
    }
    Ok(presets)
}

/// All built-in presets
pub fn builtin_presets() -> &'static [BoardPreset] {
    static PRESETS: OnceLock<Vec<BoardPreset>> = OnceLock::new();
    PRESETS.get_or_init(|| parse_presets(BUILTIN_PRESETS).expect("invalid built-in presets"))
}

/// Look up a built-in preset by id
pub fn find_preset(id: &str) -> Result<&'static BoardPreset> {
    builtin_presets()
        .iter()
        .find(|p| p.id == id)
        .ok_or_else(|| BoardError::PresetNotFound { id: id.to_string() })
}

/// A column id for `title` that no column in `existing` uses yet:
/// the slug, then `slug_2`, `slug_3`, ...
pub fn unique_column_id(existing: &[Column], title: &str) -> ColumnId {
    let base = column_slug(title);
    let taken = |candidate: &str| existing.iter().any(|c| c.id.as_str() == candidate);
    if !taken(&base) {
        return ColumnId::from_string(base);
    }
    let mut n = 2;
    loop {
        let candidate = format!("{}_{}", base, n);
        if !taken(&candidate) {
            return ColumnId::from_string(candidate);
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_presets_load() {
        let presets = builtin_presets();
        let ids: Vec<&str> = presets.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["sdlc", "marketing", "content", "kanban"]);
    }

    #[test]
    fn test_find_preset() {
        let preset = find_preset("kanban").unwrap();
        assert_eq!(preset.columns, vec!["To Do", "Doing", "Done"]);
        assert!(matches!(
            find_preset("scrum"),
            Err(BoardError::PresetNotFound { .. })
        ));
    }

    #[test]
    fn test_build_columns() {
        let columns = find_preset("sdlc").unwrap().build_columns();
        assert_eq!(columns.len(), 6);
        assert_eq!(columns[2].id.as_str(), "in_progress");
        assert_eq!(columns[3].id.as_str(), "code_review");
        assert_ne!(columns[0].color, columns[1].color);
    }

    #[test]
    fn test_unique_column_id() {
        let existing = vec![
            Column::new("done", "Done", crate::types::ColumnColor::Slate),
            Column::new("done_2", "Done", crate::types::ColumnColor::Blue),
        ];
        assert_eq!(unique_column_id(&existing, "Done").as_str(), "done_3");
        assert_eq!(unique_column_id(&existing, "Doing").as_str(), "doing");
    }

    #[test]
    fn test_parse_rejects_empty_layout() {
        let yaml = "- id: empty\n  name: Empty\n  description: nothing\n  columns: []\n";
        assert!(parse_presets(yaml).is_err());
    }
}
