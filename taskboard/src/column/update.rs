//! UpdateColumn command

use crate::context::BoardContext;
use crate::error::{require_title, BoardError, Result};
use crate::processor::logged;
use crate::types::{Column, ColumnColor, ColumnId};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use taskboard_operations::{operation, Execute, ExecutionResult};

/// Rename and/or recolor a column. The id stays fixed so tasks keep their
/// bucket.
#[operation(
    verb = "update",
    noun = "column",
    description = "Rename or recolor a column",
    permission = "manage_columns"
)]
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpdateColumn {
    /// The column ID to update
    pub id: ColumnId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<ColumnColor>,
}

impl UpdateColumn {
    pub fn new(id: impl Into<ColumnId>) -> Self {
        Self {
            id: id.into(),
            title: None,
            color: None,
        }
    }

    /// Set the new title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the new color
    pub fn with_color(mut self, color: ColumnColor) -> Self {
        self.color = Some(color);
        self
    }

    fn apply(&self, ctx: &mut BoardContext) -> Result<Column> {
        let title = self
            .title
            .as_deref()
            .map(|t| require_title("column", t))
            .transpose()?;

        let column = ctx.find_column_mut(&self.id)?;
        if let Some(title) = title {
            column.title = title;
        }
        if let Some(color) = self.color {
            column.color = color;
        }
        Ok(column.clone())
    }
}

impl Execute<BoardContext, BoardError> for UpdateColumn {
    type Output = Column;

    fn execute(&self, ctx: &mut BoardContext) -> ExecutionResult<Column, BoardError> {
        let started = Instant::now();
        logged(self, started, self.apply(ctx))
    }
}
