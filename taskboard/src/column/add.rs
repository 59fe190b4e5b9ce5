//! AddColumn command

use crate::auto_color::next_color;
use crate::context::BoardContext;
use crate::error::{require_title, BoardError, Result};
use crate::presets::unique_column_id;
use crate::processor::logged;
use crate::types::{Column, ColumnColor};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use taskboard_operations::{operation, Execute, ExecutionResult};

/// Append a column to the board
#[operation(
    verb = "add",
    noun = "column",
    description = "Add a column to the right end of the board",
    permission = "manage_columns"
)]
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AddColumn {
    pub title: String,
    /// Explicit color; otherwise the first unused palette color
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<ColumnColor>,
}

impl AddColumn {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            color: None,
        }
    }

    pub fn with_color(mut self, color: ColumnColor) -> Self {
        self.color = Some(color);
        self
    }

    fn apply(&self, ctx: &mut BoardContext) -> Result<Column> {
        let title = require_title("column", &self.title)?;
        let id = unique_column_id(ctx.columns(), &title);
        let color = self.color.unwrap_or_else(|| next_color(ctx.columns()));

        let column = Column::new(id, title, color);
        ctx.columns_mut().push(column.clone());
        Ok(column)
    }
}

impl Execute<BoardContext, BoardError> for AddColumn {
    type Output = Column;

    fn execute(&self, ctx: &mut BoardContext) -> ExecutionResult<Column, BoardError> {
        let started = Instant::now();
        logged(self, started, self.apply(ctx))
    }
}
