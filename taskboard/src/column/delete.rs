//! DeleteColumn command

use crate::column::MigrateTasks;
use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::processor::logged;
use crate::types::{Column, ColumnId};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use taskboard_operations::{operation, Execute, ExecutionResult};

/// Delete a column, first moving its tasks to `migrate_to`
///
/// A column holding tasks cannot be deleted without a target, and the
/// last column can never be deleted.
#[operation(
    verb = "delete",
    noun = "column",
    description = "Delete a column, migrating its tasks to another column",
    permission = "manage_columns"
)]
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeleteColumn {
    /// The column ID to delete
    pub id: ColumnId,
    /// Where the column's tasks go
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub migrate_to: Option<ColumnId>,
}

impl DeleteColumn {
    pub fn new(id: impl Into<ColumnId>) -> Self {
        Self {
            id: id.into(),
            migrate_to: None,
        }
    }

    pub fn migrating_to(mut self, target: impl Into<ColumnId>) -> Self {
        self.migrate_to = Some(target.into());
        self
    }

    /// Returns the removed column
    fn apply(&self, ctx: &mut BoardContext) -> Result<Column> {
        let position = ctx.column_position(&self.id)?;
        if ctx.columns().len() == 1 {
            return Err(BoardError::LastColumn {
                id: self.id.to_string(),
            });
        }

        let count = ctx.bucket_len(&self.id);
        match &self.migrate_to {
            Some(target) if target == &self.id => {
                return Err(BoardError::invalid_value(
                    "migrate_to",
                    "cannot migrate tasks into the column being deleted",
                ));
            }
            Some(target) => {
                MigrateTasks::new(self.id.clone(), target.clone()).apply(ctx)?;
            }
            None if count > 0 => {
                return Err(BoardError::MigrationTargetRequired {
                    id: self.id.to_string(),
                    count,
                });
            }
            None => {}
        }

        Ok(ctx.columns_mut().remove(position))
    }
}

impl Execute<BoardContext, BoardError> for DeleteColumn {
    type Output = Column;

    fn execute(&self, ctx: &mut BoardContext) -> ExecutionResult<Column, BoardError> {
        let started = Instant::now();
        logged(self, started, self.apply(ctx))
    }
}
