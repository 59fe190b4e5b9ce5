//! ReorderColumns command

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::processor::logged;
use crate::types::Column;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use taskboard_operations::{operation, Execute, ExecutionResult};

/// Move the column at `from` to position `to`
#[operation(
    verb = "reorder",
    noun = "columns",
    description = "Move a column to a new position on the board",
    permission = "manage_columns"
)]
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReorderColumns {
    pub from: usize,
    pub to: usize,
}

impl ReorderColumns {
    pub fn new(from: usize, to: usize) -> Self {
        Self { from, to }
    }

    /// Returns the column list in its new order
    fn apply(&self, ctx: &mut BoardContext) -> Result<Vec<Column>> {
        let columns = ctx.columns_mut();
        let len = columns.len();
        for index in [self.from, self.to] {
            if index >= len {
                return Err(BoardError::IndexOutOfRange { index, len });
            }
        }

        let column = columns.remove(self.from);
        columns.insert(self.to, column);
        Ok(columns.clone())
    }
}

impl Execute<BoardContext, BoardError> for ReorderColumns {
    type Output = Vec<Column>;

    fn execute(&self, ctx: &mut BoardContext) -> ExecutionResult<Vec<Column>, BoardError> {
        let started = Instant::now();
        logged(self, started, self.apply(ctx))
    }
}
