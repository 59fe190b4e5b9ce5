//! ListColumns command

use crate::context::BoardContext;
use crate::error::BoardError;
use crate::types::Column;
use serde::{Deserialize, Serialize};
use taskboard_operations::{operation, Execute, ExecutionResult};

/// List all columns in board order
#[operation(verb = "list", noun = "columns", description = "List all columns in board order")]
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ListColumns;

impl Execute<BoardContext, BoardError> for ListColumns {
    type Output = Vec<Column>;

    fn execute(&self, ctx: &mut BoardContext) -> ExecutionResult<Vec<Column>, BoardError> {
        ExecutionResult::unlogged(Ok(ctx.columns().to_vec()))
    }
}
