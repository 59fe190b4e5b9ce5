//! GetBoard command

use crate::context::BoardContext;
use crate::error::BoardError;
use crate::filter::TaskFilters;
use crate::types::{Column, Task};
use serde::{Deserialize, Serialize};
use taskboard_operations::{operation, Execute, ExecutionResult};

/// One column with its visible tasks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnView {
    pub column: Column,
    /// Tasks passing the filters, by `order_index`
    pub tasks: Vec<Task>,
    /// Bucket size before filtering
    pub total: usize,
}

/// The board as rendered: columns in order, each with its filtered bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardView {
    pub columns: Vec<ColumnView>,
    pub filtered: bool,
}

/// Get the board view
#[operation(verb = "get", noun = "board", description = "Get columns with their filtered tasks")]
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GetBoard {
    #[serde(default)]
    pub filters: TaskFilters,
}

impl GetBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filters(mut self, filters: TaskFilters) -> Self {
        self.filters = filters;
        self
    }

    fn view(&self, ctx: &BoardContext) -> BoardView {
        let columns = ctx
            .columns()
            .iter()
            .map(|column| ColumnView {
                column: column.clone(),
                tasks: ctx
                    .tasks_by_status(&self.filters, &column.id)
                    .into_iter()
                    .cloned()
                    .collect(),
                total: ctx.bucket_len(&column.id),
            })
            .collect();
        BoardView {
            columns,
            filtered: self.filters.is_active(),
        }
    }
}

impl Execute<BoardContext, BoardError> for GetBoard {
    type Output = BoardView;

    fn execute(&self, ctx: &mut BoardContext) -> ExecutionResult<BoardView, BoardError> {
        ExecutionResult::unlogged(Ok(self.view(ctx)))
    }
}
