//! ListTasks command

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::filter::TaskFilters;
use crate::types::{ColumnId, Task};
use serde::{Deserialize, Serialize};
use taskboard_operations::{operation, Execute, ExecutionResult};

/// List tasks passing a filter set, in board order
#[operation(
    verb = "list",
    noun = "tasks",
    description = "List tasks, optionally restricted to a column and filtered"
)]
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ListTasks {
    /// Only this bucket
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<ColumnId>,
    #[serde(default)]
    pub filters: TaskFilters,
}

impl ListTasks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_column(mut self, column: impl Into<ColumnId>) -> Self {
        self.column = Some(column.into());
        self
    }

    pub fn with_filters(mut self, filters: TaskFilters) -> Self {
        self.filters = filters;
        self
    }

    fn collect(&self, ctx: &BoardContext) -> Result<Vec<Task>> {
        let columns: Vec<ColumnId> = match &self.column {
            Some(id) => vec![ctx.find_column(id)?.id.clone()],
            None => ctx.columns().iter().map(|c| c.id.clone()).collect(),
        };

        Ok(columns
            .iter()
            .flat_map(|column| ctx.tasks_by_status(&self.filters, column))
            .cloned()
            .collect())
    }
}

impl Execute<BoardContext, BoardError> for ListTasks {
    type Output = Vec<Task>;

    fn execute(&self, ctx: &mut BoardContext) -> ExecutionResult<Vec<Task>, BoardError> {
        ExecutionResult::unlogged(self.collect(ctx))
    }
}
