//! GetTask command

use crate::context::BoardContext;
use crate::error::BoardError;
use crate::types::{Task, TaskId};
use serde::{Deserialize, Serialize};
use taskboard_operations::{operation, Execute, ExecutionResult};

/// Get a task by ID
#[operation(verb = "get", noun = "task", description = "Retrieve a task by ID")]
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GetTask {
    /// The task ID to retrieve
    pub id: TaskId,
}

impl GetTask {
    pub fn new(id: impl Into<TaskId>) -> Self {
        Self { id: id.into() }
    }
}

impl Execute<BoardContext, BoardError> for GetTask {
    type Output = Task;

    fn execute(&self, ctx: &mut BoardContext) -> ExecutionResult<Task, BoardError> {
        ExecutionResult::unlogged(ctx.find_task(&self.id).cloned())
    }
}
