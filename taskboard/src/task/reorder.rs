//! ReorderTasks command

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::processor::logged;
use crate::types::{ColumnId, Task, TaskId};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use taskboard_operations::{operation, Execute, ExecutionResult};

/// Reorder a bucket by dropping `active` onto `over`'s position
///
/// `active` is removed from the bucket and reinserted at the index `over`
/// held before the removal (a splice, not a swap).
#[operation(
    verb = "reorder",
    noun = "tasks",
    description = "Move a task onto another task's position within a column",
    permission = "move_task"
)]
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReorderTasks {
    pub column: ColumnId,
    /// The dragged task
    pub active: TaskId,
    /// The task it was dropped on
    pub over: TaskId,
}

impl ReorderTasks {
    pub fn new(
        column: impl Into<ColumnId>,
        active: impl Into<TaskId>,
        over: impl Into<TaskId>,
    ) -> Self {
        Self {
            column: column.into(),
            active: active.into(),
            over: over.into(),
        }
    }

    /// Returns the bucket in its new order
    pub(crate) fn apply(&self, ctx: &mut BoardContext) -> Result<Vec<Task>> {
        ctx.find_column(&self.column)?;
        let mut order = ctx.bucket_ids(&self.column);

        let from = position_of(&order, &self.active)?;
        let to = position_of(&order, &self.over)?;

        if from != to {
            let active = order.remove(from);
            order.insert(to, active);
            ctx.assign_bucket(&self.column, &order);

            let now = ctx.now();
            ctx.find_task_mut(&self.active)?.touch(now);
        }

        Ok(ctx.bucket(&self.column).into_iter().cloned().collect())
    }
}

fn position_of(order: &[TaskId], id: &TaskId) -> Result<usize> {
    order
        .iter()
        .position(|t| t == id)
        .ok_or_else(|| BoardError::TaskNotFound { id: id.to_string() })
}

impl Execute<BoardContext, BoardError> for ReorderTasks {
    type Output = Vec<Task>;

    fn execute(&self, ctx: &mut BoardContext) -> ExecutionResult<Vec<Task>, BoardError> {
        let started = Instant::now();
        logged(self, started, self.apply(ctx))
    }
}
