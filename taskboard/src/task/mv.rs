//! MoveTask command

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::processor::logged;
use crate::types::{ColumnId, Task, TaskId};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use taskboard_operations::{operation, Execute, ExecutionResult};

/// Move a task to a bucket and index
///
/// The task is spliced out of its current bucket and inserted into the
/// target bucket at `index`, then both buckets are renumbered `0..N-1`.
/// `index` is clamped to the size of the target bucket (without the moved
/// task); `None` appends. A move within the same bucket is a reorder.
#[operation(
    verb = "move",
    noun = "task",
    description = "Move a task to a different column or position",
    permission = "move_task"
)]
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MoveTask {
    /// The task ID to move
    pub id: TaskId,
    /// Target bucket
    pub column: ColumnId,
    /// Target position within the bucket; `None` appends
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
}

impl MoveTask {
    /// Move to `index` in `column`
    pub fn new(id: impl Into<TaskId>, column: impl Into<ColumnId>, index: usize) -> Self {
        Self {
            id: id.into(),
            column: column.into(),
            index: Some(index),
        }
    }

    /// Move to the end of `column`
    pub fn to_column(id: impl Into<TaskId>, column: impl Into<ColumnId>) -> Self {
        Self {
            id: id.into(),
            column: column.into(),
            index: None,
        }
    }

    pub(crate) fn apply(&self, ctx: &mut BoardContext) -> Result<Task> {
        ctx.find_column(&self.column)?;
        let source = ctx.find_task(&self.id)?.status.clone();

        let mut source_order = ctx.bucket_ids(&source);
        source_order.retain(|id| id != &self.id);

        if source == self.column {
            let index = self.clamped(source_order.len());
            source_order.insert(index, self.id.clone());
            ctx.assign_bucket(&source, &source_order);
        } else {
            let mut target_order = ctx.bucket_ids(&self.column);
            let index = self.clamped(target_order.len());
            target_order.insert(index, self.id.clone());
            ctx.assign_bucket(&source, &source_order);
            ctx.assign_bucket(&self.column, &target_order);
        }

        let now = ctx.now();
        let task = ctx.find_task_mut(&self.id)?;
        task.touch(now);
        Ok(task.clone())
    }

    fn clamped(&self, len: usize) -> usize {
        self.index.map_or(len, |i| i.min(len))
    }
}

impl Execute<BoardContext, BoardError> for MoveTask {
    type Output = Task;

    fn execute(&self, ctx: &mut BoardContext) -> ExecutionResult<Task, BoardError> {
        let started = Instant::now();
        logged(self, started, self.apply(ctx))
    }
}
