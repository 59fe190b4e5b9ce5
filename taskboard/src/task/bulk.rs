//! Bulk task commands
//!
//! Each bulk command applies the single-task command to every id in turn.
//! Ids that no longer exist are skipped and reported, not treated as errors.

use crate::context::BoardContext;
use crate::error::{BoardError, Result, StaleExt};
use crate::processor::logged;
use crate::task::{DeleteTask, MoveTask};
use crate::types::{ColumnId, Priority, TaskId};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use taskboard_operations::{operation, Execute, ExecutionResult};

/// Which ids a bulk command applied to
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkOutcome {
    pub applied: Vec<TaskId>,
    pub skipped: Vec<TaskId>,
}

impl BulkOutcome {
    fn record(&mut self, id: &TaskId, applied: bool) {
        if applied {
            self.applied.push(id.clone());
        } else {
            self.skipped.push(id.clone());
        }
    }
}

/// Move several tasks to the end of one column, in the given order
#[operation(
    verb = "move",
    noun = "tasks",
    description = "Move several tasks to the end of a column",
    permission = "move_task"
)]
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BulkMoveTasks {
    pub ids: Vec<TaskId>,
    pub column: ColumnId,
}

impl BulkMoveTasks {
    pub fn new(ids: Vec<TaskId>, column: impl Into<ColumnId>) -> Self {
        Self {
            ids,
            column: column.into(),
        }
    }

    fn apply(&self, ctx: &mut BoardContext) -> Result<BulkOutcome> {
        ctx.find_column(&self.column)?;
        let mut outcome = BulkOutcome::default();
        for id in &self.ids {
            let moved = MoveTask::to_column(id.clone(), self.column.clone())
                .apply(ctx)
                .ignore_stale()?;
            outcome.record(id, moved.is_some());
        }
        Ok(outcome)
    }
}

impl Execute<BoardContext, BoardError> for BulkMoveTasks {
    type Output = BulkOutcome;

    fn execute(&self, ctx: &mut BoardContext) -> ExecutionResult<BulkOutcome, BoardError> {
        let started = Instant::now();
        logged(self, started, self.apply(ctx))
    }
}

/// Set the priority of several tasks
#[operation(
    verb = "prioritize",
    noun = "tasks",
    description = "Set the priority of several tasks",
    permission = "edit_task"
)]
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BulkSetPriority {
    pub ids: Vec<TaskId>,
    pub priority: Priority,
}

impl BulkSetPriority {
    pub fn new(ids: Vec<TaskId>, priority: Priority) -> Self {
        Self { ids, priority }
    }

    fn apply(&self, ctx: &mut BoardContext) -> Result<BulkOutcome> {
        let now = ctx.now();
        let mut outcome = BulkOutcome::default();
        for id in &self.ids {
            let updated = ctx
                .find_task_mut(id)
                .map(|task| {
                    task.priority = self.priority;
                    task.touch(now);
                })
                .ignore_stale()?;
            outcome.record(id, updated.is_some());
        }
        Ok(outcome)
    }
}

impl Execute<BoardContext, BoardError> for BulkSetPriority {
    type Output = BulkOutcome;

    fn execute(&self, ctx: &mut BoardContext) -> ExecutionResult<BulkOutcome, BoardError> {
        let started = Instant::now();
        logged(self, started, self.apply(ctx))
    }
}

/// Delete several tasks
#[operation(
    verb = "delete",
    noun = "tasks",
    description = "Delete several tasks",
    permission = "delete_task"
)]
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BulkDeleteTasks {
    pub ids: Vec<TaskId>,
}

impl BulkDeleteTasks {
    pub fn new(ids: Vec<TaskId>) -> Self {
        Self { ids }
    }

    fn apply(&self, ctx: &mut BoardContext) -> Result<BulkOutcome> {
        let mut outcome = BulkOutcome::default();
        for id in &self.ids {
            let deleted = DeleteTask::new(id.clone()).apply(ctx).ignore_stale()?;
            outcome.record(id, deleted.is_some());
        }
        Ok(outcome)
    }
}

impl Execute<BoardContext, BoardError> for BulkDeleteTasks {
    type Output = BulkOutcome;

    fn execute(&self, ctx: &mut BoardContext) -> ExecutionResult<BulkOutcome, BoardError> {
        let started = Instant::now();
        logged(self, started, self.apply(ctx))
    }
}
