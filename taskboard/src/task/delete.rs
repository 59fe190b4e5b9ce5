//! DeleteTask command

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::processor::logged;
use crate::types::{Task, TaskId};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use taskboard_operations::{operation, Execute, ExecutionResult};

/// Delete a task and close the gap it leaves in its bucket
#[operation(
    verb = "delete",
    noun = "task",
    description = "Delete a task",
    permission = "delete_task"
)]
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeleteTask {
    /// The task ID to delete
    pub id: TaskId,
}

impl DeleteTask {
    pub fn new(id: impl Into<TaskId>) -> Self {
        Self { id: id.into() }
    }

    /// Returns the removed task
    pub(crate) fn apply(&self, ctx: &mut BoardContext) -> Result<Task> {
        let task = ctx.remove_task(&self.id)?;
        ctx.compact_bucket(&task.status);
        Ok(task)
    }
}

impl Execute<BoardContext, BoardError> for DeleteTask {
    type Output = Task;

    fn execute(&self, ctx: &mut BoardContext) -> ExecutionResult<Task, BoardError> {
        let started = Instant::now();
        logged(self, started, self.apply(ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::AddTask;
    use crate::types::ColumnId;

    fn setup() -> (BoardContext, Vec<TaskId>) {
        let mut ctx = BoardContext::new("project-1");
        let ids = ["A", "B", "C"]
            .into_iter()
            .map(|title| {
                AddTask::new(title)
                    .in_column("ready")
                    .execute(&mut ctx)
                    .into_result()
                    .unwrap()
                    .id
            })
            .collect();
        (ctx, ids)
    }

    #[test]
    fn test_delete_compacts_bucket() {
        let (mut ctx, ids) = setup();
        let deleted = DeleteTask::new(ids[0].clone())
            .execute(&mut ctx)
            .into_result()
            .unwrap();
        assert_eq!(deleted.title, "A");

        let bucket = ctx.bucket(&ColumnId::from("ready"));
        let order: Vec<(&str, usize)> = bucket
            .iter()
            .map(|t| (t.title.as_str(), t.order_index))
            .collect();
        assert_eq!(order, vec![("B", 0), ("C", 1)]);
        ctx.validate().unwrap();
    }

    #[test]
    fn test_insert_after_delete_has_no_gap() {
        let (mut ctx, ids) = setup();
        DeleteTask::new(ids[1].clone()).execute(&mut ctx).into_result().unwrap();
        let added = AddTask::new("D")
            .in_column("ready")
            .execute(&mut ctx)
            .into_result()
            .unwrap();
        assert_eq!(added.order_index, 2);
        ctx.validate().unwrap();
    }

    #[test]
    fn test_delete_missing_task() {
        let (mut ctx, _) = setup();
        let result = DeleteTask::new("missing").execute(&mut ctx).into_result();
        assert!(matches!(result, Err(BoardError::TaskNotFound { .. })));
        assert_eq!(ctx.task_count(), 3);
    }
}
