//! MigrateTasks command

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::processor::logged;
use crate::types::{ColumnId, TaskId};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use taskboard_operations::{operation, Execute, ExecutionResult};

/// Move every task of one column to the end of another
///
/// Migrated tasks keep their relative order and land after the target's
/// existing tasks.
#[operation(
    verb = "migrate",
    noun = "tasks",
    description = "Move all tasks from one column to the end of another",
    permission = "manage_columns"
)]
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MigrateTasks {
    pub from: ColumnId,
    pub to: ColumnId,
}

impl MigrateTasks {
    pub fn new(from: impl Into<ColumnId>, to: impl Into<ColumnId>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Returns the migrated ids, in their new order
    pub(crate) fn apply(&self, ctx: &mut BoardContext) -> Result<Vec<TaskId>> {
        ctx.find_column(&self.from)?;
        ctx.find_column(&self.to)?;
        if self.from == self.to {
            return Ok(Vec::new());
        }

        let migrated = ctx.bucket_ids(&self.from);
        if migrated.is_empty() {
            return Ok(migrated);
        }

        let mut target = ctx.bucket_ids(&self.to);
        target.extend(migrated.iter().cloned());
        ctx.assign_bucket(&self.to, &target);

        let now = ctx.now();
        for id in &migrated {
            ctx.find_task_mut(id)?.touch(now);
        }
        tracing::debug!(from = %self.from, to = %self.to, count = migrated.len(), "migrated tasks");
        Ok(migrated)
    }
}

impl Execute<BoardContext, BoardError> for MigrateTasks {
    type Output = Vec<TaskId>;

    fn execute(&self, ctx: &mut BoardContext) -> ExecutionResult<Vec<TaskId>, BoardError> {
        let started = Instant::now();
        logged(self, started, self.apply(ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::AddTask;

    fn setup() -> BoardContext {
        let mut ctx = BoardContext::new("project-1");
        for (title, column) in [("A", "ready"), ("B", "ready"), ("X", "completed")] {
            AddTask::new(title)
                .in_column(column)
                .execute(&mut ctx)
                .into_result()
                .unwrap();
        }
        ctx
    }

    fn titles(ctx: &BoardContext, column: &str) -> Vec<(String, usize)> {
        ctx.bucket(&ColumnId::from(column))
            .iter()
            .map(|t| (t.title.clone(), t.order_index))
            .collect()
    }

    #[test]
    fn test_migrate_appends_after_existing() {
        let mut ctx = setup();
        let migrated = MigrateTasks::new("ready", "completed")
            .execute(&mut ctx)
            .into_result()
            .unwrap();

        assert_eq!(migrated.len(), 2);
        assert_eq!(
            titles(&ctx, "completed"),
            vec![("X".into(), 0), ("A".into(), 1), ("B".into(), 2)]
        );
        assert!(titles(&ctx, "ready").is_empty());
        ctx.validate().unwrap();
    }

    #[test]
    fn test_migrate_to_self_is_noop() {
        let mut ctx = setup();
        let migrated = MigrateTasks::new("ready", "ready")
            .execute(&mut ctx)
            .into_result()
            .unwrap();
        assert!(migrated.is_empty());
        assert_eq!(titles(&ctx, "ready").len(), 2);
    }

    #[test]
    fn test_migrate_unknown_column() {
        let mut ctx = setup();
        let result = MigrateTasks::new("ready", "nowhere").execute(&mut ctx).into_result();
        assert!(matches!(result, Err(BoardError::ColumnNotFound { .. })));
        assert_eq!(titles(&ctx, "ready").len(), 2);
    }
}
