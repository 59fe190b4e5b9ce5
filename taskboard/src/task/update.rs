//! UpdateTask command

use crate::context::BoardContext;
use crate::error::{non_blank, require_title, BoardError, Result};
use crate::processor::logged;
use crate::task::MoveTask;
use crate::types::{ColumnId, MemberId, Priority, Task, TaskId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use taskboard_operations::{operation, Execute, ExecutionResult};

/// Patch a task's fields
///
/// Unset fields are left alone. A status change appends the task to the
/// new bucket, the same as `MoveTask::to_column`.
#[operation(
    verb = "update",
    noun = "task",
    description = "Update a task's title, description, priority, assignee, due date or column",
    permission = "edit_task"
)]
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UpdateTask {
    /// The task ID to update
    pub id: TaskId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<MemberId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    /// New bucket
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ColumnId>,
    #[serde(default)]
    pub clear_description: bool,
    #[serde(default)]
    pub clear_assignee: bool,
    #[serde(default)]
    pub clear_due_date: bool,
}

impl UpdateTask {
    pub fn new(id: impl Into<TaskId>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_assignee(mut self, assignee: impl Into<MemberId>) -> Self {
        self.assignee = Some(assignee.into());
        self
    }

    pub fn with_due_date(mut self, due: NaiveDate) -> Self {
        self.due_date = Some(due);
        self
    }

    pub fn with_status(mut self, status: impl Into<ColumnId>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn without_description(mut self) -> Self {
        self.clear_description = true;
        self
    }

    pub fn without_assignee(mut self) -> Self {
        self.clear_assignee = true;
        self
    }

    pub fn without_due_date(mut self) -> Self {
        self.clear_due_date = true;
        self
    }

    pub(crate) fn apply(&self, ctx: &mut BoardContext) -> Result<Task> {
        // Validate before anything changes
        let title = self
            .title
            .as_deref()
            .map(|t| require_title("task", t))
            .transpose()?;
        let current_status = ctx.find_task(&self.id)?.status.clone();

        if let Some(status) = &self.status {
            if status != &current_status {
                MoveTask::to_column(self.id.clone(), status.clone()).apply(ctx)?;
            }
        }

        let now = ctx.now();
        let task = ctx.find_task_mut(&self.id)?;
        if let Some(title) = title {
            task.title = title;
        }
        if self.clear_description {
            task.description = None;
        } else if self.description.is_some() {
            task.description = non_blank(self.description.as_deref());
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if self.clear_assignee {
            task.assignee = None;
        } else if let Some(assignee) = &self.assignee {
            task.assignee = Some(assignee.clone());
        }
        if self.clear_due_date {
            task.due_date = None;
        } else if let Some(due) = self.due_date {
            task.due_date = Some(due);
        }
        task.touch(now);

        Ok(task.clone())
    }
}

impl Execute<BoardContext, BoardError> for UpdateTask {
    type Output = Task;

    fn execute(&self, ctx: &mut BoardContext) -> ExecutionResult<Task, BoardError> {
        let started = Instant::now();
        logged(self, started, self.apply(ctx))
    }
}
