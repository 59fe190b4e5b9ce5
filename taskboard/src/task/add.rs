//! AddTask command

use crate::context::BoardContext;
use crate::error::{non_blank, require_title, BoardError, Result};
use crate::processor::logged;
use crate::types::{ColumnId, MemberId, Priority, Task};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use taskboard_operations::{operation, Execute, ExecutionResult};

/// Add a new task at the end of a bucket
#[operation(
    verb = "add",
    noun = "task",
    description = "Create a new task at the end of a column",
    permission = "create_task"
)]
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AddTask {
    /// The task title (required)
    pub title: String,
    /// Detailed task description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Target bucket; defaults to the first column
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<ColumnId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<MemberId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
}

impl AddTask {
    /// Create a new AddTask command with just a title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            column: None,
            priority: None,
            assignee: None,
            due_date: None,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the target column
    pub fn in_column(mut self, column: impl Into<ColumnId>) -> Self {
        self.column = Some(column.into());
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

    pub(crate) fn apply(&self, ctx: &mut BoardContext) -> Result<Task> {
        let title = require_title("task", &self.title)?;

        let column = match &self.column {
            Some(id) => ctx.find_column(id)?.id.clone(),
            None => ctx
                .first_column()
                .map(|c| c.id.clone())
                .ok_or_else(|| BoardError::ColumnNotFound {
                    id: "(first column)".to_string(),
                })?,
        };

        let order_index = ctx
            .max_order_index(&column)
            .map(|max| max + 1)
            .unwrap_or(0);

        let mut task = Task::new(title, column, ctx.workspace_id().clone(), ctx.now());
        task.order_index = order_index;
        task.description = non_blank(self.description.as_deref());
        task.priority = self.priority.unwrap_or_default();
        task.assignee = self.assignee.clone();
        task.due_date = self.due_date;

        ctx.push_task(task.clone());
        Ok(task)
    }
}

impl Execute<BoardContext, BoardError> for AddTask {
    type Output = Task;

    fn execute(&self, ctx: &mut BoardContext) -> ExecutionResult<Task, BoardError> {
        let started = Instant::now();
        logged(self, started, self.apply(ctx))
    }
}
