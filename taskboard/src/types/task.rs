//! Task types: Task, Priority

use super::ids::{ColumnId, MemberId, TaskId, WorkspaceId};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Task priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = crate::error::BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(crate::error::BoardError::invalid_value(
                "priority",
                format!("unknown priority '{}'", other),
            )),
        }
    }
}

/// A task/card on the board.
///
/// Serializes to the external task contract: `id, title, description?,
/// status, priority, assignee_id?, due_date?, order_index, project_id,
/// created_at, updated_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Bucket membership: the id of the column this task sits in
    pub status: ColumnId,

    #[serde(default)]
    pub priority: Priority,

    /// Weak reference to a workspace member; never dereferenced by the engine
    #[serde(
        default,
        rename = "assignee_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub assignee: Option<MemberId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,

    /// Zero-based rank within the task's bucket
    pub order_index: usize,

    pub project_id: WorkspaceId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Create a new task at `order_index` 0 in `status`, stamped with `now`.
    pub fn new(
        title: impl Into<String>,
        status: ColumnId,
        project_id: WorkspaceId,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: TaskId::new(),
            title: title.into(),
            description: None,
            status,
            priority: Priority::default(),
            assignee: None,
            due_date: None,
            order_index: 0,
            project_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the priority
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Set the assignee
    pub fn with_assignee(mut self, assignee: impl Into<MemberId>) -> Self {
        self.assignee = Some(assignee.into());
        self
    }

    /// Set the due date
    pub fn with_due_date(mut self, due: NaiveDate) -> Self {
        self.due_date = Some(due);
        self
    }

    /// Bump `updated_at`, never letting it fall behind `created_at`.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now.max(self.created_at);
    }

    /// Case-insensitive substring match on title or description.
    /// `needle` must already be lowercase.
    pub fn matches_text(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(needle))
    }
}
