//! Task selection: search, priority, assignee and due-date filters.
//!
//! Filters are pure functions of the task list and a reference date, so the
//! same inputs always select the same tasks.

use crate::types::{ColumnId, MemberId, Priority, Task};
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Number of days after today that still count as "this week"
pub const THIS_WEEK_DAYS: u64 = 7;

/// Due-date window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DueDateFilter {
    /// Due strictly before today
    Overdue,
    /// Due between today and today + 7 days, inclusive
    ThisWeek,
}

impl DueDateFilter {
    /// Whether `due` falls in this window. Tasks without a due date never do.
    pub fn matches(&self, due: Option<NaiveDate>, today: NaiveDate) -> bool {
        let Some(due) = due else {
            return false;
        };
        match self {
            Self::Overdue => due < today,
            Self::ThisWeek => {
                let end = today
                    .checked_add_days(Days::new(THIS_WEEK_DAYS))
                    .unwrap_or(NaiveDate::MAX);
                today <= due && due <= end
            }
        }
    }
}

/// The active filter set. Empty fields impose no constraint; set fields
/// combine with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<MemberId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due: Option<DueDateFilter>,
}

impl TaskFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
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

    pub fn with_due(mut self, due: DueDateFilter) -> Self {
        self.due = Some(due);
        self
    }

    /// Whether any filter would exclude something
    pub fn is_active(&self) -> bool {
        self.needle().is_some()
            || self.priority.is_some()
            || self.assignee.is_some()
            || self.due.is_some()
    }

    /// Reset every filter
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Whether `task` passes every set filter
    pub fn matches(&self, task: &Task, today: NaiveDate) -> bool {
        self.matches_with(task, self.needle().as_deref(), today)
    }

    fn matches_with(&self, task: &Task, needle: Option<&str>, today: NaiveDate) -> bool {
        if let Some(needle) = needle {
            if !task.matches_text(needle) {
                return false;
            }
        }
        if let Some(priority) = self.priority {
            if task.priority != priority {
                return false;
            }
        }
        if let Some(assignee) = &self.assignee {
            if task.assignee.as_ref() != Some(assignee) {
                return false;
            }
        }
        if let Some(due) = self.due {
            if !due.matches(task.due_date, today) {
                return false;
            }
        }
        true
    }

    /// Lowercased search text; blank searches count as unset
    fn needle(&self) -> Option<String> {
        self.search
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }
}

/// Tasks passing `filters`, in input order
pub fn filter_tasks<'a>(tasks: &'a [Task], filters: &TaskFilters, today: NaiveDate) -> Vec<&'a Task> {
    let needle = filters.needle();
    tasks
        .iter()
        .filter(|t| filters.matches_with(t, needle.as_deref(), today))
        .collect()
}

/// Filtered tasks of one bucket, sorted by `order_index`
pub fn tasks_by_status<'a>(
    tasks: &'a [Task],
    filters: &TaskFilters,
    column: &ColumnId,
    today: NaiveDate,
) -> Vec<&'a Task> {
    let needle = filters.needle();
    let mut selected: Vec<&Task> = tasks
        .iter()
        .filter(|t| &t.status == column)
        .filter(|t| filters.matches_with(t, needle.as_deref(), today))
        .collect();
    selected.sort_by_key(|t| t.order_index);
    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::WorkspaceId;
    use chrono::{TimeZone, Utc};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, 20).unwrap()
    }

    fn task(title: &str) -> Task {
        Task::new(
            title,
            ColumnId::from("ready"),
            WorkspaceId::from("p"),
            Utc.with_ymd_and_hms(2025, 12, 1, 9, 0, 0).unwrap(),
        )
    }

    fn due(days_from_today: i64) -> NaiveDate {
        today() + chrono::Duration::days(days_from_today)
    }

    #[test]
    fn test_empty_filters_pass_everything() {
        let tasks = vec![task("a"), task("b")];
        assert_eq!(filter_tasks(&tasks, &TaskFilters::new(), today()).len(), 2);
        assert!(!TaskFilters::new().is_active());
        assert!(!TaskFilters::new().with_search("").is_active());
    }

    #[test]
    fn test_search_matches_title_or_description() {
        let tasks = vec![
            task("Fix login Bug"),
            task("Docs").with_description("mention the BUG tracker"),
            task("Unrelated"),
        ];
        let filters = TaskFilters::new().with_search("bug");
        let titles: Vec<&str> = filter_tasks(&tasks, &filters, today())
            .iter()
            .map(|t| t.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Fix login Bug", "Docs"]);
    }

    #[test]
    fn test_search_and_priority_compose() {
        let tasks = vec![
            task("Fix bug").with_priority(Priority::High),
            task("Fix bug").with_priority(Priority::Low),
            task("Polish").with_priority(Priority::High),
        ];
        let filters = TaskFilters::new()
            .with_search("bug")
            .with_priority(Priority::High);
        let selected = filter_tasks(&tasks, &filters, today());
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].id, tasks[0].id);
    }

    #[test]
    fn test_assignee_filter() {
        let tasks = vec![task("a").with_assignee("alice"), task("b")];
        let filters = TaskFilters::new().with_assignee("alice");
        let selected = filter_tasks(&tasks, &filters, today());
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].title, "a");
    }

    #[test]
    fn test_overdue() {
        let f = DueDateFilter::Overdue;
        assert!(f.matches(Some(due(-1)), today()));
        assert!(!f.matches(Some(due(0)), today()));
        assert!(!f.matches(None, today()));
    }

    #[test]
    fn test_this_week_bounds() {
        let f = DueDateFilter::ThisWeek;
        assert!(f.matches(Some(due(0)), today()));
        assert!(f.matches(Some(due(7)), today()));
        assert!(!f.matches(Some(due(8)), today()));
        assert!(!f.matches(Some(due(-1)), today()));
        assert!(!f.matches(None, today()));
    }

    #[test]
    fn test_tasks_by_status_sorts_and_restricts() {
        let mut a = task("a");
        a.order_index = 2;
        let mut b = task("b");
        b.order_index = 0;
        let mut c = task("c");
        c.status = ColumnId::from("backlog");
        let tasks = vec![a, b, c];

        let titles: Vec<&str> =
            tasks_by_status(&tasks, &TaskFilters::new(), &ColumnId::from("ready"), today())
                .iter()
                .map(|t| t.title.as_str())
                .collect();
        assert_eq!(titles, vec!["b", "a"]);
    }

    #[test]
    fn test_clear() {
        let mut filters = TaskFilters::new()
            .with_search("x")
            .with_due(DueDateFilter::Overdue);
        assert!(filters.is_active());
        filters.clear();
        assert_eq!(filters, TaskFilters::default());
    }
}
