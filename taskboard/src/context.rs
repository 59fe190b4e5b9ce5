//! BoardContext - the owned, in-memory state of one board
//!
//! The context provides access to columns, tasks, the activity log and the
//! clock. It holds primitives only (lookup, bucket listing, renumbering);
//! commands do the work.

use crate::error::{BoardError, Result};
use crate::filter::{self, TaskFilters};
use crate::types::{Column, ColumnId, Task, TaskId, WorkspaceId};
use chrono::{DateTime, Duration, Local, NaiveDate, Utc};
use std::collections::{HashMap, HashSet};
use taskboard_operations::LogEntry;

/// Default number of activity entries retained
pub const DEFAULT_ACTIVITY_LIMIT: usize = 500;

/// Source of "now" for timestamps and due-date windows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Clock {
    /// Wall clock
    #[default]
    System,
    /// A manually driven clock, for tests and replays
    Fixed(DateTime<Utc>),
}

impl Clock {
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Self::System => Utc::now(),
            Self::Fixed(at) => *at,
        }
    }

    /// Move a fixed clock forward. No effect on the system clock.
    pub fn advance(&mut self, by: Duration) {
        if let Self::Fixed(at) = self {
            *at += by;
        }
    }
}

/// Context passed to every command - provides access, not logic
#[derive(Debug, Clone)]
pub struct BoardContext {
    workspace_id: WorkspaceId,
    columns: Vec<Column>,
    tasks: Vec<Task>,
    /// Newest first
    activity: Vec<LogEntry>,
    activity_limit: usize,
    clock: Clock,
}

impl BoardContext {
    /// A board for `workspace_id` with the built-in column layout
    pub fn new(workspace_id: impl Into<WorkspaceId>) -> Self {
        Self {
            workspace_id: workspace_id.into(),
            columns: Column::default_columns(),
            tasks: Vec::new(),
            activity: Vec::new(),
            activity_limit: DEFAULT_ACTIVITY_LIMIT,
            clock: Clock::System,
        }
    }

    /// Replace the column layout of a board that has no tasks yet.
    ///
    /// A board with tasks must go through `ApplyPreset`, which migrates them.
    pub fn with_columns(mut self, columns: Vec<Column>) -> Result<Self> {
        if !self.tasks.is_empty() {
            return Err(BoardError::invalid_value(
                "columns",
                format!(
                    "board has {} tasks; apply a preset to migrate them",
                    self.tasks.len()
                ),
            ));
        }
        if columns.is_empty() {
            return Err(BoardError::invalid_value(
                "columns",
                "a board needs at least one column",
            ));
        }
        check_unique_columns(&columns)?;
        self.columns = columns;
        Ok(self)
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_activity_limit(mut self, limit: usize) -> Self {
        self.activity_limit = limit;
        self.activity.truncate(limit);
        self
    }

    /// Build a board from externally supplied columns and tasks (e.g. DTOs
    /// from an API layer).
    ///
    /// Every task must reference an existing column. Buckets are then
    /// renumbered to `0..N-1`, keeping the incoming `order_index` order, so
    /// gaps or duplicates in the input are healed.
    pub fn from_parts(
        workspace_id: impl Into<WorkspaceId>,
        columns: Vec<Column>,
        tasks: Vec<Task>,
    ) -> Result<Self> {
        let mut ctx = Self::new(workspace_id).with_columns(columns)?;

        let mut seen = HashSet::with_capacity(tasks.len());
        for task in &tasks {
            if !ctx.column_exists(&task.status) {
                return Err(BoardError::ColumnNotFound {
                    id: task.status.to_string(),
                });
            }
            if !seen.insert(&task.id) {
                return Err(BoardError::duplicate_id("task", task.id.to_string()));
            }
        }

        ctx.tasks = tasks;
        let column_ids: Vec<ColumnId> = ctx.columns.iter().map(|c| c.id.clone()).collect();
        for id in &column_ids {
            ctx.compact_bucket(id);
        }
        Ok(ctx)
    }

    // =========================================================================
    // Clock
    // =========================================================================

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Today's local date, the reference point for due-date filters
    pub fn today(&self) -> NaiveDate {
        self.now().with_timezone(&Local).date_naive()
    }

    pub fn clock_mut(&mut self) -> &mut Clock {
        &mut self.clock
    }

    // =========================================================================
    // Columns
    // =========================================================================

    pub fn workspace_id(&self) -> &WorkspaceId {
        &self.workspace_id
    }

    /// Columns in board order (left to right)
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub(crate) fn columns_mut(&mut self) -> &mut Vec<Column> {
        &mut self.columns
    }

    pub fn column_exists(&self, id: &ColumnId) -> bool {
        self.columns.iter().any(|c| &c.id == id)
    }

    pub fn find_column(&self, id: &ColumnId) -> Result<&Column> {
        self.columns
            .iter()
            .find(|c| &c.id == id)
            .ok_or_else(|| BoardError::ColumnNotFound { id: id.to_string() })
    }

    pub fn find_column_mut(&mut self, id: &ColumnId) -> Result<&mut Column> {
        self.columns
            .iter_mut()
            .find(|c| &c.id == id)
            .ok_or_else(|| BoardError::ColumnNotFound { id: id.to_string() })
    }

    /// Position of a column in the board order
    pub fn column_position(&self, id: &ColumnId) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| &c.id == id)
            .ok_or_else(|| BoardError::ColumnNotFound { id: id.to_string() })
    }

    pub fn first_column(&self) -> Option<&Column> {
        self.columns.first()
    }

    // =========================================================================
    // Tasks
    // =========================================================================

    /// All tasks, in no particular order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    pub fn find_task(&self, id: &TaskId) -> Result<&Task> {
        self.tasks
            .iter()
            .find(|t| &t.id == id)
            .ok_or_else(|| BoardError::TaskNotFound { id: id.to_string() })
    }

    pub fn find_task_mut(&mut self, id: &TaskId) -> Result<&mut Task> {
        self.tasks
            .iter_mut()
            .find(|t| &t.id == id)
            .ok_or_else(|| BoardError::TaskNotFound { id: id.to_string() })
    }

    pub(crate) fn push_task(&mut self, task: Task) {
        self.tasks.push(task);
    }

    pub(crate) fn remove_task(&mut self, id: &TaskId) -> Result<Task> {
        let pos = self
            .tasks
            .iter()
            .position(|t| &t.id == id)
            .ok_or_else(|| BoardError::TaskNotFound { id: id.to_string() })?;
        Ok(self.tasks.swap_remove(pos))
    }

    // =========================================================================
    // Buckets
    // =========================================================================

    /// Number of tasks in a bucket
    pub fn bucket_len(&self, column: &ColumnId) -> usize {
        self.tasks.iter().filter(|t| &t.status == column).count()
    }

    /// Ids of the tasks in a bucket, in display order.
    ///
    /// Sorted by `order_index`; ties (only possible in malformed input) fall
    /// back to creation time, then id.
    pub fn bucket_ids(&self, column: &ColumnId) -> Vec<TaskId> {
        let mut bucket: Vec<&Task> = self.tasks.iter().filter(|t| &t.status == column).collect();
        bucket.sort_by(|a, b| {
            a.order_index
                .cmp(&b.order_index)
                .then(a.created_at.cmp(&b.created_at))
                .then(a.id.cmp(&b.id))
        });
        bucket.into_iter().map(|t| t.id.clone()).collect()
    }

    /// Tasks of a bucket in display order
    pub fn bucket(&self, column: &ColumnId) -> Vec<&Task> {
        let mut bucket: Vec<&Task> = self.tasks.iter().filter(|t| &t.status == column).collect();
        bucket.sort_by_key(|t| t.order_index);
        bucket
    }

    /// Highest `order_index` in a bucket, `None` when empty
    pub fn max_order_index(&self, column: &ColumnId) -> Option<usize> {
        self.tasks
            .iter()
            .filter(|t| &t.status == column)
            .map(|t| t.order_index)
            .max()
    }

    /// Assign `status = column` and `order_index = position` for each id in
    /// `order`. Ids that don't exist are skipped.
    pub(crate) fn assign_bucket(&mut self, column: &ColumnId, order: &[TaskId]) {
        let positions: HashMap<&TaskId, usize> =
            order.iter().enumerate().map(|(i, id)| (id, i)).collect();
        for task in self.tasks.iter_mut() {
            if let Some(&index) = positions.get(&task.id) {
                task.status = column.clone();
                task.order_index = index;
            }
        }
    }

    /// Renumber a bucket to `0..N-1`, keeping its current order
    pub(crate) fn compact_bucket(&mut self, column: &ColumnId) {
        let order = self.bucket_ids(column);
        self.assign_bucket(column, &order);
    }

    /// Filtered view of one bucket, sorted by `order_index`
    pub fn tasks_by_status(&self, filters: &TaskFilters, column: &ColumnId) -> Vec<&Task> {
        filter::tasks_by_status(&self.tasks, filters, column, self.today())
    }

    /// Check the board invariants: at least one column, unique column ids,
    /// every task in an existing column, and every bucket numbered `0..N-1`.
    pub fn validate(&self) -> Result<()> {
        if self.columns.is_empty() {
            return Err(BoardError::invalid_value(
                "columns",
                "a board needs at least one column",
            ));
        }
        check_unique_columns(&self.columns)?;

        for task in &self.tasks {
            if !self.column_exists(&task.status) {
                return Err(BoardError::ColumnNotFound {
                    id: task.status.to_string(),
                });
            }
        }

        for column in &self.columns {
            let mut indices: Vec<usize> = self
                .tasks
                .iter()
                .filter(|t| t.status == column.id)
                .map(|t| t.order_index)
                .collect();
            indices.sort_unstable();
            if indices.iter().enumerate().any(|(i, &idx)| i != idx) {
                return Err(BoardError::invalid_value(
                    "order_index",
                    format!(
                        "column '{}' is not numbered 0..{}: {:?}",
                        column.id,
                        indices.len(),
                        indices
                    ),
                ));
            }
        }
        Ok(())
    }

    // =========================================================================
    // Activity log
    // =========================================================================

    /// Activity entries, newest first
    pub fn activity(&self) -> &[LogEntry] {
        &self.activity
    }

    /// Record an entry at the head of the activity log
    pub fn append_activity(&mut self, entry: LogEntry) {
        self.activity.insert(0, entry);
        self.activity.truncate(self.activity_limit);
    }
}

fn check_unique_columns(columns: &[Column]) -> Result<()> {
    for (i, column) in columns.iter().enumerate() {
        if columns[..i].iter().any(|c| c.id == column.id) {
            return Err(BoardError::duplicate_id("column", column.id.to_string()));
        }
    }
    Ok(())
}
