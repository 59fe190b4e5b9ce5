//! In-memory kanban ordering engine
//!
//! This crate owns the ordering state of a kanban board: which task sits in
//! which column, in what position, and which columns exist in what order.
//! Every mutation is a command struct executed against a [`BoardContext`];
//! afterwards each column's tasks carry `order_index` values `0..n-1` with no
//! gaps or duplicates.
//!
//! ## Overview
//!
//! - **Columns are buckets** - a task's `status` is the id of its column
//! - **Splice-and-reinsert** - moves and reorders rebuild the affected buckets
//!   and renumber them, so positions are always contiguous
//! - **Stale is harmless** - ids that no longer exist fail with a stale error
//!   the caller may ignore via [`StaleExt`]
//! - **Role-gated** - [`BoardProcessor`] checks each command's permission
//!   against the actor's effective role and records an activity entry
//!
//! ## Basic Usage
//!
//! ```rust
//! use taskboard::{task::{AddTask, MoveTask}, BoardContext, BoardProcessor, OperationProcessor, Role};
//!
//! let mut ctx = BoardContext::new("project-1");
//! let processor = BoardProcessor::for_role(Role::Contributor).with_actor("alice");
//!
//! let task = processor
//!     .process(&AddTask::new("Write release notes").in_column("ready"), &mut ctx)
//!     .unwrap();
//! let moved = processor
//!     .process(&MoveTask::new(task.id, "in_progress", 0), &mut ctx)
//!     .unwrap();
//!
//! assert_eq!(moved.status.as_str(), "in_progress");
//! assert_eq!(moved.order_index, 0);
//! assert_eq!(ctx.activity().len(), 2);
//! ```
//!
//! ## Modules
//!
//! - [`task`], [`column`], [`board`] - board commands
//! - [`workspace`] - workspaces, membership, join codes and one board each
//! - [`drag`] - drag gesture controller, sensors and collision detection
//! - [`filter`] - search and attribute filters for board views
//! - [`permissions`] - the role to action table and preview ceilings
//! - [`presets`] - built-in column layouts

pub mod auto_color;
pub mod config;
mod context;
mod error;
pub mod filter;
pub mod permissions;
pub mod presets;
mod processor;
pub mod types;

// Command modules
pub mod board;
pub mod column;
pub mod drag;
pub mod task;
pub mod workspace;

// Re-export Execute trait and types from operations crate
pub use taskboard_operations::{
    Execute, ExecutionResult, LogEntry, Operation, OperationProcessor,
};

pub use config::{BoardConfig, DragConfig};
pub use context::{BoardContext, Clock, DEFAULT_ACTIVITY_LIMIT};
pub use error::{BoardError, Result, StaleExt};
pub use filter::{DueDateFilter, TaskFilters};
pub use permissions::{Action, RoleView};
pub use processor::{ActivityLog, BoardProcessor};

// Re-export commonly used types
pub use types::{
    Column, ColumnColor, ColumnId, MemberId, Priority, Role, Task, TaskId, Workspace,
    WorkspaceId, WorkspaceMember,
};
