//! Core types for the board engine

mod board;
mod ids;
mod task;
mod workspace;

// Re-export all types
pub use board::{column_slug, Column, ColumnColor};
pub use ids::{ColumnId, MemberId, TaskId, WorkspaceId};
pub use task::{Priority, Task};
pub use workspace::{Role, Workspace, WorkspaceMember};
