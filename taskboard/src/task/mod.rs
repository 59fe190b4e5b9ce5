//! Task commands

mod add;
mod bulk;
mod delete;
mod get;
mod list;
mod mv;
mod reorder;
mod update;

pub use add::AddTask;
pub use bulk::{BulkDeleteTasks, BulkMoveTasks, BulkOutcome, BulkSetPriority};
pub use delete::DeleteTask;
pub use get::GetTask;
pub use list::ListTasks;
pub use mv::MoveTask;
pub use reorder::ReorderTasks;
pub use update::UpdateTask;
