//! Column commands

mod add;
mod delete;
mod list;
mod migrate;
mod reorder;
mod update;

pub use add::AddColumn;
pub use delete::DeleteColumn;
pub use list::ListColumns;
pub use migrate::MigrateTasks;
pub use reorder::ReorderColumns;
pub use update::UpdateColumn;
