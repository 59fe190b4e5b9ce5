//! # Taskboard Operations
//!
//! This crate provides the `Operation` trait for defining board commands.
//! Operations are structs where the fields ARE the parameters - no duplication.
//!
//! ## Example
//!
//! ```ignore
//! use taskboard_operations::*;
//!
//! #[operation(verb = "add", noun = "task", description = "Create a new task", permission = "create_task")]
//! #[derive(Debug, Deserialize, Serialize)]
//! pub struct AddTask {
//!     /// The task title
//!     pub title: String,
//!     /// Optional description
//!     pub description: Option<String>,
//! }
//!
//! impl Execute<BoardContext, BoardError> for AddTask {
//!     type Output = Task;
//!
//!     fn execute(&self, ctx: &mut BoardContext) -> ExecutionResult<Task, BoardError> {
//!         // implementation returns ExecutionResult::Logged or Unlogged
//!     }
//! }
//! ```
//!
//! Execution is synchronous: a command runs to completion against `&mut C`
//! before the next one can borrow the context.

// Lets the `#[operation]` expansion resolve `taskboard_operations::Operation`
// inside this crate's own tests.
extern crate self as taskboard_operations;

mod execution_result;
mod log;
mod operation;
mod processor;

pub use execution_result::ExecutionResult;
pub use log::LogEntry;
pub use operation::{Execute, Operation};
pub use processor::OperationProcessor;

// Re-export proc macros
pub use taskboard_operations_macros::operation;

// Re-export for use in implementations
pub use serde_json::Value;
