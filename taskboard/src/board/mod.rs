//! Board commands

mod get;
mod preset;

pub use get::{BoardView, ColumnView, GetBoard};
pub use preset::ApplyPreset;
