//! Drag-and-drop gestures
//!
//! The view reports pointer events and the rectangles of its drop targets;
//! [`DragController`] turns them into ordering commands.

mod collision;
mod controller;
mod geometry;
mod sensor;

pub use collision::{
    closest_center, pointer_within, rect_intersection, CollisionStrategy, DropTarget, Droppable,
};
pub use controller::{DragController, DragItem, DragOutcome};
pub use geometry::{Point, Rect};
pub use sensor::{Activation, ActivationCheck, Sensor};
