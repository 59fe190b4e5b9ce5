//! Collision detection: which drop target is under a drag
//!
//! Each strategy returns candidates best-first.

use super::geometry::{Point, Rect};
use crate::types::{ColumnId, TaskId};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Something a dragged item can be dropped on
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum DropTarget {
    /// A column container
    Column(ColumnId),
    /// A task card
    Task(TaskId),
}

/// A drop target and its on-screen rectangle, as measured by the view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Droppable {
    pub target: DropTarget,
    pub rect: Rect,
}

impl Droppable {
    pub fn column(id: impl Into<ColumnId>, rect: Rect) -> Self {
        Self {
            target: DropTarget::Column(id.into()),
            rect,
        }
    }

    pub fn task(id: impl Into<TaskId>, rect: Rect) -> Self {
        Self {
            target: DropTarget::Task(id.into()),
            rect,
        }
    }
}

/// Targets containing the pointer, innermost (smallest area) first so a task
/// card wins over the column around it.
pub fn pointer_within(pointer: Point, droppables: &[Droppable]) -> Vec<&Droppable> {
    let mut hits: Vec<&Droppable> = droppables
        .iter()
        .filter(|d| d.rect.contains(pointer))
        .collect();
    hits.sort_by(|a, b| {
        cmp_f64(a.rect.area(), b.rect.area()).then_with(|| {
            cmp_f64(
                a.rect.center().distance_to(pointer),
                b.rect.center().distance_to(pointer),
            )
        })
    });
    hits
}

/// Targets overlapping `active`, largest overlap ratio first
pub fn rect_intersection<'a>(active: &Rect, droppables: &'a [Droppable]) -> Vec<&'a Droppable> {
    let mut hits: Vec<(&Droppable, f64)> = droppables
        .iter()
        .map(|d| (d, active.intersection_ratio(&d.rect)))
        .filter(|(_, ratio)| *ratio > 0.0)
        .collect();
    hits.sort_by(|a, b| cmp_f64(b.1, a.1));
    hits.into_iter().map(|(d, _)| d).collect()
}

/// All targets, nearest center to `active`'s center first
pub fn closest_center<'a>(active: &Rect, droppables: &'a [Droppable]) -> Vec<&'a Droppable> {
    let center = active.center();
    let mut hits: Vec<&Droppable> = droppables.iter().collect();
    hits.sort_by(|a, b| {
        cmp_f64(
            a.rect.center().distance_to(center),
            b.rect.center().distance_to(center),
        )
    });
    hits
}

/// How a drag picks its target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionStrategy {
    /// Pointer containment, falling back to rectangle intersection
    PointerThenIntersection,
    ClosestCenter,
}

impl CollisionStrategy {
    /// The best target, if any
    pub fn detect(&self, pointer: Point, active: &Rect, droppables: &[Droppable]) -> Option<DropTarget> {
        let best = match self {
            Self::PointerThenIntersection => pointer_within(pointer, droppables)
                .into_iter()
                .next()
                .or_else(|| rect_intersection(active, droppables).into_iter().next()),
            Self::ClosestCenter => closest_center(active, droppables).into_iter().next(),
        };
        let target = best.map(|d| d.target.clone());
        tracing::trace!(?self, ?target, "collision");
        target
    }
}

fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}
