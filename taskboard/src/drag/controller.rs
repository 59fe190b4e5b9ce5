//! Drag gesture state machine
//!
//! Translates press / move / release / cancel events into ordering commands.
//! While a task is dragged across columns it is moved optimistically on each
//! hover tick; the drop commits the final position. Cancelling puts the task
//! back where it was when the drag started.
//!
//! Nothing here returns an error. Stale ids and refused operations are
//! logged and the gesture carries on.

use super::collision::{CollisionStrategy, DropTarget, Droppable};
use super::geometry::{Point, Rect};
use super::sensor::{Activation, ActivationCheck, Sensor};
use crate::column::ReorderColumns;
use crate::config::DragConfig;
use crate::context::BoardContext;
use crate::error::{BoardError, StaleExt};
use crate::processor::BoardProcessor;
use crate::task::{MoveTask, ReorderTasks};
use crate::types::{ColumnId, Task, TaskId};
use serde::{Deserialize, Serialize};
use taskboard_operations::{Execute, Operation, OperationProcessor};

/// What is being dragged
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum DragItem {
    Task(TaskId),
    Column(ColumnId),
}

impl DragItem {
    fn strategy(&self) -> CollisionStrategy {
        match self {
            Self::Task(_) => CollisionStrategy::PointerThenIntersection,
            Self::Column(_) => CollisionStrategy::ClosestCenter,
        }
    }
}

/// What an event did
#[derive(Debug, Clone, PartialEq)]
pub enum DragOutcome {
    /// The event had no effect
    Ignored,
    /// Pressed; waiting for the activation threshold
    Pending,
    /// The press ended before a drag started
    Aborted,
    /// The drag is live
    Started,
    /// Hover tick; `moved` is set when the task was moved to another column
    Hover {
        over: Option<DropTarget>,
        moved: Option<Task>,
    },
    /// Dropped into a new position via `MoveTask`
    Moved(Task),
    /// Dropped onto a sibling via `ReorderTasks` or `ReorderColumns`
    Reordered,
    /// Dropped where it already was
    Settled,
    /// Escape, or dropped on nothing; the task is back at its start slot
    Cancelled,
}

/// Where a task sat when its drag started
#[derive(Debug, Clone, PartialEq, Eq)]
struct Slot {
    column: ColumnId,
    index: usize,
}

#[derive(Debug, Clone)]
enum DragState {
    Idle,
    Pending {
        item: DragItem,
        activation: Activation,
        origin: Point,
        pointer: Point,
        pressed_at_ms: u64,
        rect: Rect,
        slot: Option<Slot>,
    },
    Dragging {
        item: DragItem,
        origin: Point,
        pointer: Point,
        start_rect: Rect,
        over: Option<DropTarget>,
        slot: Option<Slot>,
    },
}

/// Drives one drag gesture at a time
#[derive(Debug, Clone)]
pub struct DragController {
    config: DragConfig,
    state: DragState,
}

impl Default for DragController {
    fn default() -> Self {
        Self::new(DragConfig::default())
    }
}

impl DragController {
    pub fn new(config: DragConfig) -> Self {
        Self {
            config,
            state: DragState::Idle,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, DragState::Idle)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// The item under the pointer's control, pending or live
    pub fn active(&self) -> Option<&DragItem> {
        match &self.state {
            DragState::Idle => None,
            DragState::Pending { item, .. } | DragState::Dragging { item, .. } => Some(item),
        }
    }

    /// The current drop target of a live drag
    pub fn over(&self) -> Option<&DropTarget> {
        match &self.state {
            DragState::Dragging { over, .. } => over.as_ref(),
            _ => None,
        }
    }

    /// Press on `item`, whose rectangle is `rect`, at time `at_ms`
    pub fn press(
        &mut self,
        ctx: &BoardContext,
        item: DragItem,
        sensor: Sensor,
        pointer: Point,
        rect: Rect,
        at_ms: u64,
    ) -> DragOutcome {
        if !self.is_idle() {
            return DragOutcome::Ignored;
        }

        let slot = match &item {
            DragItem::Task(id) => match ctx.find_task(id) {
                Ok(task) => Some(Slot {
                    column: task.status.clone(),
                    index: task.order_index,
                }),
                Err(error) => {
                    tracing::debug!(%error, "press on stale task");
                    return DragOutcome::Ignored;
                }
            },
            DragItem::Column(id) => {
                if let Err(error) = ctx.find_column(id) {
                    tracing::debug!(%error, "press on stale column");
                    return DragOutcome::Ignored;
                }
                None
            }
        };

        let column = matches!(item, DragItem::Column(_));
        let activation = Activation::for_sensor(sensor, &self.config, column);
        tracing::debug!(?item, ?sensor, "drag pressed");

        self.state = DragState::Pending {
            item,
            activation,
            origin: pointer,
            pointer,
            pressed_at_ms: at_ms,
            rect,
            slot,
        };
        // Keyboard activation needs no movement or hold
        self.try_activate(at_ms).unwrap_or(DragOutcome::Pending)
    }

    /// Time passes without movement; a touch hold may activate
    pub fn tick(&mut self, at_ms: u64) -> DragOutcome {
        self.try_activate(at_ms).unwrap_or(DragOutcome::Ignored)
    }

    /// Pointer moved to `pointer`. During a live drag this is a hover tick
    /// against the current `droppables`.
    pub fn pointer_move(
        &mut self,
        processor: &BoardProcessor,
        ctx: &mut BoardContext,
        droppables: &[Droppable],
        pointer: Point,
        at_ms: u64,
    ) -> DragOutcome {
        match &mut self.state {
            DragState::Idle => DragOutcome::Ignored,
            DragState::Pending { pointer: last, .. } => {
                *last = pointer;
                self.try_activate(at_ms).unwrap_or(DragOutcome::Pending)
            }
            DragState::Dragging { pointer: last, .. } => {
                *last = pointer;
                self.hover(processor, ctx, droppables)
            }
        }
    }

    /// Release the pointer, dropping on whatever is under it
    pub fn release(
        &mut self,
        processor: &BoardProcessor,
        ctx: &mut BoardContext,
        droppables: &[Droppable],
    ) -> DragOutcome {
        let (item, origin, pointer, start_rect, slot) =
            match std::mem::replace(&mut self.state, DragState::Idle) {
                DragState::Dragging {
                    item,
                    origin,
                    pointer,
                    start_rect,
                    slot,
                    ..
                } => (item, origin, pointer, start_rect, slot),
                DragState::Pending { .. } => return DragOutcome::Aborted,
                DragState::Idle => return DragOutcome::Ignored,
            };

        let rect = active_rect(start_rect, origin, pointer);
        let over = detect(&item, pointer, &rect, droppables);
        tracing::debug!(?item, ?over, "drag released");

        match (item, over) {
            (DragItem::Task(id), None) => {
                restore(processor, ctx, &id, slot.as_ref());
                DragOutcome::Cancelled
            }
            (DragItem::Task(id), Some(DropTarget::Column(column))) => {
                run(processor, ctx, &MoveTask::to_column(id, column))
                    .map_or(DragOutcome::Ignored, DragOutcome::Moved)
            }
            (DragItem::Task(id), Some(DropTarget::Task(over))) => {
                drop_on_task(processor, ctx, id, over)
            }
            (DragItem::Column(_), None) => DragOutcome::Cancelled,
            (DragItem::Column(id), Some(DropTarget::Column(over))) => {
                let (Ok(from), Ok(to)) = (ctx.column_position(&id), ctx.column_position(&over))
                else {
                    tracing::debug!(%id, %over, "column drop on stale column");
                    return DragOutcome::Ignored;
                };
                if from == to {
                    return DragOutcome::Settled;
                }
                run(processor, ctx, &ReorderColumns::new(from, to))
                    .map_or(DragOutcome::Ignored, |_| DragOutcome::Reordered)
            }
            (DragItem::Column(_), Some(DropTarget::Task(_))) => DragOutcome::Settled,
        }
    }

    /// Abandon the gesture (Escape). A dragged task returns to its start slot.
    pub fn cancel(&mut self, processor: &BoardProcessor, ctx: &mut BoardContext) -> DragOutcome {
        match std::mem::replace(&mut self.state, DragState::Idle) {
            DragState::Idle => DragOutcome::Ignored,
            DragState::Pending { .. } => DragOutcome::Aborted,
            DragState::Dragging { item, slot, .. } => {
                if let DragItem::Task(id) = &item {
                    restore(processor, ctx, id, slot.as_ref());
                }
                tracing::debug!(?item, "drag cancelled");
                DragOutcome::Cancelled
            }
        }
    }

    /// Check a pending press against its activation constraint
    fn try_activate(&mut self, at_ms: u64) -> Option<DragOutcome> {
        let DragState::Pending {
            activation,
            origin,
            pointer,
            pressed_at_ms,
            ..
        } = &self.state
        else {
            return None;
        };

        let elapsed = at_ms.saturating_sub(*pressed_at_ms);
        match activation.check(*origin, *pointer, elapsed) {
            ActivationCheck::Pending => None,
            ActivationCheck::Abort => {
                tracing::debug!("drag aborted before activation");
                self.state = DragState::Idle;
                Some(DragOutcome::Aborted)
            }
            ActivationCheck::Activate => {
                let DragState::Pending {
                    item,
                    origin,
                    pointer,
                    rect,
                    slot,
                    ..
                } = std::mem::replace(&mut self.state, DragState::Idle)
                else {
                    return None;
                };
                tracing::debug!(?item, "drag started");
                self.state = DragState::Dragging {
                    item,
                    origin,
                    pointer,
                    start_rect: rect,
                    over: None,
                    slot,
                };
                Some(DragOutcome::Started)
            }
        }
    }

    /// Update the drop target and move the task into a hovered column
    fn hover(
        &mut self,
        processor: &BoardProcessor,
        ctx: &mut BoardContext,
        droppables: &[Droppable],
    ) -> DragOutcome {
        let DragState::Dragging {
            item,
            origin,
            pointer,
            start_rect,
            over,
            ..
        } = &mut self.state
        else {
            return DragOutcome::Ignored;
        };

        let rect = active_rect(*start_rect, *origin, *pointer);
        *over = detect(item, *pointer, &rect, droppables);
        tracing::trace!(?item, over = ?*over, "hover");

        let DragItem::Task(id) = &*item else {
            return DragOutcome::Hover {
                over: over.clone(),
                moved: None,
            };
        };
        let Ok(task) = ctx.find_task(id) else {
            tracing::debug!(%id, "hover with stale task");
            return DragOutcome::Hover {
                over: over.clone(),
                moved: None,
            };
        };

        let command = match &*over {
            Some(DropTarget::Column(column)) if column != &task.status => {
                Some(MoveTask::to_column(id.clone(), column.clone()))
            }
            Some(DropTarget::Task(other)) if other != id => match ctx.find_task(other) {
                Ok(other) if other.status != task.status => Some(MoveTask::new(
                    id.clone(),
                    other.status.clone(),
                    other.order_index,
                )),
                _ => None,
            },
            _ => None,
        };

        let over = over.clone();
        let moved = command.and_then(|command| run(processor, ctx, &command));
        DragOutcome::Hover { over, moved }
    }
}

/// Where the dragged item's rectangle is now
fn active_rect(start: Rect, origin: Point, pointer: Point) -> Rect {
    start.translated(pointer.x - origin.x, pointer.y - origin.y)
}

fn detect(item: &DragItem, pointer: Point, rect: &Rect, droppables: &[Droppable]) -> Option<DropTarget> {
    match item {
        DragItem::Task(_) => item.strategy().detect(pointer, rect, droppables),
        DragItem::Column(_) => {
            let columns: Vec<Droppable> = droppables
                .iter()
                .filter(|d| matches!(d.target, DropTarget::Column(_)))
                .cloned()
                .collect();
            item.strategy().detect(pointer, rect, &columns)
        }
    }
}

fn drop_on_task(
    processor: &BoardProcessor,
    ctx: &mut BoardContext,
    id: TaskId,
    over: TaskId,
) -> DragOutcome {
    if id == over {
        return DragOutcome::Settled;
    }
    let (Ok(task), Ok(target)) = (ctx.find_task(&id), ctx.find_task(&over)) else {
        tracing::debug!(%id, %over, "drop on stale task");
        return DragOutcome::Ignored;
    };

    if task.status == target.status {
        let command = ReorderTasks::new(task.status.clone(), id, over);
        run(processor, ctx, &command).map_or(DragOutcome::Ignored, |_| DragOutcome::Reordered)
    } else {
        let command = MoveTask::new(id, target.status.clone(), target.order_index);
        run(processor, ctx, &command).map_or(DragOutcome::Ignored, DragOutcome::Moved)
    }
}

/// Put a task back at its start slot if hover ticks moved it
fn restore(processor: &BoardProcessor, ctx: &mut BoardContext, id: &TaskId, slot: Option<&Slot>) {
    let Some(slot) = slot else {
        return;
    };
    let Ok(task) = ctx.find_task(id) else {
        return;
    };
    if task.status == slot.column && task.order_index == slot.index {
        return;
    }
    run(
        processor,
        ctx,
        &MoveTask::new(id.clone(), slot.column.clone(), slot.index),
    );
}

/// Run through the processor, turning every failure into a logged no-op
fn run<O>(processor: &BoardProcessor, ctx: &mut BoardContext, op: &O) -> Option<O::Output>
where
    O: Operation + Execute<BoardContext, BoardError>,
{
    match processor.process(op, ctx).ignore_stale() {
        Ok(value) => value,
        Err(error) => {
            tracing::debug!(op = %op.op_string(), %error, "drag operation ignored");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::AddTask;
    use crate::types::Role;

    // Two columns side by side; cards are 280x80 with 10px gaps.
    fn setup() -> (BoardContext, Vec<TaskId>, BoardProcessor) {
        let mut ctx = BoardContext::new("project-1");
        let ids = [("A", "ready"), ("B", "ready"), ("X", "in_progress")]
            .into_iter()
            .map(|(title, column)| {
                AddTask::new(title)
                    .in_column(column)
                    .execute(&mut ctx)
                    .into_result()
                    .unwrap()
                    .id
            })
            .collect();
        (ctx, ids, BoardProcessor::for_role(Role::Contributor))
    }

    fn card(column: usize, row: usize) -> Rect {
        Rect::new(column as f64 * 320.0 + 10.0, 50.0 + row as f64 * 90.0, 280.0, 80.0)
    }

    fn droppables(ctx: &BoardContext) -> Vec<Droppable> {
        let mut out = Vec::new();
        for (c, column) in ctx.columns().iter().enumerate() {
            out.push(Droppable::column(
                column.id.clone(),
                Rect::new(c as f64 * 320.0, 0.0, 300.0, 800.0),
            ));
            for task in ctx.bucket(&column.id) {
                out.push(Droppable::task(task.id.clone(), card(c, task.order_index)));
            }
        }
        out
    }

    fn titles(ctx: &BoardContext, column: &str) -> Vec<String> {
        ctx.bucket(&ColumnId::from(column))
            .iter()
            .map(|t| t.title.clone())
            .collect()
    }

    /// Press on the task and drag far enough to activate
    fn start(ctx: &mut BoardContext, drag: &mut DragController, p: &BoardProcessor, id: &TaskId) {
        let rect = card(1, ctx.find_task(id).unwrap().order_index);
        let at = rect.center();
        assert_eq!(
            drag.press(ctx, DragItem::Task(id.clone()), Sensor::Pointer, at, rect, 0),
            DragOutcome::Pending
        );
        let d = droppables(ctx);
        assert_eq!(
            drag.pointer_move(p, ctx, &d, Point::new(at.x + 6.0, at.y), 10),
            DragOutcome::Started
        );
    }

    #[test]
    fn test_pointer_needs_distance() {
        let (mut ctx, ids, p) = setup();
        let mut drag = DragController::default();
        let rect = card(1, 0);
        drag.press(&ctx, DragItem::Task(ids[0].clone()), Sensor::Pointer, rect.center(), rect, 0);
        let d = droppables(&ctx);
        let nudge = Point::new(rect.center().x + 2.0, rect.center().y);
        assert_eq!(drag.pointer_move(&p, &mut ctx, &d, nudge, 5), DragOutcome::Pending);
        assert!(!drag.is_dragging());

        // Released without activating: a click, nothing moves
        assert_eq!(drag.release(&p, &mut ctx, &d), DragOutcome::Aborted);
        assert!(drag.is_idle());
    }

    #[test]
    fn test_hover_moves_task_to_other_column() {
        let (mut ctx, ids, p) = setup();
        let mut drag = DragController::default();
        start(&mut ctx, &mut drag, &p, &ids[0]);

        // Into the in_progress column below its only card
        let d = droppables(&ctx);
        let outcome = drag.pointer_move(&p, &mut ctx, &d, Point::new(800.0, 600.0), 20);
        let DragOutcome::Hover { over, moved } = outcome else {
            panic!("expected hover, got {:?}", outcome);
        };
        assert_eq!(over, Some(DropTarget::Column(ColumnId::from("in_progress"))));
        assert_eq!(moved.unwrap().status.as_str(), "in_progress");
        assert_eq!(titles(&ctx, "in_progress"), vec!["X", "A"]);
        ctx.validate().unwrap();
    }

    #[test]
    fn test_hover_over_task_in_other_column_takes_its_index() {
        let (mut ctx, ids, p) = setup();
        let mut drag = DragController::default();
        start(&mut ctx, &mut drag, &p, &ids[1]);

        let d = droppables(&ctx);
        let over_x = card(2, 0).center();
        drag.pointer_move(&p, &mut ctx, &d, over_x, 20);
        assert_eq!(titles(&ctx, "in_progress"), vec!["B", "X"]);
        assert_eq!(titles(&ctx, "ready"), vec!["A"]);
    }

    #[test]
    fn test_drop_reorders_within_column() {
        let (mut ctx, ids, p) = setup();
        let mut drag = DragController::default();
        start(&mut ctx, &mut drag, &p, &ids[0]);

        let d = droppables(&ctx);
        // Same-bucket hover changes nothing
        drag.pointer_move(&p, &mut ctx, &d, card(1, 1).center(), 20);
        assert_eq!(titles(&ctx, "ready"), vec!["A", "B"]);

        assert_eq!(drag.release(&p, &mut ctx, &d), DragOutcome::Reordered);
        assert_eq!(titles(&ctx, "ready"), vec!["B", "A"]);
        assert!(drag.is_idle());
    }

    #[test]
    fn test_cancel_restores_start_slot() {
        let (mut ctx, ids, p) = setup();
        let mut drag = DragController::default();
        start(&mut ctx, &mut drag, &p, &ids[0]);

        let d = droppables(&ctx);
        drag.pointer_move(&p, &mut ctx, &d, Point::new(800.0, 600.0), 20);
        assert_eq!(titles(&ctx, "ready"), vec!["B"]);

        assert_eq!(drag.cancel(&p, &mut ctx), DragOutcome::Cancelled);
        assert_eq!(titles(&ctx, "ready"), vec!["A", "B"]);
        assert_eq!(titles(&ctx, "in_progress"), vec!["X"]);
        ctx.validate().unwrap();
    }

    #[test]
    fn test_drop_on_nothing_cancels() {
        let (mut ctx, ids, p) = setup();
        let mut drag = DragController::default();
        start(&mut ctx, &mut drag, &p, &ids[1]);
        let d = droppables(&ctx);
        drag.pointer_move(&p, &mut ctx, &d, Point::new(5000.0, 5000.0), 20);
        assert_eq!(drag.over(), None);
        assert_eq!(drag.release(&p, &mut ctx, &d), DragOutcome::Cancelled);
        assert_eq!(titles(&ctx, "ready"), vec!["A", "B"]);
    }

    #[test]
    fn test_viewer_drag_changes_nothing() {
        let (mut ctx, ids, _) = setup();
        let viewer = BoardProcessor::for_role(Role::Viewer);
        let mut drag = DragController::default();
        start(&mut ctx, &mut drag, &viewer, &ids[0]);

        let d = droppables(&ctx);
        let outcome = drag.pointer_move(&viewer, &mut ctx, &d, Point::new(800.0, 600.0), 20);
        assert!(matches!(outcome, DragOutcome::Hover { moved: None, .. }));
        assert_eq!(drag.release(&viewer, &mut ctx, &d), DragOutcome::Ignored);
        assert_eq!(titles(&ctx, "ready"), vec!["A", "B"]);
    }

    #[test]
    fn test_press_on_stale_task_is_ignored() {
        let (ctx, _, _) = setup();
        let mut drag = DragController::default();
        let outcome = drag.press(
            &ctx,
            DragItem::Task(TaskId::from("gone")),
            Sensor::Pointer,
            Point::default(),
            Rect::default(),
            0,
        );
        assert_eq!(outcome, DragOutcome::Ignored);
        assert!(drag.is_idle());
    }

    #[test]
    fn test_touch_hold_then_keyboard_column_drag() {
        let (mut ctx, ids, _) = setup();
        let mut drag = DragController::default();
        let rect = card(1, 0);
        drag.press(&ctx, DragItem::Task(ids[0].clone()), Sensor::Touch, rect.center(), rect, 1000);
        assert_eq!(drag.tick(1100), DragOutcome::Ignored);
        assert_eq!(drag.tick(1150), DragOutcome::Started);

        let owner = BoardProcessor::for_role(Role::Owner);
        drag.cancel(&owner, &mut ctx);

        // Keyboard drags start at once
        let column_rect = Rect::new(0.0, 0.0, 300.0, 800.0);
        let outcome = drag.press(
            &ctx,
            DragItem::Column(ColumnId::from("backlog")),
            Sensor::Keyboard,
            column_rect.center(),
            column_rect,
            0,
        );
        assert_eq!(outcome, DragOutcome::Started);

        let d = droppables(&ctx);
        // Move the column two slots right
        let target = Point::new(column_rect.center().x + 640.0, column_rect.center().y);
        drag.pointer_move(&owner, &mut ctx, &d, target, 10);
        assert_eq!(drag.over(), Some(&DropTarget::Column(ColumnId::from("in_progress"))));
        assert_eq!(drag.release(&owner, &mut ctx, &d), DragOutcome::Reordered);

        let order: Vec<&str> = ctx.columns().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(order, vec!["ready", "in_progress", "backlog", "completed"]);
    }
}
