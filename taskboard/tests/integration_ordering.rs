//! Integration tests for task and column ordering

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use taskboard::{
    board::{ApplyPreset, GetBoard},
    column::{AddColumn, DeleteColumn, ReorderColumns, UpdateColumn},
    task::{AddTask, BulkDeleteTasks, BulkMoveTasks, DeleteTask, MoveTask, ReorderTasks, UpdateTask},
    BoardContext, BoardError, Clock, ColumnColor, ColumnId, DueDateFilter, Execute, Priority,
    StaleExt, TaskFilters, TaskId,
};

fn titles(ctx: &BoardContext, column: &str) -> Vec<String> {
    ctx.bucket(&ColumnId::from(column))
        .into_iter()
        .map(|t| t.title.clone())
        .collect()
}

fn indices(ctx: &BoardContext, column: &str) -> Vec<usize> {
    ctx.bucket(&ColumnId::from(column))
        .into_iter()
        .map(|t| t.order_index)
        .collect()
}

fn add(ctx: &mut BoardContext, title: &str, column: &str) -> TaskId {
    AddTask::new(title)
        .in_column(column)
        .execute(ctx)
        .into_result()
        .unwrap()
        .id
}

#[test]
fn test_move_between_columns_end_to_end() {
    let start = Utc.with_ymd_and_hms(2025, 12, 1, 9, 0, 0).unwrap();
    let mut ctx = BoardContext::new("project-1").with_clock(Clock::Fixed(start));
    let _a = add(&mut ctx, "A", "ready");
    let b = add(&mut ctx, "B", "ready");
    let _c = add(&mut ctx, "C", "ready");
    assert_eq!(indices(&ctx, "ready"), vec![0, 1, 2]);

    ctx.clock_mut().advance(Duration::minutes(5));
    let moved = MoveTask::new(b.clone(), "in_progress", 0)
        .execute(&mut ctx)
        .into_result()
        .unwrap();

    assert_eq!(moved.status.as_str(), "in_progress");
    assert_eq!(moved.order_index, 0);
    assert_eq!(moved.updated_at, start + Duration::minutes(5));
    assert_eq!(titles(&ctx, "ready"), vec!["A", "C"]);
    assert_eq!(indices(&ctx, "ready"), vec![0, 1]);
    assert_eq!(titles(&ctx, "in_progress"), vec!["B"]);
    ctx.validate().unwrap();
}

#[test]
fn test_reorder_then_delete_keeps_indices_contiguous() {
    let mut ctx = BoardContext::new("project-1");
    let a = add(&mut ctx, "A", "backlog");
    let _b = add(&mut ctx, "B", "backlog");
    let c = add(&mut ctx, "C", "backlog");
    let _d = add(&mut ctx, "D", "backlog");

    ReorderTasks::new("backlog", c.clone(), a.clone())
        .execute(&mut ctx)
        .into_result()
        .unwrap();
    assert_eq!(titles(&ctx, "backlog"), vec!["C", "A", "B", "D"]);

    DeleteTask::new(a).execute(&mut ctx).into_result().unwrap();
    assert_eq!(titles(&ctx, "backlog"), vec!["C", "B", "D"]);
    assert_eq!(indices(&ctx, "backlog"), vec![0, 1, 2]);
    ctx.validate().unwrap();
}

#[test]
fn test_stale_ids_are_ignorable() {
    let mut ctx = BoardContext::new("project-1");
    let a = add(&mut ctx, "A", "ready");
    DeleteTask::new(a.clone()).execute(&mut ctx).into_result().unwrap();

    let result = MoveTask::to_column(a.clone(), "backlog")
        .execute(&mut ctx)
        .into_result();
    assert!(matches!(result, Err(BoardError::TaskNotFound { .. })));
    assert_eq!(
        MoveTask::to_column(a, "backlog")
            .execute(&mut ctx)
            .into_result()
            .ignore_stale()
            .unwrap(),
        None
    );

    // Empty titles are not stale
    let empty = AddTask::new("   ").execute(&mut ctx).into_result();
    assert!(matches!(empty.ignore_stale(), Err(BoardError::EmptyTitle { .. })));
}

#[test]
fn test_delete_column_migrates_tasks() {
    let mut ctx = BoardContext::new("project-1");
    add(&mut ctx, "X", "backlog");
    add(&mut ctx, "A", "ready");
    add(&mut ctx, "B", "ready");

    let blocked = DeleteColumn::new("ready").execute(&mut ctx).into_result();
    assert!(matches!(
        blocked,
        Err(BoardError::MigrationTargetRequired { count: 2, .. })
    ));
    assert_eq!(ctx.columns().len(), 4);

    DeleteColumn::new("ready")
        .migrating_to("backlog")
        .execute(&mut ctx)
        .into_result()
        .unwrap();
    assert_eq!(ctx.columns().len(), 3);
    assert!(!ctx.column_exists(&ColumnId::from("ready")));
    assert_eq!(titles(&ctx, "backlog"), vec!["X", "A", "B"]);
    assert_eq!(indices(&ctx, "backlog"), vec![0, 1, 2]);
    ctx.validate().unwrap();
}

#[test]
fn test_column_lifecycle() {
    let mut ctx = BoardContext::new("project-1");
    let review = AddColumn::new("Code Review")
        .execute(&mut ctx)
        .into_result()
        .unwrap();
    assert_eq!(review.id.as_str(), "code_review");
    assert_eq!(ctx.columns().len(), 5);

    UpdateColumn::new("code_review")
        .with_title("Review")
        .with_color(ColumnColor::Rose)
        .execute(&mut ctx)
        .into_result()
        .unwrap();

    let columns = ReorderColumns::new(4, 1)
        .execute(&mut ctx)
        .into_result()
        .unwrap();
    let ids: Vec<&str> = columns.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["backlog", "code_review", "ready", "in_progress", "completed"]);
    assert_eq!(columns[1].title, "Review");
    assert_eq!(columns[1].color, ColumnColor::Rose);

    let out_of_range = ReorderColumns::new(0, 5).execute(&mut ctx).into_result();
    assert!(matches!(
        out_of_range,
        Err(BoardError::IndexOutOfRange { index: 5, len: 5 })
    ));
}

#[test]
fn test_status_change_through_update() {
    let mut ctx = BoardContext::new("project-1");
    add(&mut ctx, "Existing", "completed");
    let a = add(&mut ctx, "A", "ready");

    let task = UpdateTask::new(a)
        .with_status("completed")
        .with_priority(Priority::High)
        .execute(&mut ctx)
        .into_result()
        .unwrap();
    assert_eq!(task.status.as_str(), "completed");
    assert_eq!(task.order_index, 1);
    assert_eq!(task.priority, Priority::High);
    assert!(ctx.bucket(&ColumnId::from("ready")).is_empty());
}

#[test]
fn test_bulk_commands_skip_stale_ids() {
    let mut ctx = BoardContext::new("project-1");
    let a = add(&mut ctx, "A", "backlog");
    let b = add(&mut ctx, "B", "ready");
    let gone = TaskId::from("gone");

    let outcome = BulkMoveTasks::new(vec![b.clone(), gone.clone(), a.clone()], "completed")
        .execute(&mut ctx)
        .into_result()
        .unwrap();
    assert_eq!(outcome.applied, vec![b.clone(), a.clone()]);
    assert_eq!(outcome.skipped, vec![gone.clone()]);
    assert_eq!(titles(&ctx, "completed"), vec!["B", "A"]);

    let outcome = BulkDeleteTasks::new(vec![a, gone, b])
        .execute(&mut ctx)
        .into_result()
        .unwrap();
    assert_eq!(outcome.applied.len(), 2);
    assert_eq!(ctx.task_count(), 0);
}

#[test]
fn test_filters_compose_in_board_view() {
    let mut ctx = BoardContext::new("project-1");
    let today = ctx.today();
    for (title, column, priority, assignee, due) in [
        ("Fix login bug", "ready", Priority::High, "ana", Some(-1)),
        ("Login page copy", "ready", Priority::Low, "ana", Some(3)),
        ("Login audit", "in_progress", Priority::High, "ana", Some(2)),
        ("Release notes", "in_progress", Priority::High, "ben", None),
    ] {
        let mut command = AddTask::new(title)
            .in_column(column)
            .with_priority(priority)
            .with_assignee(assignee);
        if let Some(days) = due {
            command = command.with_due_date(today + Duration::days(days));
        }
        command.execute(&mut ctx).into_result().unwrap();
    }

    let view = GetBoard::new()
        .with_filters(
            TaskFilters::new()
                .with_search("LOGIN")
                .with_priority(Priority::High)
                .with_assignee("ana"),
        )
        .execute(&mut ctx)
        .into_result()
        .unwrap();
    assert!(view.filtered);
    let visible: Vec<(&str, Vec<&str>)> = view
        .columns
        .iter()
        .map(|c| {
            (
                c.column.id.as_str(),
                c.tasks.iter().map(|t| t.title.as_str()).collect(),
            )
        })
        .collect();
    assert_eq!(visible[1], ("ready", vec!["Fix login bug"]));
    assert_eq!(visible[2], ("in_progress", vec!["Login audit"]));
    // Totals are counted before filtering
    assert_eq!(view.columns[1].total, 2);

    let overdue = GetBoard::new()
        .with_filters(TaskFilters::new().with_due(DueDateFilter::Overdue))
        .execute(&mut ctx)
        .into_result()
        .unwrap();
    let count: usize = overdue.columns.iter().map(|c| c.tasks.len()).sum();
    assert_eq!(count, 1);

    let this_week = GetBoard::new()
        .with_filters(TaskFilters::new().with_due(DueDateFilter::ThisWeek))
        .execute(&mut ctx)
        .into_result()
        .unwrap();
    let count: usize = this_week.columns.iter().map(|c| c.tasks.len()).sum();
    assert_eq!(count, 2);
}

#[test]
fn test_apply_preset_remaps_tasks() {
    let mut ctx = BoardContext::new("project-1");
    add(&mut ctx, "A", "backlog");
    add(&mut ctx, "B", "ready");
    add(&mut ctx, "C", "completed");

    let strict = ApplyPreset::new("kanban").strict().execute(&mut ctx).into_result();
    assert!(matches!(strict, Err(BoardError::PresetBlocked { count: 3, .. })));

    ApplyPreset::new("kanban")
        .with_mapping("backlog", "to_do")
        .with_mapping("ready", "to_do")
        .with_mapping("completed", "done")
        .execute(&mut ctx)
        .into_result()
        .unwrap();

    assert_eq!(ctx.columns().len(), 3);
    assert_eq!(titles(&ctx, "to_do"), vec!["A", "B"]);
    assert_eq!(titles(&ctx, "done"), vec!["C"]);
    ctx.validate().unwrap();
}

#[test]
fn test_from_parts_rejects_dangling_status() {
    let now = Utc.with_ymd_and_hms(2025, 12, 1, 9, 0, 0).unwrap();
    let task = taskboard::Task::new(
        "Orphan",
        ColumnId::from("nowhere"),
        "project-1".into(),
        now,
    )
    .with_due_date(NaiveDate::from_ymd_opt(2025, 12, 24).unwrap());
    let result = BoardContext::from_parts(
        "project-1",
        taskboard::Column::default_columns(),
        vec![task],
    );
    assert!(matches!(result, Err(BoardError::ColumnNotFound { .. })));
}
