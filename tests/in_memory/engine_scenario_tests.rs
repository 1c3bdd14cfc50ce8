//! End-to-end scenarios through the engine facade.

use super::helpers::{FixedClock, clock, ids, open, open_with};
use rstest::rstest;
use todo_engine::{
    config::EngineConfig,
    engine::MoveScope,
    query::{CompletionTimeframe, TaskQuery},
    task::{
        adapters::memory::InMemoryTaskRepository,
        domain::{TaskId, TaskRecord, TaskStatus},
        services::{AddSubtaskRequest, CreateTaskRequest, UpdateTaskRequest},
    },
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_move_delete_and_subtask_walkthrough(clock: FixedClock) -> eyre::Result<()> {
    let harness = open(clock).await?;
    let engine = &harness.engine;

    let a = engine.create_task(CreateTaskRequest::new("A", 5)).await?;
    let b = engine.create_task(CreateTaskRequest::new("B", 5)).await?;
    let c = engine.create_task(CreateTaskRequest::new("C", 5)).await?;
    assert_eq!([a.position(), b.position(), c.position()], [-1, -2, -3]);
    assert_eq!(ids(&engine.load_tasks().await?), vec![c.id(), b.id(), a.id()]);

    engine.move_task_down(c.id(), MoveScope::AllTasks).await?;
    assert_eq!(ids(&engine.load_tasks().await?), vec![b.id(), c.id(), a.id()]);

    engine.delete_task(b.id()).await?;
    assert_eq!(ids(&engine.load_tasks().await?), vec![c.id(), a.id()]);

    let d = engine
        .add_subtask(AddSubtaskRequest::new(a.id(), "D", 2))
        .await?;
    assert_eq!(d.level(), 1);
    assert_eq!(d.parent_id(), Some(a.id()));

    let report = engine.delete_task(a.id()).await?;
    assert_eq!(report.deleted, vec![d.id(), a.id()]);
    assert_eq!(ids(&engine.load_tasks().await?), vec![c.id()]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn sibling_scope_ignores_tasks_under_other_parents(clock: FixedClock) -> eyre::Result<()> {
    let harness = open(clock).await?;
    let engine = &harness.engine;
    let left = engine.create_task(CreateTaskRequest::new("Left", 5)).await?;
    let right = engine.create_task(CreateTaskRequest::new("Right", 5)).await?;
    let left_first = engine
        .add_subtask(AddSubtaskRequest::new(left.id(), "Left one", 5))
        .await?;
    let right_child = engine
        .add_subtask(AddSubtaskRequest::new(right.id(), "Right one", 5))
        .await?;
    let left_second = engine
        .add_subtask(AddSubtaskRequest::new(left.id(), "Left two", 5))
        .await?;

    // Globally the right-hand child sits between the two left children.
    assert!(left_second.position() < right_child.position());
    assert!(right_child.position() < left_first.position());

    let swap = engine
        .move_task_up(left_first.id(), MoveScope::Siblings)
        .await?
        .ok_or_else(|| eyre::eyre!("expected a sibling to swap with"))?;

    assert_eq!(swap.displaced, left_second.id());
    assert_eq!(swap.moved_to, left_second.position());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn moving_the_top_task_up_changes_nothing(clock: FixedClock) -> eyre::Result<()> {
    let harness = open(clock).await?;
    let engine = &harness.engine;
    engine.create_task(CreateTaskRequest::new("Lower", 5)).await?;
    let top = engine.create_task(CreateTaskRequest::new("Top", 5)).await?;
    let before = engine.load_tasks().await?;

    let swap = engine.move_task_up(top.id(), MoveScope::AllTasks).await?;

    assert_eq!(swap, None);
    assert_eq!(engine.load_tasks().await?, before);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn completed_tasks_can_be_hidden_and_counted(clock: FixedClock) -> eyre::Result<()> {
    let harness = open(clock).await?;
    let engine = &harness.engine;
    let done = engine.create_task(CreateTaskRequest::new("Done", 10)).await?;
    engine.create_task(CreateTaskRequest::new("Open", 7)).await?;

    let toggled = engine.toggle_task_status(done.id()).await?;
    let visible = engine
        .query_tasks(&TaskQuery::new().with_show_completed(false))
        .await?;
    let today = engine
        .query_tasks(&TaskQuery::new().with_timeframe(CompletionTimeframe::Today))
        .await?;
    let stats = engine.statistics().await?;

    assert_eq!(toggled.status(), TaskStatus::Completed);
    assert_eq!(visible.len(), 1);
    assert_eq!(today.len(), 2);
    assert_eq!((stats.completed, stats.pending), (1, 1));
    assert_eq!(stats.completion_percent(), 50);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn outline_lists_completed_roots_last(clock: FixedClock) -> eyre::Result<()> {
    let harness = open(clock).await?;
    let engine = &harness.engine;
    let parent = engine.create_task(CreateTaskRequest::new("Parent", 5)).await?;
    let child = engine
        .add_subtask(AddSubtaskRequest::new(parent.id(), "Child", 5))
        .await?;
    let finished = engine.create_task(CreateTaskRequest::new("Finished", 5)).await?;
    engine
        .update_task(UpdateTaskRequest::new(finished.id()).with_status(TaskStatus::Completed))
        .await?;

    let rows: Vec<_> = engine
        .outline(&TaskQuery::new())
        .await?
        .into_iter()
        .map(|entry| (entry.task.id(), entry.depth))
        .collect();

    assert_eq!(rows, vec![
        (parent.id(), 0),
        (child.id(), 1),
        (finished.id(), 0)
    ]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn opening_twice_seeds_defaults_once(clock: FixedClock) -> eyre::Result<()> {
    let harness = open(clock).await?;

    let reseeded = harness.engine.seed_default_categories().await?;
    let categories = harness.engine.load_categories().await?;

    assert!(reseeded.is_empty());
    assert_eq!(categories.len(), 3);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn one_damaged_legacy_record_leaves_the_list_usable(clock: FixedClock) -> eyre::Result<()> {
    let good = TaskId::new();
    let odd_status = TaskId::new();
    let blank = TaskId::new();
    let harness = open_with(
        InMemoryTaskRepository::with_records([
            TaskRecord::bare(good, "Imported"),
            TaskRecord {
                status: Some("done".to_owned()),
                ..TaskRecord::bare(odd_status, "Imported and finished")
            },
            TaskRecord::bare(blank, ""),
        ]),
        clock,
        EngineConfig::immediate(),
    )
    .await?;
    let engine = &harness.engine;

    let loaded = engine.load_tasks().await?;
    assert_eq!(ids(&loaded), vec![good, odd_status]);
    assert!(loaded.iter().all(|task| task.status() == TaskStatus::Pending));

    let fresh = engine
        .create_task(CreateTaskRequest::new("New", 7))
        .await?;
    engine.toggle_task_status(odd_status).await?;
    engine.delete_task(good).await?;

    assert_eq!(ids(&engine.load_tasks().await?), vec![fresh.id(), odd_status]);
    assert!(harness.tasks.raw_record(blank)?.is_some());
    Ok(())
}
