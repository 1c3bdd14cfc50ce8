//! Error classification at the engine boundary.

use super::helpers::{FaultyTaskRepository, FixedClock, clock, open, open_with};
use rstest::rstest;
use todo_engine::{
    category::{
        domain::CategoryId,
        ports::CategoryRepositoryError,
        services::{CategoryServiceError, PartialCategoryDeletion},
    },
    config::EngineConfig,
    engine::{EngineError, ErrorKind},
    task::{
        domain::TaskId,
        services::{AddSubtaskRequest, CreateTaskRequest, TaskServiceError},
    },
};

#[rstest]
#[case(CreateTaskRequest::new("", 5))]
#[case(CreateTaskRequest::new("Bad score", 3))]
#[case(CreateTaskRequest::new("Unknown category", 5).with_category("hobbies"))]
#[tokio::test(flavor = "multi_thread")]
async fn invalid_input_is_a_validation_error(
    clock: FixedClock,
    #[case] request: CreateTaskRequest,
) -> eyre::Result<()> {
    let harness = open(clock).await?;

    let result = harness.engine.create_task(request).await;

    assert_eq!(result.err().map(|err| err.kind()), Some(ErrorKind::Validation));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn missing_references_are_not_found(clock: FixedClock) -> eyre::Result<()> {
    let harness = open(clock).await?;
    let engine = &harness.engine;
    let missing = TaskId::new();

    let kinds = [
        engine.toggle_task_status(missing).await.err().map(|err| err.kind()),
        engine.delete_task(missing).await.err().map(|err| err.kind()),
        engine
            .add_subtask(AddSubtaskRequest::new(missing, "Child", 5))
            .await
            .err()
            .map(|err| err.kind()),
        engine.delete_category("ghost").await.err().map(|err| err.kind()),
    ];

    assert_eq!(kinds, [Some(ErrorKind::NotFound); 4]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn the_fallback_category_is_protected(clock: FixedClock) -> eyre::Result<()> {
    let harness = open(clock).await?;

    let result = harness.engine.delete_category("work").await;

    assert_eq!(result.err().map(|err| err.kind()), Some(ErrorKind::Validation));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn an_unreachable_store_is_a_transient_error(clock: FixedClock) -> eyre::Result<()> {
    let harness = open_with(
        FaultyTaskRepository::default(),
        clock,
        EngineConfig::immediate(),
    )
    .await?;
    harness.tasks.go_offline();

    let result = harness.engine.load_tasks().await;

    assert_eq!(
        result.err().map(|err| err.kind()),
        Some(ErrorKind::TransientStore)
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn interrupted_cascades_report_what_was_deleted(clock: FixedClock) -> eyre::Result<()> {
    let harness = open_with(
        FaultyTaskRepository::default(),
        clock,
        EngineConfig::immediate(),
    )
    .await?;
    let engine = &harness.engine;
    let root = engine.create_task(CreateTaskRequest::new("Root", 5)).await?;
    let child = engine
        .add_subtask(AddSubtaskRequest::new(root.id(), "Child", 5))
        .await?;
    let grandchild = engine
        .add_subtask(AddSubtaskRequest::new(child.id(), "Grandchild", 5))
        .await?;
    harness.tasks.fail_delete_of(child.id());

    let result = engine.delete_task(root.id()).await;

    let Err(err) = result else {
        return Err(eyre::eyre!("expected the cascade to fail"));
    };
    assert_eq!(err.kind(), ErrorKind::PartialCascade);
    let EngineError::Task(TaskServiceError::PartialWrite(report)) = err else {
        return Err(eyre::eyre!("expected a partial write report"));
    };
    assert_eq!(report.succeeded, vec![grandchild.id()]);
    assert_eq!(report.failed, child.id());
    assert_eq!(report.skipped, vec![root.id()]);

    let remaining: Vec<TaskId> = engine
        .load_tasks()
        .await?
        .iter()
        .map(|task| task.id())
        .collect();
    assert!(remaining.contains(&root.id()));
    assert!(remaining.contains(&child.id()));
    assert!(!remaining.contains(&grandchild.id()));
    Ok(())
}

#[rstest]
fn interrupted_category_delete_is_a_partial_cascade() -> eyre::Result<()> {
    let report = PartialCategoryDeletion {
        category_id: CategoryId::new("life")?,
        reassigned: vec![TaskId::new()],
        cause: CategoryRepositoryError::persistence(std::io::Error::other("disk full")),
    };

    let err = EngineError::from(CategoryServiceError::PartialDelete(Box::new(report)));

    assert_eq!(err.kind(), ErrorKind::PartialCascade);
    assert!(err.to_string().contains("1 task(s) were reassigned"));
    Ok(())
}
