//! Read-cache behaviour of the engine facade.

use super::helpers::{FixedClock, clock, open_with};
use chrono::Duration;
use rstest::rstest;
use todo_engine::{
    config::EngineConfig,
    engine::ErrorKind,
    retry::RetryPolicy,
    task::{
        adapters::memory::InMemoryTaskRepository,
        domain::{TaskId, TaskRecord},
        ports::TaskRepository,
        services::CreateTaskRequest,
    },
};

fn caching() -> EngineConfig {
    EngineConfig {
        retry: RetryPolicy::none(),
        cache_ttl_secs: 300,
    }
}

async fn sneak_in(tasks: &InMemoryTaskRepository, text: &str) -> eyre::Result<()> {
    let record = TaskRecord {
        position: Some(100),
        ..TaskRecord::bare(TaskId::new(), text)
    };
    let normalized = todo_engine::task::domain::normalize(record, 0, chrono::Utc::now())?;
    tasks.store(&normalized.task).await?;
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reads_are_served_from_cache_within_the_ttl(clock: FixedClock) -> eyre::Result<()> {
    let harness = open_with(InMemoryTaskRepository::new(), clock, caching()).await?;
    let engine = &harness.engine;
    assert!(engine.load_tasks().await?.is_empty());

    sneak_in(&harness.tasks, "Written behind the engine's back").await?;
    assert!(engine.load_tasks().await?.is_empty());

    harness.clock.advance(Duration::seconds(301));
    assert_eq!(engine.load_tasks().await?.len(), 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn successful_writes_invalidate_the_cache(clock: FixedClock) -> eyre::Result<()> {
    let harness = open_with(InMemoryTaskRepository::new(), clock, caching()).await?;
    let engine = &harness.engine;
    assert!(engine.load_tasks().await?.is_empty());

    engine.create_task(CreateTaskRequest::new("Fresh", 5)).await?;

    assert_eq!(engine.load_tasks().await?.len(), 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_writes_invalidate_the_cache_too(clock: FixedClock) -> eyre::Result<()> {
    let harness = open_with(InMemoryTaskRepository::new(), clock, caching()).await?;
    let engine = &harness.engine;
    assert!(engine.load_tasks().await?.is_empty());
    sneak_in(&harness.tasks, "Written behind the engine's back").await?;

    let rejected = engine.create_task(CreateTaskRequest::new("", 5)).await;

    assert_eq!(rejected.map_err(|err| err.kind()).err(), Some(ErrorKind::Validation));
    assert_eq!(engine.load_tasks().await?.len(), 1);
    Ok(())
}
