//! Shared fixtures for engine integration tests.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use mockable::Clock;
use rstest::fixture;
use std::collections::HashSet;
use std::io;
use std::sync::{Arc, Mutex};
use todo_engine::{
    category::{adapters::memory::InMemoryCategoryRepository, domain::CategoryId},
    config::EngineConfig,
    engine::TodoEngine,
    task::{
        adapters::memory::InMemoryTaskRepository,
        domain::{Task, TaskId, TaskRecord},
        ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
    },
};

/// Clock pinned to a settable instant.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl FixedClock {
    /// Creates a clock reporting `now`.
    #[must_use]
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(now)),
        }
    }

    /// Moves the clock forward.
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().expect("clock lock");
        *now += by;
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.now.lock().expect("clock lock")
    }
}

/// Provides a clock set to Monday 2 March 2026, 09:00 UTC.
#[fixture]
pub fn clock() -> FixedClock {
    FixedClock::at(
        Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0)
            .single()
            .expect("valid instant"),
    )
}

/// An engine together with handles on its collaborators.
pub struct Harness<T: TaskRepository> {
    /// The engine under test.
    pub engine: TodoEngine<T, InMemoryCategoryRepository, FixedClock>,
    /// The task store behind the engine.
    pub tasks: Arc<T>,
    /// The clock driving the engine.
    pub clock: Arc<FixedClock>,
}

/// Opens an engine over `tasks` with default categories seeded.
///
/// # Errors
///
/// Returns an error when seeding the default categories fails.
pub async fn open_with<T: TaskRepository>(
    tasks: T,
    clock: FixedClock,
    config: EngineConfig,
) -> Result<Harness<T>, eyre::Report> {
    let shared_tasks = Arc::new(tasks);
    let shared_clock = Arc::new(clock);
    let engine = TodoEngine::open(
        Arc::clone(&shared_tasks),
        Arc::new(InMemoryCategoryRepository::new()),
        Arc::clone(&shared_clock),
        config,
    )
    .await?;
    Ok(Harness {
        engine,
        tasks: shared_tasks,
        clock: shared_clock,
    })
}

/// Opens an in-memory engine without caching or retry delays.
///
/// # Errors
///
/// Returns an error when seeding the default categories fails.
pub async fn open(clock: FixedClock) -> Result<Harness<InMemoryTaskRepository>, eyre::Report> {
    open_with(InMemoryTaskRepository::new(), clock, EngineConfig::immediate()).await
}

/// Returns the identifiers of `tasks` in order.
#[must_use]
pub fn ids(tasks: &[Task]) -> Vec<TaskId> {
    tasks.iter().map(Task::id).collect()
}

/// Task store that fails chosen calls and delegates the rest to memory.
#[derive(Debug, Default)]
pub struct FaultyTaskRepository {
    inner: InMemoryTaskRepository,
    failing_deletes: Mutex<HashSet<TaskId>>,
    unavailable: Mutex<bool>,
}

impl FaultyTaskRepository {
    /// Makes every delete of `id` fail permanently.
    pub fn fail_delete_of(&self, id: TaskId) {
        self.failing_deletes.lock().expect("fault lock").insert(id);
    }

    /// Makes every call fail as if the store were unreachable.
    pub fn go_offline(&self) {
        *self.unavailable.lock().expect("fault lock") = true;
    }

    fn check_online(&self) -> TaskRepositoryResult<()> {
        if *self.unavailable.lock().expect("fault lock") {
            return Err(TaskRepositoryError::unavailable(io::Error::other(
                "store offline",
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl TaskRepository for FaultyTaskRepository {
    async fn list(&self) -> TaskRepositoryResult<Vec<TaskRecord>> {
        self.check_online()?;
        self.inner.list().await
    }

    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        self.check_online()?;
        self.inner.store(task).await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        self.check_online()?;
        self.inner.update(task).await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        self.check_online()?;
        if self.failing_deletes.lock().expect("fault lock").contains(&id) {
            return Err(TaskRepositoryError::persistence(io::Error::other(
                "delete rejected",
            )));
        }
        self.inner.delete(id).await
    }

    async fn reassign_category(
        &self,
        from: &CategoryId,
        to: &CategoryId,
        at: DateTime<Utc>,
    ) -> TaskRepositoryResult<Vec<TaskId>> {
        self.check_online()?;
        self.inner.reassign_category(from, to, at).await
    }
}
