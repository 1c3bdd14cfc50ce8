//! Shared world state for task ordering BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use todo_engine::{
    category::adapters::memory::InMemoryCategoryRepository,
    config::EngineConfig,
    engine::TodoEngine,
    task::{adapters::memory::InMemoryTaskRepository, domain::Task},
};

/// Engine type used by the BDD world.
pub type TestEngine = TodoEngine<InMemoryTaskRepository, InMemoryCategoryRepository, DefaultClock>;

/// Scenario world for task ordering behaviour tests.
pub struct OrderingWorld {
    pub engine: TestEngine,
    pub tasks_by_name: HashMap<String, Task>,
}

impl OrderingWorld {
    /// Creates a world over empty in-memory stores.
    #[must_use]
    pub fn new() -> Self {
        let engine = TodoEngine::new(
            Arc::new(InMemoryTaskRepository::new()),
            Arc::new(InMemoryCategoryRepository::new()),
            Arc::new(DefaultClock),
            EngineConfig::immediate(),
        );
        Self {
            engine,
            tasks_by_name: HashMap::new(),
        }
    }

    /// Looks up a task created earlier in the scenario.
    ///
    /// # Errors
    ///
    /// Returns an error when no task with that name was created.
    pub fn named(&self, name: &str) -> Result<&Task, eyre::Report> {
        self.tasks_by_name
            .get(name)
            .ok_or_else(|| eyre::eyre!("no task named {name} in scenario world"))
    }

    /// Returns the display name of each loaded task, in list order.
    ///
    /// # Errors
    ///
    /// Returns an error when loading fails.
    pub fn listed_names(&self) -> Result<Vec<String>, eyre::Report> {
        let tasks = run_async(self.engine.load_tasks())?;
        Ok(tasks
            .iter()
            .map(|task| task.text().as_str().to_owned())
            .collect())
    }
}

impl Default for OrderingWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> OrderingWorld {
    OrderingWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Splits a comma-separated list of task names.
#[must_use]
pub fn split_names(names: &str) -> Vec<String> {
    names
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_owned)
        .collect()
}
