//! The engine facade: every read and write a client needs.
//!
//! [`TodoEngine`] wires the task and category services to one pair of
//! repositories and keeps a time-windowed cache of the last reads. Every
//! write drops both caches whether it succeeds or fails, so the next read
//! always reflects the store.

use crate::cache::ReadCache;
use crate::category::{
    domain::Category,
    ports::{CategoryRepository, CategoryRepositoryError},
    services::{
        CategoryDeletion, CategoryService, CategoryServiceError, CreateCategoryRequest,
        UpdateCategoryRequest,
    },
};
use crate::config::EngineConfig;
use crate::query::{OutlineEntry, TaskQuery, TaskStatistics, outline};
use crate::task::{
    domain::{PositionSwap, Task, TaskId},
    ports::{TaskRepository, TaskRepositoryError},
    services::{
        AddSubtaskRequest, CascadeReport, CreateTaskRequest, TaskService, TaskServiceError,
        UpdateTaskRequest,
    },
};
use mockable::Clock;
use std::future::Future;
use std::sync::Arc;
use thiserror::Error;

/// Broad classification of engine failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The caller supplied invalid input.
    Validation,
    /// A referenced task or category does not exist.
    NotFound,
    /// The store was unreachable and retries were exhausted.
    TransientStore,
    /// A multi-record write stopped after some records were written.
    PartialCascade,
    /// Any other store failure.
    Store,
}

/// Errors returned by [`TodoEngine`].
#[derive(Debug, Error)]
pub enum EngineError {
    /// A task operation failed.
    #[error(transparent)]
    Task(#[from] TaskServiceError),

    /// A category operation failed.
    #[error(transparent)]
    Category(#[from] CategoryServiceError),
}

impl EngineError {
    /// Classifies the failure.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Task(err) => match err {
                TaskServiceError::Domain(_)
                | TaskServiceError::CategoryDomain(_)
                | TaskServiceError::UnknownCategory(_) => ErrorKind::Validation,
                TaskServiceError::TaskNotFound(_) | TaskServiceError::ParentNotFound(_) => {
                    ErrorKind::NotFound
                }
                TaskServiceError::PartialWrite(_) => ErrorKind::PartialCascade,
                TaskServiceError::Repository(cause) => task_store_kind(cause),
                TaskServiceError::CategoryRepository(cause) => category_store_kind(cause),
            },
            Self::Category(err) => match err {
                CategoryServiceError::Domain(_) => ErrorKind::Validation,
                CategoryServiceError::NotFound(_) => ErrorKind::NotFound,
                CategoryServiceError::PartialDelete(_) => ErrorKind::PartialCascade,
                CategoryServiceError::Repository(cause) => category_store_kind(cause),
                CategoryServiceError::TaskRepository(cause) => task_store_kind(cause),
            },
        }
    }
}

const fn task_store_kind(err: &TaskRepositoryError) -> ErrorKind {
    match err {
        TaskRepositoryError::NotFound(_) => ErrorKind::NotFound,
        TaskRepositoryError::Unavailable(_) => ErrorKind::TransientStore,
        TaskRepositoryError::DuplicateTask(_)
        | TaskRepositoryError::InvalidPersistedData(_)
        | TaskRepositoryError::Persistence(_) => ErrorKind::Store,
    }
}

const fn category_store_kind(err: &CategoryRepositoryError) -> ErrorKind {
    match err {
        CategoryRepositoryError::NotFound(_) => ErrorKind::NotFound,
        CategoryRepositoryError::Unavailable(_) => ErrorKind::TransientStore,
        CategoryRepositoryError::DuplicateCategory(_)
        | CategoryRepositoryError::InvalidPersistedData(_)
        | CategoryRepositoryError::Persistence(_) => ErrorKind::Store,
    }
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Candidate neighbours for a manual move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MoveScope {
    /// Every task in the list.
    #[default]
    AllTasks,
    /// Only tasks sharing the moved task's parent.
    Siblings,
}

/// Facade over the task and category services with a read cache.
pub struct TodoEngine<T, K, C>
where
    T: TaskRepository,
    K: CategoryRepository,
    C: Clock + Send + Sync,
{
    tasks: TaskService<T, K, C>,
    categories: CategoryService<K, T, C>,
    clock: Arc<C>,
    task_cache: ReadCache<Vec<Task>>,
    category_cache: ReadCache<Vec<Category>>,
}

impl<T, K, C> TodoEngine<T, K, C>
where
    T: TaskRepository,
    K: CategoryRepository,
    C: Clock + Send + Sync,
{
    /// Creates an engine over the given repositories.
    #[must_use]
    pub fn new(
        task_repository: Arc<T>,
        category_repository: Arc<K>,
        clock: Arc<C>,
        config: EngineConfig,
    ) -> Self {
        let tasks = TaskService::new(
            Arc::clone(&task_repository),
            Arc::clone(&category_repository),
            Arc::clone(&clock),
        )
        .with_retry_policy(config.retry);
        let categories =
            CategoryService::new(category_repository, task_repository, Arc::clone(&clock))
                .with_retry_policy(config.retry);
        Self {
            tasks,
            categories,
            clock,
            task_cache: ReadCache::new(config.cache_ttl_secs),
            category_cache: ReadCache::new(config.cache_ttl_secs),
        }
    }

    /// Creates an engine and seeds the default categories into an empty
    /// category store.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] when seeding fails.
    pub async fn open(
        task_repository: Arc<T>,
        category_repository: Arc<K>,
        clock: Arc<C>,
        config: EngineConfig,
    ) -> EngineResult<Self> {
        let engine = Self::new(task_repository, category_repository, clock, config);
        engine.seed_default_categories().await?;
        Ok(engine)
    }

    /// Returns every task ordered by position.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] when the store cannot be read.
    pub async fn load_tasks(&self) -> EngineResult<Vec<Task>> {
        let now = self.clock.utc();
        if let Some(cached) = self.task_cache.get(now) {
            tracing::debug!(cache = "tasks", "cache hit");
            return Ok(cached);
        }
        tracing::debug!(cache = "tasks", "cache miss");
        let tasks = observe("load tasks", self.tasks.load()).await?;
        self.task_cache.put(tasks.clone(), now);
        Ok(tasks)
    }

    /// Returns every category ordered by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] when the store cannot be read.
    pub async fn load_categories(&self) -> EngineResult<Vec<Category>> {
        let now = self.clock.utc();
        if let Some(cached) = self.category_cache.get(now) {
            tracing::debug!(cache = "categories", "cache hit");
            return Ok(cached);
        }
        tracing::debug!(cache = "categories", "cache miss");
        let categories = observe("load categories", self.categories.load()).await?;
        self.category_cache.put(categories.clone(), now);
        Ok(categories)
    }

    /// Returns the tasks matching `query`, in position order.
    ///
    /// Timeframe windows are evaluated in the clock's local time zone.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] when the store cannot be read.
    pub async fn query_tasks(&self, query: &TaskQuery) -> EngineResult<Vec<Task>> {
        let tasks = self.load_tasks().await?;
        tracing::debug!(
            category = ?query.category(),
            timeframe = ?query.timeframe(),
            "filtering tasks"
        );
        Ok(query.apply(&tasks, &self.clock.local()))
    }

    /// Returns the tasks matching `query` arranged for display.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] when the store cannot be read.
    pub async fn outline(&self, query: &TaskQuery) -> EngineResult<Vec<OutlineEntry>> {
        let tasks = self.query_tasks(query).await?;
        Ok(outline(&tasks))
    }

    /// Returns completion statistics over every task.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] when the store cannot be read.
    pub async fn statistics(&self) -> EngineResult<TaskStatistics> {
        let tasks = self.load_tasks().await?;
        Ok(TaskStatistics::from_tasks(&tasks))
    }

    /// Creates a task at the top of the list.
    ///
    /// # Errors
    ///
    /// See [`TaskService::create`].
    pub async fn create_task(&self, request: CreateTaskRequest) -> EngineResult<Task> {
        self.write("create task", self.tasks.create(request)).await
    }

    /// Applies a partial task update.
    ///
    /// # Errors
    ///
    /// See [`TaskService::update`].
    pub async fn update_task(&self, request: UpdateTaskRequest) -> EngineResult<Task> {
        self.write("update task", self.tasks.update(request)).await
    }

    /// Flips a task between pending and completed.
    ///
    /// # Errors
    ///
    /// See [`TaskService::toggle_status`].
    pub async fn toggle_task_status(&self, id: TaskId) -> EngineResult<Task> {
        self.write("toggle task status", self.tasks.toggle_status(id))
            .await
    }

    /// Deletes a task and its descendants.
    ///
    /// # Errors
    ///
    /// See [`TaskService::delete`].
    pub async fn delete_task(&self, id: TaskId) -> EngineResult<CascadeReport> {
        self.write("delete task", self.tasks.delete(id)).await
    }

    /// Moves a task one step up within `scope`.
    ///
    /// Returns `None` when the task is already first.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] when the task does not exist or a write fails.
    pub async fn move_task_up(
        &self,
        id: TaskId,
        scope: MoveScope,
    ) -> EngineResult<Option<PositionSwap>> {
        let (position, candidates) = self.move_candidates(id, scope).await?;
        self.write(
            "move task up",
            self.tasks.move_up(id, position, &candidates),
        )
        .await
    }

    /// Moves a task one step down within `scope`.
    ///
    /// Returns `None` when the task is already last.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] when the task does not exist or a write fails.
    pub async fn move_task_down(
        &self,
        id: TaskId,
        scope: MoveScope,
    ) -> EngineResult<Option<PositionSwap>> {
        let (position, candidates) = self.move_candidates(id, scope).await?;
        self.write(
            "move task down",
            self.tasks.move_down(id, position, &candidates),
        )
        .await
    }

    /// Creates a subtask under an existing task.
    ///
    /// # Errors
    ///
    /// See [`TaskService::add_subtask`].
    pub async fn add_subtask(&self, request: AddSubtaskRequest) -> EngineResult<Task> {
        self.write("add subtask", self.tasks.add_subtask(request))
            .await
    }

    /// Seeds the default categories when none exist.
    ///
    /// # Errors
    ///
    /// See [`CategoryService::seed_defaults`].
    pub async fn seed_default_categories(&self) -> EngineResult<Vec<Category>> {
        self.write("seed default categories", self.categories.seed_defaults())
            .await
    }

    /// Creates a category.
    ///
    /// # Errors
    ///
    /// See [`CategoryService::create`].
    pub async fn create_category(&self, request: CreateCategoryRequest) -> EngineResult<Category> {
        self.write("create category", self.categories.create(request))
            .await
    }

    /// Renames or recolors a category.
    ///
    /// # Errors
    ///
    /// See [`CategoryService::update`].
    pub async fn update_category(&self, request: UpdateCategoryRequest) -> EngineResult<Category> {
        self.write("update category", self.categories.update(request))
            .await
    }

    /// Deletes a category after moving its tasks to the fallback category.
    ///
    /// # Errors
    ///
    /// See [`CategoryService::delete`].
    pub async fn delete_category(&self, id: &str) -> EngineResult<CategoryDeletion> {
        self.write("delete category", self.categories.delete(id))
            .await
    }

    /// Returns the current position of `id` and the tasks it may swap with.
    async fn move_candidates(
        &self,
        id: TaskId,
        scope: MoveScope,
    ) -> EngineResult<(i64, Vec<Task>)> {
        let tasks = self.load_tasks().await?;
        let Some(task) = tasks.iter().find(|task| task.id() == id) else {
            let err = EngineError::from(TaskServiceError::TaskNotFound(id));
            log_failure("move task", &err);
            return Err(err);
        };
        let position = task.position();
        let candidates = match scope {
            MoveScope::AllTasks => tasks,
            MoveScope::Siblings => {
                let parent = task.parent_id();
                tasks
                    .into_iter()
                    .filter(|candidate| candidate.parent_id() == parent)
                    .collect()
            }
        };
        Ok((position, candidates))
    }

    /// Awaits a write, then drops both caches regardless of the outcome.
    async fn write<R, E, F>(&self, operation: &'static str, call: F) -> EngineResult<R>
    where
        F: Future<Output = Result<R, E>>,
        EngineError: From<E>,
    {
        let result = observe(operation, call).await;
        self.task_cache.invalidate();
        self.category_cache.invalidate();
        result
    }
}

/// Awaits `call`, converting and logging any failure.
async fn observe<R, E, F>(operation: &'static str, call: F) -> EngineResult<R>
where
    F: Future<Output = Result<R, E>>,
    EngineError: From<E>,
{
    let result = call.await.map_err(EngineError::from);
    if let Err(err) = &result {
        log_failure(operation, err);
    }
    result
}

fn log_failure(operation: &str, err: &EngineError) {
    match err.kind() {
        ErrorKind::Validation | ErrorKind::NotFound => {
            tracing::warn!(operation, kind = ?err.kind(), error = %err, "operation rejected");
        }
        ErrorKind::TransientStore | ErrorKind::PartialCascade | ErrorKind::Store => {
            tracing::error!(operation, kind = ?err.kind(), error = %err, "operation failed");
        }
    }
}
