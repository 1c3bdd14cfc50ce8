//! Task loading, creation, and field updates.

use super::{
    CreateTaskRequest, PartialWriteReport, TaskServiceError, TaskServiceResult,
    UpdateTaskRequest, WriteOperation,
};
use crate::category::{domain::CategoryId, ports::CategoryRepository};
use crate::retry::RetryPolicy;
use crate::task::{
    domain::{
        Score, Task, TaskDomainError, TaskDraft, TaskId, TaskText, child_level,
        descendants_deepest_first, is_descendant, normalize, position_for_new_item,
    },
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::collections::HashMap;
use std::sync::Arc;

/// Task orchestration service.
///
/// Every store call goes through the configured [`RetryPolicy`]; only
/// transient store failures are retried.
#[derive(Clone)]
pub struct TaskService<T, K, C>
where
    T: TaskRepository,
    K: CategoryRepository,
    C: Clock + Send + Sync,
{
    pub(super) tasks: Arc<T>,
    categories: Arc<K>,
    pub(super) clock: Arc<C>,
    pub(super) retry: RetryPolicy,
}

impl<T, K, C> TaskService<T, K, C>
where
    T: TaskRepository,
    K: CategoryRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task service with the default retry policy.
    #[must_use]
    pub fn new(tasks: Arc<T>, categories: Arc<K>, clock: Arc<C>) -> Self {
        Self {
            tasks,
            categories,
            clock,
            retry: RetryPolicy::default(),
        }
    }

    /// Replaces the retry policy.
    #[must_use]
    pub const fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Loads every task, sorted by position.
    ///
    /// Records missing fields are normalised and written back once, so a
    /// second load reads them unchanged. Records with blank text cannot be
    /// repaired; they are logged and left out of the list but stay in the
    /// store untouched. Ties on position are broken by creation time and
    /// then identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the store fails.
    pub async fn load(&self) -> TaskServiceResult<Vec<Task>> {
        let records = self.retry.run("list tasks", || self.tasks.list()).await?;
        let now = self.clock.utc();
        let mut loaded = Vec::with_capacity(records.len());

        for (index, record) in records.into_iter().enumerate() {
            let ordinal = i64::try_from(index).unwrap_or(i64::MAX);
            let normalized = match normalize(record, ordinal, now) {
                Ok(repaired) => repaired,
                Err(err) => {
                    tracing::warn!(error = %err, "skipping unrepairable task record");
                    continue;
                }
            };
            if normalized.needs_write_back() {
                tracing::info!(
                    task_id = %normalized.task.id(),
                    fields = ?normalized.backfilled,
                    "backfilling legacy task record"
                );
                self.retry
                    .run("backfill task", || self.tasks.update(&normalized.task))
                    .await?;
            }
            loaded.push(normalized.task);
        }

        sort_by_position(&mut loaded);
        Ok(loaded)
    }

    /// Creates a task at the top of the list.
    ///
    /// The category defaults to the fallback category. When a parent is
    /// given the level is derived from it; a level supplied alongside must
    /// agree.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError`] when validation fails, the category or
    /// parent does not exist, or the store rejects the write.
    pub async fn create(&self, request: CreateTaskRequest) -> TaskServiceResult<Task> {
        let CreateTaskRequest {
            text: raw_text,
            score: raw_score,
            category_id: raw_category,
            parent_id,
            level,
        } = request;
        let text = TaskText::new(raw_text)?;
        let score = Score::try_from(raw_score)?;
        let category_id = self.resolve_category(raw_category).await?;

        let existing = self.load().await?;
        let derived_level = match parent_id {
            Some(id) => {
                let parent = find_in(&existing, id).ok_or(TaskServiceError::ParentNotFound(id))?;
                child_level(parent)
            }
            None => 0,
        };
        if let Some(supplied) = level.filter(|&value| value != derived_level) {
            return Err(TaskDomainError::LevelMismatch {
                expected: derived_level,
                supplied,
            }
            .into());
        }

        let position = position_for_new_item(&existing)?;
        let task = Task::new(
            TaskDraft {
                text,
                score,
                category_id,
                parent_id,
                level: derived_level,
            },
            position,
            &*self.clock,
        );
        self.retry.run("store task", || self.tasks.store(&task)).await?;
        tracing::info!(
            task_id = %task.id(),
            position,
            level = derived_level,
            parent_id = ?parent_id,
            "task created"
        );
        Ok(task)
    }

    /// Applies a partial update.
    ///
    /// Re-parenting rejects self-parenting and cycles, then recomputes the
    /// level of the task and every descendant.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError`] when validation fails, a referenced task
    /// or category is missing, or the store rejects a write. A failure after
    /// some descendants were written is reported as
    /// [`TaskServiceError::PartialWrite`].
    pub async fn update(&self, request: UpdateTaskRequest) -> TaskServiceResult<Task> {
        let UpdateTaskRequest {
            id,
            text: raw_text,
            status,
            score: raw_score,
            category_id: raw_category,
            parent_id,
        } = request;
        let text = raw_text.map(TaskText::new).transpose()?;
        let score = raw_score.map(Score::try_from).transpose()?;
        let category_id = match raw_category {
            Some(raw) => Some(self.resolve_category(Some(raw)).await?),
            None => None,
        };

        let existing = self.load().await?;
        let mut task = find_in(&existing, id)
            .cloned()
            .ok_or(TaskServiceError::TaskNotFound(id))?;
        let clock = &*self.clock;

        if let Some(value) = text {
            task.set_text(value, clock);
        }
        if let Some(value) = score {
            task.set_score(value, clock);
        }
        if let Some(value) = category_id {
            task.set_category(value, clock);
        }
        if let Some(value) = status {
            task.set_status(value, clock);
        }

        let Some(new_parent) = parent_id else {
            self.retry.run("update task", || self.tasks.update(&task)).await?;
            tracing::debug!(task_id = %id, "task updated");
            return Ok(task);
        };

        let level = match new_parent {
            Some(parent) if parent == id => return Err(TaskDomainError::SelfParent(id).into()),
            Some(parent) => {
                if is_descendant(parent, id, &existing) {
                    return Err(TaskDomainError::ParentCycle { task: id, parent }.into());
                }
                let parent_task =
                    find_in(&existing, parent).ok_or(TaskServiceError::ParentNotFound(parent))?;
                child_level(parent_task)
            }
            None => 0,
        };
        task.set_parent(new_parent, level, clock);

        let mut writes = vec![task.clone()];
        writes.extend(self.relevel_descendants(&task, &existing));
        self.write_all(WriteOperation::Reparent, &writes).await?;
        tracing::info!(
            task_id = %id,
            parent_id = ?new_parent,
            level,
            relevelled = writes.len().saturating_sub(1),
            "task re-parented"
        );
        Ok(task)
    }

    /// Flips a task between pending and completed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`] when the task does not
    /// exist, or a repository error when the write fails.
    pub async fn toggle_status(&self, id: TaskId) -> TaskServiceResult<Task> {
        let existing = self.load().await?;
        let mut task = find_in(&existing, id)
            .cloned()
            .ok_or(TaskServiceError::TaskNotFound(id))?;
        task.toggle_status(&*self.clock);
        self.retry.run("update task", || self.tasks.update(&task)).await?;
        tracing::debug!(task_id = %id, status = task.status().as_str(), "task status toggled");
        Ok(task)
    }

    /// Returns the fallback category when `raw` is absent, after checking
    /// that the category exists.
    pub(super) async fn resolve_category(
        &self,
        raw: Option<String>,
    ) -> TaskServiceResult<CategoryId> {
        let category_id = raw.map_or_else(|| Ok(CategoryId::fallback()), CategoryId::new)?;
        let found = self
            .retry
            .run("find category", || self.categories.find_by_id(&category_id))
            .await?;
        if found.is_none() {
            return Err(TaskServiceError::UnknownCategory(category_id));
        }
        Ok(category_id)
    }

    /// Returns copies of the descendants of `task` whose level changes once
    /// `task` sits at its new level, parents before children.
    fn relevel_descendants(&self, task: &Task, existing: &[Task]) -> Vec<Task> {
        let mut levels = HashMap::from([(task.id(), task.level())]);
        let mut changed = Vec::new();
        for descendant_id in descendants_deepest_first(task.id(), existing)
            .into_iter()
            .rev()
        {
            let Some(descendant) = find_in(existing, descendant_id) else {
                continue;
            };
            let Some(parent_level) = descendant
                .parent_id()
                .and_then(|parent| levels.get(&parent).copied())
            else {
                continue;
            };
            let level = parent_level.saturating_add(1);
            levels.insert(descendant_id, level);
            if descendant.level() != level {
                let mut updated = descendant.clone();
                updated.set_level(level, &*self.clock);
                changed.push(updated);
            }
        }
        changed
    }

    /// Updates `writes` in order, reporting a partial write when a later
    /// update fails after earlier ones landed.
    pub(super) async fn write_all(
        &self,
        operation: WriteOperation,
        writes: &[Task],
    ) -> TaskServiceResult<()> {
        for (index, task) in writes.iter().enumerate() {
            let result = self
                .retry
                .run(operation.as_str(), || self.tasks.update(task))
                .await;
            if let Err(cause) = result {
                if index == 0 {
                    return Err(cause.into());
                }
                return Err(partial_write(operation, writes, index, cause));
            }
        }
        Ok(())
    }
}

/// Builds the partial-write error for a failure at `failed_index`.
pub(super) fn partial_write(
    operation: WriteOperation,
    writes: &[Task],
    failed_index: usize,
    cause: TaskRepositoryError,
) -> TaskServiceError {
    let ids: Vec<TaskId> = writes.iter().map(Task::id).collect();
    partial_write_for_ids(operation, &ids, failed_index, cause)
}

/// Builds a partial-write error from the identifiers of an ordered batch.
pub(super) fn partial_write_for_ids(
    operation: WriteOperation,
    ids: &[TaskId],
    failed_index: usize,
    cause: TaskRepositoryError,
) -> TaskServiceError {
    let (succeeded, rest) = ids.split_at(failed_index);
    let Some((&failed, skipped)) = rest.split_first() else {
        return TaskServiceError::Repository(cause);
    };
    let report = PartialWriteReport {
        operation,
        succeeded: succeeded.to_vec(),
        failed,
        skipped: skipped.to_vec(),
        cause,
    };
    tracing::error!(
        operation = operation.as_str(),
        failed_task = %failed,
        succeeded = report.succeeded.len(),
        skipped = report.skipped.len(),
        error = %report.cause,
        "multi-record write stopped part-way"
    );
    TaskServiceError::PartialWrite(Box::new(report))
}

pub(super) fn find_in(tasks: &[Task], id: TaskId) -> Option<&Task> {
    tasks.iter().find(|task| task.id() == id)
}

/// Sorts by position, then creation time, then identifier.
pub(super) fn sort_by_position(tasks: &mut [Task]) {
    tasks.sort_by(|left, right| {
        left.position()
            .cmp(&right.position())
            .then_with(|| left.created_at().cmp(&right.created_at()))
            .then_with(|| left.id().cmp(&right.id()))
    });
}
