//! Subtask creation and cascading deletes.

use super::{
    AddSubtaskRequest, CascadeReport, CreateTaskRequest, TaskService, TaskServiceError,
    TaskServiceResult, WriteOperation,
    store::{find_in, partial_write_for_ids},
};
use crate::category::ports::CategoryRepository;
use crate::task::{
    domain::{Task, TaskId, descendants_deepest_first},
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;

impl<T, K, C> TaskService<T, K, C>
where
    T: TaskRepository,
    K: CategoryRepository,
    C: Clock + Send + Sync,
{
    /// Creates a subtask one level below `parent_id`.
    ///
    /// The subtask inherits the parent's category unless the request
    /// overrides it, and is positioned at the top of the whole list.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::ParentNotFound`] when the parent does not
    /// exist, or any error [`TaskService::create`] can return.
    pub async fn add_subtask(&self, request: AddSubtaskRequest) -> TaskServiceResult<Task> {
        let AddSubtaskRequest {
            parent_id,
            text,
            score,
            category_id,
        } = request;
        let existing = self.load().await?;
        let parent =
            find_in(&existing, parent_id).ok_or(TaskServiceError::ParentNotFound(parent_id))?;
        let inherited = category_id.unwrap_or_else(|| parent.category_id().as_str().to_owned());

        self.create(
            CreateTaskRequest::new(text, score)
                .with_category(inherited)
                .with_parent(parent_id),
        )
        .await
    }

    /// Deletes a task and every descendant, deepest first.
    ///
    /// A descendant that has already vanished from the store counts as
    /// deleted.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`] when the task does not
    /// exist. When a delete fails after earlier ones succeeded the error is
    /// [`TaskServiceError::PartialWrite`], naming the deleted, failed and
    /// untouched tasks.
    pub async fn delete(&self, id: TaskId) -> TaskServiceResult<CascadeReport> {
        let existing = self.load().await?;
        if find_in(&existing, id).is_none() {
            return Err(TaskServiceError::TaskNotFound(id));
        }

        let mut order = descendants_deepest_first(id, &existing);
        order.push(id);

        for (index, task_id) in order.iter().enumerate() {
            let result = self
                .retry
                .run("delete task", || self.tasks.delete(*task_id))
                .await;
            match result {
                Ok(()) => {}
                Err(TaskRepositoryError::NotFound(_)) if *task_id != id => {
                    tracing::debug!(task_id = %task_id, "descendant already removed");
                }
                Err(cause) if index == 0 => return Err(cause.into()),
                Err(cause) => {
                    return Err(partial_write_for_ids(
                        WriteOperation::CascadeDelete,
                        &order,
                        index,
                        cause,
                    ));
                }
            }
        }

        tracing::info!(
            task_id = %id,
            descendants = order.len().saturating_sub(1),
            "task deleted with descendants"
        );
        Ok(CascadeReport { deleted: order })
    }
}
