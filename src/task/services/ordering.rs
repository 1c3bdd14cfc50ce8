//! Manual reordering by swapping positions with a neighbour.

use super::{TaskService, TaskServiceError, TaskServiceResult, WriteOperation, store::find_in};
use crate::category::ports::CategoryRepository;
use crate::task::{
    domain::{MoveDirection, PositionSwap, Task, TaskId, plan_move},
    ports::TaskRepository,
};
use mockable::Clock;

impl<T, K, C> TaskService<T, K, C>
where
    T: TaskRepository,
    K: CategoryRepository,
    C: Clock + Send + Sync,
{
    /// Moves task `id` one step towards the top of `scope`.
    ///
    /// `scope` is the candidate set for the neighbour: the whole list, or the
    /// task's siblings. Returns `None` without writing when the task is
    /// already first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError`] when either task has disappeared or a
    /// write fails. A failure on the second write is reported as
    /// [`TaskServiceError::PartialWrite`].
    pub async fn move_up(
        &self,
        id: TaskId,
        current_position: i64,
        scope: &[Task],
    ) -> TaskServiceResult<Option<PositionSwap>> {
        self.apply_move(MoveDirection::Up, id, current_position, scope)
            .await
    }

    /// Moves task `id` one step towards the bottom of `scope`.
    ///
    /// # Errors
    ///
    /// See [`TaskService::move_up`].
    pub async fn move_down(
        &self,
        id: TaskId,
        current_position: i64,
        scope: &[Task],
    ) -> TaskServiceResult<Option<PositionSwap>> {
        self.apply_move(MoveDirection::Down, id, current_position, scope)
            .await
    }

    async fn apply_move(
        &self,
        direction: MoveDirection,
        id: TaskId,
        current_position: i64,
        scope: &[Task],
    ) -> TaskServiceResult<Option<PositionSwap>> {
        let Some(swap) = plan_move(direction, id, current_position, scope) else {
            tracing::debug!(task_id = %id, ?direction, "task already at boundary");
            return Ok(None);
        };

        let existing = self.load().await?;
        let mut moved = find_in(&existing, swap.moved)
            .cloned()
            .ok_or(TaskServiceError::TaskNotFound(swap.moved))?;
        let mut displaced = find_in(&existing, swap.displaced)
            .cloned()
            .ok_or(TaskServiceError::TaskNotFound(swap.displaced))?;
        moved.set_position(swap.moved_to, &*self.clock);
        displaced.set_position(swap.displaced_to, &*self.clock);

        self.write_all(WriteOperation::PositionSwap, &[moved, displaced])
            .await?;

        tracing::debug!(
            task_id = %swap.moved,
            neighbour = %swap.displaced,
            position = swap.moved_to,
            ?direction,
            "task moved"
        );
        Ok(Some(swap))
    }
}
