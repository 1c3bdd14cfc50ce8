//! Position assignment and adjacent swaps.
//!
//! Positions are never renumbered. New tasks take a slot below the current
//! minimum, so keys drift downwards over the life of a list; an `i64` leaves
//! ample headroom. Selection works over whatever slice the caller passes:
//! scoping a move to siblings is the caller's job.

use super::{Task, TaskDomainError, TaskId};

/// Direction of a manual reorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    /// Towards smaller positions (the top of the list).
    Up,
    /// Towards larger positions (the bottom of the list).
    Down,
}

/// Two position writes that exchange the places of adjacent tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionSwap {
    /// Task being moved.
    pub moved: TaskId,
    /// Position the moved task takes.
    pub moved_to: i64,
    /// Neighbour that changes places with the moved task.
    pub displaced: TaskId,
    /// Position the neighbour takes.
    pub displaced_to: i64,
}

/// Returns the position for a task inserted at the top of `existing`.
///
/// The result is one below the smaller of zero and the current minimum, so
/// the first task of an empty list lands at `-1`.
///
/// # Errors
///
/// Returns [`TaskDomainError::PositionExhausted`] when the minimum already
/// sits at `i64::MIN`.
pub fn position_for_new_item(existing: &[Task]) -> Result<i64, TaskDomainError> {
    let minimum = existing
        .iter()
        .map(Task::position)
        .min()
        .map_or(0, |lowest| lowest.min(0));
    minimum
        .checked_sub(1)
        .ok_or(TaskDomainError::PositionExhausted(minimum))
}

/// Plans the swap that moves task `id` one step in `direction`.
///
/// The neighbour is the task in `scope` whose position is nearest to
/// `current_position` on the requested side; ties go to the first such task
/// in `scope`. Returns `None` when no neighbour exists, i.e. the task is
/// already at the boundary.
#[must_use]
pub fn plan_move(
    direction: MoveDirection,
    id: TaskId,
    current_position: i64,
    scope: &[Task],
) -> Option<PositionSwap> {
    let candidates = scope.iter().filter(|task| task.id() != id);
    let neighbour = match direction {
        MoveDirection::Up => candidates
            .filter(|task| task.position() < current_position)
            .fold(None, |best: Option<&Task>, task| match best {
                Some(current) if current.position() >= task.position() => Some(current),
                _ => Some(task),
            }),
        MoveDirection::Down => candidates
            .filter(|task| task.position() > current_position)
            .fold(None, |best: Option<&Task>, task| match best {
                Some(current) if current.position() <= task.position() => Some(current),
                _ => Some(task),
            }),
    }?;

    Some(PositionSwap {
        moved: id,
        moved_to: neighbour.position(),
        displaced: neighbour.id(),
        displaced_to: current_position,
    })
}
