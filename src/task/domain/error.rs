//! Error types for task domain validation and parsing.

use super::TaskId;
use thiserror::Error;

/// Errors returned while constructing or mutating domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task text is empty after trimming.
    #[error("task text must not be empty")]
    EmptyText,

    /// The score is not one of the defined priorities.
    #[error("invalid score {0}, expected one of 10, 7, 5, 2")]
    InvalidScore(i64),

    /// No position below the current minimum is representable.
    #[error("no position is left below {0}")]
    PositionExhausted(i64),

    /// A caller-supplied level disagrees with the level implied by the parent.
    #[error("level {supplied} does not match the parent-derived level {expected}")]
    LevelMismatch {
        /// Level derived from the parent task.
        expected: u32,
        /// Level supplied by the caller.
        supplied: u32,
    },

    /// A task was asked to become its own parent.
    #[error("task {0} cannot be its own parent")]
    SelfParent(TaskId),

    /// Re-parenting would place a task underneath one of its descendants.
    #[error("task {task} cannot move under its descendant {parent}")]
    ParentCycle {
        /// Task being re-parented.
        task: TaskId,
        /// Requested parent, which descends from `task`.
        parent: TaskId,
    },
}

/// Error returned while parsing task statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);
