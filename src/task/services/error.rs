//! Service-level errors and multi-record write reports.

use crate::category::domain::{CategoryDomainError, CategoryId};
use crate::category::ports::CategoryRepositoryError;
use crate::task::{
    domain::{TaskDomainError, TaskId},
    ports::TaskRepositoryError,
};
use std::fmt;
use thiserror::Error;

/// Multi-record operation that can stop part-way through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOperation {
    /// Deleting a task together with its descendants.
    CascadeDelete,
    /// Exchanging the positions of two tasks.
    PositionSwap,
    /// Moving a task under a new parent and relevelling its descendants.
    Reparent,
}

impl WriteOperation {
    /// Returns a short human-readable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CascadeDelete => "cascade delete",
            Self::PositionSwap => "position swap",
            Self::Reparent => "reparent",
        }
    }
}

/// Outcome of a multi-record write that failed after earlier writes landed.
#[derive(Debug, Clone)]
pub struct PartialWriteReport {
    /// Operation that was interrupted.
    pub operation: WriteOperation,
    /// Records written successfully, in write order.
    pub succeeded: Vec<TaskId>,
    /// Record whose write failed.
    pub failed: TaskId,
    /// Records that were never attempted.
    pub skipped: Vec<TaskId>,
    /// Failure reported by the store.
    pub cause: TaskRepositoryError,
}

impl fmt::Display for PartialWriteReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} stopped at task {} after {} successful write(s), {} skipped: {}",
            self.operation.as_str(),
            self.failed,
            self.succeeded.len(),
            self.skipped.len(),
            self.cause
        )
    }
}

/// Tasks removed by a cascade delete, descendants first and the requested
/// task last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadeReport {
    /// Deleted task identifiers in deletion order.
    pub deleted: Vec<TaskId>,
}

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// Task input validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// Category input validation failed.
    #[error(transparent)]
    CategoryDomain(#[from] CategoryDomainError),

    /// The referenced category does not exist.
    #[error("unknown category: {0}")]
    UnknownCategory(CategoryId),

    /// The task does not exist.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// The requested parent task does not exist.
    #[error("parent task not found: {0}")]
    ParentNotFound(TaskId),

    /// A multi-record write stopped part-way through.
    #[error("{0}")]
    PartialWrite(Box<PartialWriteReport>),

    /// Task repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),

    /// Category lookup failed.
    #[error(transparent)]
    CategoryRepository(#[from] CategoryRepositoryError),
}

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;
