//! Application services for the task store.
//!
//! [`TaskService`] is split across files by concern: record loading and
//! field updates, manual ordering, and the parent/child hierarchy.

mod error;
mod hierarchy;
mod ordering;
mod requests;
mod store;

pub use error::{
    CascadeReport, PartialWriteReport, TaskServiceError, TaskServiceResult, WriteOperation,
};
pub use requests::{AddSubtaskRequest, CreateTaskRequest, UpdateTaskRequest};
pub use store::TaskService;
