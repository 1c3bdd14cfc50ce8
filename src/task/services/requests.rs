//! Request payloads for task service operations.
//!
//! Requests carry raw caller input; the service validates it.

use crate::task::domain::{TaskId, TaskStatus};

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    pub(super) text: String,
    pub(super) score: i64,
    pub(super) category_id: Option<String>,
    pub(super) parent_id: Option<TaskId>,
    pub(super) level: Option<u32>,
}

impl CreateTaskRequest {
    /// Creates a request for a top-level task in the fallback category.
    #[must_use]
    pub fn new(text: impl Into<String>, score: i64) -> Self {
        Self {
            text: text.into(),
            score,
            category_id: None,
            parent_id: None,
            level: None,
        }
    }

    /// Sets the category.
    #[must_use]
    pub fn with_category(mut self, category_id: impl Into<String>) -> Self {
        self.category_id = Some(category_id.into());
        self
    }

    /// Nests the task under `parent_id`.
    #[must_use]
    pub const fn with_parent(mut self, parent_id: TaskId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    /// States the expected level; it must match the parent-derived level.
    #[must_use]
    pub const fn with_level(mut self, level: u32) -> Self {
        self.level = Some(level);
        self
    }
}

/// Request payload for a partial task update. Unset fields are untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    pub(super) id: TaskId,
    pub(super) text: Option<String>,
    pub(super) status: Option<TaskStatus>,
    pub(super) score: Option<i64>,
    pub(super) category_id: Option<String>,
    pub(super) parent_id: Option<Option<TaskId>>,
}

impl UpdateTaskRequest {
    /// Creates an empty update for task `id`.
    #[must_use]
    pub const fn new(id: TaskId) -> Self {
        Self {
            id,
            text: None,
            status: None,
            score: None,
            category_id: None,
            parent_id: None,
        }
    }

    /// Replaces the text.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Replaces the status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Replaces the score.
    #[must_use]
    pub const fn with_score(mut self, score: i64) -> Self {
        self.score = Some(score);
        self
    }

    /// Moves the task to another category.
    #[must_use]
    pub fn with_category(mut self, category_id: impl Into<String>) -> Self {
        self.category_id = Some(category_id.into());
        self
    }

    /// Re-parents the task; `None` promotes it to the top level.
    #[must_use]
    pub const fn with_parent(mut self, parent_id: Option<TaskId>) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    /// Returns the target task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }
}

/// Request payload for adding a subtask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddSubtaskRequest {
    pub(super) parent_id: TaskId,
    pub(super) text: String,
    pub(super) score: i64,
    pub(super) category_id: Option<String>,
}

impl AddSubtaskRequest {
    /// Creates a request for a subtask that inherits the parent's category.
    #[must_use]
    pub fn new(parent_id: TaskId, text: impl Into<String>, score: i64) -> Self {
        Self {
            parent_id,
            text: text.into(),
            score,
            category_id: None,
        }
    }

    /// Overrides the inherited category.
    #[must_use]
    pub fn with_category(mut self, category_id: impl Into<String>) -> Self {
        self.category_id = Some(category_id.into());
        self
    }
}
