//! Task aggregate root and related lifecycle types.

use super::{ParseTaskStatusError, Score, TaskId, TaskText};
use crate::category::domain::CategoryId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Completion status of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task still has to be done.
    Pending,
    /// Task has been done.
    Completed,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
        }
    }

    /// Returns the opposite status.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Pending => Self::Completed,
            Self::Completed => Self::Pending,
        }
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

/// Validated fields for a task that has not been created yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    /// Display text.
    pub text: TaskText,
    /// Priority score.
    pub score: Score,
    /// Category the task belongs to.
    pub category_id: CategoryId,
    /// Parent task, if this is a subtask.
    pub parent_id: Option<TaskId>,
    /// Nesting depth; must be `parent.level + 1` for subtasks.
    pub level: u32,
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    text: TaskText,
    status: TaskStatus,
    score: Score,
    position: i64,
    category_id: CategoryId,
    parent_id: Option<TaskId>,
    level: u32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted display text.
    pub text: TaskText,
    /// Persisted completion status.
    pub status: TaskStatus,
    /// Persisted priority score.
    pub score: Score,
    /// Persisted ordering key.
    pub position: i64,
    /// Persisted category reference.
    pub category_id: CategoryId,
    /// Persisted parent reference.
    pub parent_id: Option<TaskId>,
    /// Persisted nesting depth.
    pub level: u32,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
    /// Persisted completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Creates a new pending task at the given position.
    #[must_use]
    pub fn new(draft: TaskDraft, position: i64, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            text: draft.text,
            status: TaskStatus::Pending,
            score: draft.score,
            position,
            category_id: draft.category_id,
            parent_id: draft.parent_id,
            level: draft.level,
            created_at: timestamp,
            updated_at: timestamp,
            completed_at: None,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            text: data.text,
            status: data.status,
            score: data.score,
            position: data.position,
            category_id: data.category_id,
            parent_id: data.parent_id,
            level: data.level,
            created_at: data.created_at,
            updated_at: data.updated_at,
            completed_at: data.completed_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the display text.
    #[must_use]
    pub const fn text(&self) -> &TaskText {
        &self.text
    }

    /// Returns the completion status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns `true` when the task has been completed.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        matches!(self.status, TaskStatus::Completed)
    }

    /// Returns the priority score.
    #[must_use]
    pub const fn score(&self) -> Score {
        self.score
    }

    /// Returns the ordering key; lower sorts first.
    #[must_use]
    pub const fn position(&self) -> i64 {
        self.position
    }

    /// Returns the category reference.
    #[must_use]
    pub const fn category_id(&self) -> &CategoryId {
        &self.category_id
    }

    /// Returns the parent task, if any.
    #[must_use]
    pub const fn parent_id(&self) -> Option<TaskId> {
        self.parent_id
    }

    /// Returns the nesting depth.
    #[must_use]
    pub const fn level(&self) -> u32 {
        self.level
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns when the task was completed, if it is.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Replaces the display text.
    pub fn set_text(&mut self, text: TaskText, clock: &impl Clock) {
        self.text = text;
        self.touch(clock);
    }

    /// Replaces the priority score.
    pub fn set_score(&mut self, score: Score, clock: &impl Clock) {
        self.score = score;
        self.touch(clock);
    }

    /// Moves the task to another category.
    pub fn set_category(&mut self, category_id: CategoryId, clock: &impl Clock) {
        self.category_id = category_id;
        self.touch(clock);
    }

    /// Replaces the ordering key.
    pub fn set_position(&mut self, position: i64, clock: &impl Clock) {
        self.position = position;
        self.touch(clock);
    }

    /// Attaches the task to a new parent (or detaches it) at `level`.
    pub fn set_parent(&mut self, parent_id: Option<TaskId>, level: u32, clock: &impl Clock) {
        self.parent_id = parent_id;
        self.level = level;
        self.touch(clock);
    }

    /// Replaces the nesting depth without changing the parent.
    pub fn set_level(&mut self, level: u32, clock: &impl Clock) {
        self.level = level;
        self.touch(clock);
    }

    /// Sets the completion status.
    ///
    /// Entering [`TaskStatus::Completed`] stamps `completed_at`; returning to
    /// [`TaskStatus::Pending`] clears it. Setting the current status again
    /// leaves the completion timestamp untouched.
    pub fn set_status(&mut self, status: TaskStatus, clock: &impl Clock) {
        let timestamp = clock.utc();
        match (self.status, status) {
            (TaskStatus::Pending, TaskStatus::Completed) => self.completed_at = Some(timestamp),
            (TaskStatus::Completed, TaskStatus::Pending) => self.completed_at = None,
            _ => {}
        }
        self.status = status;
        self.updated_at = timestamp;
    }

    /// Flips between pending and completed.
    pub fn toggle_status(&mut self, clock: &impl Clock) {
        self.set_status(self.status.toggled(), clock);
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
