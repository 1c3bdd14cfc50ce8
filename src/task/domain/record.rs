//! Persisted task schema and the normalisation applied on load.
//!
//! [`TaskRecord`] is the storage contract shared by every backend. Records
//! written by older versions of the application may lack any field other
//! than `id` and `text`, or carry values this version does not recognise;
//! [`normalize`] replaces those with documented defaults and reports what it
//! replaced so the caller can write the record back once. Only blank text
//! has no sensible default.

use super::{PersistedTaskData, Score, Task, TaskDomainError, TaskId, TaskStatus, TaskText};
use crate::category::domain::CategoryId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Task as persisted by a storage backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    /// Task identifier.
    pub id: TaskId,
    /// Display text.
    pub text: String,
    /// `pending` or `completed`.
    pub status: Option<String>,
    /// Raw priority value.
    pub score: Option<i64>,
    /// Ordering key.
    pub position: Option<i64>,
    /// Category reference.
    pub category_id: Option<String>,
    /// Parent task reference.
    pub parent_id: Option<TaskId>,
    /// Nesting depth.
    pub level: Option<u32>,
    /// Creation timestamp.
    pub created_at: Option<DateTime<Utc>>,
    /// Latest modification timestamp.
    pub updated_at: Option<DateTime<Utc>>,
    /// Completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
}

impl TaskRecord {
    /// Creates a legacy-shaped record carrying only an identifier and text.
    #[must_use]
    pub fn bare(id: TaskId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            status: None,
            score: None,
            position: None,
            category_id: None,
            parent_id: None,
            level: None,
            created_at: None,
            updated_at: None,
            completed_at: None,
        }
    }
}

impl From<&Task> for TaskRecord {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id(),
            text: task.text().as_str().to_owned(),
            status: Some(task.status().as_str().to_owned()),
            score: Some(task.score().value()),
            position: Some(task.position()),
            category_id: Some(task.category_id().as_str().to_owned()),
            parent_id: task.parent_id(),
            level: Some(task.level()),
            created_at: Some(task.created_at()),
            updated_at: Some(task.updated_at()),
            completed_at: task.completed_at(),
        }
    }
}

/// Field that [`normalize`] had to fill in or correct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackfilledField {
    /// Missing or unrecognised status, defaulted to pending.
    Status,
    /// Missing or invalid score, defaulted to the lowest priority.
    Score,
    /// Missing position, defaulted to the load ordinal.
    Position,
    /// Missing or blank category, defaulted to the fallback category.
    CategoryId,
    /// Missing level, defaulted to zero.
    Level,
    /// Missing creation timestamp, defaulted to the load instant.
    CreatedAt,
    /// Missing modification timestamp, defaulted to the creation timestamp.
    UpdatedAt,
    /// Completion timestamp added to a completed record or removed from a
    /// pending one.
    CompletedAt,
}

/// Result of normalising one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedTask {
    /// The fully populated task.
    pub task: Task,
    /// Fields that were filled in; empty when the record was complete.
    pub backfilled: Vec<BackfilledField>,
}

impl NormalizedTask {
    /// Returns `true` when the stored record differs from the task and
    /// should be written back.
    #[must_use]
    pub fn needs_write_back(&self) -> bool {
        !self.backfilled.is_empty()
    }
}

/// Errors raised for records that cannot be repaired by defaults.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskRecordError {
    /// The stored text is blank.
    #[error("task record {id} has invalid text: {source}")]
    InvalidText {
        /// Offending record.
        id: TaskId,
        /// Validation failure.
        source: TaskDomainError,
    },
}

/// Converts a stored record into a task, filling missing fields.
///
/// `ordinal` is the record's index in the load order and becomes its position
/// when none is stored; `now` stands in for missing timestamps. Applying this
/// function to the record of an already normalised task reports no
/// backfilled fields.
///
/// # Errors
///
/// Returns [`TaskRecordError::InvalidText`] when the stored text is blank.
pub fn normalize(
    record: TaskRecord,
    ordinal: i64,
    now: DateTime<Utc>,
) -> Result<NormalizedTask, TaskRecordError> {
    let TaskRecord {
        id,
        text,
        status,
        score,
        position,
        category_id,
        parent_id,
        level,
        created_at,
        updated_at,
        completed_at,
    } = record;
    let mut backfilled = Vec::new();

    let parsed_text =
        TaskText::new(text).map_err(|source| TaskRecordError::InvalidText { id, source })?;

    let parsed_status = status
        .and_then(|raw| TaskStatus::try_from(raw.as_str()).ok())
        .unwrap_or_else(|| {
            backfilled.push(BackfilledField::Status);
            TaskStatus::Pending
        });

    let parsed_score = Score::normalize(score);
    if score != Some(parsed_score.value()) {
        backfilled.push(BackfilledField::Score);
    }

    let parsed_position = position.unwrap_or_else(|| {
        backfilled.push(BackfilledField::Position);
        ordinal
    });

    let parsed_category = category_id
        .and_then(|raw| CategoryId::new(raw).ok())
        .unwrap_or_else(|| {
            backfilled.push(BackfilledField::CategoryId);
            CategoryId::fallback()
        });

    let parsed_level = level.unwrap_or_else(|| {
        backfilled.push(BackfilledField::Level);
        0
    });

    let parsed_created_at = created_at.unwrap_or_else(|| {
        backfilled.push(BackfilledField::CreatedAt);
        now
    });
    let parsed_updated_at = updated_at.unwrap_or_else(|| {
        backfilled.push(BackfilledField::UpdatedAt);
        parsed_created_at
    });

    let parsed_completed_at = match (parsed_status, completed_at) {
        (TaskStatus::Completed, None) => {
            backfilled.push(BackfilledField::CompletedAt);
            Some(parsed_updated_at)
        }
        (TaskStatus::Pending, Some(_)) => {
            backfilled.push(BackfilledField::CompletedAt);
            None
        }
        (_, stored) => stored,
    };

    let task = Task::from_persisted(PersistedTaskData {
        id,
        text: parsed_text,
        status: parsed_status,
        score: parsed_score,
        position: parsed_position,
        category_id: parsed_category,
        parent_id,
        level: parsed_level,
        created_at: parsed_created_at,
        updated_at: parsed_updated_at,
        completed_at: parsed_completed_at,
    });

    Ok(NormalizedTask { task, backfilled })
}
