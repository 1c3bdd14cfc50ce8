//! Diesel row models for task persistence.

use super::schema::todo_tasks;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = todo_tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Display text.
    pub text: String,
    /// Completion status.
    pub status: Option<String>,
    /// Priority score.
    pub score: Option<i64>,
    /// Ordering key.
    pub position: Option<i64>,
    /// Category reference.
    pub category_id: Option<String>,
    /// Parent task reference.
    pub parent_id: Option<uuid::Uuid>,
    /// Nesting depth.
    pub level: Option<i32>,
    /// Creation timestamp.
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    pub updated_at: Option<DateTime<Utc>>,
    /// Completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = todo_tasks)]
pub struct NewTaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Display text.
    pub text: String,
    /// Completion status.
    pub status: Option<String>,
    /// Priority score.
    pub score: Option<i64>,
    /// Ordering key.
    pub position: Option<i64>,
    /// Category reference.
    pub category_id: Option<String>,
    /// Parent task reference.
    pub parent_id: Option<uuid::Uuid>,
    /// Nesting depth.
    pub level: Option<i32>,
    /// Creation timestamp.
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    pub updated_at: Option<DateTime<Utc>>,
    /// Completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
}

/// Full-row update model; `None` writes SQL `NULL`.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = todo_tasks)]
#[diesel(treat_none_as_null = true)]
pub struct TaskChangeset {
    /// Display text.
    pub text: String,
    /// Completion status.
    pub status: Option<String>,
    /// Priority score.
    pub score: Option<i64>,
    /// Ordering key.
    pub position: Option<i64>,
    /// Category reference.
    pub category_id: Option<String>,
    /// Parent task reference.
    pub parent_id: Option<uuid::Uuid>,
    /// Nesting depth.
    pub level: Option<i32>,
    /// Creation timestamp.
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    pub updated_at: Option<DateTime<Utc>>,
    /// Completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
}
