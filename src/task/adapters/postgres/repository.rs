//! `PostgreSQL` repository implementation for task storage.

use super::{
    models::{NewTaskRow, TaskChangeset, TaskRow},
    schema::todo_tasks,
};
use crate::category::domain::CategoryId;
use crate::persistence::{PgPool, PooledConn, is_transient, run_blocking_with};
use crate::task::{
    domain::{Task, TaskId, TaskRecord},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: PgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PooledConn) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        run_blocking_with(
            &self.pool,
            f,
            TaskRepositoryError::unavailable,
            TaskRepositoryError::persistence,
        )
        .await
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn list(&self) -> TaskRepositoryResult<Vec<TaskRecord>> {
        self.run_blocking(move |connection| {
            let rows = todo_tasks::table
                .order_by((todo_tasks::created_at.asc(), todo_tasks::id.asc()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(classify)?;
            rows.into_iter().map(row_to_record).collect()
        })
        .await
    }

    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let new_row = to_new_row(&TaskRecord::from(task))?;

        self.run_blocking(move |connection| {
            diesel::insert_into(todo_tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(task_id)
                    }
                    other => classify(other),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let changeset = to_changeset(&TaskRecord::from(task))?;

        self.run_blocking(move |connection| {
            let updated_count = diesel::update(todo_tasks::table.find(task_id.into_inner()))
                .set(&changeset)
                .execute(connection)
                .map_err(classify)?;
            if updated_count == 0 {
                return Err(TaskRepositoryError::NotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let deleted_count = diesel::delete(todo_tasks::table.find(id.into_inner()))
                .execute(connection)
                .map_err(classify)?;
            if deleted_count == 0 {
                return Err(TaskRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn reassign_category(
        &self,
        from: &CategoryId,
        to: &CategoryId,
        at: DateTime<Utc>,
    ) -> TaskRepositoryResult<Vec<TaskId>> {
        let from_value = from.as_str().to_owned();
        let to_value = to.as_str().to_owned();

        self.run_blocking(move |connection| {
            // A single UPDATE keeps the reassignment atomic for readers.
            let mut ids = diesel::update(
                todo_tasks::table.filter(todo_tasks::category_id.eq(Some(from_value.as_str()))),
            )
            .set((
                todo_tasks::category_id.eq(Some(to_value.as_str())),
                todo_tasks::updated_at.eq(Some(at)),
            ))
            .returning(todo_tasks::id)
            .get_results::<uuid::Uuid>(connection)
            .map_err(classify)?;
            ids.sort();
            Ok(ids.into_iter().map(TaskId::from_uuid).collect())
        })
        .await
    }
}

fn classify(err: DieselError) -> TaskRepositoryError {
    if is_transient(&err) {
        TaskRepositoryError::unavailable(err)
    } else {
        TaskRepositoryError::persistence(err)
    }
}

fn level_to_column(level: Option<u32>) -> TaskRepositoryResult<Option<i32>> {
    level
        .map(i32::try_from)
        .transpose()
        .map_err(TaskRepositoryError::persistence)
}

fn to_new_row(record: &TaskRecord) -> TaskRepositoryResult<NewTaskRow> {
    Ok(NewTaskRow {
        id: record.id.into_inner(),
        text: record.text.clone(),
        status: record.status.clone(),
        score: record.score,
        position: record.position,
        category_id: record.category_id.clone(),
        parent_id: record.parent_id.map(TaskId::into_inner),
        level: level_to_column(record.level)?,
        created_at: record.created_at,
        updated_at: record.updated_at,
        completed_at: record.completed_at,
    })
}

fn to_changeset(record: &TaskRecord) -> TaskRepositoryResult<TaskChangeset> {
    Ok(TaskChangeset {
        text: record.text.clone(),
        status: record.status.clone(),
        score: record.score,
        position: record.position,
        category_id: record.category_id.clone(),
        parent_id: record.parent_id.map(TaskId::into_inner),
        level: level_to_column(record.level)?,
        created_at: record.created_at,
        updated_at: record.updated_at,
        completed_at: record.completed_at,
    })
}

fn row_to_record(row: TaskRow) -> TaskRepositoryResult<TaskRecord> {
    let TaskRow {
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
    } = row;

    let parsed_level = level
        .map(u32::try_from)
        .transpose()
        .map_err(TaskRepositoryError::invalid_persisted_data)?;

    Ok(TaskRecord {
        id: TaskId::from_uuid(id),
        text,
        status,
        score,
        position,
        category_id,
        parent_id: parent_id.map(TaskId::from_uuid),
        level: parsed_level,
        created_at,
        updated_at,
        completed_at,
    })
}
