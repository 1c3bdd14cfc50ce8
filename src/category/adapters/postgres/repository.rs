//! `PostgreSQL` repository implementation for category storage.

use super::{models::CategoryRow, schema::todo_categories};
use crate::category::{
    domain::{Category, CategoryId, CategoryName, Color, PersistedCategoryData},
    ports::{CategoryRepository, CategoryRepositoryError, CategoryRepositoryResult},
};
use crate::persistence::{PgPool, PooledConn, is_transient, run_blocking_with};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed category repository.
#[derive(Debug, Clone)]
pub struct PostgresCategoryRepository {
    pool: PgPool,
}

impl PostgresCategoryRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> CategoryRepositoryResult<T>
    where
        F: FnOnce(&mut PooledConn) -> CategoryRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        run_blocking_with(
            &self.pool,
            f,
            CategoryRepositoryError::unavailable,
            CategoryRepositoryError::persistence,
        )
        .await
    }
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn list(&self) -> CategoryRepositoryResult<Vec<Category>> {
        self.run_blocking(move |connection| {
            let rows = todo_categories::table
                .order_by(todo_categories::created_at.asc())
                .select(CategoryRow::as_select())
                .load::<CategoryRow>(connection)
                .map_err(classify)?;
            rows.into_iter().map(row_to_category).collect()
        })
        .await
    }

    async fn find_by_id(&self, id: &CategoryId) -> CategoryRepositoryResult<Option<Category>> {
        let lookup = id.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = todo_categories::table
                .find(lookup)
                .select(CategoryRow::as_select())
                .first::<CategoryRow>(connection)
                .optional()
                .map_err(classify)?;
            row.map(row_to_category).transpose()
        })
        .await
    }

    async fn store(&self, category: &Category) -> CategoryRepositoryResult<()> {
        let category_id = category.id().clone();
        let row = to_row(category);
        self.run_blocking(move |connection| {
            diesel::insert_into(todo_categories::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        CategoryRepositoryError::DuplicateCategory(category_id.clone())
                    }
                    other => classify(other),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, category: &Category) -> CategoryRepositoryResult<()> {
        let category_id = category.id().clone();
        let row = to_row(category);
        self.run_blocking(move |connection| {
            let updated_count =
                diesel::update(todo_categories::table.find(category_id.as_str()))
                    .set((
                        todo_categories::name.eq(&row.name),
                        todo_categories::color.eq(&row.color),
                        todo_categories::updated_at.eq(row.updated_at),
                    ))
                    .execute(connection)
                    .map_err(classify)?;
            if updated_count == 0 {
                return Err(CategoryRepositoryError::NotFound(category_id));
            }
            Ok(())
        })
        .await
    }

    async fn delete(&self, id: &CategoryId) -> CategoryRepositoryResult<()> {
        let category_id = id.clone();
        self.run_blocking(move |connection| {
            let deleted_count = diesel::delete(todo_categories::table.find(category_id.as_str()))
                .execute(connection)
                .map_err(classify)?;
            if deleted_count == 0 {
                return Err(CategoryRepositoryError::NotFound(category_id));
            }
            Ok(())
        })
        .await
    }
}

fn classify(err: DieselError) -> CategoryRepositoryError {
    if is_transient(&err) {
        CategoryRepositoryError::unavailable(err)
    } else {
        CategoryRepositoryError::persistence(err)
    }
}

fn to_row(category: &Category) -> CategoryRow {
    CategoryRow {
        id: category.id().as_str().to_owned(),
        name: category.name().as_str().to_owned(),
        color: category.color().as_str().to_owned(),
        created_at: category.created_at(),
        updated_at: category.updated_at(),
    }
}

fn row_to_category(row: CategoryRow) -> CategoryRepositoryResult<Category> {
    let CategoryRow {
        id,
        name,
        color,
        created_at,
        updated_at,
    } = row;

    let data = PersistedCategoryData {
        id: CategoryId::new(id).map_err(CategoryRepositoryError::invalid_persisted_data)?,
        name: CategoryName::new(name).map_err(CategoryRepositoryError::invalid_persisted_data)?,
        color: Color::new(color).map_err(CategoryRepositoryError::invalid_persisted_data)?,
        created_at,
        updated_at,
    };
    Ok(Category::from_persisted(data))
}
