//! Category seeding, creation, updates, and deletion with task reassignment.

use crate::category::{
    domain::{
        Category, CategoryDomainError, CategoryId, CategoryName, Color, default_categories,
    },
    ports::{CategoryRepository, CategoryRepositoryError},
};
use crate::retry::RetryPolicy;
use crate::task::{
    domain::TaskId,
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a category with a generated identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCategoryRequest {
    name: String,
    color: String,
}

impl CreateCategoryRequest {
    /// Creates a request from a display name and a `#RRGGBB` color.
    #[must_use]
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
        }
    }
}

/// Request payload for renaming or recoloring a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateCategoryRequest {
    id: String,
    name: Option<String>,
    color: Option<String>,
}

impl UpdateCategoryRequest {
    /// Creates an empty update for category `id`.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            color: None,
        }
    }

    /// Sets the new display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the new display color.
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

/// Outcome of deleting a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryDeletion {
    /// The removed category.
    pub category_id: CategoryId,
    /// Tasks moved to the fallback category.
    pub reassigned: Vec<TaskId>,
}

/// A category deletion that reassigned its tasks but could not remove the
/// category itself.
///
/// The reassignment is not undone: the listed tasks now belong to the
/// fallback category while the category remains in the store.
#[derive(Debug, Clone)]
pub struct PartialCategoryDeletion {
    /// Category that is still stored.
    pub category_id: CategoryId,
    /// Tasks already moved to the fallback category.
    pub reassigned: Vec<TaskId>,
    /// Failure reported by the category store.
    pub cause: CategoryRepositoryError,
}

impl fmt::Display for PartialCategoryDeletion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "category {} kept after {} task(s) were reassigned: {}",
            self.category_id,
            self.reassigned.len(),
            self.cause
        )
    }
}

/// Service-level errors for category operations.
#[derive(Debug, Error)]
pub enum CategoryServiceError {
    /// Input validation failed.
    #[error(transparent)]
    Domain(#[from] CategoryDomainError),

    /// The category does not exist.
    #[error("category not found: {0}")]
    NotFound(CategoryId),

    /// Tasks were reassigned but the category could not be removed.
    #[error("{0}")]
    PartialDelete(Box<PartialCategoryDeletion>),

    /// Category repository operation failed.
    #[error(transparent)]
    Repository(#[from] CategoryRepositoryError),

    /// Reassigning the category's tasks failed.
    #[error(transparent)]
    TaskRepository(#[from] TaskRepositoryError),
}

/// Result type for category service operations.
pub type CategoryServiceResult<T> = Result<T, CategoryServiceError>;

/// Category orchestration service.
#[derive(Clone)]
pub struct CategoryService<K, T, C>
where
    K: CategoryRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    categories: Arc<K>,
    tasks: Arc<T>,
    clock: Arc<C>,
    retry: RetryPolicy,
}

impl<K, T, C> CategoryService<K, T, C>
where
    K: CategoryRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new category service with the default retry policy.
    #[must_use]
    pub fn new(categories: Arc<K>, tasks: Arc<T>, clock: Arc<C>) -> Self {
        Self {
            categories,
            tasks,
            clock,
            retry: RetryPolicy::default(),
        }
    }

    /// Replaces the retry policy.
    #[must_use]
    pub const fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Returns every category, sorted by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`CategoryServiceError::Repository`] when the store fails.
    pub async fn load(&self) -> CategoryServiceResult<Vec<Category>> {
        let mut categories = self
            .retry
            .run("list categories", || self.categories.list())
            .await?;
        categories.sort_by(|left, right| left.id().cmp(right.id()));
        Ok(categories)
    }

    /// Stores the default categories when the store holds none.
    ///
    /// Returns the categories that were written; an already populated store
    /// yields an empty list, so repeated calls are harmless.
    ///
    /// # Errors
    ///
    /// Returns [`CategoryServiceError::Repository`] when the store fails.
    pub async fn seed_defaults(&self) -> CategoryServiceResult<Vec<Category>> {
        if !self.load().await?.is_empty() {
            tracing::debug!("categories already present, skipping defaults");
            return Ok(Vec::new());
        }

        let defaults = default_categories(&*self.clock)?;
        for category in &defaults {
            self.retry
                .run("store category", || self.categories.store(category))
                .await?;
        }
        tracing::info!(count = defaults.len(), "default categories seeded");
        Ok(defaults)
    }

    /// Creates a category with a generated identifier.
    ///
    /// # Errors
    ///
    /// Returns [`CategoryServiceError::Domain`] for a blank name or malformed
    /// color, or a repository error when the write fails.
    pub async fn create(&self, request: CreateCategoryRequest) -> CategoryServiceResult<Category> {
        let name = CategoryName::new(request.name)?;
        let color = Color::new(request.color)?;
        let category = Category::new(CategoryId::generate(), name, color, &*self.clock);
        self.retry
            .run("store category", || self.categories.store(&category))
            .await?;
        tracing::info!(category_id = %category.id(), "category created");
        Ok(category)
    }

    /// Renames and/or recolors a category.
    ///
    /// # Errors
    ///
    /// Returns [`CategoryServiceError::NotFound`] when the category does not
    /// exist, [`CategoryServiceError::Domain`] for invalid input, or a
    /// repository error when the write fails.
    pub async fn update(&self, request: UpdateCategoryRequest) -> CategoryServiceResult<Category> {
        let id = CategoryId::new(request.id)?;
        let name = request.name.map(CategoryName::new).transpose()?;
        let color = request.color.map(Color::new).transpose()?;

        let mut category = self
            .retry
            .run("find category", || self.categories.find_by_id(&id))
            .await?
            .ok_or_else(|| CategoryServiceError::NotFound(id.clone()))?;
        if let Some(value) = name {
            category.rename(value, &*self.clock);
        }
        if let Some(value) = color {
            category.recolor(value, &*self.clock);
        }
        self.retry
            .run("update category", || self.categories.update(&category))
            .await?;
        tracing::debug!(category_id = %id, "category updated");
        Ok(category)
    }

    /// Deletes a category, moving its tasks to the fallback category first.
    ///
    /// Tasks are reassigned in one atomic write before the category row is
    /// removed, so no task ever references a missing category.
    ///
    /// # Errors
    ///
    /// Returns [`CategoryDomainError::FallbackCategoryProtected`] for the
    /// fallback category, [`CategoryServiceError::NotFound`] when the
    /// category does not exist, or a repository error when either write
    /// fails with nothing changed. When the category cannot be removed after
    /// tasks were reassigned the error is
    /// [`CategoryServiceError::PartialDelete`].
    pub async fn delete(&self, raw_id: &str) -> CategoryServiceResult<CategoryDeletion> {
        let id = CategoryId::new(raw_id)?;
        if id.is_fallback() {
            return Err(CategoryDomainError::FallbackCategoryProtected(id).into());
        }
        let found = self
            .retry
            .run("find category", || self.categories.find_by_id(&id))
            .await?;
        if found.is_none() {
            return Err(CategoryServiceError::NotFound(id));
        }

        let fallback = CategoryId::fallback();
        let at = self.clock.utc();
        let reassigned = self
            .retry
            .run("reassign category", || {
                self.tasks.reassign_category(&id, &fallback, at)
            })
            .await?;
        let removed = self
            .retry
            .run("delete category", || self.categories.delete(&id))
            .await;
        if let Err(cause) = removed {
            if reassigned.is_empty() {
                return Err(cause.into());
            }
            let report = PartialCategoryDeletion {
                category_id: id,
                reassigned,
                cause,
            };
            tracing::error!(
                category_id = %report.category_id,
                reassigned = report.reassigned.len(),
                error = %report.cause,
                "category delete stopped after reassigning tasks"
            );
            return Err(CategoryServiceError::PartialDelete(Box::new(report)));
        }

        tracing::info!(
            category_id = %id,
            reassigned = reassigned.len(),
            "category deleted"
        );
        Ok(CategoryDeletion {
            category_id: id,
            reassigned,
        })
    }
}
