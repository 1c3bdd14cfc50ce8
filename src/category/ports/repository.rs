//! Repository port for category persistence.

use crate::category::domain::{Category, CategoryId};
use crate::retry::Transient;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for category repository operations.
pub type CategoryRepositoryResult<T> = Result<T, CategoryRepositoryError>;

/// Category persistence contract.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Returns every stored category.
    async fn list(&self) -> CategoryRepositoryResult<Vec<Category>>;

    /// Finds a category by identifier.
    ///
    /// Returns `None` when the category does not exist.
    async fn find_by_id(&self, id: &CategoryId) -> CategoryRepositoryResult<Option<Category>>;

    /// Stores a new category.
    ///
    /// # Errors
    ///
    /// Returns [`CategoryRepositoryError::DuplicateCategory`] when the
    /// identifier is already taken.
    async fn store(&self, category: &Category) -> CategoryRepositoryResult<()>;

    /// Persists changes to an existing category.
    ///
    /// # Errors
    ///
    /// Returns [`CategoryRepositoryError::NotFound`] when the category does
    /// not exist.
    async fn update(&self, category: &Category) -> CategoryRepositoryResult<()>;

    /// Removes a category.
    ///
    /// # Errors
    ///
    /// Returns [`CategoryRepositoryError::NotFound`] when the category does
    /// not exist.
    async fn delete(&self, id: &CategoryId) -> CategoryRepositoryResult<()>;
}

/// Errors returned by category repository implementations.
#[derive(Debug, Clone, Error)]
pub enum CategoryRepositoryError {
    /// A category with the same identifier already exists.
    #[error("duplicate category identifier: {0}")]
    DuplicateCategory(CategoryId),

    /// The category was not found.
    #[error("category not found: {0}")]
    NotFound(CategoryId),

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted category data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// The backing store is temporarily unreachable; the call may succeed
    /// when retried.
    #[error("category store unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl CategoryRepositoryError {
    /// Wraps a data-quality or deserialization error from persisted rows.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a transient availability error.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

impl Transient for CategoryRepositoryError {
    fn is_transient(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}
