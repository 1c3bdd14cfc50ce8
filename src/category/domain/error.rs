//! Error types for category domain validation.

use super::CategoryId;
use thiserror::Error;

/// Errors returned while constructing or mutating category values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CategoryDomainError {
    /// The category identifier is empty after trimming.
    #[error("category identifier must not be empty")]
    EmptyCategoryId,

    /// The category name is empty after trimming.
    #[error("category name must not be empty")]
    EmptyCategoryName,

    /// The color is not a `#RRGGBB` hex value.
    #[error("invalid category color '{0}', expected #RRGGBB")]
    InvalidColor(String),

    /// The fallback category receives orphaned tasks and cannot be removed.
    #[error("the fallback category '{0}' cannot be deleted")]
    FallbackCategoryProtected(CategoryId),
}
