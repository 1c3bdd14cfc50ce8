//! Domain model for task categories.

mod category;
mod error;
mod ids;

pub use category::{Category, PersistedCategoryData, default_categories};
pub use error::CategoryDomainError;
pub use ids::{CategoryId, CategoryName, Color};
