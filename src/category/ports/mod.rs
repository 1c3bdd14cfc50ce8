//! Port contracts for category management.

pub mod repository;

pub use repository::{CategoryRepository, CategoryRepositoryError, CategoryRepositoryResult};
