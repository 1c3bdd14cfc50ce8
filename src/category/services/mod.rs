//! Application services for category management.

mod catalog;

pub use catalog::{
    CategoryDeletion, CategoryService, CategoryServiceError, CategoryServiceResult,
    CreateCategoryRequest, PartialCategoryDeletion, UpdateCategoryRequest,
};
