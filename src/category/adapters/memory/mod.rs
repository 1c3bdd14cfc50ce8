//! In-memory adapters for category persistence.

mod category;

pub use category::InMemoryCategoryRepository;
