//! In-memory category repository for tests and embedded use.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::category::{
    domain::{Category, CategoryId},
    ports::{CategoryRepository, CategoryRepositoryError, CategoryRepositoryResult},
};

/// Thread-safe in-memory category repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCategoryRepository {
    state: Arc<RwLock<BTreeMap<CategoryId, Category>>>,
}

impl InMemoryCategoryRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(err: PoisonError<T>) -> CategoryRepositoryError {
    CategoryRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn list(&self) -> CategoryRepositoryResult<Vec<Category>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.values().cloned().collect())
    }

    async fn find_by_id(&self, id: &CategoryId) -> CategoryRepositoryResult<Option<Category>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.get(id).cloned())
    }

    async fn store(&self, category: &Category) -> CategoryRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        if state.contains_key(category.id()) {
            return Err(CategoryRepositoryError::DuplicateCategory(
                category.id().clone(),
            ));
        }
        state.insert(category.id().clone(), category.clone());
        Ok(())
    }

    async fn update(&self, category: &Category) -> CategoryRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        let stored = state
            .get_mut(category.id())
            .ok_or_else(|| CategoryRepositoryError::NotFound(category.id().clone()))?;
        *stored = category.clone();
        Ok(())
    }

    async fn delete(&self, id: &CategoryId) -> CategoryRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        state
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| CategoryRepositoryError::NotFound(id.clone()))
    }
}
