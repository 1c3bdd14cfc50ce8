//! In-memory task repository for tests and embedded use.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::category::domain::CategoryId;
use crate::task::{
    domain::{Task, TaskId, TaskRecord},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
///
/// Records keep their insertion order, which stands in for the storage order
/// a document store would return.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    records: HashMap<TaskId, TaskRecord>,
    order: Vec<TaskId>,
}

impl InMemoryTaskState {
    fn insert(&mut self, record: TaskRecord) {
        let id = record.id;
        if self.records.insert(id, record).is_none() {
            self.order.push(id);
        }
    }
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository pre-populated with raw records, which may be
    /// missing fields the way legacy documents do.
    #[must_use]
    pub fn with_records(records: impl IntoIterator<Item = TaskRecord>) -> Self {
        let mut state = InMemoryTaskState::default();
        for record in records {
            state.insert(record);
        }
        Self {
            state: Arc::new(RwLock::new(state)),
        }
    }

    /// Returns the raw stored record, bypassing normalisation.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] if the lock is poisoned.
    pub fn raw_record(&self, id: TaskId) -> TaskRepositoryResult<Option<TaskRecord>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.records.get(&id).cloned())
    }
}

fn poisoned<T>(err: PoisonError<T>) -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn list(&self) -> TaskRepositoryResult<Vec<TaskRecord>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state
            .order
            .iter()
            .filter_map(|id| state.records.get(id).cloned())
            .collect())
    }

    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        if state.records.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
        state.insert(TaskRecord::from(task));
        Ok(())
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        let record = state
            .records
            .get_mut(&task.id())
            .ok_or(TaskRepositoryError::NotFound(task.id()))?;
        *record = TaskRecord::from(task);
        Ok(())
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        if state.records.remove(&id).is_none() {
            return Err(TaskRepositoryError::NotFound(id));
        }
        state.order.retain(|existing| *existing != id);
        Ok(())
    }

    async fn reassign_category(
        &self,
        from: &CategoryId,
        to: &CategoryId,
        at: DateTime<Utc>,
    ) -> TaskRepositoryResult<Vec<TaskId>> {
        let mut state = self.state.write().map_err(poisoned)?;
        let mut reassigned = Vec::new();
        for record in state.records.values_mut() {
            if record.category_id.as_deref() == Some(from.as_str()) {
                record.category_id = Some(to.as_str().to_owned());
                record.updated_at = Some(at);
                reassigned.push(record.id);
            }
        }
        reassigned.sort();
        Ok(reassigned)
    }
}
