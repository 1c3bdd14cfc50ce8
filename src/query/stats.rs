//! Completion statistics.

use crate::category::domain::CategoryId;
use crate::task::domain::{Score, Task};
use std::collections::BTreeMap;

/// Number of tasks carrying one score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreCount {
    /// The score.
    pub score: Score,
    /// Tasks with that score.
    pub count: usize,
}

/// Summary counts over a task list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskStatistics {
    /// Number of tasks.
    pub total: usize,
    /// Number of completed tasks.
    pub completed: usize,
    /// Number of pending tasks.
    pub pending: usize,
    /// Tasks per score, highest score first; every score is listed.
    pub by_score: Vec<ScoreCount>,
    /// Tasks per category.
    pub by_category: BTreeMap<CategoryId, usize>,
}

impl TaskStatistics {
    /// Computes statistics for `tasks`.
    #[must_use]
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let completed = tasks.iter().filter(|task| task.is_completed()).count();
        let by_score = Score::ALL
            .iter()
            .map(|&score| ScoreCount {
                score,
                count: tasks.iter().filter(|task| task.score() == score).count(),
            })
            .collect();
        let mut by_category = BTreeMap::new();
        for task in tasks {
            *by_category.entry(task.category_id().clone()).or_insert(0) += 1;
        }

        Self {
            total: tasks.len(),
            completed,
            pending: tasks.len().saturating_sub(completed),
            by_score,
            by_category,
        }
    }

    /// Returns the share of completed tasks as a whole percentage, rounded
    /// down; zero for an empty list.
    #[must_use]
    pub fn completion_percent(&self) -> u8 {
        let percent = self
            .completed
            .saturating_mul(100)
            .checked_div(self.total)
            .unwrap_or(0);
        u8::try_from(percent).unwrap_or(u8::MAX)
    }
}
