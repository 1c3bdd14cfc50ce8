//! Category, status, and timeframe filtering.

use super::CompletionTimeframe;
use crate::category::domain::CategoryId;
use crate::task::domain::Task;
use chrono::{DateTime, TimeZone};

/// View parameters for a task listing.
///
/// The default shows every task: all categories, completed tasks included,
/// no timeframe restriction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskQuery {
    category: Option<CategoryId>,
    show_completed: bool,
    timeframe: CompletionTimeframe,
}

impl TaskQuery {
    /// Creates a query that matches every task.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            category: None,
            show_completed: true,
            timeframe: CompletionTimeframe::All,
        }
    }

    /// Restricts the listing to one category.
    #[must_use]
    pub fn with_category(mut self, category: CategoryId) -> Self {
        self.category = Some(category);
        self
    }

    /// Shows or hides completed tasks.
    #[must_use]
    pub const fn with_show_completed(mut self, show_completed: bool) -> Self {
        self.show_completed = show_completed;
        self
    }

    /// Restricts completed tasks to a completion window.
    #[must_use]
    pub const fn with_timeframe(mut self, timeframe: CompletionTimeframe) -> Self {
        self.timeframe = timeframe;
        self
    }

    /// Returns the category restriction, if any.
    #[must_use]
    pub const fn category(&self) -> Option<&CategoryId> {
        self.category.as_ref()
    }

    /// Returns the completion window.
    #[must_use]
    pub const fn timeframe(&self) -> CompletionTimeframe {
        self.timeframe
    }

    /// Returns `true` when `task` passes every filter at `now`.
    #[must_use]
    pub fn matches<Tz: TimeZone>(&self, task: &Task, now: &DateTime<Tz>) -> bool {
        if self
            .category
            .as_ref()
            .is_some_and(|category| category != task.category_id())
        {
            return false;
        }
        if !self.show_completed && task.is_completed() {
            return false;
        }
        self.timeframe.includes(task, now)
    }

    /// Returns the matching tasks in their original order.
    #[must_use]
    pub fn apply<Tz: TimeZone>(&self, tasks: &[Task], now: &DateTime<Tz>) -> Vec<Task> {
        tasks
            .iter()
            .filter(|task| self.matches(task, now))
            .cloned()
            .collect()
    }
}

impl Default for TaskQuery {
    fn default() -> Self {
        Self::new()
    }
}
