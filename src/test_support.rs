//! Shared fixtures for unit tests.

use crate::category::{
    adapters::memory::InMemoryCategoryRepository,
    domain::{CategoryId, default_categories},
    ports::CategoryRepository,
};
use crate::task::domain::{Score, Task, TaskDraft, TaskText};
use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use mockable::Clock;
use std::sync::{Arc, Mutex};

/// Clock that reports a settable instant.
#[derive(Debug, Clone)]
pub(crate) struct FixedClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl FixedClock {
    pub(crate) fn at(now: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(now)),
        }
    }

    pub(crate) fn advance(&self, by: Duration) {
        let mut now = self.now.lock().expect("clock lock");
        *now += by;
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.now.lock().expect("clock lock")
    }
}

pub(crate) fn instant(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .expect("valid test instant")
}

/// Monday 2 March 2026, 09:00 UTC.
pub(crate) fn monday_morning() -> DateTime<Utc> {
    instant(2026, 3, 2, 9, 0)
}

pub(crate) fn draft(text: &str, score: Score) -> TaskDraft {
    TaskDraft {
        text: TaskText::new(text).expect("valid task text"),
        score,
        category_id: CategoryId::fallback(),
        parent_id: None,
        level: 0,
    }
}

pub(crate) fn task_at(text: &str, position: i64, clock: &FixedClock) -> Task {
    Task::new(draft(text, Score::lowest()), position, clock)
}

pub(crate) async fn seeded_categories(clock: &FixedClock) -> InMemoryCategoryRepository {
    let repository = InMemoryCategoryRepository::new();
    for category in default_categories(clock).expect("default categories are valid") {
        repository
            .store(&category)
            .await
            .expect("seed default category");
    }
    repository
}
