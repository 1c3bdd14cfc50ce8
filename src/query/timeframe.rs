//! Completion timeframe windows.

use crate::task::domain::Task;
use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Window that completed tasks must fall into to be shown.
///
/// Pending tasks pass every window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionTimeframe {
    /// Completed since local midnight.
    Today,
    /// Completed since Monday 00:00 local time.
    ThisWeek,
    /// Completed since the first of the month, 00:00 local time.
    ThisMonth,
    /// Completed since January 1st, 00:00 local time.
    ThisYear,
    /// No restriction.
    #[default]
    All,
}

impl CompletionTimeframe {
    /// Returns the start of the window containing `now`, in `now`'s time
    /// zone, or `None` for [`CompletionTimeframe::All`].
    #[must_use]
    pub fn window_start<Tz: TimeZone>(self, now: &DateTime<Tz>) -> Option<DateTime<Tz>> {
        let today = now.date_naive();
        let first_day = match self {
            Self::All => return None,
            Self::Today => today,
            Self::ThisWeek => today.checked_sub_days(Days::new(u64::from(
                today.weekday().num_days_from_monday(),
            )))?,
            Self::ThisMonth => today.with_day(1)?,
            Self::ThisYear => today.with_ordinal(1)?,
        };
        Some(local_midnight(&now.timezone(), first_day))
    }

    /// Returns `true` when `task` should be shown for this window at `now`.
    #[must_use]
    pub fn includes<Tz: TimeZone>(self, task: &Task, now: &DateTime<Tz>) -> bool {
        if !task.is_completed() {
            return true;
        }
        let Some(start) = self.window_start(now) else {
            return true;
        };
        let start_utc = start.with_timezone(&Utc);
        task.completed_at()
            .is_some_and(|completed_at| completed_at >= start_utc)
    }
}

/// Midnight at the start of `date` in `tz`.
///
/// Where a DST transition skips midnight the wall-clock time is read as UTC.
fn local_midnight<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> DateTime<Tz> {
    let midnight = date.and_time(NaiveTime::MIN);
    tz.from_local_datetime(&midnight)
        .earliest()
        .unwrap_or_else(|| tz.from_utc_datetime(&midnight))
}
