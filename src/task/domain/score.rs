//! Eisenhower-style priority scores.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Priority of a task. Higher values are more pressing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Score {
    /// Not important and not urgent (2). The lowest priority.
    NotImportantNotUrgent,
    /// Not important but urgent (5).
    NotImportantUrgent,
    /// Important but not urgent (7).
    ImportantNotUrgent,
    /// Important and urgent (10).
    ImportantUrgent,
}

impl Score {
    /// Every score, highest priority first.
    pub const ALL: [Self; 4] = [
        Self::ImportantUrgent,
        Self::ImportantNotUrgent,
        Self::NotImportantUrgent,
        Self::NotImportantNotUrgent,
    ];

    /// The score given to records with a missing or invalid stored value.
    #[must_use]
    pub const fn lowest() -> Self {
        Self::NotImportantNotUrgent
    }

    /// Returns the persisted numeric value.
    #[must_use]
    pub const fn value(self) -> i64 {
        match self {
            Self::ImportantUrgent => 10,
            Self::ImportantNotUrgent => 7,
            Self::NotImportantUrgent => 5,
            Self::NotImportantNotUrgent => 2,
        }
    }

    /// Returns the human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::ImportantUrgent => "Important-Urgent",
            Self::ImportantNotUrgent => "Important-Not Urgent",
            Self::NotImportantUrgent => "Not Important-Urgent",
            Self::NotImportantNotUrgent => "Not Important-Not Urgent",
        }
    }

    /// Returns the display color as `#rrggbb`.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::ImportantUrgent => "#ff5252",
            Self::ImportantNotUrgent => "#ffd740",
            Self::NotImportantUrgent => "#4caf50",
            Self::NotImportantNotUrgent => "#e0e0e0",
        }
    }

    /// Maps a stored value onto a score, falling back to [`Score::lowest`]
    /// for missing or unknown values.
    #[must_use]
    pub fn normalize(value: Option<i64>) -> Self {
        value
            .and_then(|raw| Self::try_from(raw).ok())
            .unwrap_or_else(Self::lowest)
    }
}

impl TryFrom<i64> for Score {
    type Error = TaskDomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            10 => Ok(Self::ImportantUrgent),
            7 => Ok(Self::ImportantNotUrgent),
            5 => Ok(Self::NotImportantUrgent),
            2 => Ok(Self::NotImportantNotUrgent),
            other => Err(TaskDomainError::InvalidScore(other)),
        }
    }
}

impl From<Score> for i64 {
    fn from(score: Score) -> Self {
        score.value()
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label(), self.value())
    }
}
