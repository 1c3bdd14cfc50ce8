//! Time-windowed cache for read results.
//!
//! The engine keeps one slot per read model. Entries expire after a fixed
//! TTL and are dropped outright whenever a write happens.

use chrono::{DateTime, Duration, Utc};
use std::sync::{PoisonError, RwLock};

#[derive(Debug, Clone)]
struct CacheEntry<T> {
    value: T,
    expires_at: DateTime<Utc>,
}

/// Single-slot cache with a time-to-live.
#[derive(Debug)]
pub struct ReadCache<T> {
    ttl: Duration,
    slot: RwLock<Option<CacheEntry<T>>>,
}

impl<T: Clone> ReadCache<T> {
    /// Creates an empty cache whose entries live for `ttl_secs` seconds.
    ///
    /// A TTL of zero disables caching.
    #[must_use]
    pub fn new(ttl_secs: u64) -> Self {
        let seconds = i64::try_from(ttl_secs).unwrap_or(i64::MAX);
        Self {
            ttl: Duration::try_seconds(seconds).unwrap_or(Duration::MAX),
            slot: RwLock::new(None),
        }
    }

    /// Returns the cached value when it has not expired at `now`.
    #[must_use]
    pub fn get(&self, now: DateTime<Utc>) -> Option<T> {
        let guard = self.slot.read().unwrap_or_else(PoisonError::into_inner);
        guard
            .as_ref()
            .filter(|entry| now < entry.expires_at)
            .map(|entry| entry.value.clone())
    }

    /// Stores `value`, valid from `now` for one TTL.
    pub fn put(&self, value: T, now: DateTime<Utc>) {
        if self.ttl <= Duration::zero() {
            return;
        }
        let expires_at = now.checked_add_signed(self.ttl).unwrap_or(DateTime::<Utc>::MAX_UTC);
        let mut guard = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Some(CacheEntry { value, expires_at });
    }

    /// Drops the cached value.
    pub fn invalidate(&self) {
        let mut guard = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        *guard = None;
    }
}
