//! Engine configuration.

use crate::retry::RetryPolicy;
use serde::Deserialize;
use thiserror::Error;

/// Default lifetime of cached reads, in seconds.
pub const DEFAULT_CACHE_TTL_SECS: u64 = 300;

/// Tunables for [`crate::engine::TodoEngine`].
///
/// Every field has a default, so an empty JSON object is a valid
/// configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Retry behaviour for store calls.
    pub retry: RetryPolicy,
    /// Lifetime of cached reads; zero disables caching.
    pub cache_ttl_secs: u64,
}

impl EngineConfig {
    /// Configuration without retry delays or caching, for tests.
    #[must_use]
    pub const fn immediate() -> Self {
        Self {
            retry: RetryPolicy::immediate(3),
            cache_ttl_secs: 0,
        }
    }

    /// Parses a JSON configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the document is malformed or a field has
    /// the wrong type.
    pub fn from_json(document: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(document).map_err(ConfigError)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            retry: RetryPolicy::default(),
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
        }
    }
}

/// Error raised for an unreadable configuration document.
#[derive(Debug, Error)]
#[error("invalid engine configuration: {0}")]
pub struct ConfigError(#[source] serde_json::Error);
