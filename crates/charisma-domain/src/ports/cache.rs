//! Cache Provider Port
//!
//! Port for cache backend providers. Values are stored as JSON strings;
//! typed access lives in the application layer.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Cache Entry Configuration
///
/// Configures how a cache entry should be stored. An entry without a TTL
/// uses the provider's default expiry.
///
/// # Example
///
/// ```
/// use charisma_domain::ports::CacheEntryConfig;
/// use std::time::Duration;
///
/// let config = CacheEntryConfig::new().with_ttl_secs(600);
/// assert_eq!(config.ttl, Some(Duration::from_secs(600)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntryConfig {
    /// Time to live for the cache entry
    pub ttl: Option<Duration>,
}

impl CacheEntryConfig {
    /// Create an entry config using the provider default TTL
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the TTL for the cache entry
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// Set TTL in seconds
    pub fn with_ttl_secs(self, secs: u64) -> Self {
        self.with_ttl(Duration::from_secs(secs))
    }

    /// Get the effective TTL, falling back to the given default
    pub fn effective_ttl(&self, default: Duration) -> Duration {
        self.ttl.unwrap_or(default)
    }
}

/// Cache Operation Statistics
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CacheStats {
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Number of cache entries
    pub entries: u64,
    /// Cache hit rate (0.0 to 1.0)
    pub hit_rate: f64,
}

impl CacheStats {
    /// Calculate hit rate from hits and misses
    #[allow(clippy::cast_precision_loss)]
    pub fn calculate_hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total > 0 {
            self.hits as f64 / total as f64
        } else {
            0.0
        }
    }
}

/// Cache Provider Port
///
/// Defines the contract for cache backends: JSON storage with per-entry
/// TTL, single-key and glob-pattern invalidation.
#[async_trait]
pub trait CacheProvider: Send + Sync + std::fmt::Debug {
    /// Get a value from the cache as JSON string
    ///
    /// Returns `None` if the key is absent or expired.
    async fn get_json(&self, key: &str) -> Result<Option<String>>;

    /// Set a value in the cache from JSON string
    async fn set_json(&self, key: &str, value: &str, config: CacheEntryConfig) -> Result<()>;

    /// Delete a value from the cache
    ///
    /// Returns true if the key existed.
    async fn delete(&self, key: &str) -> Result<bool>;

    /// Delete every key matching a glob pattern (e.g. `roles:list:*`)
    ///
    /// Returns the number of deleted keys.
    async fn delete_pattern(&self, pattern: &str) -> Result<u64>;

    /// Check if a key exists in the cache
    async fn exists(&self, key: &str) -> Result<bool>;

    /// Clear all values from the cache
    async fn clear(&self) -> Result<()>;

    /// Get cache statistics
    async fn stats(&self) -> Result<CacheStats>;

    /// Get the cache size (number of entries)
    async fn size(&self) -> Result<usize>;

    /// Get the name/identifier of this provider implementation
    fn provider_name(&self) -> &str;
}
