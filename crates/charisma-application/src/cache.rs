//! Typed cache access
//!
//! Wraps the JSON-level [`CacheProvider`] port with serde conversion.
//! Read failures degrade to a miss so a broken cache never fails a request.

use std::fmt;
use std::sync::Arc;

use charisma_domain::error::{Error, Result};
use charisma_domain::ports::{CacheEntryConfig, CacheProvider};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Shared typed cache
#[derive(Clone)]
pub struct SharedCache {
    provider: Arc<dyn CacheProvider>,
}

impl SharedCache {
    /// Wrap a cache provider
    pub fn new(provider: Arc<dyn CacheProvider>) -> Self {
        Self { provider }
    }

    /// Get the underlying cache provider
    pub fn as_provider(&self) -> Arc<dyn CacheProvider> {
        Arc::clone(&self.provider)
    }

    /// Get a typed value, treating provider or decoding failures as a miss
    pub async fn get<T>(&self, key: &str) -> Option<T>
    where
        T: DeserializeOwned + Send,
    {
        match self.provider.get_json(key).await {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::warn!(key, error = %e, "discarding undecodable cache entry");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(key, error = %e, "cache read failed");
                None
            }
        }
    }

    /// Store a typed value with a TTL in seconds; failures are logged
    pub async fn set<T>(&self, key: &str, value: &T, ttl_secs: u64)
    where
        T: Serialize + Send + Sync,
    {
        if let Err(e) = self.try_set(key, value, ttl_secs).await {
            tracing::warn!(key, error = %e, "cache write failed");
        }
    }

    async fn try_set<T>(&self, key: &str, value: &T, ttl_secs: u64) -> Result<()>
    where
        T: Serialize + Send + Sync,
    {
        let json = serde_json::to_string(value).map_err(|e| {
            Error::infrastructure_with_source("Failed to serialize value for cache", e)
        })?;
        self.provider
            .set_json(key, &json, CacheEntryConfig::new().with_ttl_secs(ttl_secs))
            .await
    }

    /// Delete a key
    pub async fn delete(&self, key: &str) -> Result<bool> {
        self.provider.delete(key).await
    }

    /// Delete every key matching a glob pattern
    pub async fn delete_pattern(&self, pattern: &str) -> Result<u64> {
        self.provider.delete_pattern(pattern).await
    }

    /// Delete a set of keys and patterns
    pub async fn invalidate(&self, keys: &[String], patterns: &[&str]) -> Result<()> {
        for key in keys {
            self.delete(key).await?;
        }
        for pattern in patterns {
            self.delete_pattern(pattern).await?;
        }
        Ok(())
    }
}

impl fmt::Debug for SharedCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedCache")
            .field("provider", &self.provider.provider_name())
            .finish()
    }
}

/// Cache key segment for an optional filter value
pub fn key_part<T: fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(
        || charisma_domain::constants::CACHE_KEY_ANY.to_string(),
        |v| v.to_string(),
    )
}
