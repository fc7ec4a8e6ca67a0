//! Moka in-memory cache provider
//!
//! Concurrent in-memory cache with per-entry expiry and glob invalidation.
//!
//! ## Features
//!
//! - Per-entry TTL through a custom [`Expiry`] policy
//! - Pattern deletion (`roles:list:*`) using `globset`
//! - Hit/miss counters for [`CacheStats`]
//!
//! ## Example
//!
//! ```ignore
//! use charisma_providers::cache::MokaCacheProvider;
//! use std::time::Duration;
//!
//! let provider = MokaCacheProvider::with_config(10_000, Duration::from_secs(300));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use charisma_domain::error::{Error, Result};
use charisma_domain::ports::{CacheEntryConfig, CacheProvider, CacheStats};
use globset::Glob;
use moka::Expiry;
use moka::future::Cache;

use crate::constants::{CACHE_DEFAULT_MAX_CAPACITY, CACHE_DEFAULT_TTL_SECS};

#[derive(Clone)]
struct CachedValue {
    json: Arc<str>,
    ttl: Duration,
}

struct EntryExpiry;

impl Expiry<String, CachedValue> for EntryExpiry {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &CachedValue,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &CachedValue,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// Moka-based in-memory cache provider
pub struct MokaCacheProvider {
    cache: Cache<String, CachedValue>,
    default_ttl: Duration,
    max_capacity: u64,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl Default for MokaCacheProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MokaCacheProvider {
    /// Create a new Moka cache provider with default settings
    pub fn new() -> Self {
        Self::with_config(
            CACHE_DEFAULT_MAX_CAPACITY,
            Duration::from_secs(CACHE_DEFAULT_TTL_SECS),
        )
    }

    /// Create a new Moka cache provider with custom configuration
    pub fn with_config(max_capacity: u64, default_ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .expire_after(EntryExpiry)
            .build();

        Self {
            cache,
            default_ttl,
            max_capacity,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Get the maximum capacity of the cache
    pub fn max_capacity(&self) -> u64 {
        self.max_capacity
    }
}

#[async_trait]
impl CacheProvider for MokaCacheProvider {
    async fn get_json(&self, key: &str) -> Result<Option<String>> {
        if let Some(value) = self.cache.get(key).await {
            self.hits.fetch_add(1, Ordering::Relaxed);
            Ok(Some(value.json.to_string()))
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
            Ok(None)
        }
    }

    async fn set_json(&self, key: &str, value: &str, config: CacheEntryConfig) -> Result<()> {
        let ttl = config.effective_ttl(self.default_ttl);
        if ttl.is_zero() {
            return Err(Error::cache(format!("zero TTL for cache key '{key}'")));
        }
        self.cache
            .insert(
                key.to_string(),
                CachedValue {
                    json: Arc::from(value),
                    ttl,
                },
            )
            .await;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        Ok(self.cache.remove(key).await.is_some())
    }

    async fn delete_pattern(&self, pattern: &str) -> Result<u64> {
        let matcher = Glob::new(pattern)
            .map_err(|e| Error::cache(format!("invalid cache key pattern '{pattern}': {e}")))?
            .compile_matcher();
        let keys: Vec<Arc<String>> = self
            .cache
            .iter()
            .filter(|(key, _)| matcher.is_match(key.as_str()))
            .map(|(key, _)| key)
            .collect();
        let mut deleted = 0;
        for key in keys {
            if self.cache.remove(key.as_str()).await.is_some() {
                deleted += 1;
            }
        }
        Ok(deleted)
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.cache.contains_key(key))
    }

    async fn clear(&self) -> Result<()> {
        self.cache.invalidate_all();
        self.cache.run_pending_tasks().await;
        Ok(())
    }

    async fn stats(&self) -> Result<CacheStats> {
        // Run pending tasks to ensure entry_count is accurate
        self.cache.run_pending_tasks().await;
        let mut stats = CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.cache.entry_count(),
            hit_rate: 0.0,
        };
        stats.hit_rate = stats.calculate_hit_rate();
        Ok(stats)
    }

    async fn size(&self) -> Result<usize> {
        self.cache.run_pending_tasks().await;
        Ok(usize::try_from(self.cache.entry_count()).unwrap_or(usize::MAX))
    }

    fn provider_name(&self) -> &str {
        "moka"
    }
}

impl std::fmt::Debug for MokaCacheProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MokaCacheProvider")
            .field("max_capacity", &self.max_capacity)
            .field("default_ttl", &self.default_ttl)
            .field("entries", &self.cache.entry_count())
            .finish()
    }
}
