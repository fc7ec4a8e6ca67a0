//! Cache configuration types

use std::time::Duration;

use charisma_domain::value_objects::CacheSettings;
use charisma_providers::constants::{CACHE_DEFAULT_MAX_CAPACITY, CACHE_DEFAULT_TTL_SECS};
use serde::{Deserialize, Serialize};

/// Cache configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum number of entries
    pub max_capacity: u64,
    /// TTL for entries written without one (seconds)
    pub default_ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: CACHE_DEFAULT_MAX_CAPACITY,
            default_ttl_secs: CACHE_DEFAULT_TTL_SECS,
        }
    }
}

impl CacheConfig {
    /// Settings registered as `cacheSettings`
    pub fn to_settings(&self) -> CacheSettings {
        CacheSettings {
            max_capacity: self.max_capacity,
            default_ttl: Duration::from_secs(self.default_ttl_secs),
        }
    }
}
