//! Cache configuration

use serde::{Deserialize, Serialize};

use super::{default_cache_max_entries, default_cache_ttl};

/// Cache service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// TTL in seconds used when a set does not specify one
    #[serde(default = "default_cache_ttl")]
    pub default_ttl: u64,
    /// Capacity of the in-memory backend
    #[serde(default = "default_cache_max_entries")]
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            default_ttl: default_cache_ttl(),
            max_entries: default_cache_max_entries(),
        }
    }
}
