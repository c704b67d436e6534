//! Redis-primary cache backend with a local mirror

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::storage::RedisPool;
use crate::utils::error::GatewayError;

use super::backend::CacheStore;
use super::memory::MemoryStore;
use super::types::BackendKind;

/// Redis-backed store. Every write is mirrored into a local
/// [`MemoryStore`] so reads keep serving recent data when the connection
/// drops; any Redis failure degrades to the mirror for that single call.
pub(crate) struct RedisStore {
    pool: RedisPool,
    mirror: MemoryStore,
}

impl RedisStore {
    pub fn new(pool: RedisPool, max_entries: usize) -> Self {
        Self {
            pool,
            mirror: MemoryStore::new(max_entries),
        }
    }
}

#[async_trait]
impl CacheStore for RedisStore {
    async fn fetch(&self, key: &str) -> Option<String> {
        match self.pool.get(key).await {
            Ok(Some(payload)) => return Some(payload),
            Ok(None) => {}
            Err(GatewayError::RedisUnavailable) => {
                debug!("Redis not connected, reading {} from memory", key);
            }
            Err(e) => warn!("Redis get failed for {}, reading from memory: {}", key, e),
        }
        self.mirror.fetch(key).await
    }

    async fn store(&self, key: &str, payload: String, ttl_secs: u64) {
        match self.pool.set_ex(key, &payload, ttl_secs).await {
            Ok(()) => {}
            Err(GatewayError::RedisUnavailable) => {
                debug!("Redis not connected, keeping {} in memory only", key);
            }
            Err(e) => warn!("Redis set failed for {}, keeping memory copy: {}", key, e),
        }
        self.mirror.store(key, payload, ttl_secs).await;
    }

    async fn remove(&self, key: &str) {
        match self.pool.delete(key).await {
            Ok(()) | Err(GatewayError::RedisUnavailable) => {}
            Err(e) => warn!("Redis delete failed for {}: {}", key, e),
        }
        self.mirror.remove(key).await;
    }

    async fn invalidate_prefix(&self, prefix: &str) {
        match self.pool.delete_prefix(prefix).await {
            Ok(_) | Err(GatewayError::RedisUnavailable) => {}
            Err(e) => warn!("Redis prefix invalidation failed for {}: {}", prefix, e),
        }
        self.mirror.invalidate_prefix(prefix).await;
    }

    fn kind(&self) -> BackendKind {
        if self.pool.is_connected() {
            BackendKind::Redis
        } else {
            BackendKind::Memory
        }
    }

    fn entries(&self) -> usize {
        self.mirror.entries()
    }
}
