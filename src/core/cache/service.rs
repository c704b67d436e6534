//! Read-through cache service

use std::future::Future;
use std::sync::atomic::Ordering;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::CacheConfig;
use crate::storage::RedisPool;
use crate::utils::error::Result;

use super::backend::CacheStore;
use super::memory::MemoryStore;
use super::redis::RedisStore;
use super::types::{AtomicCacheStats, BackendKind, CacheEnvelope, CacheStats};

/// Read-through key/value cache over interchangeable backends.
///
/// Callers never see a backend failure: Redis problems degrade to the
/// memory path for that call, corrupt payloads read as misses, and an
/// unserializable value simply is not cached.
pub struct CacheService {
    store: Box<dyn CacheStore>,
    key_prefix: String,
    default_ttl: u64,
    stats: AtomicCacheStats,
}

impl CacheService {
    /// Build the service, selecting the backend from configuration: a pool
    /// means Redis-primary with a memory mirror, no pool means memory-only.
    pub fn new(config: &CacheConfig, redis: Option<RedisPool>) -> Self {
        let (store, key_prefix) = match redis {
            Some(pool) => {
                let prefix = format!("{}cache:", pool.key_prefix());
                let store: Box<dyn CacheStore> =
                    Box::new(RedisStore::new(pool, config.max_entries));
                (store, prefix)
            }
            None => {
                let store: Box<dyn CacheStore> = Box::new(MemoryStore::new(config.max_entries));
                (store, "cache:".to_string())
            }
        };

        Self {
            store,
            key_prefix,
            default_ttl: config.default_ttl,
            stats: AtomicCacheStats::default(),
        }
    }

    /// Look up `key`. Absent, expired, and undecodable entries all read as
    /// `None`.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let full_key = self.full_key(key);
        let Some(payload) = self.store.fetch(&full_key).await else {
            self.stats.misses.fetch_add(1, Ordering::Relaxed);
            return None;
        };

        match decode::<T>(&payload) {
            Some(value) => {
                self.stats.hits.fetch_add(1, Ordering::Relaxed);
                debug!("Cache hit for {}", key);
                Some(value)
            }
            None => {
                // Corrupt payloads are misses, not errors.
                warn!("Discarding undecodable cache entry for {}", key);
                self.store.remove(&full_key).await;
                self.stats.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Store `value` under `key`. `ttl_secs` defaults to the configured
    /// TTL. Entries are always replaced wholesale, never mutated in place.
    pub async fn set<T: Serialize>(&self, key: &str, value: &T, ttl_secs: Option<u64>) {
        let payload = match encode(value) {
            Ok(payload) => payload,
            Err(e) => {
                warn!("Refusing to cache unserializable value for {}: {}", key, e);
                return;
            }
        };
        let ttl = ttl_secs.unwrap_or(self.default_ttl);
        self.store.store(&self.full_key(key), payload, ttl).await;
    }

    /// Remove `key` from every backend; idempotent.
    pub async fn delete(&self, key: &str) {
        self.store.remove(&self.full_key(key)).await;
    }

    /// Read-through: return the cached value, or run `factory`, cache its
    /// result, and return it. Factory errors propagate untouched and leave
    /// the key uncached.
    ///
    /// Concurrent callers racing on the same cold key may each run the
    /// factory; there is no single-flight de-duplication.
    pub async fn get_or_set<T, F, Fut>(
        &self,
        key: &str,
        ttl_secs: Option<u64>,
        factory: F,
    ) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        if let Some(cached) = self.get::<T>(key).await {
            return Ok(cached);
        }

        let value = factory().await?;
        self.set(key, &value, ttl_secs).await;
        Ok(value)
    }

    /// Drop every entry whose logical key starts with `prefix`.
    pub async fn invalidate_pattern(&self, prefix: &str) {
        self.store.invalidate_prefix(&self.full_key(prefix)).await;
    }

    /// Whether Redis currently answers reads
    pub fn is_using_redis(&self) -> bool {
        self.store.kind() == BackendKind::Redis
    }

    /// Snapshot of the authoritative backend and counters
    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot(self.store.kind(), self.store.entries())
    }

    fn full_key(&self, key: &str) -> String {
        format!("{}{}", self.key_prefix, key)
    }
}

fn encode<T: Serialize>(value: &T) -> Result<String> {
    let envelope = CacheEnvelope::new(serde_json::to_value(value)?);
    Ok(serde_json::to_string(&envelope)?)
}

fn decode<T: DeserializeOwned>(payload: &str) -> Option<T> {
    let envelope: CacheEnvelope = serde_json::from_str(payload).ok()?;
    serde_json::from_value(envelope.data).ok()
}
