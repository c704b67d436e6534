//! Bounded in-memory cache backend

use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use lru::LruCache;
use parking_lot::RwLock;

use super::backend::CacheStore;
use super::types::BackendKind;

const DEFAULT_CAPACITY: NonZeroUsize = NonZeroUsize::new(1000).unwrap();

/// In-memory backend: a bounded map evicting the oldest-inserted entry.
///
/// Reads go through `peek` and never promote, so the LRU order stays the
/// insertion order and eviction is O(1). Each entry carries its own expiry,
/// enforced lazily on read.
pub(crate) struct MemoryStore {
    entries: RwLock<LruCache<String, MemoryEntry>>,
}

struct MemoryEntry {
    payload: String,
    expires_at: Instant,
}

impl MemoryEntry {
    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

impl MemoryStore {
    pub fn new(max_entries: usize) -> Self {
        let capacity = NonZeroUsize::new(max_entries).unwrap_or(DEFAULT_CAPACITY);
        Self {
            entries: RwLock::new(LruCache::new(capacity)),
        }
    }

    fn read(&self, key: &str) -> Option<String> {
        let mut entries = self.entries.write();
        let expired = entries.peek(key)?.is_expired();
        if expired {
            entries.pop(key);
            return None;
        }
        entries.peek(key).map(|entry| entry.payload.clone())
    }

    fn write(&self, key: &str, payload: String, ttl_secs: u64) {
        let entry = MemoryEntry {
            payload,
            expires_at: Instant::now() + Duration::from_secs(ttl_secs),
        };
        self.entries.write().put(key.to_string(), entry);
    }

    fn drop_key(&self, key: &str) {
        self.entries.write().pop(key);
    }

    fn clear(&self) {
        self.entries.write().clear();
    }

    fn len(&self) -> usize {
        self.entries.read().len()
    }
}

#[async_trait]
impl CacheStore for MemoryStore {
    async fn fetch(&self, key: &str) -> Option<String> {
        self.read(key)
    }

    async fn store(&self, key: &str, payload: String, ttl_secs: u64) {
        self.write(key, payload, ttl_secs);
    }

    async fn remove(&self, key: &str) {
        self.drop_key(key);
    }

    async fn invalidate_prefix(&self, _prefix: &str) {
        // Prefix lookups are not indexed here; clearing everything only
        // over-invalidates, which is safe.
        self.clear();
    }

    fn kind(&self) -> BackendKind {
        BackendKind::Memory
    }

    fn entries(&self) -> usize {
        self.len()
    }
}
