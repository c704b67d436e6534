//! Cache service types

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Which backend currently answers reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// In-process bounded map
    Memory,
    /// Shared Redis store
    Redis,
}

/// Serialized form of every cached value.
///
/// The envelope is the wire format shared by both backends: the payload
/// plus its write timestamp in epoch milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheEnvelope {
    /// The cached payload
    pub data: serde_json::Value,
    /// When the entry was written, epoch milliseconds
    pub cached_at: i64,
}

impl CacheEnvelope {
    /// Wrap a payload with the current timestamp
    pub fn new(data: serde_json::Value) -> Self {
        Self {
            data,
            cached_at: chrono::Utc::now().timestamp_millis(),
        }
    }
}

/// Cache statistics snapshot (returned to callers)
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    /// Backend currently answering reads
    pub backend: BackendKind,
    /// Entries held by the in-process side
    pub entries: usize,
    /// Decodable cache hits
    pub hits: u64,
    /// Misses, including expired and corrupt entries
    pub misses: u64,
}

/// Lock-free counters for the hot path
#[derive(Debug, Default)]
pub(crate) struct AtomicCacheStats {
    pub hits: AtomicU64,
    pub misses: AtomicU64,
}

impl AtomicCacheStats {
    pub fn snapshot(&self, backend: BackendKind, entries: usize) -> CacheStats {
        CacheStats {
            backend,
            entries,
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}
