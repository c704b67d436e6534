//! Backend seam for the cache service
//!
//! Two variants satisfy the same async contract: a bounded in-memory map
//! and the shared Redis store (which carries its own memory mirror for
//! degraded operation). The service factory picks the variant at
//! construction time based on configuration.

use async_trait::async_trait;

use super::types::BackendKind;

#[async_trait]
pub(crate) trait CacheStore: Send + Sync {
    /// Fetch the serialized envelope for `key`. Expired and unreadable
    /// entries read as absent.
    async fn fetch(&self, key: &str) -> Option<String>;

    /// Store the serialized envelope under `key` for `ttl_secs`.
    async fn store(&self, key: &str, payload: String, ttl_secs: u64);

    /// Remove `key`; idempotent.
    async fn remove(&self, key: &str);

    /// Drop every key under `prefix`.
    async fn invalidate_prefix(&self, prefix: &str);

    /// Backend currently answering reads.
    fn kind(&self) -> BackendKind;

    /// Entries held by the in-process side.
    fn entries(&self) -> usize;
}
