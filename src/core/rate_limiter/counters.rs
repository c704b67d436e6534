//! Counter stores backing the rate limiter

use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::{debug, warn};

use crate::storage::RedisPool;
use crate::utils::error::GatewayError;

use super::types::WindowCount;

/// Window counters behind a uniform async contract. Each variant makes the
/// whole read-reset-increment atomic for a given key.
#[async_trait]
pub(super) trait CounterStore: Send + Sync {
    /// Increment `key`'s counter for the current window, creating the
    /// window when absent or expired.
    async fn incr(&self, key: &str, window_ms: u64) -> WindowCount;

    /// Drop counters whose window already closed. Housekeeping only; the
    /// read path already treats them as absent.
    fn sweep(&self);
}

/// In-process counters. The entry handle holds its shard lock for the
/// whole increment, so concurrent requests for one key serialize here and
/// no update can be lost.
pub(super) struct MemoryCounters {
    entries: DashMap<String, WindowEntry>,
}

struct WindowEntry {
    count: u32,
    reset_at: Instant,
}

impl MemoryCounters {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }
}

#[async_trait]
impl CounterStore for MemoryCounters {
    async fn incr(&self, key: &str, window_ms: u64) -> WindowCount {
        let window = Duration::from_millis(window_ms);
        let now = Instant::now();

        let mut entry = self
            .entries
            .entry(key.to_string())
            .or_insert_with(|| WindowEntry {
                count: 0,
                reset_at: now + window,
            });
        let entry = entry.value_mut();

        if entry.reset_at <= now {
            entry.count = 0;
            entry.reset_at = now + window;
        }
        entry.count = entry.count.saturating_add(1);

        WindowCount {
            count: entry.count,
            reset_after_ms: entry.reset_at.saturating_duration_since(now).as_millis() as u64,
        }
    }

    fn sweep(&self) {
        let now = Instant::now();
        self.entries.retain(|_, entry| entry.reset_at > now);
    }
}

/// Redis-backed counters: one atomic script per increment, falling back
/// silently to in-process counters when the store is away.
///
/// Trade-off: during an outage enforcement weakens to per-process, so a
/// multi-instance deployment rate-limits each instance separately until
/// the connection recovers.
pub(super) struct RedisCounters {
    pool: RedisPool,
    fallback: MemoryCounters,
}

impl RedisCounters {
    pub fn new(pool: RedisPool) -> Self {
        Self {
            pool,
            fallback: MemoryCounters::new(),
        }
    }
}

#[async_trait]
impl CounterStore for RedisCounters {
    async fn incr(&self, key: &str, window_ms: u64) -> WindowCount {
        match self.pool.incr_window(key, window_ms).await {
            Ok((count, ttl_ms)) => WindowCount {
                count: count.clamp(0, i64::from(u32::MAX)) as u32,
                reset_after_ms: ttl_ms.max(0) as u64,
            },
            Err(GatewayError::RedisUnavailable) => {
                debug!("Redis not connected, counting {} in memory", key);
                self.fallback.incr(key, window_ms).await
            }
            Err(e) => {
                warn!("Redis increment failed for {}, counting in memory: {}", key, e);
                self.fallback.incr(key, window_ms).await
            }
        }
    }

    fn sweep(&self) {
        // Redis expires its own windows; only the fallback needs sweeping.
        self.fallback.sweep();
    }
}
