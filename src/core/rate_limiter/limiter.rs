//! Core rate limiter implementation

use std::sync::Arc;

use tracing::debug;

use crate::config::RateLimitConfig;
use crate::storage::RedisPool;

use super::counters::{CounterStore, MemoryCounters, RedisCounters};
use super::types::{RateLimitDecision, RateLimitPolicy};

/// Fixed-window rate limiter over a pluggable counter store.
pub struct RateLimiter {
    pub(super) policy: RateLimitPolicy,
    pub(super) store: Box<dyn CounterStore>,
}

impl RateLimiter {
    /// Build a limiter for `policy`; a pool selects the atomic Redis
    /// counters, otherwise counting stays in-process.
    pub fn new(policy: RateLimitPolicy, redis: Option<RedisPool>) -> Self {
        let store: Box<dyn CounterStore> = match redis {
            Some(pool) => Box::new(RedisCounters::new(pool)),
            None => Box::new(MemoryCounters::new()),
        };
        Self { policy, store }
    }

    /// Count this request against `identity`'s current window and decide.
    ///
    /// Every call increments; there is no peek-only path. A burst of up to
    /// twice the limit can straddle a window boundary, which is the
    /// accepted cost of fixed windows.
    pub async fn check_and_increment(&self, identity: &str) -> RateLimitDecision {
        let key = format!("{}{}", self.policy.prefix, identity);
        let window = self.store.incr(&key, self.policy.window_ms).await;

        let limit = self.policy.max_requests;
        let allowed = window.count <= limit;
        let reset_after_secs = window.reset_after_ms.div_ceil(1000);

        if !allowed {
            debug!(
                "Rate limit exceeded on {} for {}: {}/{}",
                self.policy.name, identity, window.count, limit
            );
        }

        RateLimitDecision {
            allowed,
            count: window.count,
            limit,
            remaining: limit.saturating_sub(window.count),
            reset_after_secs,
            retry_after_secs: (!allowed).then(|| reset_after_secs.max(1)),
        }
    }

    /// Policy this limiter enforces
    pub fn policy(&self) -> &RateLimitPolicy {
        &self.policy
    }
}

/// The two preconfigured limiters guarding the HTTP surface.
#[derive(Clone)]
pub struct RateLimiters {
    /// Broad limiter for all API traffic
    pub api: Arc<RateLimiter>,
    /// Strict limiter for the expensive leaderboard aggregate
    pub leaderboard: Arc<RateLimiter>,
}

/// Build the `api` and `leaderboard` limiters from configuration. Both
/// share the mechanism and the Redis client; only the parameters differ.
pub fn create_rate_limiters(config: &RateLimitConfig, redis: Option<RedisPool>) -> RateLimiters {
    let namespace = redis
        .as_ref()
        .map(|pool| pool.key_prefix().to_string())
        .unwrap_or_default();

    let api = RateLimiter::new(
        RateLimitPolicy {
            name: "api",
            prefix: format!("{namespace}ratelimit:api:"),
            window_ms: config.api.window_ms,
            max_requests: config.api.max_requests,
        },
        redis.clone(),
    );
    let leaderboard = RateLimiter::new(
        RateLimitPolicy {
            name: "leaderboard",
            prefix: format!("{namespace}ratelimit:leaderboard:"),
            window_ms: config.leaderboard.window_ms,
            max_requests: config.leaderboard.max_requests,
        },
        redis,
    );

    RateLimiters {
        api: Arc::new(api),
        leaderboard: Arc::new(leaderboard),
    }
}
