//! Shared test infrastructure

use catbreeds_gateway::config::{Config, RedisConfig};

/// Configuration wired for in-memory backends and the given upstream.
///
/// The leaderboard limiter is deliberately tight so over-limit behavior is
/// cheap to trigger.
pub fn memory_config(upstream_base_url: &str) -> Config {
    let mut config = Config::default();
    config.redis.enabled = false;
    config.upstream.base_url = upstream_base_url.to_string();
    config.rate_limit.api.window_ms = 60_000;
    config.rate_limit.api.max_requests = 50;
    config.rate_limit.leaderboard.window_ms = 60_000;
    config.rate_limit.leaderboard.max_requests = 3;
    config
}

/// Redis configuration pointing at a local store, for the `--ignored`
/// live tests.
pub fn local_redis_config() -> RedisConfig {
    RedisConfig {
        url: Some(
            std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string()),
        ),
        key_prefix: "catbreeds_test:".to_string(),
        ..RedisConfig::default()
    }
}
