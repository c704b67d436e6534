//! Application state shared across HTTP handlers

use std::sync::Arc;

use tracing::{info, warn};

use crate::config::Config;
use crate::core::cache::CacheService;
use crate::core::rate_limiter::{RateLimiters, create_rate_limiters};
use crate::services::UpstreamClient;
use crate::storage::RedisPool;
use crate::utils::error::Result;

/// HTTP server state shared across handlers. All fields are cheap to
/// clone; the composition root wires them exactly once.
#[derive(Clone)]
pub struct AppState {
    /// Gateway configuration (shared read-only)
    pub config: Arc<Config>,
    /// Read-through cache
    pub cache: Arc<CacheService>,
    /// Preconfigured limiters
    pub limiters: RateLimiters,
    /// Client for the service the gateway fronts
    pub upstream: Arc<UpstreamClient>,
    /// Shared Redis pool, when configured
    pub redis: Option<RedisPool>,
}

impl AppState {
    /// Wire the whole subsystem from configuration: the shared Redis pool
    /// (or memory-only mode), the cache service, both limiters and their
    /// sweepers, and the upstream client.
    pub async fn from_config(config: Config) -> Result<Self> {
        let redis = if config.redis.enabled {
            match &config.redis.url {
                Some(_) => match RedisPool::connect(&config.redis).await {
                    Ok(pool) => Some(pool),
                    Err(e) => {
                        warn!("Redis setup failed, using in-memory backends: {}", e);
                        None
                    }
                },
                None => {
                    warn!("Redis enabled but no URL configured, using in-memory backends");
                    None
                }
            }
        } else {
            info!("Redis disabled, using in-memory backends");
            None
        };

        let cache = Arc::new(CacheService::new(&config.cache, redis.clone()));

        let limiters = create_rate_limiters(&config.rate_limit, redis.clone());
        Arc::clone(&limiters.api).start_sweeper();
        Arc::clone(&limiters.leaderboard).start_sweeper();

        let upstream = Arc::new(UpstreamClient::new(&config.upstream)?);

        Ok(Self {
            config: Arc::new(config),
            cache,
            limiters,
            upstream,
            redis,
        })
    }
}
