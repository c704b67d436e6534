//! # catbreeds-gateway
//!
//! Caching and rate-limiting edge layer for the CatBreeds API service.
//!
//! Inbound requests pass a fixed-window rate limiter, route handlers
//! answer from a read-through cache, and misses are filled from the
//! upstream service. Both the limiter and the cache run against one shared
//! Redis client in production and degrade to in-process state whenever the
//! store is absent, unreachable, or erroring; the only rejection a client
//! ever sees is the limiter's 429.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use catbreeds_gateway::{Config, server::HttpServer};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let server = HttpServer::new(&config).await?;
//!     server.start().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Using the subsystem directly
//!
//! ```rust,no_run
//! use catbreeds_gateway::config::{CacheConfig, RateLimitConfig};
//! use catbreeds_gateway::{CacheService, CacheKeys, CacheTtl, create_rate_limiters};
//!
//! # async fn demo() -> catbreeds_gateway::Result<()> {
//! let cache = CacheService::new(&CacheConfig::default(), None);
//! let limiters = create_rate_limiters(&RateLimitConfig::default(), None);
//!
//! let decision = limiters.api.check_and_increment("203.0.113.9").await;
//! assert!(decision.allowed);
//!
//! let leaderboard: Vec<String> = cache
//!     .get_or_set(&CacheKeys::leaderboard(10), Some(CacheTtl::LEADERBOARD), || async {
//!         Ok(vec!["abys".to_string()])
//!     })
//!     .await?;
//! # let _ = leaderboard;
//! # Ok(())
//! # }
//! ```

#![warn(clippy::all)]

pub mod config;
pub mod core;
pub mod server;
pub mod services;
pub mod storage;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use core::cache::{BackendKind, CacheKeys, CacheService, CacheStats, CacheTtl};
pub use core::rate_limiter::{
    RateLimitDecision, RateLimitPolicy, RateLimiter, RateLimiters, create_rate_limiters,
};
pub use storage::{ConnectionState, RedisPool};
pub use utils::error::{GatewayError, Result};

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
