//! Configuration management for the gateway
//!
//! `config/gateway.yaml` wins when present; otherwise environment
//! variables fill a default configuration. Both paths run the same cheap
//! validation before anything is wired.

pub mod models;

pub use models::*;

use std::path::Path;
use std::str::FromStr;

use tracing::{debug, info};

use crate::utils::error::{GatewayError, Result};

/// Top-level configuration
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server
    pub server: ServerConfig,
    /// Shared Redis store
    pub redis: RedisConfig,
    /// Cache service
    pub cache: CacheConfig,
    /// Rate limiter policies
    pub rate_limit: RateLimitConfig,
    /// Upstream CatBreeds service
    pub upstream: UpstreamConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| GatewayError::Config(format!("failed to read config file: {e}")))?;

        let config: Config = serde_yaml::from_str(&content)?;
        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let mut config = Config::default();

        if let Some(host) = env_var("SERVER_HOST") {
            config.server.host = host;
        }
        if let Some(port) = env_var("SERVER_PORT") {
            config.server.port = parse("SERVER_PORT", &port)?;
        }

        if let Some(url) = env_var("REDIS_URL") {
            config.redis.url = Some(url);
        }
        if let Some(prefix) = env_var("REDIS_KEY_PREFIX") {
            config.redis.key_prefix = prefix;
        }
        if let Some(insecure) = env_var("REDIS_INSECURE_TLS") {
            config.redis.insecure_tls = parse("REDIS_INSECURE_TLS", &insecure)?;
        }

        if let Some(ttl) = env_var("CACHE_DEFAULT_TTL") {
            config.cache.default_ttl = parse("CACHE_DEFAULT_TTL", &ttl)?;
        }
        if let Some(max) = env_var("CACHE_MAX_ENTRIES") {
            config.cache.max_entries = parse("CACHE_MAX_ENTRIES", &max)?;
        }

        if let Some(value) = env_var("RATE_LIMIT_API_WINDOW_MS") {
            config.rate_limit.api.window_ms = parse("RATE_LIMIT_API_WINDOW_MS", &value)?;
        }
        if let Some(value) = env_var("RATE_LIMIT_API_MAX") {
            config.rate_limit.api.max_requests = parse("RATE_LIMIT_API_MAX", &value)?;
        }
        if let Some(value) = env_var("RATE_LIMIT_LEADERBOARD_WINDOW_MS") {
            config.rate_limit.leaderboard.window_ms =
                parse("RATE_LIMIT_LEADERBOARD_WINDOW_MS", &value)?;
        }
        if let Some(value) = env_var("RATE_LIMIT_LEADERBOARD_MAX") {
            config.rate_limit.leaderboard.max_requests =
                parse("RATE_LIMIT_LEADERBOARD_MAX", &value)?;
        }

        if let Some(url) = env_var("UPSTREAM_BASE_URL") {
            config.upstream.base_url = url;
        }
        if let Some(timeout) = env_var("UPSTREAM_TIMEOUT") {
            config.upstream.timeout = parse("UPSTREAM_TIMEOUT", &timeout)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Cheap structural checks before wiring anything
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(GatewayError::Config("server.port must not be 0".to_string()));
        }
        if self.cache.default_ttl == 0 {
            return Err(GatewayError::Config(
                "cache.default_ttl must be positive".to_string(),
            ));
        }
        if self.cache.max_entries == 0 {
            return Err(GatewayError::Config(
                "cache.max_entries must be positive".to_string(),
            ));
        }

        for (name, policy) in [
            ("api", &self.rate_limit.api),
            ("leaderboard", &self.rate_limit.leaderboard),
        ] {
            if policy.window_ms == 0 {
                return Err(GatewayError::Config(format!(
                    "rate_limit.{name}.window_ms must be positive"
                )));
            }
            if policy.max_requests == 0 {
                return Err(GatewayError::Config(format!(
                    "rate_limit.{name}.max_requests must be positive"
                )));
            }
        }

        if self.upstream.base_url.is_empty() {
            return Err(GatewayError::Config(
                "upstream.base_url must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}

fn parse<T: FromStr>(name: &str, raw: &str) -> Result<T> {
    raw.parse()
        .map_err(|_| GatewayError::Config(format!("invalid {name}: {raw}")))
}
