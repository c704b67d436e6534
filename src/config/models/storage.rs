//! Storage configuration

use serde::{Deserialize, Serialize};

use super::{default_connection_timeout, default_key_prefix, default_reconnect_max_backoff_ms};

/// Redis configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisConfig {
    /// Enable Redis; when false everything stays in-process
    #[serde(default = "default_redis_enabled")]
    pub enabled: bool,
    /// Connection URL; absence selects memory-only mode
    #[serde(default)]
    pub url: Option<String>,
    /// Namespace prefix applied to every key in the shared store
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
    /// Skip TLS certificate verification on rediss:// URLs (dev only)
    #[serde(default)]
    pub insecure_tls: bool,
    /// Initial connection timeout in seconds
    #[serde(default = "default_connection_timeout")]
    pub connection_timeout: u64,
    /// Cap for the reconnect backoff in milliseconds
    #[serde(default = "default_reconnect_max_backoff_ms")]
    pub reconnect_max_backoff_ms: u64,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            enabled: default_redis_enabled(),
            url: None,
            key_prefix: default_key_prefix(),
            insecure_tls: false,
            connection_timeout: default_connection_timeout(),
            reconnect_max_backoff_ms: default_reconnect_max_backoff_ms(),
        }
    }
}

fn default_redis_enabled() -> bool {
    true
}
