//! Shared Redis connection with explicit connectivity state
//!
//! One client per process, injected into the cache service and the rate
//! limiters. Every operation checks the connection state first so callers
//! can fail over to their in-memory paths without waiting on retries; a
//! background task restores the connection with capped exponential backoff.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::time::Duration;

use arc_swap::ArcSwapOption;
use redis::Client;
use redis::aio::MultiplexedConnection;
use tracing::{debug, info, warn};

use crate::config::RedisConfig;
use crate::utils::error::{GatewayError, Result};

/// Connectivity of the shared Redis client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// Live connection, operations go to the store
    Connected,
    /// A reconnect attempt is in flight
    Connecting,
    /// No connection; operations fail fast into the memory paths
    Disconnected,
}

impl ConnectionState {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Connected,
            1 => Self::Connecting,
            _ => Self::Disconnected,
        }
    }

    fn as_u8(self) -> u8 {
        match self {
            Self::Connected => 0,
            Self::Connecting => 1,
            Self::Disconnected => 2,
        }
    }
}

/// Shared Redis connection pool
#[derive(Clone)]
pub struct RedisPool {
    inner: Arc<PoolInner>,
}

struct PoolInner {
    client: Client,
    conn: ArcSwapOption<MultiplexedConnection>,
    state: AtomicU8,
    reconnecting: AtomicBool,
    config: RedisConfig,
}

impl RedisPool {
    /// Connect to the configured Redis instance.
    ///
    /// An unreachable store is not an error: the pool starts
    /// `Disconnected`, operations fail fast, and a background task keeps
    /// retrying. Only a missing or malformed URL is rejected.
    pub async fn connect(config: &RedisConfig) -> Result<Self> {
        let url = config.url.clone().ok_or_else(|| {
            GatewayError::Config("redis.url is required when redis is enabled".to_string())
        })?;
        let url = apply_tls_relaxation(&url, config.insecure_tls);

        info!("Connecting to Redis at {}", sanitize_url(&url));
        let client = Client::open(url.as_str())?;

        let pool = Self {
            inner: Arc::new(PoolInner {
                client,
                conn: ArcSwapOption::const_empty(),
                state: AtomicU8::new(ConnectionState::Disconnected.as_u8()),
                reconnecting: AtomicBool::new(false),
                config: config.clone(),
            }),
        };

        let timeout = Duration::from_secs(config.connection_timeout.max(1));
        match tokio::time::timeout(timeout, pool.inner.client.get_multiplexed_async_connection())
            .await
        {
            Ok(Ok(conn)) => {
                pool.inner.conn.store(Some(Arc::new(conn)));
                pool.set_state(ConnectionState::Connected);
                info!("Redis connection established");
            }
            Ok(Err(e)) => {
                warn!("Redis connection failed, starting in degraded mode: {}", e);
                pool.spawn_reconnect();
            }
            Err(_) => {
                warn!(
                    "Redis connection timed out after {:?}, starting in degraded mode",
                    timeout
                );
                pool.spawn_reconnect();
            }
        }

        Ok(pool)
    }

    /// Current connectivity state
    pub fn state(&self) -> ConnectionState {
        ConnectionState::from_u8(self.inner.state.load(Ordering::Acquire))
    }

    /// Whether the pool currently has a live connection
    pub fn is_connected(&self) -> bool {
        self.state() == ConnectionState::Connected
    }

    /// Namespace prefix for every key in this store
    pub fn key_prefix(&self) -> &str {
        &self.inner.config.key_prefix
    }

    fn set_state(&self, state: ConnectionState) {
        self.inner.state.store(state.as_u8(), Ordering::Release);
    }

    /// Clone of the live connection, or an immediate error when degraded
    pub(crate) fn ready_connection(&self) -> Result<MultiplexedConnection> {
        if self.state() != ConnectionState::Connected {
            return Err(GatewayError::RedisUnavailable);
        }
        match self.inner.conn.load_full() {
            Some(conn) => Ok((*conn).clone()),
            None => Err(GatewayError::RedisUnavailable),
        }
    }

    /// Downgrade on connection-level failures and kick off recovery
    pub(crate) fn handle_error(&self, error: &redis::RedisError) {
        if error.is_connection_dropped() || error.is_io_error() || error.is_timeout() {
            self.set_state(ConnectionState::Disconnected);
            self.spawn_reconnect();
        }
    }

    /// Background reconnect with capped exponential backoff. Never blocks a
    /// request; at most one loop runs at a time.
    fn spawn_reconnect(&self) {
        if self.inner.reconnecting.swap(true, Ordering::AcqRel) {
            return;
        }

        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            let max_backoff = Duration::from_millis(inner.config.reconnect_max_backoff_ms.max(100));
            let mut backoff = Duration::from_millis(100);

            loop {
                inner
                    .state
                    .store(ConnectionState::Connecting.as_u8(), Ordering::Release);
                match inner.client.get_multiplexed_async_connection().await {
                    Ok(conn) => {
                        inner.conn.store(Some(Arc::new(conn)));
                        inner
                            .state
                            .store(ConnectionState::Connected.as_u8(), Ordering::Release);
                        info!("Redis connection restored");
                        break;
                    }
                    Err(e) => {
                        inner
                            .state
                            .store(ConnectionState::Disconnected.as_u8(), Ordering::Release);
                        debug!("Redis reconnect failed, retrying in {:?}: {}", backoff, e);
                        tokio::time::sleep(backoff).await;
                        backoff = (backoff * 2).min(max_backoff);
                    }
                }
            }

            inner.reconnecting.store(false, Ordering::Release);
        });
    }

    /// Health check
    pub async fn ping(&self) -> Result<()> {
        let mut conn = self.ready_connection()?;
        let reply: std::result::Result<String, redis::RedisError> =
            redis::cmd("PING").query_async(&mut conn).await;
        match reply {
            Ok(_) => Ok(()),
            Err(e) => {
                self.handle_error(&e);
                Err(GatewayError::Redis(e))
            }
        }
    }
}

/// Append the redis crate's `#insecure` fragment for self-signed TLS
/// setups. Dev-only; plain `redis://` URLs are returned untouched.
pub(crate) fn apply_tls_relaxation(url: &str, insecure: bool) -> String {
    if insecure && url.starts_with("rediss://") && !url.contains('#') {
        format!("{url}#insecure")
    } else {
        url.to_string()
    }
}

/// Scrub the password for logging
pub(crate) fn sanitize_url(url: &str) -> String {
    if let Ok(parsed) = url::Url::parse(url) {
        let mut sanitized = parsed.clone();
        if sanitized.password().is_some() {
            let _ = sanitized.set_password(Some("***"));
        }
        sanitized.to_string()
    } else {
        "invalid_url".to_string()
    }
}
