//! Key-value operations on the shared Redis connection

use redis::AsyncCommands;
use tracing::debug;

use crate::utils::error::{GatewayError, Result};

use super::pool::RedisPool;

impl RedisPool {
    /// Get a raw value
    pub async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.ready_connection()?;
        match conn.get::<_, Option<String>>(key).await {
            Ok(value) => Ok(value),
            Err(e) => {
                self.handle_error(&e);
                Err(GatewayError::Redis(e))
            }
        }
    }

    /// Set a value with native expiry
    pub async fn set_ex(&self, key: &str, value: &str, ttl_secs: u64) -> Result<()> {
        let mut conn = self.ready_connection()?;
        match conn.set_ex::<_, _, ()>(key, value, ttl_secs).await {
            Ok(()) => Ok(()),
            Err(e) => {
                self.handle_error(&e);
                Err(GatewayError::Redis(e))
            }
        }
    }

    /// Delete a key (idempotent)
    pub async fn delete(&self, key: &str) -> Result<()> {
        let mut conn = self.ready_connection()?;
        match conn.del::<_, ()>(key).await {
            Ok(()) => Ok(()),
            Err(e) => {
                self.handle_error(&e);
                Err(GatewayError::Redis(e))
            }
        }
    }

    /// Delete every key under `prefix` with a cursor-based scan.
    ///
    /// SCAN walks the keyspace in bounded steps; a KEYS call would block
    /// the server on large keyspaces.
    pub async fn delete_prefix(&self, prefix: &str) -> Result<u64> {
        let mut conn = self.ready_connection()?;
        let pattern = format!("{prefix}*");

        let mut keys: Vec<String> = Vec::new();
        {
            let mut iter = match conn.scan_match::<_, String>(&pattern).await {
                Ok(iter) => iter,
                Err(e) => {
                    self.handle_error(&e);
                    return Err(GatewayError::Redis(e));
                }
            };
            while let Some(key) = iter.next_item().await {
                keys.push(key);
            }
        }

        if keys.is_empty() {
            return Ok(0);
        }

        match conn.del::<_, u64>(keys).await {
            Ok(deleted) => {
                debug!("Invalidated {} keys under {}", deleted, pattern);
                Ok(deleted)
            }
            Err(e) => {
                self.handle_error(&e);
                Err(GatewayError::Redis(e))
            }
        }
    }
}
