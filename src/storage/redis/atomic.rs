//! Atomic fixed-window counter
//!
//! The increment, the first-write expiry, and the TTL read run in one
//! server-side script, so concurrent requests for the same key can never
//! lose an update. A naive GET then SET would drop counts under load.

use redis::Script;

use crate::utils::error::{GatewayError, Result};

use super::pool::RedisPool;

const INCR_WINDOW: &str = r"
local count = redis.call('INCR', KEYS[1])
if count == 1 then
  redis.call('PEXPIRE', KEYS[1], ARGV[1])
end
local ttl = redis.call('PTTL', KEYS[1])
if ttl < 0 then
  redis.call('PEXPIRE', KEYS[1], ARGV[1])
  ttl = tonumber(ARGV[1])
end
return {count, ttl}
";

impl RedisPool {
    /// Increment `key` within its current fixed window, creating the
    /// window when absent. Returns the count after this increment and the
    /// milliseconds until the window closes.
    pub async fn incr_window(&self, key: &str, window_ms: u64) -> Result<(i64, i64)> {
        let mut conn = self.ready_connection()?;
        let script = Script::new(INCR_WINDOW);
        match script
            .key(key)
            .arg(window_ms)
            .invoke_async::<(i64, i64)>(&mut conn)
            .await
        {
            Ok(reply) => Ok(reply),
            Err(e) => {
                self.handle_error(&e);
                Err(GatewayError::Redis(e))
            }
        }
    }
}
