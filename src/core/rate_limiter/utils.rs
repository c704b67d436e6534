//! Housekeeping for the rate limiter

use std::sync::Arc;
use std::time::Duration;

use super::limiter::RateLimiter;

const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

impl RateLimiter {
    /// Drop closed windows from the in-process counters.
    pub fn sweep(&self) {
        self.store.sweep();
    }

    /// Spawn the periodic sweep task for this limiter. Bounds memory
    /// growth of the in-process counters; correctness never depends on it.
    pub fn start_sweeper(self: Arc<Self>) {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(SWEEP_INTERVAL);
            loop {
                interval.tick().await;
                self.sweep();
            }
        });
    }
}
