//! Rate limiter types and data structures

/// Outcome of one check-and-increment
#[derive(Debug, Clone)]
pub struct RateLimitDecision {
    /// Whether the request may proceed
    pub allowed: bool,
    /// Requests seen in the current window, this one included
    pub count: u32,
    /// Maximum requests allowed per window
    pub limit: u32,
    /// Remaining budget, floored at zero
    pub remaining: u32,
    /// Seconds until the window closes
    pub reset_after_secs: u64,
    /// Retry hint, only set when rejected
    pub retry_after_secs: Option<u64>,
}

/// Parameters of one named limiter
#[derive(Debug, Clone)]
pub struct RateLimitPolicy {
    /// Name used in logs
    pub name: &'static str,
    /// Key prefix, namespace plus policy segment
    pub prefix: String,
    /// Window length in milliseconds
    pub window_ms: u64,
    /// Maximum requests per window
    pub max_requests: u32,
}

/// Counter state for one key's current window
#[derive(Debug, Clone)]
pub(super) struct WindowCount {
    pub count: u32,
    pub reset_after_ms: u64,
}
