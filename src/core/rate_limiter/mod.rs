//! Fixed-window rate limiting
//!
//! Per-identity request counters over interchangeable backends: atomic
//! Redis counters across instances in production, in-process counters for
//! single-instance deployments and as the degraded path.

mod counters;
mod limiter;
mod types;
mod utils;


pub use limiter::{RateLimiter, RateLimiters, create_rate_limiters};
pub use types::{RateLimitDecision, RateLimitPolicy};
