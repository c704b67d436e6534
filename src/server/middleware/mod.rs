//! HTTP middleware implementations
//!
//! - Rate limiting (per-policy headers and the 429 contract)
//! - Request ID tracking

mod helpers;
mod rate_limit;
mod request_id;


pub use helpers::client_identity;
pub use rate_limit::{RateLimitMiddleware, RateLimitMiddlewareService};
pub use request_id::{RequestIdMiddleware, RequestIdMiddlewareService};
