//! Error handling for the gateway
//!
//! One error type for the whole crate plus its HTTP mapping. Backend
//! connectivity problems stay inside the cache/limiter fallback paths; the
//! only rejection a client is meant to see is the limiter's 429.

mod response;
mod types;


pub use response::{ErrorDetail, ErrorResponse};
pub use types::{GatewayError, Result};
