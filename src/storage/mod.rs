//! Storage layer for the gateway
//!
//! Owns the connection to the shared Redis store. The in-memory fallbacks
//! live next to their services in `core`; this layer only manages the
//! external client and its connectivity.

pub mod redis;

pub use redis::{ConnectionState, RedisPool};
