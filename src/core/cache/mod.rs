//! Read-through caching over interchangeable backends
//!
//! ## Module Structure
//!
//! - `service` - Public cache service (get/set/delete/get_or_set/invalidate)
//! - `backend` - Store seam the two backends implement
//! - `memory` - Bounded in-memory store
//! - `redis` - Redis-primary store with a memory mirror
//! - `keys` - Key generators and TTL policy
//! - `types` - Envelope, backend kind, statistics

mod backend;
mod keys;
mod memory;
mod redis;
mod service;
mod types;


pub use keys::{CacheKeys, CacheTtl};
pub use service::CacheService;
pub use types::{BackendKind, CacheEnvelope, CacheStats};
