//! Cache key generators and TTL policy
//!
//! Key shapes and TTLs are part of the contract shared with the CatBreeds
//! app; the route handlers and the like-invalidation path both rely on
//! them, so their literal forms are asserted in tests.

/// Pre-built key generators for the entities the gateway caches
pub struct CacheKeys;

impl CacheKeys {
    /// Leaderboard page, keyed by its size: `leaderboard:10`
    pub fn leaderboard(limit: usize) -> String {
        format!("leaderboard:{limit}")
    }

    /// Cat detail by id: `cat:abc123`
    pub fn cat(id: &str) -> String {
        format!("cat:{id}")
    }

    /// Likes belonging to one user
    pub fn user_likes(user_id: i64) -> String {
        format!("user_likes:{user_id}")
    }

    /// Breed search, keyed by query and page size
    pub fn breed_search(query: &str, limit: usize) -> String {
        format!("breeds:{query}:{limit}")
    }

    /// Random image batch, keyed by batch size
    pub fn random_images(count: usize) -> String {
        format!("random_images:{count}")
    }
}

/// Per-entity TTLs in seconds
pub struct CacheTtl;

impl CacheTtl {
    /// Leaderboard pages go stale fast and are cheap to refresh
    pub const LEADERBOARD: u64 = 60;
    /// Cat details rarely change
    pub const CAT_DETAIL: u64 = 3600;
    /// A user's likes move with their own actions
    pub const USER_LIKES: u64 = 300;
    /// Search results for a given query
    pub const BREED_SEARCH: u64 = 1800;
    /// Random image batches should rotate quickly
    pub const RANDOM_IMAGES: u64 = 60;
}
