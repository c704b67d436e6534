//! Live-Redis tests
//!
//! These need a reachable store (redis://127.0.0.1:6379 or `REDIS_URL`);
//! run them with `cargo test --test lib -- --ignored`.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use futures::future::join_all;
use serde_json::{Value, json};

use catbreeds_gateway::config::CacheConfig;
use catbreeds_gateway::core::rate_limiter::RateLimitPolicy;
use catbreeds_gateway::{CacheService, RateLimiter, RedisPool};

use crate::common::local_redis_config;

fn unique_suffix() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock before epoch")
        .as_nanos()
}

async fn live_pool() -> RedisPool {
    let pool = RedisPool::connect(&local_redis_config()).await.unwrap();
    assert!(pool.is_connected(), "these tests need a live Redis");
    pool
}

#[tokio::test]
#[ignore]
async fn concurrent_redis_increments_lose_no_updates() {
    let pool = live_pool().await;
    let policy = RateLimitPolicy {
        name: "live",
        prefix: format!("catbreeds_test:ratelimit:live-{}:", unique_suffix()),
        window_ms: 10_000,
        max_requests: 1000,
    };
    let limiter = Arc::new(RateLimiter::new(policy, Some(pool)));

    let tasks = (0..50).map(|_| {
        let limiter = Arc::clone(&limiter);
        tokio::spawn(async move { limiter.check_and_increment("198.51.100.7").await.count })
    });
    let counts: Vec<u32> = join_all(tasks)
        .await
        .into_iter()
        .map(|result| result.unwrap())
        .collect();

    // the atomic script serializes every increment: none may be lost
    assert_eq!(counts.iter().copied().max().unwrap(), 50);

    // all 50 counts are distinct when no update was lost
    let mut sorted = counts;
    sorted.sort_unstable();
    sorted.dedup();
    assert_eq!(sorted.len(), 50);
}

#[tokio::test]
#[ignore]
async fn redis_window_resets_after_expiry() {
    let pool = live_pool().await;
    let policy = RateLimitPolicy {
        name: "live",
        prefix: format!("catbreeds_test:ratelimit:reset-{}:", unique_suffix()),
        window_ms: 1000,
        max_requests: 2,
    };
    let limiter = RateLimiter::new(policy, Some(pool));

    limiter.check_and_increment("198.51.100.7").await;
    limiter.check_and_increment("198.51.100.7").await;
    assert!(!limiter.check_and_increment("198.51.100.7").await.allowed);

    tokio::time::sleep(std::time::Duration::from_millis(1200)).await;

    let decision = limiter.check_and_increment("198.51.100.7").await;
    assert!(decision.allowed);
    assert_eq!(decision.count, 1);
}

#[tokio::test]
#[ignore]
async fn redis_round_trip_and_prefix_invalidation() {
    let pool = live_pool().await;
    let cache = CacheService::new(&CacheConfig::default(), Some(pool));
    assert!(cache.is_using_redis());

    let suffix = unique_suffix();
    let detail_key = format!("cat:live-{suffix}");
    cache.set(&detail_key, &json!({"id": "live"}), Some(60)).await;
    let cached: Option<Value> = cache.get(&detail_key).await;
    assert_eq!(cached, Some(json!({"id": "live"})));

    cache.delete(&detail_key).await;
    assert!(cache.get::<Value>(&detail_key).await.is_none());

    let page_one = format!("leaderboard:one-{suffix}");
    let page_two = format!("leaderboard:two-{suffix}");
    cache.set(&page_one, &json!([1]), Some(60)).await;
    cache.set(&page_two, &json!([2]), Some(60)).await;

    cache.invalidate_pattern("leaderboard:").await;
    assert!(cache.get::<Value>(&page_one).await.is_none());
    assert!(cache.get::<Value>(&page_two).await.is_none());
}
