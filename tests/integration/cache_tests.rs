//! Cache service laws through the public API

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use serde_json::{Value, json};

use catbreeds_gateway::config::CacheConfig;
use catbreeds_gateway::{CacheKeys, CacheService, CacheTtl};

fn service() -> CacheService {
    CacheService::new(&CacheConfig::default(), None)
}

#[tokio::test]
async fn round_trip_law() {
    let cache = service();
    let breed = json!({"id": "abc123", "name": "Tom", "likes": 7});

    cache.set(&CacheKeys::cat("abc123"), &breed, None).await;
    let cached: Option<Value> = cache.get(&CacheKeys::cat("abc123")).await;
    assert_eq!(cached, Some(breed));
}

#[tokio::test]
async fn missing_keys_read_as_absent() {
    let cache = service();
    let value: Option<Value> = cache.get(&CacheKeys::cat("never-set")).await;
    assert!(value.is_none());
}

#[tokio::test]
async fn expiry_law() {
    let cache = service();
    cache.set("cat:short", &json!({"id": "x"}), Some(1)).await;
    assert!(cache.get::<Value>("cat:short").await.is_some());

    tokio::time::sleep(Duration::from_millis(1100)).await;
    assert!(cache.get::<Value>("cat:short").await.is_none());
}

#[tokio::test]
async fn idempotent_read_law() {
    let cache = service();
    let calls = Arc::new(AtomicUsize::new(0));

    for _ in 0..2 {
        let calls = Arc::clone(&calls);
        let value: Value = cache
            .get_or_set(&CacheKeys::leaderboard(10), Some(CacheTtl::LEADERBOARD), || {
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(json!([{"id": "abys"}]))
                }
            })
            .await
            .unwrap();
        assert!(value.is_array());
    }

    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn delete_law() {
    let cache = service();
    cache.set(&CacheKeys::cat("abc123"), &json!({"id": "abc123"}), None).await;
    cache.delete(&CacheKeys::cat("abc123")).await;
    assert!(cache.get::<Value>(&CacheKeys::cat("abc123")).await.is_none());

    // idempotent on absent keys too
    cache.delete(&CacheKeys::cat("abc123")).await;
    assert!(cache.get::<Value>(&CacheKeys::cat("abc123")).await.is_none());
}

#[tokio::test]
async fn key_and_ttl_contract() {
    assert_eq!(CacheKeys::leaderboard(10), "leaderboard:10");
    assert_eq!(CacheKeys::cat("abc123"), "cat:abc123");
    assert_eq!(CacheTtl::LEADERBOARD, 60);
    assert_eq!(CacheTtl::CAT_DETAIL, 3600);
    assert_eq!(CacheTtl::USER_LIKES, 300);
    assert_eq!(CacheTtl::BREED_SEARCH, 1800);
    assert_eq!(CacheTtl::RANDOM_IMAGES, 60);
}
