//! Rate limiter window semantics through the public API

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;

use catbreeds_gateway::config::RateLimitConfig;
use catbreeds_gateway::create_rate_limiters;

fn limiters_with(window_ms: u64, max_requests: u32) -> catbreeds_gateway::RateLimiters {
    let mut config = RateLimitConfig::default();
    config.api.window_ms = window_ms;
    config.api.max_requests = max_requests;
    create_rate_limiters(&config, None)
}

#[tokio::test]
async fn fixed_window_sequence() {
    let limiters = limiters_with(3000, 3);

    let mut outcomes = Vec::new();
    for _ in 0..4 {
        outcomes.push(
            limiters
                .api
                .check_and_increment("203.0.113.9")
                .await
                .allowed,
        );
    }
    assert_eq!(outcomes, vec![true, true, true, false]);
}

#[tokio::test]
async fn window_reset_law() {
    let limiters = limiters_with(100, 1);
    assert!(limiters.api.check_and_increment("203.0.113.9").await.allowed);
    assert!(!limiters.api.check_and_increment("203.0.113.9").await.allowed);

    tokio::time::sleep(Duration::from_millis(150)).await;

    let decision = limiters.api.check_and_increment("203.0.113.9").await;
    assert!(decision.allowed);
    assert_eq!(decision.count, 1);
}

#[tokio::test]
async fn concurrent_increments_lose_no_updates() {
    let limiters = limiters_with(5000, 1000);
    let api = Arc::clone(&limiters.api);

    let tasks = (0..25).map(|_| {
        let api = Arc::clone(&api);
        tokio::spawn(async move { api.check_and_increment("203.0.113.9").await.count })
    });
    let counts: Vec<u32> = join_all(tasks)
        .await
        .into_iter()
        .map(|result| result.unwrap())
        .collect();

    assert_eq!(counts.into_iter().max().unwrap(), 25);
}

#[tokio::test]
async fn policies_are_independent() {
    let limiters = limiters_with(60_000, 1);
    assert!(limiters.api.check_and_increment("203.0.113.9").await.allowed);
    assert!(!limiters.api.check_and_increment("203.0.113.9").await.allowed);

    // the leaderboard limiter keeps its own budget (default: 10)
    assert!(
        limiters
            .leaderboard
            .check_and_increment("203.0.113.9")
            .await
            .allowed
    );
}
