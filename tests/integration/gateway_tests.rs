//! Gateway HTTP surface against a mock upstream

use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use catbreeds_gateway::server::{AppState, routes};

use crate::common::memory_config;

async fn state_with(upstream: &MockServer) -> AppState {
    AppState::from_config(memory_config(&upstream.uri()))
        .await
        .unwrap()
}

macro_rules! init_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state.clone()))
                .configure(|cfg| routes::configure(cfg, &$state)),
        )
        .await
    };
}

#[actix_web::test]
async fn cat_detail_is_served_from_cache_after_first_hit() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cats/abc123"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"id": "abc123", "name": "Tom"})),
        )
        .expect(1)
        .mount(&upstream)
        .await;

    let state = state_with(&upstream).await;
    let app = init_app!(state);

    for _ in 0..2 {
        let response = test::call_service(
            &app,
            test::TestRequest::get().uri("/api/cats/abc123").to_request(),
        )
        .await;
        assert!(response.status().is_success());
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["id"], "abc123");
    }
    // wiremock verifies the expect(1) when the server drops
}

#[actix_web::test]
async fn leaderboard_is_strictly_limited() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/leaderboard"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&upstream)
        .await;

    let state = state_with(&upstream).await; // leaderboard budget: 3
    let app = init_app!(state);

    for _ in 0..3 {
        let response = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/leaderboard?limit=10")
                .to_request(),
        )
        .await;
        assert!(response.status().is_success());
    }

    let response = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/leaderboard?limit=10")
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert!(response.headers().contains_key("retry-after"));
    assert!(response.headers().contains_key("x-ratelimit-reset"));

    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["error"]["code"], "RATE_LIMIT_EXCEEDED");
}

#[actix_web::test]
async fn like_invalidates_the_leaderboard_cache() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/leaderboard"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{"id": "abc123", "likes": 8}])),
        )
        .expect(2)
        .mount(&upstream)
        .await;
    Mock::given(method("POST"))
        .and(path("/cats/abc123/like"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"liked": true})))
        .expect(1)
        .mount(&upstream)
        .await;

    let state = state_with(&upstream).await;
    let app = init_app!(state);

    // first read fills the cache, second is served from it
    for _ in 0..2 {
        let response = test::call_service(
            &app,
            test::TestRequest::get().uri("/api/leaderboard").to_request(),
        )
        .await;
        assert!(response.status().is_success());
    }

    let response = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/cats/abc123/like")
            .to_request(),
    )
    .await;
    assert!(response.status().is_success());

    // the like dropped the cached page; this read goes upstream again
    let response = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/leaderboard").to_request(),
    )
    .await;
    assert!(response.status().is_success());
}

#[actix_web::test]
async fn upstream_errors_map_to_bad_gateway() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cats/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&upstream)
        .await;

    let state = state_with(&upstream).await;
    let app = init_app!(state);

    let response = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/cats/broken").to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["error"]["code"], "UPSTREAM_ERROR");
}

#[actix_web::test]
async fn health_reports_memory_backend() {
    let upstream = MockServer::start().await;
    let state = state_with(&upstream).await;
    let app = init_app!(state);

    let response =
        test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert!(response.status().is_success());

    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["cache_backend"], "memory");
    assert_eq!(body["redis"], "not_configured");
}

#[actix_web::test]
async fn cache_stats_endpoint_counts_hits() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cats/abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "abc123"})))
        .mount(&upstream)
        .await;

    let state = state_with(&upstream).await;
    let app = init_app!(state);

    for _ in 0..2 {
        test::call_service(
            &app,
            test::TestRequest::get().uri("/api/cats/abc123").to_request(),
        )
        .await;
    }

    let response = test::call_service(
        &app,
        test::TestRequest::get().uri("/stats/cache").to_request(),
    )
    .await;
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["backend"], "memory");
    assert_eq!(body["entries"], 1);
    assert_eq!(body["hits"], 1);
}
