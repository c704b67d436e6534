//! HTTP handlers for the gateway surface
//!
//! The read routes are thin cached proxies: each one builds its cache key,
//! picks the entity's TTL, and lets `get_or_set` fill misses from the
//! upstream CatBreeds service. The like route is the one writer and drives
//! the invalidation path.

use std::sync::Arc;

use actix_web::{HttpResponse, web};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::core::cache::{CacheKeys, CacheTtl};
use crate::utils::error::{GatewayError, Result};

use super::state::AppState;

const MAX_PAGE_SIZE: usize = 100;

/// Subsystem health: the backend answering reads and the Redis link state
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    let redis_state = match &state.redis {
        Some(pool) if pool.is_connected() => match pool.ping().await {
            Ok(()) => "connected".to_string(),
            Err(_) => "degraded".to_string(),
        },
        Some(pool) => format!("{:?}", pool.state()).to_lowercase(),
        None => "not_configured".to_string(),
    };
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "cache_backend": state.cache.stats().backend,
        "redis": redis_state,
    }))
}

/// Cache statistics snapshot
pub async fn cache_stats(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.cache.stats())
}

#[derive(Debug, Deserialize)]
pub struct LeaderboardQuery {
    limit: Option<usize>,
}

/// Most-liked cats, cached for [`CacheTtl::LEADERBOARD`] seconds
pub async fn leaderboard(
    state: web::Data<AppState>,
    query: web::Query<LeaderboardQuery>,
) -> Result<HttpResponse> {
    let limit = query.limit.unwrap_or(10).min(MAX_PAGE_SIZE);
    let upstream = Arc::clone(&state.upstream);

    let value: Value = state
        .cache
        .get_or_set(
            &CacheKeys::leaderboard(limit),
            Some(CacheTtl::LEADERBOARD),
            || async move {
                upstream
                    .get_json_with("/leaderboard", &[("limit", limit.to_string())])
                    .await
            },
        )
        .await?;
    Ok(HttpResponse::Ok().json(value))
}

/// One cat's details, cached for [`CacheTtl::CAT_DETAIL`] seconds
pub async fn cat_detail(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let cat_id = path.into_inner();
    let upstream = Arc::clone(&state.upstream);
    let fetch_id = cat_id.clone();

    let value: Value = state
        .cache
        .get_or_set(&CacheKeys::cat(&cat_id), Some(CacheTtl::CAT_DETAIL), || {
            async move { upstream.get_json(&format!("/cats/{fetch_id}")).await }
        })
        .await?;
    Ok(HttpResponse::Ok().json(value))
}

#[derive(Debug, Deserialize)]
pub struct BreedSearchQuery {
    q: String,
    limit: Option<usize>,
}

/// Breed search, cached per query for [`CacheTtl::BREED_SEARCH`] seconds
pub async fn breed_search(
    state: web::Data<AppState>,
    query: web::Query<BreedSearchQuery>,
) -> Result<HttpResponse> {
    let q = query.q.trim().to_lowercase();
    if q.is_empty() {
        return Err(GatewayError::BadRequest(
            "query parameter q must not be empty".to_string(),
        ));
    }
    let limit = query.limit.unwrap_or(20).min(MAX_PAGE_SIZE);
    let upstream = Arc::clone(&state.upstream);
    let search = q.clone();

    let value: Value = state
        .cache
        .get_or_set(
            &CacheKeys::breed_search(&q, limit),
            Some(CacheTtl::BREED_SEARCH),
            || async move {
                upstream
                    .get_json_with(
                        "/breeds/search",
                        &[("q", search), ("limit", limit.to_string())],
                    )
                    .await
            },
        )
        .await?;
    Ok(HttpResponse::Ok().json(value))
}

#[derive(Debug, Deserialize)]
pub struct RandomImagesQuery {
    count: Option<usize>,
}

/// A batch of random cat images, cached for [`CacheTtl::RANDOM_IMAGES`]
/// seconds so the batch rotates every minute
pub async fn random_images(
    state: web::Data<AppState>,
    query: web::Query<RandomImagesQuery>,
) -> Result<HttpResponse> {
    let count = query.count.unwrap_or(1).clamp(1, 10);
    let upstream = Arc::clone(&state.upstream);

    let value: Value = state
        .cache
        .get_or_set(
            &CacheKeys::random_images(count),
            Some(CacheTtl::RANDOM_IMAGES),
            || async move {
                upstream
                    .get_json_with("/images/random", &[("count", count.to_string())])
                    .await
            },
        )
        .await?;
    Ok(HttpResponse::Ok().json(value))
}

/// Likes belonging to one user, cached for [`CacheTtl::USER_LIKES`] seconds
pub async fn user_likes(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let user_id = path.into_inner();
    let upstream = Arc::clone(&state.upstream);

    let value: Value = state
        .cache
        .get_or_set(
            &CacheKeys::user_likes(user_id),
            Some(CacheTtl::USER_LIKES),
            || async move { upstream.get_json(&format!("/users/{user_id}/likes")).await },
        )
        .await?;
    Ok(HttpResponse::Ok().json(value))
}

/// Record a like upstream, then drop every cache entry the like can change
pub async fn like_cat(state: web::Data<AppState>, path: web::Path<String>) -> Result<HttpResponse> {
    let cat_id = path.into_inner();
    let result = state
        .upstream
        .post_json(&format!("/cats/{cat_id}/like"), &json!({}))
        .await?;

    state.cache.delete(&CacheKeys::cat(&cat_id)).await;
    state.cache.invalidate_pattern("leaderboard:").await;
    state.cache.invalidate_pattern("user_likes:").await;

    Ok(HttpResponse::Ok().json(result))
}
