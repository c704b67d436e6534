//! Route configuration

use std::sync::Arc;

use actix_web::web;

use super::handlers;
use super::middleware::RateLimitMiddleware;
use super::state::AppState;

/// Wire every route. The `/api` scope sits behind the broad api limiter;
/// the leaderboard resource additionally behind the strict one.
pub fn configure(cfg: &mut web::ServiceConfig, state: &AppState) {
    cfg.route("/health", web::get().to(handlers::health))
        .route("/stats/cache", web::get().to(handlers::cache_stats))
        .service(
            web::scope("/api")
                .wrap(RateLimitMiddleware::new(Arc::clone(&state.limiters.api)))
                .service(
                    web::resource("/leaderboard")
                        .wrap(RateLimitMiddleware::new(Arc::clone(
                            &state.limiters.leaderboard,
                        )))
                        .route(web::get().to(handlers::leaderboard)),
                )
                .route("/cats/{id}", web::get().to(handlers::cat_detail))
                .route("/cats/{id}/like", web::post().to(handlers::like_cat))
                .route("/breeds/search", web::get().to(handlers::breed_search))
                .route("/images/random", web::get().to(handlers::random_images))
                .route("/users/{id}/likes", web::get().to(handlers::user_likes)),
        );
}
