//! Rate limiting middleware
//!
//! Runs the check-and-increment before the handler, decorates allowed
//! responses with the `X-RateLimit-*` headers, and turns rejections into
//! structured 429 responses with a `Retry-After` hint.

use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::sync::Arc;

use actix_web::HttpResponse;
use actix_web::body::{EitherBody, MessageBody};
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::http::header::{HeaderMap, HeaderName, HeaderValue, RETRY_AFTER};
use futures::future::{Ready, ready};

use crate::core::rate_limiter::{RateLimitDecision, RateLimiter};
use crate::utils::error::ErrorResponse;

use super::helpers::client_identity;

/// Rate limit middleware for Actix-web; one instance per policy.
pub struct RateLimitMiddleware {
    limiter: Arc<RateLimiter>,
}

impl RateLimitMiddleware {
    pub fn new(limiter: Arc<RateLimiter>) -> Self {
        Self { limiter }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RateLimitMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = RateLimitMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddlewareService {
            service: Rc::new(service),
            limiter: Arc::clone(&self.limiter),
        }))
    }
}

/// Service implementation for the rate limit middleware
pub struct RateLimitMiddlewareService<S> {
    service: Rc<S>,
    limiter: Arc<RateLimiter>,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let limiter = Arc::clone(&self.limiter);

        Box::pin(async move {
            let identity = client_identity(req.headers(), req.peer_addr());
            let decision = limiter.check_and_increment(&identity).await;

            if !decision.allowed {
                let response = rejection_response(&decision);
                return Ok(req.into_response(response).map_into_right_body());
            }

            let mut res = service.call(req).await?.map_into_left_body();
            apply_headers(res.headers_mut(), &decision);
            Ok(res)
        })
    }
}

/// Attach the headers callers use to pace themselves
fn apply_headers(headers: &mut HeaderMap, decision: &RateLimitDecision) {
    insert_numeric(headers, "x-ratelimit-limit", u64::from(decision.limit));
    insert_numeric(
        headers,
        "x-ratelimit-remaining",
        u64::from(decision.remaining),
    );
    insert_numeric(headers, "x-ratelimit-reset", decision.reset_after_secs);
}

fn insert_numeric(headers: &mut HeaderMap, name: &'static str, value: u64) {
    if let Ok(value) = HeaderValue::from_str(&value.to_string()) {
        headers.insert(HeaderName::from_static(name), value);
    }
}

/// 429 with the structured error body and retry hints
fn rejection_response(decision: &RateLimitDecision) -> HttpResponse {
    let retry_after = decision.retry_after_secs.unwrap_or(1);
    let mut response = HttpResponse::TooManyRequests().json(ErrorResponse::new(
        "RATE_LIMIT_EXCEEDED",
        format!("Too many requests, retry in {retry_after}s"),
    ));

    apply_headers(response.headers_mut(), decision);
    if let Ok(value) = HeaderValue::from_str(&retry_after.to_string()) {
        response.headers_mut().insert(RETRY_AFTER, value);
    }
    response
}
