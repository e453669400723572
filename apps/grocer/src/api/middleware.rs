//! # Rate Limiting
//!
//! One global token bucket in front of the cart endpoints, sized by
//! [`crate::config::ApiConfig::rate_limit`] (`GROCER_RATE_LIMIT`, default
//! 100 requests per second, 0 disables it).
//!
//! `/` and `/health` are not counted. A refused cart request gets 429 with
//! the ordinary cart body (`success: false`), the same shape a voice or MCP
//! client already parses for every other refusal.

use super::auth::is_open_path;
use axum::{
    Json,
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use governor::{DefaultDirectRateLimiter, Quota};
use grocer_core::CartResponse;
use std::num::NonZeroU32;
use std::sync::Arc;

/// Message carried by a 429 cart response.
pub const RATE_LIMITED_MESSAGE: &str = "Too many cart requests, please try again shortly";

/// Shared limiter handed to the middleware as state.
pub type GlobalRateLimiter = Arc<DefaultDirectRateLimiter>;

/// Build the limiter, or `None` when `requests_per_second` is 0.
pub fn create_rate_limiter(requests_per_second: u32) -> Option<GlobalRateLimiter> {
    NonZeroU32::new(requests_per_second)
        .map(|rps| Arc::new(DefaultDirectRateLimiter::direct(Quota::per_second(rps))))
}

/// Refuse cart requests over the limit with 429 and a rejected cart body.
pub async fn rate_limit_middleware(
    State(limiter): State<GlobalRateLimiter>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if is_open_path(request.uri().path()) || limiter.check().is_ok() {
        return next.run(request).await;
    }

    tracing::warn!(
        method = %request.method(),
        path = %request.uri().path(),
        "Rate limit exceeded, cart request refused"
    );
    (
        StatusCode::TOO_MANY_REQUESTS,
        Json(CartResponse::rejected(RATE_LIMITED_MESSAGE)),
    )
        .into_response()
}
