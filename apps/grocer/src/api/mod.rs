//! # Grocer HTTP API Module
//!
//! This module implements the HTTP REST API server using axum.
//!
//! ## Endpoints
//!
//! - `GET /` - Service banner and endpoint list
//! - `GET /health` - Health check
//! - `POST /api/cart/add` - Add items (name is normalized)
//! - `POST /api/cart/remove` - Remove items (name is matched loosely)
//! - `GET /api/cart/view` - View cart contents
//! - `DELETE /api/cart/clear` - Clear the cart
//!
//! ## Security Configuration
//!
//! See [`crate::config`]: CORS origins, rate limit and API key come from the
//! config file and `GROCER_*` environment variables.

mod auth;
mod handlers;
mod middleware;
mod types;

pub use auth::{ApiKey, keys_match};
pub use handlers::{
    add_handler, clear_handler, health_handler, remove_handler, root_handler, view_handler,
};
pub use middleware::{GlobalRateLimiter, RATE_LIMITED_MESSAGE, create_rate_limiter};
pub use types::{CartItemJson, CartResponse, HealthResponse, ItemSnapshot, RootResponse};

use crate::config::{ApiConfig, ServerConfig};
use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware as axum_middleware,
    routing::{delete, get, post},
};
use grocer_core::{Cart, CartError};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Request bodies are a name and a number; anything bigger is refused.
const MAX_BODY_BYTES: usize = 64 * 1024;

// =============================================================================
// SERVER STATE
// =============================================================================

/// Shared server state: the one cart every handler works on.
#[derive(Clone)]
pub struct AppState {
    /// The cart. Handlers hold the lock for a whole operation.
    pub cart: Arc<RwLock<Cart>>,
    /// Middleware settings.
    pub config: Arc<ApiConfig>,
}

impl AppState {
    /// Create new app state with explicit middleware settings.
    #[must_use]
    pub fn with_config(cart: Cart, config: ApiConfig) -> Self {
        Self {
            cart: Arc::new(RwLock::new(cart)),
            config: Arc::new(config),
        }
    }
}

// =============================================================================
// CORS CONFIGURATION
// =============================================================================

/// Build CORS layer from configuration.
///
/// - `"*"`: allows all origins (development mode - use with caution!)
/// - not set: localhost only
/// - otherwise: comma-separated list of allowed origins
fn build_cors_layer(origins: Option<&str>) -> CorsLayer {
    match origins {
        Some("*") => {
            tracing::warn!(
                "CORS: Allowing ALL origins (GROCER_CORS_ORIGINS=*). This is insecure for production!"
            );
            CorsLayer::permissive()
        }
        Some(origins) => {
            let allowed_origins: Vec<HeaderValue> = origins
                .split(',')
                .filter_map(|s| {
                    let trimmed = s.trim();
                    match trimmed.parse::<HeaderValue>() {
                        Ok(hv) if !trimmed.is_empty() => {
                            tracing::info!("CORS: Allowing origin: {}", trimmed);
                            Some(hv)
                        }
                        Ok(_) => None,
                        Err(e) => {
                            tracing::warn!("CORS: Invalid origin '{}': {}", trimmed, e);
                            None
                        }
                    }
                })
                .collect();

            if allowed_origins.is_empty() {
                tracing::warn!("CORS: No valid origins configured, defaulting to localhost only");
                build_localhost_cors()
            } else {
                cors_for(allowed_origins)
            }
        }
        None => {
            tracing::info!("CORS: No origins configured, defaulting to localhost only");
            build_localhost_cors()
        }
    }
}

/// Build a restrictive CORS layer that only allows localhost origins.
fn build_localhost_cors() -> CorsLayer {
    let origins: Vec<HeaderValue> = [
        "http://localhost:3000",
        "http://localhost:5173",
        "http://127.0.0.1:3000",
        "http://127.0.0.1:5173",
    ]
    .iter()
    .filter_map(|o| o.parse::<HeaderValue>().ok())
    .collect();

    cors_for(origins)
}

fn cors_for(origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

// =============================================================================
// ROUTER CREATION
// =============================================================================

/// Create the axum router with all endpoints and middleware.
///
/// Middleware stack (outer to inner):
/// 1. Tracing - logs all requests
/// 2. CORS - handles preflight requests
/// 3. Body limit
/// 4. Rate Limiting - protects against floods (if enabled)
/// 5. Authentication - validates API key (if configured)
pub fn create_router(state: AppState) -> Router {
    let config = Arc::clone(&state.config);

    let mut router = Router::new()
        .route("/", get(handlers::root_handler))
        .route("/health", get(handlers::health_handler))
        .route("/api/cart/add", post(handlers::add_handler))
        .route("/api/cart/remove", post(handlers::remove_handler))
        .route("/api/cart/view", get(handlers::view_handler))
        .route("/api/cart/clear", delete(handlers::clear_handler));

    // Authentication (innermost - runs last on request)
    match config.api_key.as_deref() {
        Some(key) => {
            tracing::info!("API key authentication enabled");
            let key: ApiKey = Arc::from(key);
            router = router.layer(axum_middleware::from_fn_with_state(
                key,
                auth::api_key_auth_middleware,
            ));
        }
        None => tracing::warn!(
            "API key authentication DISABLED - all endpoints are publicly accessible! \
             Set GROCER_API_KEY to enable authentication."
        ),
    }

    match create_rate_limiter(config.rate_limit) {
        Some(limiter) => {
            tracing::info!("Rate limiting enabled: {} requests/second", config.rate_limit);
            router = router.layer(axum_middleware::from_fn_with_state(
                limiter,
                middleware::rate_limit_middleware,
            ));
        }
        None => tracing::info!("Rate limiting disabled"),
    }

    router
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors_layer(config.cors_origins.as_deref()))
                .layer(axum::extract::DefaultBodyLimit::max(MAX_BODY_BYTES)),
        )
        .with_state(state)
}

// =============================================================================
// SERVER STARTUP
// =============================================================================

/// Start the HTTP server with an empty cart.
pub async fn run_server(config: ServerConfig) -> Result<(), CartError> {
    let addr = config.addr();
    let state = AppState::with_config(Cart::new(), config.api);
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| CartError::Internal(format!("Bind failed on {}: {}", addr, e)))?;

    tracing::info!("Grocer HTTP server listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| CartError::Internal(format!("Server error: {}", e)))
}

/// Resolve on Ctrl+C. If the signal handler cannot be installed, never
/// resolve and keep serving.
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received, stopping server"),
        Err(e) => {
            tracing::error!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
