//! # API Endpoint Handlers
//!
//! This module implements the actual HTTP endpoint handlers.
//!
//! Every mutating handler takes the cart's write lock before touching the
//! store and holds it until the response snapshot is built.

use super::{
    AppState,
    types::{CartItemJson, CartResponse, HealthResponse, RootResponse},
};
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use grocer_core::{CartAction, CartEngine, CartError};

/// Map a core error onto a status code and a rejection body.
fn reject(error: &CartError) -> (StatusCode, Json<CartResponse>) {
    let status = if error.is_invalid_argument() {
        tracing::warn!(error = %error, "Request rejected");
        StatusCode::BAD_REQUEST
    } else {
        tracing::error!(error = %error, "Cart operation failed");
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (status, Json(CartResponse::rejected(error.to_string())))
}

// =============================================================================
// ROOT / HEALTH HANDLERS
// =============================================================================

/// Service banner with the list of cart endpoints.
pub async fn root_handler() -> impl IntoResponse {
    Json(RootResponse::now())
}

/// Health check endpoint.
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse::default())
}

// =============================================================================
// ADD HANDLER
// =============================================================================

/// Add items. The name is normalized to its canonical key first.
pub async fn add_handler(
    State(state): State<AppState>,
    Json(body): Json<CartItemJson>,
) -> impl IntoResponse {
    tracing::info!(item = %body.item_name, quantity = body.quantity, "Received ADD request");

    let request = match body.to_request(CartAction::Add) {
        Ok(r) => r,
        Err(e) => return reject(&e),
    };

    let mut cart = state.cart.write().await;
    match CartEngine::add(&mut cart, &request.item_name, request.quantity) {
        Ok(applied) => {
            tracing::info!(
                item = %request.item_name,
                key = applied.key.as_deref().unwrap_or_default(),
                total_items = applied.response.total_items,
                "ADD successful"
            );
            (StatusCode::OK, Json(applied.response))
        }
        Err(e) => reject(&e),
    }
}

// =============================================================================
// REMOVE HANDLER
// =============================================================================

/// Remove items. The raw name goes to the store unnormalized; a miss is a
/// 200 with `success: false`.
pub async fn remove_handler(
    State(state): State<AppState>,
    Json(body): Json<CartItemJson>,
) -> impl IntoResponse {
    tracing::info!(item = %body.item_name, quantity = body.quantity, "Received REMOVE request");

    let request = match body.to_request(CartAction::Remove) {
        Ok(r) => r,
        Err(e) => return reject(&e),
    };

    let mut cart = state.cart.write().await;
    match CartEngine::remove(&mut cart, &request.item_name, request.quantity) {
        Ok(applied) => {
            match (&applied.key, applied.rule) {
                (Some(key), Some(rule)) => tracing::info!(
                    item = %request.item_name,
                    matched = %key,
                    rule = %rule,
                    fuzzy = rule.is_fuzzy(),
                    total_items = applied.response.total_items,
                    "REMOVE successful"
                ),
                _ => tracing::warn!(item = %request.item_name, "Item not found in cart"),
            }
            (StatusCode::OK, Json(applied.response))
        }
        Err(e) => reject(&e),
    }
}

// =============================================================================
// VIEW / CLEAR HANDLERS
// =============================================================================

/// View current cart contents.
pub async fn view_handler(State(state): State<AppState>) -> impl IntoResponse {
    let cart = state.cart.read().await;
    let response = CartEngine::view(&cart);

    tracing::info!(
        unique_items = response.cart_items.len(),
        total_items = response.total_items,
        "Cart viewed"
    );
    (StatusCode::OK, Json(response))
}

/// Clear all items from the cart.
pub async fn clear_handler(State(state): State<AppState>) -> impl IntoResponse {
    let mut cart = state.cart.write().await;
    let response = CartEngine::clear(&mut cart);

    tracing::info!(message = %response.message, "Cart cleared");
    (StatusCode::OK, Json(response))
}
