//! # API Request/Response Types
//!
//! This module defines the JSON structures for the HTTP API.
//!
//! Cart endpoints answer with [`CartResponse`] from the core, so the wire
//! shape is `{success, message, cart_items: [{item, quantity}], total_items}`
//! everywhere.

use chrono::{DateTime, Utc};
use grocer_core::{CartAction, CartError, CartItemRequest};
use serde::{Deserialize, Serialize};

pub use grocer_core::{CartResponse, ItemSnapshot};

// =============================================================================
// HEALTH RESPONSE
// =============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

// =============================================================================
// ROOT RESPONSE
// =============================================================================

/// Service banner served at `/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootResponse {
    pub message: String,
    pub version: String,
    /// RFC 3339 time the banner was produced.
    pub timestamp: String,
    pub endpoints: Vec<String>,
}

impl RootResponse {
    /// Banner stamped with the current time.
    pub fn now() -> Self {
        Self::at(Utc::now())
    }

    /// Banner stamped with `now`.
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            message: "Grocer cart API is running".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: now.to_rfc3339(),
            endpoints: [
                "/api/cart/add",
                "/api/cart/remove",
                "/api/cart/view",
                "/api/cart/clear",
            ]
            .iter()
            .map(|s| (*s).to_string())
            .collect(),
        }
    }
}

// =============================================================================
// CART ITEM REQUEST
// =============================================================================

/// Body of `POST /api/cart/add` and `POST /api/cart/remove`.
///
/// `action` may be omitted; the endpoint already says what to do. When it is
/// present it must name that same action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItemJson {
    pub item_name: String,
    pub quantity: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

impl CartItemJson {
    /// Convert to a core request for the endpoint's action, validating fields.
    ///
    /// Rejects unknown or mismatched actions, blank or oversized names and
    /// non-positive quantities before the cart lock is taken.
    pub fn to_request(&self, expected: CartAction) -> Result<CartItemRequest, CartError> {
        if let Some(raw) = &self.action {
            let found: CartAction = raw.parse()?;
            if found != expected {
                return Err(CartError::ActionMismatch { expected, found });
            }
        }

        let request = CartItemRequest::new(expected, self.item_name.clone(), self.quantity);
        request.validate()?;
        Ok(request)
    }
}
