//! # Authentication Module
//!
//! Simple API key authentication for the Grocer HTTP API.
//!
//! ## Configuration
//!
//! Enabled when [`crate::config::ApiConfig::api_key`] is set
//! (`GROCER_API_KEY` or `[api] api_key`). `/` and `/health` stay open.
//!
//! ## Usage
//!
//! Send the API key in the Authorization header:
//! ```text
//! Authorization: Bearer <your-api-key>
//! ```

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode, header},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use subtle::ConstantTimeEq;

/// Paths reachable without credentials (load balancer and liveness checks).
const OPEN_PATHS: [&str; 2] = ["/", "/health"];

/// True for the banner and health paths, which skip auth and rate limiting.
pub(super) fn is_open_path(path: &str) -> bool {
    OPEN_PATHS.contains(&path)
}

/// The configured key, shared with the middleware.
pub type ApiKey = Arc<str>;

/// Compare a provided key against the expected one in constant time.
///
/// Both keys are padded to the same length so `ct_eq` always runs over the
/// same number of bytes; the length check happens after.
pub fn keys_match(provided: &str, expected: &str) -> bool {
    let provided_bytes = provided.as_bytes();
    let expected_bytes = expected.as_bytes();

    let max_len = provided_bytes.len().max(expected_bytes.len());
    let mut padded_provided = vec![0u8; max_len];
    let mut padded_expected = vec![0u8; max_len];
    if let Some(dst) = padded_provided.get_mut(..provided_bytes.len()) {
        dst.copy_from_slice(provided_bytes);
    }
    if let Some(dst) = padded_expected.get_mut(..expected_bytes.len()) {
        dst.copy_from_slice(expected_bytes);
    }

    let bytes_match: bool = padded_provided.ct_eq(&padded_expected).into();
    bytes_match && provided_bytes.len() == expected_bytes.len()
}

/// API key authentication middleware.
///
/// - `/` and `/health` are always allowed
/// - All other endpoints require `Authorization: Bearer <key>` (a raw
///   `<key>` is accepted too)
pub async fn api_key_auth_middleware(
    State(expected): State<ApiKey>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, (StatusCode, &'static str)> {
    if is_open_path(request.uri().path()) {
        return Ok(next.run(request).await);
    }

    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    match auth_header {
        Some(header_value) => {
            let provided_key = header_value.strip_prefix("Bearer ").unwrap_or(header_value);

            if keys_match(provided_key, &expected) {
                Ok(next.run(request).await)
            } else {
                tracing::warn!(
                    event = "auth_failure",
                    reason = "invalid_api_key",
                    "Authentication failed: invalid API key"
                );
                Err((StatusCode::UNAUTHORIZED, "Unauthorized"))
            }
        }
        None => {
            tracing::warn!(
                event = "auth_failure",
                reason = "missing_authorization_header",
                "Missing Authorization header"
            );
            Err((StatusCode::UNAUTHORIZED, "Unauthorized"))
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_match() {
        assert!(keys_match("secret", "secret"));
        assert!(!keys_match("secret", "secreT"));
        assert!(!keys_match("secret", "secret-longer"));
        assert!(!keys_match("", "secret"));
    }
}
