//! # Grocer HTTP Client
//!
//! Wrapper around the Grocer cart API for use by the MCP server.

use serde::Deserialize;
use serde::de::DeserializeOwned;

/// Errors from the HTTP client layer.
#[derive(Debug)]
pub enum ClientError {
    /// Cannot reach the Grocer server.
    ConnectionFailed(String),
    /// 401 Unauthorized - invalid or missing API key.
    Unauthorized,
    /// 429 Too Many Requests.
    RateLimited,
    /// Server returned a 5xx error.
    ServerError(u16, String),
    /// Failed to parse response body.
    ParseError(String),
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ConnectionFailed(url) => write!(f, "Cannot connect to the cart at {url}"),
            Self::Unauthorized => write!(f, "Unauthorized: invalid or missing API key"),
            Self::RateLimited => write!(f, "Rate limited: too many requests"),
            Self::ServerError(status, msg) => write!(f, "Server error ({status}): {msg}"),
            Self::ParseError(msg) => write!(f, "Parse error: {msg}"),
        }
    }
}

impl std::error::Error for ClientError {}

/// One `{item, quantity}` line of a cart reply.
#[derive(Debug, Clone, Deserialize)]
pub struct CartLine {
    pub item: String,
    pub quantity: u64,
}

/// Body returned by every cart endpoint, including 400 rejections.
#[derive(Debug, Clone, Deserialize)]
pub struct CartReply {
    pub success: bool,
    pub message: String,
    #[serde(default)]
    pub cart_items: Vec<CartLine>,
    #[serde(default)]
    pub total_items: u64,
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthReply {
    pub status: String,
    pub version: String,
}

/// HTTP client that wraps calls to the Grocer cart API.
#[derive(Clone)]
pub struct CartClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl CartClient {
    /// Create a new client pointing at the given Grocer server URL.
    pub fn new(base_url: String, api_key: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    /// Build a request with optional Bearer auth.
    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self.http.request(method, &url);
        if let Some(ref key) = self.api_key {
            req = req.bearer_auth(key);
        }
        req
    }

    /// Handle HTTP response: check status codes and parse JSON.
    ///
    /// 400 is not an error here: the body is a `CartReply` with
    /// `success: false` and the reason in `message`.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = resp.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ClientError::Unauthorized);
        }
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ClientError::RateLimited);
        }
        if status.is_server_error() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ClientError::ServerError(status.as_u16(), body));
        }
        resp.json::<T>()
            .await
            .map_err(|e| ClientError::ParseError(e.to_string()))
    }

    /// Send a request and handle connection errors.
    async fn send(&self, req: reqwest::RequestBuilder) -> Result<reqwest::Response, ClientError> {
        req.send()
            .await
            .map_err(|e| ClientError::ConnectionFailed(format!("{}: {e}", self.base_url)))
    }

    /// GET /health
    pub async fn health(&self) -> Result<HealthReply, ClientError> {
        let req = self.request(reqwest::Method::GET, "/health");
        let resp = self.send(req).await?;
        self.handle_response(resp).await
    }

    /// POST /api/cart/add
    pub async fn add_item(&self, item_name: &str, quantity: i64) -> Result<CartReply, ClientError> {
        self.post_item("/api/cart/add", "add", item_name, quantity)
            .await
    }

    /// POST /api/cart/remove
    pub async fn remove_item(
        &self,
        item_name: &str,
        quantity: i64,
    ) -> Result<CartReply, ClientError> {
        self.post_item("/api/cart/remove", "remove", item_name, quantity)
            .await
    }

    async fn post_item(
        &self,
        path: &str,
        action: &str,
        item_name: &str,
        quantity: i64,
    ) -> Result<CartReply, ClientError> {
        let body = serde_json::json!({
            "item_name": item_name,
            "quantity": quantity,
            "action": action,
        });
        let req = self.request(reqwest::Method::POST, path).json(&body);
        let resp = self.send(req).await?;
        self.handle_response(resp).await
    }

    /// GET /api/cart/view
    pub async fn view(&self) -> Result<CartReply, ClientError> {
        let req = self.request(reqwest::Method::GET, "/api/cart/view");
        let resp = self.send(req).await?;
        self.handle_response(resp).await
    }

    /// DELETE /api/cart/clear
    pub async fn clear(&self) -> Result<CartReply, ClientError> {
        let req = self.request(reqwest::Method::DELETE, "/api/cart/clear");
        let resp = self.send(req).await?;
        self.handle_response(resp).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_dropped_from_base_url() {
        let client = CartClient::new("http://localhost:3000/".to_string(), None);
        assert_eq!(client.base_url, "http://localhost:3000");
    }

    #[test]
    fn reply_parses_rejection_without_items() {
        let reply: Result<CartReply, _> =
            serde_json::from_str(r#"{"success":false,"message":"Quantity must be positive, got 0"}"#);
        assert!(matches!(reply, Ok(ref r) if !r.success && r.cart_items.is_empty()));
    }

    #[test]
    fn error_display_names_the_url() {
        let err = ClientError::ConnectionFailed("http://localhost:3000: refused".to_string());
        assert!(err.to_string().contains("http://localhost:3000"));
    }
}
