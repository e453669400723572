//! # Grocer MCP Server
//!
//! Implements `ServerHandler` with four cart tools that proxy to the Grocer
//! HTTP API. Item names are forwarded as spoken; the cart does the matching.

use crate::client::{CartClient, CartReply};
use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, Content, ServerCapabilities, ServerInfo},
    schemars, tool, tool_handler, tool_router,
};
use serde::Deserialize;

/// Quantity used when the speaker did not say one.
const DEFAULT_QUANTITY: i64 = 1;

// =============================================================================
// MCP SERVER
// =============================================================================

/// MCP server that bridges to a Grocer HTTP API.
#[derive(Clone)]
pub struct GrocerMcp {
    client: CartClient,
    #[allow(dead_code)]
    tool_router: ToolRouter<Self>,
}

// =============================================================================
// TOOL PARAMETER STRUCTS
// =============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ItemParams {
    /// Name of the grocery item, as the user said it.
    #[schemars(description = "Name of the grocery item, as the user said it (e.g. 'apple', 'Eggs')")]
    pub item_name: String,
    /// Number of items (must be positive, default: 1).
    #[schemars(description = "Number of items (must be positive, default: 1)")]
    pub quantity: Option<i64>,
}

impl ItemParams {
    /// Resolve the quantity and check both fields before any HTTP call.
    fn checked(self) -> Result<(String, i64), String> {
        let quantity = self.quantity.unwrap_or(DEFAULT_QUANTITY);
        if quantity < 1 {
            return Err(format!("Quantity must be positive, got {quantity}"));
        }
        if self.item_name.trim().is_empty() {
            return Err("Item name cannot be empty".to_string());
        }
        Ok((self.item_name, quantity))
    }
}

// =============================================================================
// TOOL IMPLEMENTATIONS
// =============================================================================

#[tool_router]
impl GrocerMcp {
    pub fn new(client: CartClient) -> Self {
        Self {
            client,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(description = "Add items to the grocery cart")]
    async fn add_to_cart(
        &self,
        params: Parameters<ItemParams>,
    ) -> Result<CallToolResult, McpError> {
        let (item_name, quantity) = match params.0.checked() {
            Ok(checked) => checked,
            Err(msg) => return Ok(CallToolResult::error(vec![Content::text(msg)])),
        };
        tracing::info!(item = %item_name, quantity, "add_to_cart called");

        match self.client.add_item(&item_name, quantity).await {
            Ok(reply) => Ok(reply_result(&reply)),
            Err(e) => Err(McpError::internal_error(format!("{e}"), None)),
        }
    }

    #[tool(description = "Remove items from the grocery cart. Singular, plural and \
                          differently-capitalized names match what is in the cart")]
    async fn remove_from_cart(
        &self,
        params: Parameters<ItemParams>,
    ) -> Result<CallToolResult, McpError> {
        let (item_name, quantity) = match params.0.checked() {
            Ok(checked) => checked,
            Err(msg) => return Ok(CallToolResult::error(vec![Content::text(msg)])),
        };
        tracing::info!(item = %item_name, quantity, "remove_from_cart called");

        match self.client.remove_item(&item_name, quantity).await {
            Ok(reply) => Ok(reply_result(&reply)),
            Err(e) => Err(McpError::internal_error(format!("{e}"), None)),
        }
    }

    #[tool(description = "List what is in the grocery cart and the total item count")]
    async fn view_cart(&self) -> Result<CallToolResult, McpError> {
        match self.client.view().await {
            Ok(reply) => Ok(reply_result(&reply)),
            Err(e) => Err(McpError::internal_error(format!("{e}"), None)),
        }
    }

    #[tool(description = "Remove everything from the grocery cart")]
    async fn clear_cart(&self) -> Result<CallToolResult, McpError> {
        match self.client.clear().await {
            Ok(reply) => Ok(reply_result(&reply)),
            Err(e) => Err(McpError::internal_error(format!("{e}"), None)),
        }
    }
}

// =============================================================================
// SERVER HANDLER
// =============================================================================

#[tool_handler]
impl ServerHandler for GrocerMcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Grocery cart assistant. Use add_to_cart and remove_from_cart with the \
                 item name as the user said it; view_cart reads the cart back."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

// =============================================================================
// RESPONSE FORMATTING
// =============================================================================

/// Wrap a cart reply as a tool result. `success: false` is a tool-level
/// error the model can read, not a protocol error.
fn reply_result(reply: &CartReply) -> CallToolResult {
    let content = vec![Content::text(format_cart_reply(reply))];
    if reply.success {
        CallToolResult::success(content)
    } else {
        CallToolResult::error(content)
    }
}

/// Format a cart reply into short human-readable text.
fn format_cart_reply(reply: &CartReply) -> String {
    let mut parts = vec![reply.message.clone()];

    if reply.cart_items.is_empty() {
        if reply.success {
            parts.push("The cart is empty.".to_string());
        }
        return parts.join("\n");
    }

    parts.push(format!("Cart ({} items):", reply.total_items));
    for line in &reply.cart_items {
        parts.push(format!("  {} x{}", line.item, line.quantity));
    }
    parts.join("\n")
}
