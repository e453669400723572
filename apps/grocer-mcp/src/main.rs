//! # Grocer MCP Server
//!
//! Entry point for the MCP (Model Context Protocol) bridge to Grocer.
//!
//! Reads configuration from environment variables:
//! - `GROCER_URL` - Grocer server URL (default: `http://localhost:3000`)
//! - `GROCER_API_KEY` - Optional Bearer token for authentication
//!
//! Exposes cart tools to an LLM agent via MCP over stdio, and forwards
//! them to the Grocer HTTP API.

mod client;
mod server;

use client::CartClient;
use rmcp::{ServiceExt, transport::stdio};
use server::GrocerMcp;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logging to stderr only - stdout is reserved for MCP stdio transport.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let url = std::env::var("GROCER_URL").unwrap_or_else(|_| "http://localhost:3000".into());
    let api_key = std::env::var("GROCER_API_KEY").ok();

    tracing::info!("Grocer MCP server starting, target: {}", url);

    let client = CartClient::new(url, api_key);
    match client.health().await {
        Ok(health) => tracing::info!(
            status = %health.status,
            version = %health.version,
            "Cart server reachable"
        ),
        Err(e) => tracing::warn!("Cart server not reachable yet: {}", e),
    }

    let mcp = GrocerMcp::new(client);

    let service = mcp.serve(stdio()).await.inspect_err(|e| {
        tracing::error!("MCP serve error: {:?}", e);
    })?;

    service.waiting().await?;
    Ok(())
}
