//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use crate::api;
use crate::config::ServerConfig;
use grocer_core::{
    Cart, CartAction, CartEngine, CartError, CartItemRequest, CartResponse, normalize_item_name,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// =============================================================================
// FILE LIMITS
// =============================================================================

/// Maximum file size for replay (10 MB).
const MAX_REPLAY_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Maximum number of requests in one replay file.
const MAX_REPLAY_REQUESTS: usize = 10_000;

/// Validate file path and size before reading.
///
/// Canonicalizes the path (resolving symlinks and ".."), and checks that it
/// is a regular file no larger than `max_size`.
fn validate_input_file(path: &Path, max_size: u64) -> Result<PathBuf, CartError> {
    let canonical = path.canonicalize().map_err(|e| {
        CartError::Internal(format!("Invalid file path '{}': {}", path.display(), e))
    })?;

    let metadata = std::fs::metadata(&canonical)
        .map_err(|e| CartError::Internal(format!("Cannot read file metadata: {}", e)))?;

    if !metadata.is_file() {
        return Err(CartError::Internal(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }
    if metadata.len() > max_size {
        return Err(CartError::Internal(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            max_size
        )));
    }
    Ok(canonical)
}

fn print_json(value: &impl Serialize) {
    println!(
        "{}",
        serde_json::to_string_pretty(value).unwrap_or_default()
    );
}

// =============================================================================
// SERVER COMMAND
// =============================================================================

/// Start the HTTP server.
pub async fn cmd_server(
    config_path: Option<&Path>,
    host: Option<String>,
    port: Option<u16>,
) -> Result<(), CartError> {
    let config = ServerConfig::load(config_path)?.with_overrides(host, port);

    println!("Grocer Cart Server Starting...");
    println!();
    println!("Configuration:");
    println!("  Host:       {}", config.host);
    println!("  Port:       {}", config.port);
    println!("  Rate limit: {} req/s", config.api.rate_limit);
    println!(
        "  Auth:       {}",
        if config.api.api_key.is_some() {
            "enabled"
        } else {
            "disabled"
        }
    );
    println!();
    println!("Endpoints:");
    println!("  GET    /                 - Service banner");
    println!("  GET    /health           - Health check");
    println!("  POST   /api/cart/add     - Add items");
    println!("  POST   /api/cart/remove  - Remove items");
    println!("  GET    /api/cart/view    - View cart");
    println!("  DELETE /api/cart/clear   - Clear cart");
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    api::run_server(config).await
}

// =============================================================================
// NORMALIZE COMMAND
// =============================================================================

#[derive(Debug, Serialize)]
struct NormalizedName<'a> {
    input: &'a str,
    key: String,
}

/// Print the canonical key for each name.
pub fn cmd_normalize(names: &[String], json_mode: bool) -> Result<(), CartError> {
    let normalized = names
        .iter()
        .map(|name| {
            Ok(NormalizedName {
                input: name,
                key: normalize_item_name(name)?,
            })
        })
        .collect::<Result<Vec<_>, CartError>>()?;

    if json_mode {
        print_json(&normalized);
        return Ok(());
    }

    for entry in &normalized {
        println!("{:<24} -> {}", format!("'{}'", entry.input), entry.key);
    }
    Ok(())
}

// =============================================================================
// REPLAY COMMAND
// =============================================================================

/// One line of a replay file. `action` is free text until parsed.
#[derive(Debug, Deserialize)]
struct ReplayEntry {
    action: String,
    item_name: String,
    #[serde(default = "default_quantity")]
    quantity: i64,
}

const fn default_quantity() -> i64 {
    1
}

#[derive(Debug, Serialize)]
struct ReplayStep {
    action: String,
    item_name: String,
    quantity: i64,
    response: CartResponse,
}

#[derive(Debug, Serialize)]
struct ReplayReport {
    steps: Vec<ReplayStep>,
    cart: CartResponse,
}

/// Run every request in `entries` against a fresh cart.
///
/// Invalid requests become rejected steps; they do not stop the replay.
fn replay(entries: Vec<ReplayEntry>) -> ReplayReport {
    let mut cart = Cart::new();
    let mut steps = Vec::with_capacity(entries.len());

    for entry in entries {
        let applied = entry
            .action
            .parse::<CartAction>()
            .map(|action| CartItemRequest::new(action, entry.item_name.clone(), entry.quantity))
            .and_then(|request| CartEngine::apply(&mut cart, &request));

        let response = match applied {
            Ok(applied) => applied.response,
            Err(e) => {
                tracing::warn!(item = %entry.item_name, error = %e, "Replay step rejected");
                CartResponse::rejected(e.to_string())
            }
        };

        steps.push(ReplayStep {
            action: entry.action,
            item_name: entry.item_name,
            quantity: entry.quantity,
            response,
        });
    }

    ReplayReport {
        steps,
        cart: CartEngine::view(&cart),
    }
}

/// Apply a JSON file of cart requests to an empty cart and print the result.
pub fn cmd_replay(file: &Path, json_mode: bool) -> Result<(), CartError> {
    tracing::info!("Replaying cart requests from {:?}", file);

    let validated = validate_input_file(file, MAX_REPLAY_FILE_SIZE)?;
    let contents = std::fs::read(&validated)
        .map_err(|e| CartError::Internal(format!("Read file: {}", e)))?;

    let entries: Vec<ReplayEntry> = serde_json::from_slice(&contents)
        .map_err(|e| CartError::Internal(format!("Invalid replay file: {}", e)))?;

    if entries.len() > MAX_REPLAY_REQUESTS {
        return Err(CartError::Internal(format!(
            "Request count {} exceeds maximum allowed {}",
            entries.len(),
            MAX_REPLAY_REQUESTS
        )));
    }

    let report = replay(entries);

    if json_mode {
        print_json(&report);
        return Ok(());
    }

    for (index, step) in report.steps.iter().enumerate() {
        let marker = if step.response.success { "ok " } else { "ERR" };
        println!(
            "[{}] #{:<3} {} {} x{}: {}",
            marker,
            index + 1,
            step.action,
            step.item_name,
            step.quantity,
            step.response.message
        );
    }
    println!();
    println!("{}", report.cart.message);
    for line in &report.cart.cart_items {
        println!("  {:<20} {}", line.item, line.quantity);
    }

    Ok(())
}

// =============================================================================
// CONFIG COMMAND
// =============================================================================

/// Print the effective configuration.
pub fn cmd_config(config_path: Option<&Path>, json_mode: bool) -> Result<(), CartError> {
    let config = ServerConfig::load(config_path)?;
    let api_key = config.api.api_key.as_ref().map(|_| "<redacted>");
    let cors = config.api.cors_origins.as_deref().unwrap_or("localhost only");

    if json_mode {
        print_json(&serde_json::json!({
            "host": config.host,
            "port": config.port,
            "cors_origins": cors,
            "rate_limit": config.api.rate_limit,
            "api_key": api_key,
        }));
        return Ok(());
    }

    println!("Grocer Configuration");
    println!("====================");
    println!("Host:         {}", config.host);
    println!("Port:         {}", config.port);
    println!("CORS origins: {}", cors);
    println!("Rate limit:   {} req/s", config.api.rate_limit);
    println!("API key:      {}", api_key.unwrap_or("not set"));

    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
