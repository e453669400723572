//! # Grocer - Cart Server
//!
//! The main binary for the Grocer cart reconciliation engine.
//!
//! This application provides:
//! - HTTP REST API server (axum-based)
//! - CLI interface for offline checks (normalize, replay, config)
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     apps/grocer (THE BINARY)                 │
//! │                                                              │
//! │   ┌─────────────┐     ┌─────────────┐     ┌──────────────┐   │
//! │   │    CLI      │     │  HTTP API   │     │    Config    │   │
//! │   │   (clap)    │     │   (axum)    │     │ (toml + env) │   │
//! │   └──────┬──────┘     └──────┬──────┘     └──────┬───────┘   │
//! │          │                   │                   │           │
//! │          └───────────────────┼───────────────────┘           │
//! │                              ▼                               │
//! │                      ┌───────────────┐                       │
//! │                      │  grocer-core  │                       │
//! │                      │  (THE LOGIC)  │                       │
//! │                      └───────────────┘                       │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Start the HTTP server
//! grocer server --host 0.0.0.0 --port 3000
//!
//! # Offline checks
//! grocer normalize Apple "green tea"
//! grocer replay -f requests.json
//! ```

use clap::Parser;
use grocer::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    // GROCER_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("GROCER_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "grocer=info,tower_http=debug".into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }

    let cli = cli::Cli::parse();

    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    if let Err(e) = cli::execute(cli).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the Grocer startup banner.
fn print_banner() {
    println!(
        r#"
   ____
  / ___|_ __ ___   ___ ___ _ __
 | |  _| '__/ _ \ / __/ _ \ '__|
 | |_| | | | (_) | (_|  __/ |
  \____|_|  \___/ \___\___|_|

  Cart Server v{}
"#,
        env!("CARGO_PKG_VERSION")
    );
}
