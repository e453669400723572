//! # Grocer CLI Module
//!
//! This module implements the CLI interface for Grocer.
//!
//! ## Available Commands
//!
//! - `server` - Start the HTTP server (default when no command is given)
//! - `normalize` - Print the canonical cart key for item names
//! - `replay` - Apply a JSON file of cart requests to a fresh cart
//! - `config` - Print the effective configuration

mod commands;

use clap::{Parser, Subcommand};
use grocer_core::CartError;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Grocer - cart server for voice and chat shopping assistants
///
/// Keeps one shopping cart and matches loosely spoken item names
/// ("2 apple", "Eggs") against what is already in it.
#[derive(Parser, Debug)]
#[command(name = "grocer")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start HTTP server
    Server {
        /// Host to bind to (overrides the config file)
        #[arg(short = 'H', long)]
        host: Option<String>,

        /// Port to bind to (overrides the config file)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Print the canonical cart key for each item name
    Normalize {
        /// Item names as a user would say them
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Apply a JSON array of {action, item_name, quantity} requests to an empty cart
    Replay {
        /// Path to the JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Print the effective configuration (API key redacted)
    Config,
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli) -> Result<(), CartError> {
    let json_mode = cli.json_mode;
    let config = cli.config.as_deref();

    match cli.command {
        Some(Commands::Server { host, port }) => cmd_server(config, host, port).await,
        Some(Commands::Normalize { names }) => cmd_normalize(&names, json_mode),
        Some(Commands::Replay { file }) => cmd_replay(&file, json_mode),
        Some(Commands::Config) => cmd_config(config, json_mode),
        None => cmd_server(config, None, None).await,
    }
}
