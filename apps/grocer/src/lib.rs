//! # Grocer
//!
//! HTTP and CLI surface around `grocer-core`.
//!
//! - `api` - axum router, handlers and middleware
//! - `cli` - clap commands
//! - `config` - layered configuration (defaults, TOML file, environment, flags)

pub mod api;
pub mod cli;
pub mod config;
