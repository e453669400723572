//! # Configuration
//!
//! Layered server configuration. Later layers win:
//! 1. Built-in defaults (`127.0.0.1:3000`, 100 req/s, no auth, localhost CORS)
//! 2. Optional TOML file (`--config grocer.toml`)
//! 3. Environment variables
//! 4. Command-line flags (`--host`, `--port`)
//!
//! ## File Format
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 3000
//!
//! [api]
//! cors_origins = "http://localhost:5173,https://shop.example"
//! rate_limit = 50
//! api_key = "change-me"
//! ```
//!
//! ## Environment Variables
//!
//! - `GROCER_CORS_ORIGINS`: Comma-separated list of allowed origins, or "*" for all
//! - `GROCER_RATE_LIMIT`: Requests per second (0 disables rate limiting)
//! - `GROCER_API_KEY`: If set and non-empty, requires Bearer token authentication

use grocer_core::CartError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default bind host.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default bind port.
pub const DEFAULT_PORT: u16 = 3000;

/// Default rate limit: 100 requests per second.
pub const DEFAULT_RATE_LIMIT: u32 = 100;

pub const ENV_CORS_ORIGINS: &str = "GROCER_CORS_ORIGINS";
pub const ENV_RATE_LIMIT: &str = "GROCER_RATE_LIMIT";
pub const ENV_API_KEY: &str = "GROCER_API_KEY";

// =============================================================================
// FILE LAYER
// =============================================================================

/// On-disk configuration. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub server: ServerSection,
    pub api: ApiSection,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerSection {
    pub host: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApiSection {
    pub cors_origins: Option<String>,
    pub rate_limit: Option<u32>,
    pub api_key: Option<String>,
}

impl FileConfig {
    /// Parse a TOML document.
    pub fn parse(text: &str) -> Result<Self, CartError> {
        toml::from_str(text)
            .map_err(|e| CartError::Internal(format!("Invalid configuration: {}", e)))
    }

    /// Read and parse a TOML file.
    pub fn read(path: &Path) -> Result<Self, CartError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            CartError::Internal(format!(
                "Cannot read configuration '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::parse(&text)
    }
}

// =============================================================================
// EFFECTIVE CONFIGURATION
// =============================================================================

/// Settings consumed by the router and its middleware.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Raw origin list; `None` means localhost only.
    pub cors_origins: Option<String>,
    /// Requests per second; 0 disables rate limiting.
    pub rate_limit: u32,
    /// Bearer token; `None` disables authentication.
    pub api_key: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            cors_origins: None,
            rate_limit: DEFAULT_RATE_LIMIT,
            api_key: None,
        }
    }
}

impl ApiConfig {
    /// Overlay values from an environment lookup.
    ///
    /// Unparseable `GROCER_RATE_LIMIT` values are ignored with a warning.
    /// An empty `GROCER_API_KEY` leaves authentication as it was.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(origins) = lookup(ENV_CORS_ORIGINS) {
            self.cors_origins = Some(origins);
        }
        if let Some(raw) = lookup(ENV_RATE_LIMIT) {
            match raw.trim().parse() {
                Ok(limit) => self.rate_limit = limit,
                Err(_) => tracing::warn!("Ignoring invalid {}='{}'", ENV_RATE_LIMIT, raw),
            }
        }
        if let Some(key) = lookup(ENV_API_KEY).filter(|k| !k.is_empty()) {
            self.api_key = Some(key);
        }
    }

    fn apply_file(&mut self, api: ApiSection) {
        if let Some(origins) = api.cors_origins {
            self.cors_origins = Some(origins);
        }
        if let Some(limit) = api.rate_limit {
            self.rate_limit = limit;
        }
        if let Some(key) = api.api_key.filter(|k| !k.is_empty()) {
            self.api_key = Some(key);
        }
    }
}

/// Everything `grocer server` needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub api: ApiConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            api: ApiConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Defaults, then the optional file, then the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self, CartError> {
        let file = match path {
            Some(path) => FileConfig::read(path)?,
            None => FileConfig::default(),
        };
        Ok(Self::layered(file, |key| std::env::var(key).ok()))
    }

    /// Combine a parsed file with an environment lookup.
    pub fn layered(file: FileConfig, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(host) = file.server.host {
            config.host = host;
        }
        if let Some(port) = file.server.port {
            config.port = port;
        }
        config.api.apply_file(file.api);
        config.api.apply_env(lookup);
        config
    }

    /// Apply command-line overrides.
    #[must_use]
    pub fn with_overrides(mut self, host: Option<String>, port: Option<u16>) -> Self {
        if let Some(host) = host {
            self.host = host;
        }
        if let Some(port) = port {
            self.port = port;
        }
        self
    }

    /// `host:port` for binding.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: BTreeMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let config = ServerConfig::layered(FileConfig::default(), env(&[]));
        assert_eq!(config.addr(), "127.0.0.1:3000");
        assert_eq!(config.api.rate_limit, DEFAULT_RATE_LIMIT);
        assert!(config.api.api_key.is_none());
        assert!(config.api.cors_origins.is_none());
    }

    #[test]
    fn file_values_apply() {
        let file = FileConfig::parse(
            r#"
            [server]
            host = "0.0.0.0"
            port = 8081

            [api]
            rate_limit = 5
            api_key = "secret"
            "#,
        )
        .expect("parse");

        let config = ServerConfig::layered(file, env(&[]));
        assert_eq!(config.addr(), "0.0.0.0:8081");
        assert_eq!(config.api.rate_limit, 5);
        assert_eq!(config.api.api_key.as_deref(), Some("secret"));
    }

    #[test]
    fn env_overrides_file() {
        let file = FileConfig::parse("[api]\nrate_limit = 5\napi_key = \"file\"\n").expect("parse");
        let config = ServerConfig::layered(
            file,
            env(&[
                (ENV_RATE_LIMIT, "0"),
                (ENV_API_KEY, "env"),
                (ENV_CORS_ORIGINS, "*"),
            ]),
        );
        assert_eq!(config.api.rate_limit, 0);
        assert_eq!(config.api.api_key.as_deref(), Some("env"));
        assert_eq!(config.api.cors_origins.as_deref(), Some("*"));
    }

    #[test]
    fn bad_env_values_are_ignored() {
        let config = ServerConfig::layered(
            FileConfig::default(),
            env(&[(ENV_RATE_LIMIT, "fast"), (ENV_API_KEY, "")]),
        );
        assert_eq!(config.api.rate_limit, DEFAULT_RATE_LIMIT);
        assert!(config.api.api_key.is_none());
    }

    #[test]
    fn flags_override_everything() {
        let config = ServerConfig::default().with_overrides(Some("::1".into()), Some(9000));
        assert_eq!(config.host, "::1");
        assert_eq!(config.port, 9000);
    }

    #[test]
    fn unknown_keys_rejected() {
        let result = FileConfig::parse("[server]\nhots = \"typo\"\n");
        assert!(matches!(result, Err(CartError::Internal(_))));
    }

    #[test]
    fn read_from_disk() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        writeln!(file, "[server]\nport = 4000").expect("write");

        let parsed = FileConfig::read(file.path()).expect("read");
        assert_eq!(parsed.server.port, Some(4000));

        let missing = FileConfig::read(Path::new("/definitely/not/here.toml"));
        assert!(missing.is_err());
    }
}
