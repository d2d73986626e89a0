//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables (and a `.env` file) or defaults.

use super::error::{Error, Result};
use super::transport::TransportConfig;
use crate::domains::maps::client::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{info, warn};

/// Environment variable holding the Maps API key.
pub const API_KEY_ENV: &str = "GOOGLE_MAPS_API_KEY";

/// Main configuration structure for the MCP server.
///
/// This struct contains all configurable aspects of the server, organized
/// by concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// External API credentials configuration.
    pub credentials: CredentialsConfig,

    /// Upstream Maps API configuration.
    pub upstream: UpstreamConfig,

    /// Tool call instrumentation.
    pub instrumentation: InstrumentationConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

impl LoggingConfig {
    pub fn from_env() -> Self {
        Self {
            level: std::env::var("MCP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        }
    }
}

/// Configuration for external API credentials.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct CredentialsConfig {
    /// Google Maps Platform API key. Never serialized.
    #[serde(default, skip_serializing)]
    pub api_key: String,
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsConfig")
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

/// Upstream Maps API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Base URL all endpoint paths are joined to.
    pub base_url: String,

    /// Per-request timeout in seconds. There are no retries.
    pub timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Tool call instrumentation configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InstrumentationConfig {
    /// Record call events and per-tool stats.
    pub enabled: bool,

    /// Append call events as JSON lines to this file.
    pub log_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "maps-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            transport: TransportConfig::default(),
            credentials: CredentialsConfig::default(),
            upstream: UpstreamConfig::default(),
            instrumentation: InstrumentationConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Default configuration with the given API key.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        let mut config = Self::default();
        config.credentials.api_key = api_key.into();
        config
    }

    /// Load configuration from environment variables.
    ///
    /// `GOOGLE_MAPS_API_KEY` is required; every other setting has a default.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        match std::env::var(API_KEY_ENV) {
            Ok(key) if !key.trim().is_empty() => config.credentials.api_key = key,
            _ => {
                return Err(Error::config(format!(
                    "{} environment variable is required",
                    API_KEY_ENV
                )));
            }
        }

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        config.logging = LoggingConfig::from_env();

        // Load transport configuration from environment
        config.transport = TransportConfig::from_env();

        if let Ok(base_url) = std::env::var("MAPS_API_BASE_URL") {
            info!("Using Maps API base URL {}", base_url);
            config.upstream.base_url = base_url;
        }

        if let Ok(timeout) = std::env::var("MAPS_REQUEST_TIMEOUT_SECS") {
            match timeout.parse() {
                Ok(secs) if secs > 0 => config.upstream.timeout_secs = secs,
                _ => warn!(
                    "Ignoring invalid MAPS_REQUEST_TIMEOUT_SECS={:?}, using {}s",
                    timeout, config.upstream.timeout_secs
                ),
            }
        }

        if let Ok(enabled) = std::env::var("MCP_INSTRUMENTATION") {
            config.instrumentation.enabled = enabled.parse().unwrap_or(false);
        }

        if let Ok(path) = std::env::var("MCP_CALL_LOG") {
            config.instrumentation.enabled = true;
            config.instrumentation.log_path = Some(PathBuf::from(path));
        }

        if config.instrumentation.enabled {
            info!(
                "Tool call instrumentation enabled (log file: {:?})",
                config.instrumentation.log_path
            );
        }

        Ok(config)
    }
}
