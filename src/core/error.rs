//! Error types and handling for the MCP server.
//!
//! This module defines a unified error type for startup and infrastructure
//! failures. Tool-level failures never surface here: they are rendered into
//! tool results by the tools domain.

use thiserror::Error;

/// A specialized Result type for MCP server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the MCP server.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration-related errors, e.g. a missing API key.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The upstream client could not be built.
    #[error("Upstream error: {0}")]
    Upstream(#[from] crate::domains::maps::UpstreamError),

    /// Transport startup or serving failure.
    #[error("Transport error: {0}")]
    Transport(#[from] super::transport::TransportError),

    /// I/O errors from file operations or network communication.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
