//! Transport layer for the MCP server.
//!
//! - **STDIO** (feature `stdio`, default): one session over stdin/stdout.
//! - **TCP** (feature `tcp`): one rmcp session per accepted connection.
//! - **HTTP** (feature `http`): stateless JSON-RPC over POST, served by axum.
//!
//! STDIO and TCP go through the rmcp tool router; HTTP calls the server's
//! tool table directly. Both are built from the same registrations.

mod config;
mod error;
mod service;

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "tcp")]
pub mod tcp;

#[cfg(feature = "stdio")]
pub mod stdio;

pub use config::TransportConfig;
pub use error::{TransportError, TransportResult};
pub use service::TransportService;

#[cfg(feature = "tcp")]
pub use config::TcpConfig;

#[cfg(feature = "http")]
pub use config::HttpConfig;
