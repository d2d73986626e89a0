//! Google Maps MCP server.
//!
//! Exposes seven Google Maps Web Service operations as MCP tools:
//! geocoding, reverse geocoding, place search, place details, distance
//! matrix, elevation and directions.
//!
//! # Architecture
//!
//! - **core**: configuration, errors, the `McpServer` handler and transports
//! - **domains**
//!   - **maps**: the upstream HTTP client and the shared status envelope
//!   - **tools**: one descriptor per operation plus the generic dispatch that
//!     turns upstream responses into tool results
//!
//! # Example
//!
//! ```rust,no_run
//! use maps_mcp_server::{Config, McpServer, core::TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let server = McpServer::new(config.clone())?;
//!     TransportService::new(config.transport).run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

pub use core::{Config, Error, McpServer, Result};
