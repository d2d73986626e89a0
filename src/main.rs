//! Maps MCP server entry point.
//!
//! Initializes logging, loads configuration, and serves the Maps tools on
//! the configured transport. Logs always go to stderr so STDIO mode keeps
//! stdout for protocol frames.

use anyhow::{Context, Result};
use tracing::{Level, error, info};
use tracing_subscriber::{EnvFilter, fmt};

use maps_mcp_server::core::config::LoggingConfig;
use maps_mcp_server::core::{Config, McpServer, TransportService};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_logging(&LoggingConfig::from_env().level);

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            return Err(e).context("failed to load configuration");
        }
    };

    info!("Starting {} v{}", config.server.name, config.server.version);

    let server = McpServer::new(config.clone()).context("failed to create server")?;

    TransportService::new(config.transport)
        .run(server.clone())
        .await?;

    server.log_call_stats();
    info!("Server shutting down");

    Ok(())
}

fn init_logging(level: &str) {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
