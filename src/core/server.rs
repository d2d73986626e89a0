//! MCP Server implementation and lifecycle management.
//!
//! This module contains the main server handler that implements the MCP
//! protocol by delegating tool calls to the tools domain.
//!
//! ## Tool Architecture
//!
//! Tools are operation descriptors in `domains/tools/definitions/`. At
//! startup they are registered once into a `ToolTable` (optionally through
//! the instrumentation decorator); the rmcp `ToolRouter` used by STDIO/TCP
//! is built from that table, and HTTP dispatches through the table itself.
//! **Adding a new tool does NOT require modifying this file!**

use rmcp::{
    ServerHandler, handler::server::tool::ToolRouter, model::*, tool_handler,
};
use std::sync::Arc;
use tracing::info;

use super::config::Config;
use crate::domains::maps::{MapsClient, Upstream};
use crate::domains::tools::{CallLog, ToolTable, build_tool_router, build_tool_table};

/// The main MCP server handler.
///
/// This struct implements the `ServerHandler` trait from rmcp. Cloning is
/// cheap: every field is shared.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Registered tools, used directly by the HTTP transport.
    tools: Arc<ToolTable>,

    /// Call recorder, when instrumentation is enabled.
    call_log: Option<Arc<CallLog>>,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new MCP server talking to the real Maps API.
    pub fn new(config: Config) -> crate::Result<Self> {
        let client = MapsClient::new(&config.upstream, config.credentials.api_key.clone())?;
        Self::with_upstream(config, Arc::new(client))
    }

    /// Create a server on top of any upstream implementation.
    pub fn with_upstream(config: Config, upstream: Arc<dyn Upstream>) -> crate::Result<Self> {
        let call_log = if config.instrumentation.enabled {
            let log = match &config.instrumentation.log_path {
                Some(path) => CallLog::with_file(path)?,
                None => CallLog::in_memory(),
            };
            Some(Arc::new(log))
        } else {
            None
        };

        let tools = build_tool_table(upstream, call_log.clone());
        info!("Registered {} tools", tools.len());

        Ok(Self {
            tool_router: build_tool_router::<Self>(&tools),
            tools: Arc::new(tools),
            call_log,
            config: Arc::new(config),
        })
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// Get the call recorder, if instrumentation is enabled.
    pub fn call_log(&self) -> Option<&Arc<CallLog>> {
        self.call_log.as_ref()
    }

    /// Log per-tool call statistics, if instrumentation is enabled.
    pub fn log_call_stats(&self) {
        let Some(log) = &self.call_log else {
            return;
        };
        for (tool, stats) in log.snapshot() {
            info!(
                tool = %tool,
                calls = stats.calls,
                failures = stats.failures,
                total_duration_ms = stats.total_duration_ms,
                "Tool call stats"
            );
        }
    }

    // ========================================================================
    // HTTP Transport Support Methods
    // ========================================================================

    /// List all available tools (for HTTP transport).
    pub fn list_tools(&self) -> Vec<serde_json::Value> {
        self.tools
            .tools()
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect()
    }

    /// Call a tool by name (for HTTP transport).
    ///
    /// Tool failures come back as `Ok` with `isError: true`; `Err` is
    /// reserved for unknown tools and invalid arguments.
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> std::result::Result<serde_json::Value, String> {
        let arguments = match arguments {
            serde_json::Value::Object(map) => map,
            serde_json::Value::Null => JsonObject::new(),
            _ => return Err("Tool arguments must be a JSON object".to_string()),
        };

        let result = self
            .tools
            .call(name, arguments)
            .await
            .map_err(|e| e.message.to_string())?;

        serde_json::to_value(result).map_err(|e| e.to_string())
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Google Maps tools: geocoding, reverse geocoding, place search and details, \
                 distance matrix, elevation and directions."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
