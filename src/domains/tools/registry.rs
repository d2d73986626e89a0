//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - The [`ToolRegistrar`] capability: anything that can register a named tool
//! - [`ToolTable`], the canonical name -> handler store (also used by HTTP)
//! - A registrar impl for the rmcp [`ToolRouter`] (STDIO/TCP)
//! - [`register_operations`], which registers every Maps tool

use futures::future::BoxFuture;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, ToolRouter},
    model::{CallToolResult, JsonObject, Tool},
};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, warn};

use super::definitions::{
    DirectionsTool, DistanceMatrixTool, ElevationTool, GeocodeTool, PlaceDetailsTool,
    ReverseGeocodeTool, SearchPlacesTool,
};
use super::dispatch::{MapsOperation, handler};
use crate::domains::maps::Upstream;

/// A registered tool callable: raw JSON arguments in, tool result out.
pub type ToolHandler =
    Arc<dyn Fn(JsonObject) -> BoxFuture<'static, Result<CallToolResult, McpError>> + Send + Sync>;

/// Something that tools can be registered with.
pub trait ToolRegistrar {
    fn register(&mut self, tool: Tool, handler: ToolHandler);
}

impl<R: ToolRegistrar + ?Sized> ToolRegistrar for &mut R {
    fn register(&mut self, tool: Tool, handler: ToolHandler) {
        (**self).register(tool, handler);
    }
}

impl<S> ToolRegistrar for ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    fn register(&mut self, tool: Tool, handler: ToolHandler) {
        self.add_route(ToolRoute::new_dyn(tool, move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            handler(args)
        }));
    }
}

/// Register one operation descriptor.
pub fn register_operation<O: MapsOperation>(
    registrar: &mut impl ToolRegistrar,
    upstream: Arc<dyn Upstream>,
) {
    debug!("Registering tool {}", O::NAME);
    registrar.register(O::to_tool(), handler::<O>(upstream));
}

/// Register every Maps tool.
pub fn register_operations(registrar: &mut impl ToolRegistrar, upstream: Arc<dyn Upstream>) {
    register_operation::<GeocodeTool>(registrar, upstream.clone());
    register_operation::<ReverseGeocodeTool>(registrar, upstream.clone());
    register_operation::<SearchPlacesTool>(registrar, upstream.clone());
    register_operation::<PlaceDetailsTool>(registrar, upstream.clone());
    register_operation::<DistanceMatrixTool>(registrar, upstream.clone());
    register_operation::<ElevationTool>(registrar, upstream.clone());
    register_operation::<DirectionsTool>(registrar, upstream);
}

// ============================================================================
// Tool Table
// ============================================================================

/// Name -> (metadata, handler) table.
///
/// This is the single source of truth for available tools. The rmcp router
/// used by STDIO/TCP is built from it, and HTTP dispatches through it.
#[derive(Clone, Default)]
pub struct ToolTable {
    entries: BTreeMap<String, (Tool, ToolHandler)>,
}

impl ToolRegistrar for ToolTable {
    fn register(&mut self, tool: Tool, handler: ToolHandler) {
        let name = tool.name.to_string();
        if self.entries.insert(name.clone(), (tool, handler)).is_some() {
            warn!("Tool {} registered twice; keeping the latest", name);
        }
    }
}

impl ToolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// All tool names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    /// All tool models, sorted by name.
    pub fn tools(&self) -> Vec<Tool> {
        self.entries.values().map(|(tool, _)| tool.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Call a tool by name.
    pub async fn call(&self, name: &str, arguments: JsonObject) -> Result<CallToolResult, McpError> {
        match self.entries.get(name) {
            Some((_, handler)) => handler(arguments).await,
            None => {
                warn!("Unknown tool requested: {}", name);
                Err(McpError::invalid_params(format!("Unknown tool: {}", name), None))
            }
        }
    }

    /// Build an rmcp router holding every tool in this table.
    pub fn routes<S>(&self) -> ToolRouter<S>
    where
        S: Send + Sync + 'static,
    {
        let mut router = ToolRouter::new();
        for (tool, handler) in self.entries.values() {
            router.register(tool.clone(), handler.clone());
        }
        router
    }
}
