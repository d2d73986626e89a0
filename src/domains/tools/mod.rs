//! Tools domain module.
//!
//! This module exposes the Maps API as MCP tools.
//!
//! ## Architecture
//!
//! - `definitions/` - One operation descriptor per tool (params, endpoint, projection)
//! - `dispatch.rs` - Generic request / status check / projection routine
//! - `registry.rs` - `ToolRegistrar` capability, `ToolTable` and registration
//! - `instrumentation.rs` - Optional call-recording registrar decorator
//! - `router.rs` - Builds the table and the rmcp ToolRouter
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/` implementing `MapsOperation`
//! 2. Export it in `definitions/mod.rs`
//! 3. Add a `register_operation` line in `registry.rs`

pub mod definitions;
pub mod dispatch;
mod error;
pub mod instrumentation;
pub mod registry;
pub mod router;

#[cfg(test)]
pub(crate) mod testing;

pub use dispatch::{MapsOperation, dispatch, failure_result, success_result};
pub use error::ToolError;
pub use instrumentation::{CallLog, Instrumented};
pub use registry::{ToolHandler, ToolRegistrar, ToolTable, register_operations};
pub use router::{build_tool_router, build_tool_table};
