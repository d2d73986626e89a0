//! Generic dispatch for Maps operations.
//!
//! Every tool is an operation descriptor implementing [`MapsOperation`]:
//! which endpoint it calls, how its parameters become a query string, and
//! how an OK envelope is projected into the output shape. [`dispatch`] runs
//! any descriptor through the same request / status check / projection path,
//! so every tool fails the same way.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::cached_schema_for_type,
    model::{CallToolResult, Content, JsonObject, Tool},
};
use schemars::JsonSchema;
use serde::{Serialize, de::DeserializeOwned};
use std::sync::Arc;
use tracing::{info, warn};

use super::error::ToolError;
use super::registry::ToolHandler;
use crate::domains::maps::{Endpoint, Envelope, QueryParams, Upstream, UpstreamError};

/// Static definition of one Maps tool.
pub trait MapsOperation: Send + Sync + 'static {
    /// Tool name as registered in MCP.
    const NAME: &'static str;

    /// Tool description shown to clients.
    const DESCRIPTION: &'static str;

    /// Upstream endpoint this tool calls.
    const ENDPOINT: Endpoint;

    /// Prefix of every failure message, e.g. `"Geocoding failed"`.
    const FAILURE_PREFIX: &'static str;

    /// Tool arguments. The JSON schema advertised to clients is derived from it.
    type Params: DeserializeOwned + JsonSchema + Send + Sync + 'static;

    /// Endpoint-specific response fields, decoded only for OK responses.
    type Payload: DeserializeOwned + Send;

    /// Projected result returned to the caller.
    type Output: Serialize + Send;

    /// Translate arguments into query parameters.
    fn query(params: &Self::Params) -> QueryParams;

    /// Project an OK envelope's payload into the output shape.
    fn project(payload: Self::Payload) -> Result<Self::Output, ToolError>;

    /// Tool model (metadata) for registration.
    fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<Self::Params>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }
}

/// Issue the request and project the result, without rendering.
pub async fn run<O: MapsOperation>(
    upstream: &dyn Upstream,
    params: &O::Params,
) -> Result<O::Output, ToolError> {
    let query = O::query(params);
    let body = upstream.get(O::ENDPOINT, &query).await?;

    let envelope =
        Envelope::from_body(&body).map_err(|e| UpstreamError::InvalidBody(e.to_string()))?;

    if !envelope.is_ok() {
        return Err(ToolError::rejected(
            envelope.status.clone(),
            envelope.rejection_reason(),
        ));
    }

    let payload: O::Payload = serde_json::from_value(body)
        .map_err(|e| UpstreamError::InvalidBody(e.to_string()))?;

    O::project(payload)
}

/// Run an operation and render the outcome as a tool result.
///
/// Upstream rejections, transport errors and malformed envelopes all come
/// back as a failure result carrying `"<prefix>: <reason>"`.
pub async fn dispatch<O: MapsOperation>(
    upstream: &dyn Upstream,
    params: O::Params,
) -> CallToolResult {
    info!("Calling {}", O::NAME);

    let rendered = match run::<O>(upstream, &params).await {
        Ok(output) => serde_json::to_string_pretty(&output).map_err(ToolError::from),
        Err(e) => Err(e),
    };

    match rendered {
        Ok(text) => success_result(text),
        Err(e) => failure_result(&format!("{}: {}", O::FAILURE_PREFIX, e)),
    }
}

/// Build the registry handler for an operation.
///
/// Arguments that do not match `Params` are rejected as invalid params
/// before any request is made.
pub fn handler<O: MapsOperation>(upstream: Arc<dyn Upstream>) -> ToolHandler {
    Arc::new(move |args: JsonObject| {
        let upstream = upstream.clone();
        async move {
            let params: O::Params = serde_json::from_value(serde_json::Value::Object(args))
                .map_err(|e| McpError::invalid_params(e.to_string(), None))?;

            Ok(dispatch::<O>(upstream.as_ref(), params).await)
        }
        .boxed()
    })
}

/// Create a success result with a JSON text payload.
pub fn success_result(content: String) -> CallToolResult {
    CallToolResult::success(vec![Content::text(content)])
}

/// Create a failure result with a message.
pub fn failure_result(message: &str) -> CallToolResult {
    warn!("{}", message);
    CallToolResult::error(vec![Content::text(message.to_string())])
}
