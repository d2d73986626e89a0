//! Test doubles shared by tool tests.

use async_trait::async_trait;
use rmcp::model::{CallToolResult, RawContent};
use serde_json::Value;
use std::sync::Mutex;

use crate::domains::maps::{Endpoint, QueryParams, Upstream, UpstreamError, UpstreamResult};

/// Canned upstream that records the last request it saw.
pub struct StubUpstream {
    response: Option<Value>,
    last: Mutex<Option<(Endpoint, QueryParams)>>,
}

impl StubUpstream {
    /// Answer every request with `body` verbatim.
    pub fn new(body: Value) -> Self {
        Self {
            response: Some(body),
            last: Mutex::new(None),
        }
    }

    /// Answer with `payload` plus `"status": "OK"`.
    pub fn ok(mut payload: Value) -> Self {
        if let Some(obj) = payload.as_object_mut() {
            obj.insert("status".to_string(), Value::from("OK"));
        }
        Self::new(payload)
    }

    /// Fail every request as if the network were down.
    pub fn unreachable() -> Self {
        Self {
            response: None,
            last: Mutex::new(None),
        }
    }

    pub fn last_endpoint(&self) -> Option<Endpoint> {
        self.last.lock().unwrap().as_ref().map(|(e, _)| *e)
    }

    pub fn last_query(&self) -> Option<QueryParams> {
        self.last.lock().unwrap().as_ref().map(|(_, q)| q.clone())
    }
}

#[async_trait]
impl Upstream for StubUpstream {
    async fn get(&self, endpoint: Endpoint, query: &QueryParams) -> UpstreamResult<Value> {
        *self.last.lock().unwrap() = Some((endpoint, query.clone()));
        self.response
            .clone()
            .ok_or_else(|| UpstreamError::Request("connection failed: stub".to_string()))
    }
}

/// Text of the first content block.
pub fn text_of(result: &CallToolResult) -> String {
    match &result.content[0].raw {
        RawContent::Text(text) => text.text.clone(),
        other => panic!("expected text content, got {:?}", other),
    }
}

/// First content block parsed as JSON; panics on a failure result.
pub fn json_of(result: &CallToolResult) -> Value {
    assert_eq!(result.is_error, Some(false), "unexpected failure: {}", text_of(result));
    serde_json::from_str(&text_of(result)).expect("JSON payload")
}
