//! Call instrumentation for registered tools.
//!
//! [`Instrumented`] wraps any [`ToolRegistrar`] and decorates each handler
//! with timing and outcome recording into a shared [`CallLog`]. Results pass
//! through untouched; the wrapped tools behave exactly like the bare ones.

use chrono::{DateTime, Utc};
use futures::FutureExt;
use rmcp::model::{CallToolResult, JsonObject, Tool};
use serde::Serialize;
use std::collections::HashMap;
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Instant;
use tracing::{debug, warn};

use super::registry::{ToolHandler, ToolRegistrar};

/// How a tool call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CallOutcome {
    Success,
    /// The tool returned a failure result.
    ToolError,
    /// The call was rejected at the protocol level (e.g. invalid arguments).
    ProtocolError,
}

impl CallOutcome {
    fn of<E>(result: &Result<CallToolResult, E>) -> Self {
        match result {
            Ok(r) if r.is_error.unwrap_or(false) => Self::ToolError,
            Ok(_) => Self::Success,
            Err(_) => Self::ProtocolError,
        }
    }
}

/// One recorded tool call.
#[derive(Debug, Clone, Serialize)]
pub struct CallEvent {
    pub timestamp: DateTime<Utc>,
    pub tool: String,
    pub duration_ms: u64,
    pub outcome: CallOutcome,
}

/// Aggregated statistics for one tool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ToolStats {
    pub calls: u64,
    pub failures: u64,
    pub total_duration_ms: u64,
}

/// Background JSON-lines writer.
///
/// Lines are handed over a channel so recording never does file I/O on the
/// caller's thread. Dropping the sink flushes pending lines and joins the
/// writer.
#[derive(Debug)]
struct FileSink {
    tx: Option<Sender<String>>,
    writer: Option<JoinHandle<()>>,
}

impl FileSink {
    fn open(path: &Path) -> std::io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let (tx, rx) = mpsc::channel::<String>();

        let writer = std::thread::Builder::new()
            .name("call-log-writer".to_string())
            .spawn(move || {
                let mut out = BufWriter::new(file);
                for line in rx {
                    let written = writeln!(out, "{}", line);
                    if let Err(e) = written.and_then(|()| out.flush()) {
                        warn!("Failed to write call event: {}", e);
                    }
                }
            })?;

        Ok(Self {
            tx: Some(tx),
            writer: Some(writer),
        })
    }

    fn send(&self, line: String) {
        let Some(tx) = &self.tx else {
            return;
        };
        if tx.send(line).is_err() {
            warn!("Call log writer has stopped; dropping event");
        }
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        self.tx.take();
        if let Some(writer) = self.writer.take() {
            if writer.join().is_err() {
                warn!("Call log writer panicked");
            }
        }
    }
}

/// Local store of call events: in-memory stats plus an optional JSON-lines file.
#[derive(Debug, Default)]
pub struct CallLog {
    stats: Mutex<HashMap<String, ToolStats>>,
    sink: Option<FileSink>,
}

impl CallLog {
    /// In-memory only.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// In-memory stats, and every event appended to `path` as one JSON line.
    pub fn with_file(path: impl AsRef<Path>) -> std::io::Result<Self> {
        Ok(Self {
            stats: Mutex::default(),
            sink: Some(FileSink::open(path.as_ref())?),
        })
    }

    pub fn record(&self, event: &CallEvent) {
        debug!(
            tool = %event.tool,
            duration_ms = event.duration_ms,
            outcome = ?event.outcome,
            "Tool call recorded"
        );

        if let Ok(mut stats) = self.stats.lock() {
            let entry = stats.entry(event.tool.clone()).or_default();
            entry.calls += 1;
            entry.total_duration_ms += event.duration_ms;
            if event.outcome != CallOutcome::Success {
                entry.failures += 1;
            }
        }

        if let Some(sink) = &self.sink {
            match serde_json::to_string(event) {
                Ok(line) => sink.send(line),
                Err(e) => warn!("Failed to encode call event: {}", e),
            }
        }
    }

    /// Per-tool stats, sorted by tool name.
    pub fn snapshot(&self) -> Vec<(String, ToolStats)> {
        let mut entries: Vec<_> = self
            .stats
            .lock()
            .map(|stats| stats.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
            .unwrap_or_default();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }
}

/// Registrar decorator that records every call into a [`CallLog`].
pub struct Instrumented<R> {
    inner: R,
    log: Arc<CallLog>,
}

impl<R: ToolRegistrar> Instrumented<R> {
    pub fn new(inner: R, log: Arc<CallLog>) -> Self {
        Self { inner, log }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: ToolRegistrar> ToolRegistrar for Instrumented<R> {
    fn register(&mut self, tool: Tool, handler: ToolHandler) {
        let name = tool.name.to_string();
        let log = self.log.clone();

        let wrapped: ToolHandler = Arc::new(move |args: JsonObject| {
            let handler = handler.clone();
            let log = log.clone();
            let name = name.clone();
            async move {
                let started = Instant::now();
                let result = handler(args).await;
                log.record(&CallEvent {
                    timestamp: Utc::now(),
                    tool: name,
                    duration_ms: started.elapsed().as_millis() as u64,
                    outcome: CallOutcome::of(&result),
                });
                result
            }
            .boxed()
        });

        self.inner.register(tool, wrapped);
    }
}
