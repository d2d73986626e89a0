//! Tool-specific error types.

use thiserror::Error;

use crate::domains::maps::UpstreamError;

/// Errors that can occur while running a Maps tool.
///
/// None of these escape a handler as a protocol error: `dispatch` renders
/// each of them into a failure result with a descriptive message.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The upstream call itself failed.
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    /// The upstream answered with a non-OK status.
    #[error("{reason}")]
    Rejected { status: String, reason: String },

    /// The upstream answered OK but a field the projection needs is missing.
    #[error("{0}")]
    Malformed(String),

    /// The projection could not be encoded.
    #[error("failed to encode result: {0}")]
    Encode(#[from] serde_json::Error),
}

impl ToolError {
    /// Create a new "rejected" error.
    pub fn rejected(status: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Rejected {
            status: status.into(),
            reason: reason.into(),
        }
    }

    /// Create a new "malformed" error.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }
}
