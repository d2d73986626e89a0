//! Upstream client error types.

use thiserror::Error;

/// Result type for upstream calls.
pub type UpstreamResult<T> = Result<T, UpstreamError>;

/// Transport-level failures talking to the Maps API.
///
/// These never describe an upstream `status` rejection: the client hands the
/// envelope back untouched and leaves status interpretation to the handlers.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Network, DNS, connect or timeout failure.
    #[error("request error: {0}")]
    Request(String),

    /// Non-success HTTP status with a body that is not JSON.
    #[error("upstream returned HTTP {status}")]
    Http { status: u16 },

    /// The body could not be parsed as JSON.
    #[error("invalid response body: {0}")]
    InvalidBody(String),

    /// The HTTP client could not be constructed.
    #[error("client initialization failed: {0}")]
    Init(String),
}

impl UpstreamError {
    /// Classify a reqwest failure.
    ///
    /// The request URL carries the API key, so it is stripped before the
    /// error is formatted.
    pub fn from_reqwest(e: reqwest::Error) -> Self {
        let e = e.without_url();
        if e.is_timeout() {
            Self::Request("request timed out".to_string())
        } else if e.is_connect() {
            Self::Request(format!("connection failed: {}", e))
        } else {
            Self::Request(e.to_string())
        }
    }
}
