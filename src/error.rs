//! API error types
//!
//! Errors raised while talking to the blog's JSON endpoints.

use thiserror::Error;

/// Errors that can occur when calling a blog endpoint
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// The request never produced a response (connection refused, CORS, offline)
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a non-success status and no usable JSON body
    #[error("Unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body was not the JSON we expected
    #[error("Decode error: {0}")]
    Decode(String),

    /// The configured endpoint could not be turned into a URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// Whether the failure happened before any response arrived
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Network(_))
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

/// Result type alias for endpoint calls
pub type ApiResult<T> = Result<T, ApiError>;
