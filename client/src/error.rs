//! Error types for the agent client
//!
//! Every failure of a call against the agent backend is represented by
//! [`ClientError`]. The chat screen never shows these to the user; they are
//! logged and collapsed into a fallback message.

use thiserror::Error;

/// Errors that can occur while talking to the agent backend
#[derive(Error, Debug)]
pub enum ClientError {
    /// Transport failure (connection refused, DNS, body read, ...)
    #[error("Failed to send HTTP request: {0}")]
    Request(#[from] reqwest::Error),

    /// Backend answered with a non-success HTTP status
    #[error("Backend returned error status {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, for diagnostics
        body: String,
    },

    /// Response body was not the JSON we expected
    #[error("Failed to parse JSON response: {source} - Response body: {body}")]
    Decode {
        /// Underlying parse error
        source: serde_json::Error,
        /// Raw response body
        body: String,
    },

    /// Backend answered with `success: false`
    #[error("Backend reported failure for {0}")]
    Unsuccessful(String),

    /// Client configuration is invalid
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl ClientError {
    /// Whether the error came from the network layer rather than the backend
    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Request(_))
    }
}
