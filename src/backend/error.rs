//! Error types for the answer service client.

use thiserror::Error;

/// Reasons a query to the answer service can fail.
///
/// The widget collapses every variant into one user-facing message; the
/// variants exist so the detail can be logged.
#[derive(Error, Debug)]
pub enum QueryError {
    /// The configured endpoint is not a valid URL.
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    /// The request never produced a response (connect, TLS, timeout...).
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("Answer service returned {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, for diagnostics.
        body: String,
    },

    /// The response body was not JSON.
    #[error("Malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
}
