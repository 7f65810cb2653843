//! Transport layer error types.

use bytes::Bytes;

/// Transport error.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The connection could not be established or was lost.
    #[error("Connection error: {0}")]
    Connection(String),
    /// The request or response body read timed out.
    #[error("Timeout")]
    Timeout,
    /// The request failed after the connection was established.
    #[error("Request error: {0}")]
    Request(String),
    /// The server answered with a non-success status.
    #[error("HTTP status {code}")]
    Status {
        /// HTTP status code.
        code: u16,
        /// Raw error response body.
        body: Bytes,
    },
}
