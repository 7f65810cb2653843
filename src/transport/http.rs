//! Core HTTP transport abstractions.
//!
//! The API surface this client talks to is POST-only, so the transport
//! exposes exactly two operations: a buffered POST and a streaming POST
//! whose response body arrives as raw byte chunks of arbitrary size.

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use std::collections::HashMap;
use std::pin::Pin;

use super::error::TransportError;

/// An outgoing POST request.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// Request URL.
    pub url: String,
    /// Request headers.
    pub headers: HashMap<String, String>,
    /// JSON request body.
    pub body: Bytes,
}

/// A fully-buffered HTTP response.
#[derive(Debug)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers.
    pub headers: HashMap<String, String>,
    /// Response body.
    pub body: Bytes,
}

/// Byte-chunk sequence of a streaming response body. Chunk sizes are
/// transport-determined and must be treated as opaque.
pub type ChunkedStream = Pin<Box<dyn Stream<Item = Result<Bytes, TransportError>> + Send>>;

/// HTTP transport abstraction; the seam that makes the client testable.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send a POST request and buffer the whole response.
    async fn post(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;

    /// Send a POST request and receive the response body as a chunk stream.
    ///
    /// A non-success status is reported as a hard `TransportError::Status`,
    /// never as an empty stream.
    async fn post_streaming(&self, request: HttpRequest) -> Result<ChunkedStream, TransportError>;
}
