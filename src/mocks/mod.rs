//! Mock transport for testing the client in isolation.

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::transport::{ChunkedStream, HttpRequest, HttpResponse, HttpTransport, TransportError};

/// Mock HTTP transport: tests enqueue responses and inspect the requests
/// that were made. Supports both buffered and streaming responses; a
/// streaming response is handed out as one queued chunk per network read,
/// which lets tests control exactly where the byte stream is cut.
#[derive(Default)]
pub struct MockHttpTransport {
    responses: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
    streaming_responses: Mutex<VecDeque<Result<Vec<Bytes>, TransportError>>>,
    requests: Arc<Mutex<Vec<HttpRequest>>>,
}

impl MockHttpTransport {
    /// Create a new mock transport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue a response for the next buffered request.
    pub fn enqueue_response(&self, response: Result<HttpResponse, TransportError>) {
        self.responses.lock().unwrap().push_back(response);
    }

    /// Enqueue a JSON response with the given status code and body.
    pub fn enqueue_json_response(&self, status: u16, body: &str) {
        let mut headers = std::collections::HashMap::new();
        headers.insert("content-type".to_string(), "application/json".to_string());

        self.enqueue_response(Ok(HttpResponse {
            status,
            headers,
            body: Bytes::from(body.to_string()),
        }));
    }

    /// Enqueue a streaming response delivered as the given chunks.
    pub fn enqueue_streaming_response(&self, chunks: Vec<Bytes>) {
        self.streaming_responses.lock().unwrap().push_back(Ok(chunks));
    }

    /// Enqueue a streaming request failure.
    pub fn enqueue_streaming_error(&self, error: TransportError) {
        self.streaming_responses.lock().unwrap().push_back(Err(error));
    }

    /// Get all requests that were made.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Get the last request that was made.
    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.lock().unwrap().last().cloned()
    }

    /// Assert that exactly `expected` requests were made.
    pub fn verify_request_count(&self, expected: usize) {
        let actual = self.requests.lock().unwrap().len();
        assert_eq!(actual, expected, "Expected {expected} requests, got {actual}");
    }

    /// Assert that the request at `index` targeted a URL containing the
    /// given fragment.
    pub fn verify_request_url(&self, index: usize, url_contains: &str) {
        let requests = self.requests.lock().unwrap();
        assert!(index < requests.len(), "No request at index {index}");
        let url = &requests[index].url;
        assert!(
            url.contains(url_contains),
            "Expected URL to contain '{url_contains}', got '{url}'"
        );
    }
}

#[async_trait]
impl HttpTransport for MockHttpTransport {
    async fn post(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request);

        self.responses.lock().unwrap().pop_front().unwrap_or_else(|| {
            Err(TransportError::Connection(
                "No response configured in MockHttpTransport".to_string(),
            ))
        })
    }

    async fn post_streaming(&self, request: HttpRequest) -> Result<ChunkedStream, TransportError> {
        self.requests.lock().unwrap().push(request);

        let chunks = self
            .streaming_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(TransportError::Connection(
                    "No streaming response configured in MockHttpTransport".to_string(),
                ))
            })?;

        Ok(Box::pin(stream::iter(chunks.into_iter().map(Ok))))
    }
}
