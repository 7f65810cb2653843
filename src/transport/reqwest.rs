//! Reqwest-based HTTP transport implementation.

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;

use super::error::TransportError;
use super::http::{ChunkedStream, HttpRequest, HttpResponse, HttpTransport};

/// Reqwest-based HTTP transport.
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a new reqwest transport with the given timeouts.
    ///
    /// The request timeout covers the whole response body, so it bounds the
    /// entire streamed generation.
    pub fn new(timeout: Duration, connect_timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()
            .map_err(|e| {
                TransportError::Connection(format!("Failed to create HTTP client: {e}"))
            })?;

        Ok(Self { client })
    }

    fn convert_headers(headers: &HashMap<String, String>) -> reqwest::header::HeaderMap {
        let mut header_map = reqwest::header::HeaderMap::new();
        for (key, value) in headers {
            if let (Ok(name), Ok(val)) = (
                reqwest::header::HeaderName::from_bytes(key.as_bytes()),
                reqwest::header::HeaderValue::from_str(value),
            ) {
                header_map.insert(name, val);
            }
        }
        header_map
    }

    fn extract_headers(headers: &reqwest::header::HeaderMap) -> HashMap<String, String> {
        headers
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.to_string(), v.to_string()))
            })
            .collect()
    }

    async fn dispatch(&self, request: HttpRequest) -> Result<reqwest::Response, TransportError> {
        self.client
            .post(&request.url)
            .headers(Self::convert_headers(&request.headers))
            .body(request.body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TransportError::Timeout
                } else {
                    TransportError::Connection(e.to_string())
                }
            })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn post(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let response = self.dispatch(request).await?;

        let status = response.status().as_u16();
        let headers = Self::extract_headers(response.headers());
        let body = response.bytes().await.map_err(|e| {
            TransportError::Request(format!("Failed to read response body: {e}"))
        })?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }

    async fn post_streaming(&self, request: HttpRequest) -> Result<ChunkedStream, TransportError> {
        let response = self.dispatch(request).await?;

        if !response.status().is_success() {
            let code = response.status().as_u16();
            let body = response.bytes().await.map_err(|e| {
                TransportError::Request(format!("Failed to read error response: {e}"))
            })?;
            return Err(TransportError::Status { code, body });
        }

        let stream = response.bytes_stream().map(|result| {
            result.map_err(|e| {
                if e.is_timeout() {
                    TransportError::Timeout
                } else {
                    TransportError::Request(format!("Stream error: {e}"))
                }
            })
        });

        Ok(Box::pin(stream))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reqwest_transport_creation() {
        let transport = ReqwestTransport::new(Duration::from_secs(30), Duration::from_secs(10));
        assert!(transport.is_ok());
    }
}
