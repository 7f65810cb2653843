//! HTTP response parsing for buffered (non-streaming) requests.

use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::time::Duration;

use super::http::HttpResponse;
use crate::error::{map_http_status, GeminiError, RateLimitError, ServerError};

/// Parser for buffered HTTP responses.
pub struct ResponseParser;

impl ResponseParser {
    /// Parses a response body into the expected type, mapping non-success
    /// statuses to typed errors.
    pub fn parse_response<T: DeserializeOwned>(response: HttpResponse) -> Result<T, GeminiError> {
        if (200..300).contains(&response.status) {
            let parsed: T = serde_json::from_slice(&response.body)?;
            Ok(parsed)
        } else {
            Err(Self::parse_error_response(response))
        }
    }

    /// Maps a non-success response to a `GeminiError`, honoring a
    /// retry-after header where the error carries one.
    pub fn parse_error_response(response: HttpResponse) -> GeminiError {
        let retry_after = Self::parse_retry_after(&response.headers);
        let mut error = map_http_status(response.status, &response.body);

        if let Some(retry) = retry_after {
            match &mut error {
                GeminiError::RateLimit(RateLimitError::TooManyRequests { retry_after }) => {
                    *retry_after = Some(retry);
                }
                GeminiError::Server(ServerError::ServiceUnavailable { retry_after }) => {
                    *retry_after = Some(retry);
                }
                _ => {}
            }
        }

        error
    }

    /// Parses a retry-after header value in seconds.
    fn parse_retry_after(headers: &HashMap<String, String>) -> Option<Duration> {
        headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case("retry-after"))
            .and_then(|(_, value)| value.trim().parse::<u64>().ok())
            .map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    #[derive(serde::Deserialize)]
    struct Probe {
        name: String,
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: HashMap::new(),
            body: Bytes::from(body.to_string()),
        }
    }

    #[test]
    fn test_parse_success() {
        let parsed: Probe =
            ResponseParser::parse_response(response(200, r#"{"name":"gemini-pro"}"#)).unwrap();
        assert_eq!(parsed.name, "gemini-pro");
    }

    #[test]
    fn test_parse_error_status() {
        let result: Result<Probe, _> = ResponseParser::parse_response(response(500, "boom"));
        assert!(matches!(result, Err(GeminiError::Server(_))));
    }

    #[test]
    fn test_retry_after_header_applied() {
        let mut headers = HashMap::new();
        headers.insert("Retry-After".to_string(), "30".to_string());
        let error = ResponseParser::parse_error_response(HttpResponse {
            status: 429,
            headers,
            body: Bytes::new(),
        });
        assert_eq!(error.retry_after(), Some(Duration::from_secs(30)));
    }
}
