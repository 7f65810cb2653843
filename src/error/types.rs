//! Main error type for the streaming Gemini client.

use std::time::Duration;
use thiserror::Error;

use super::categories::*;
use crate::transport::TransportError;

/// Result type alias for Gemini operations.
pub type GeminiResult<T> = Result<T, GeminiError>;

/// Top-level error type for the client.
#[derive(Error, Debug, Clone)]
pub enum GeminiError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// Authentication error.
    #[error("Authentication error: {0}")]
    Authentication(#[from] AuthenticationError),

    /// Request validation error.
    #[error("Request error: {0}")]
    Request(#[from] RequestError),

    /// Rate limiting error.
    #[error("Rate limit error: {0}")]
    RateLimit(#[from] RateLimitError),

    /// Network error.
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    /// Server-side error.
    #[error("Server error: {0}")]
    Server(#[from] ServerError),

    /// Response decoding error.
    #[error("Response error: {0}")]
    Response(#[from] ResponseError),
}

impl GeminiError {
    /// Returns true if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            GeminiError::RateLimit(_)
                | GeminiError::Network(NetworkError::Timeout { .. })
                | GeminiError::Network(NetworkError::ConnectionFailed { .. })
                | GeminiError::Server(ServerError::ServiceUnavailable { .. })
        )
    }

    /// Returns the retry-after duration if available.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            GeminiError::RateLimit(e) => e.retry_after(),
            GeminiError::Server(ServerError::ServiceUnavailable { retry_after }) => *retry_after,
            _ => None,
        }
    }
}

impl From<reqwest::Error> for GeminiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GeminiError::Network(NetworkError::Timeout {
                // Actual elapsed time is not observable from here
                duration: Duration::from_secs(0),
            })
        } else {
            GeminiError::Network(NetworkError::ConnectionFailed {
                message: err.to_string(),
            })
        }
    }
}

impl From<serde_json::Error> for GeminiError {
    fn from(err: serde_json::Error) -> Self {
        GeminiError::Response(ResponseError::Deserialization {
            message: err.to_string(),
            body: String::new(),
        })
    }
}

impl From<url::ParseError> for GeminiError {
    fn from(err: url::ParseError) -> Self {
        GeminiError::Configuration(ConfigurationError::InvalidBaseUrl {
            url: err.to_string(),
        })
    }
}

impl From<TransportError> for GeminiError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Status { code, body } => super::map_http_status(code, &body),
            TransportError::Timeout => GeminiError::Network(NetworkError::Timeout {
                duration: Duration::from_secs(0),
            }),
            TransportError::Connection(message) => {
                GeminiError::Network(NetworkError::ConnectionFailed { message })
            }
            TransportError::Request(message) => {
                GeminiError::Response(ResponseError::StreamInterrupted { message })
            }
        }
    }
}
