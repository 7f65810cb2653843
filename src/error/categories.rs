//! Error category types for granular error handling.

use std::time::Duration;
use thiserror::Error;

/// Configuration-related errors.
#[derive(Error, Debug, Clone)]
pub enum ConfigurationError {
    /// No API key was provided or found in the environment.
    #[error("Missing API key")]
    MissingApiKey,

    /// The configured base URL could not be parsed.
    #[error("Invalid base URL: {url}")]
    InvalidBaseUrl {
        /// The parse failure description.
        url: String,
    },

    /// Some other configuration value is invalid.
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration {
        /// Description of the invalid value.
        message: String,
    },
}

/// Authentication-related errors.
#[derive(Error, Debug, Clone)]
pub enum AuthenticationError {
    /// The API key was rejected.
    #[error("Invalid API key")]
    InvalidApiKey,

    /// The API key's quota is exhausted or access is forbidden.
    #[error("Quota exceeded for API key")]
    QuotaExceeded,
}

/// Request validation errors.
#[derive(Error, Debug, Clone)]
pub enum RequestError {
    /// The request was rejected as invalid, locally or by the server.
    #[error("Validation error: {message}")]
    Validation {
        /// Description of the validation failure.
        message: String,
    },

    /// The requested resource does not exist.
    #[error("Not found: {message}")]
    NotFound {
        /// Server-provided description.
        message: String,
    },
}

/// Rate limiting errors.
#[derive(Error, Debug, Clone)]
pub enum RateLimitError {
    /// The server is throttling requests.
    #[error("Too many requests")]
    TooManyRequests {
        /// Server-suggested backoff, when provided.
        retry_after: Option<Duration>,
    },
}

impl RateLimitError {
    /// Returns the server-suggested backoff, if any.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            RateLimitError::TooManyRequests { retry_after } => *retry_after,
        }
    }
}

/// Network-related errors.
#[derive(Error, Debug, Clone)]
pub enum NetworkError {
    /// The connection could not be established or was lost.
    #[error("Connection failed: {message}")]
    ConnectionFailed {
        /// Description of the connection failure.
        message: String,
    },

    /// The request did not complete in time.
    #[error("Request timed out after {duration:?}")]
    Timeout {
        /// How long the request ran before timing out.
        duration: Duration,
    },
}

/// Server-side errors.
#[derive(Error, Debug, Clone)]
pub enum ServerError {
    /// The server reported an internal failure.
    #[error("Internal server error: {message}")]
    InternalError {
        /// Server-provided description.
        message: String,
    },

    /// The service is temporarily unavailable.
    #[error("Service unavailable")]
    ServiceUnavailable {
        /// Server-suggested backoff, when provided.
        retry_after: Option<Duration>,
    },
}

/// Response decoding errors.
#[derive(Error, Debug, Clone)]
pub enum ResponseError {
    /// The response body did not match the expected type.
    #[error("Failed to deserialize response: {message}")]
    Deserialization {
        /// The decode failure description.
        message: String,
        /// The offending body text.
        body: String,
    },

    /// A delimiter-balanced slice of the stream failed to parse as JSON.
    #[error("Malformed JSON object in stream: {message}")]
    MalformedObject {
        /// The parse failure description.
        message: String,
        /// The rejected slice, lossily decoded for diagnostics.
        fragment: String,
    },

    /// The response stream ended abnormally.
    #[error("Stream interrupted: {message}")]
    StreamInterrupted {
        /// Description of the interruption.
        message: String,
    },
}
