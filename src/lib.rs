//! # Streaming Gemini Client
//!
//! Rust client for the Google Generative Language API, built around an
//! incremental decoder for streamed responses.
//!
//! Streamed response bodies arrive as a sequence of JSON objects split
//! across network chunks at arbitrary byte positions, with no newline or
//! length-prefix framing. The [`streaming`] module reconstructs object
//! boundaries from the raw byte stream and yields each response object as
//! soon as its final byte has arrived; everything else in the crate is the
//! glue around that decoder: request construction, authentication,
//! configuration, typed models and error mapping.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use futures::StreamExt;
//! use gemini_stream::{GeminiClient, types::GenerateContentRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Reads GEMINI_API_KEY / GOOGLE_API_KEY
//!     let client = GeminiClient::from_env()?;
//!
//!     let request = GenerateContentRequest::from_prompt("Tell me a story.");
//!     let mut stream = client
//!         .content()
//!         .generate_stream("gemini-1.5-pro", request)
//!         .await?;
//!
//!     while let Some(chunk) = stream.next().await {
//!         print!("{}", chunk?.text());
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - `streaming` - incremental chunked-JSON decoding and accumulation
//! - `client` - main client interface and factory functions
//! - `config` - configuration types and builder
//! - `auth` - API key management
//! - `transport` - HTTP transport layer
//! - `error` - error types and taxonomy
//! - `types` - request/response models
//! - `services` - content generation service

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod services;
pub mod streaming;
pub mod transport;
pub mod types;

// Test support, also used by the integration suites
pub mod mocks;

// Re-exports for convenience
pub use auth::{ApiKeyAuthManager, AuthManager};
pub use client::{create_client, create_client_from_env, GeminiClient, GeminiClientBuilder};
pub use config::{
    AuthMethod, GeminiConfig, GeminiConfigBuilder, DEFAULT_API_VERSION, DEFAULT_BASE_URL,
    DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS,
};
pub use error::{
    map_http_status, AuthenticationError, ConfigurationError, GeminiError, GeminiResult,
    NetworkError, RateLimitError, RequestError, ResponseError, ServerError,
};
pub use services::{ContentService, ContentServiceImpl, ContentStream};
pub use streaming::{JsonObjectStream, ObjectBuffer, StreamAccumulator};
pub use transport::{
    ChunkedStream, HttpRequest, HttpResponse, HttpTransport, RequestBuilder, ReqwestTransport,
    ResponseParser, TransportError,
};
pub use types::{
    Blob, BlockReason, Candidate, Content, FinishReason, GenerateContentRequest,
    GenerateContentResponse, GenerationConfig, HarmBlockThreshold, HarmCategory, HarmProbability,
    Part, PromptFeedback, Role, SafetyRating, SafetySetting, UsageMetadata,
};
