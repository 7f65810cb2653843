//! Content generation service.

mod service;
mod validation;

use async_trait::async_trait;
use futures::Stream;
use std::pin::Pin;

use crate::error::GeminiError;
use crate::types::{GenerateContentRequest, GenerateContentResponse};

pub use service::ContentServiceImpl;

/// Typed streaming response: one item per decoded response object.
pub type ContentStream =
    Pin<Box<dyn Stream<Item = Result<GenerateContentResponse, GeminiError>> + Send>>;

/// Service for content generation.
#[async_trait]
pub trait ContentService: Send + Sync {
    /// Generate content (non-streaming).
    async fn generate(
        &self,
        model: &str,
        request: GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GeminiError>;

    /// Generate content with a streamed response, yielding each response
    /// object as soon as it has fully arrived.
    async fn generate_stream(
        &self,
        model: &str,
        request: GenerateContentRequest,
    ) -> Result<ContentStream, GeminiError>;
}
