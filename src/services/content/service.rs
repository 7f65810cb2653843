//! Content service implementation: request construction, transport calls,
//! and typed decoding of streamed responses.

use async_trait::async_trait;
use futures::StreamExt;
use std::sync::Arc;
use std::time::Instant;

use super::validation::validate_generate_request;
use super::{ContentService, ContentStream};
use crate::auth::AuthManager;
use crate::config::GeminiConfig;
use crate::error::{GeminiError, ResponseError};
use crate::streaming::JsonObjectStream;
use crate::transport::{endpoints, HttpTransport, RequestBuilder, ResponseParser};
use crate::types::{GenerateContentRequest, GenerateContentResponse};

/// Implementation of [`ContentService`] over an [`HttpTransport`].
pub struct ContentServiceImpl {
    transport: Arc<dyn HttpTransport>,
    request_builder: RequestBuilder,
}

impl ContentServiceImpl {
    /// Create a new content service.
    pub fn new(
        config: &GeminiConfig,
        transport: Arc<dyn HttpTransport>,
        auth_manager: &dyn AuthManager,
    ) -> Self {
        let request_builder = RequestBuilder::new(
            config.base_url.clone(),
            config.api_version.clone(),
            auth_manager.clone_box(),
        );

        Self {
            transport,
            request_builder,
        }
    }

    fn log_usage(model: &str, started: Instant, response: &GenerateContentResponse) {
        let duration_ms = started.elapsed().as_millis() as u64;
        if let Some(usage) = &response.usage_metadata {
            tracing::info!(
                model,
                duration_ms,
                prompt_tokens = usage.prompt_token_count,
                completion_tokens = usage.candidates_token_count.unwrap_or(0),
                total_tokens = usage.total_token_count,
                "content generation completed"
            );
        } else {
            tracing::info!(model, duration_ms, "content generation completed");
        }
    }
}

#[async_trait]
impl ContentService for ContentServiceImpl {
    async fn generate(
        &self,
        model: &str,
        request: GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GeminiError> {
        validate_generate_request(model, &request)?;

        tracing::debug!(
            model,
            contents = request.contents.len(),
            "starting content generation"
        );
        let started = Instant::now();

        let path = endpoints::generate_content(model);
        let http_request = self.request_builder.build_request(&path, &request)?;

        let http_response = self.transport.post(http_request).await.map_err(|e| {
            let error: GeminiError = e.into();
            tracing::error!(model, error = %error, "content generation request failed");
            error
        })?;

        let response: GenerateContentResponse = ResponseParser::parse_response(http_response)?;
        Self::log_usage(model, started, &response);

        Ok(response)
    }

    async fn generate_stream(
        &self,
        model: &str,
        request: GenerateContentRequest,
    ) -> Result<ContentStream, GeminiError> {
        validate_generate_request(model, &request)?;

        tracing::debug!(
            model,
            contents = request.contents.len(),
            "starting streamed content generation"
        );

        let path = endpoints::stream_generate_content(model);
        let http_request = self.request_builder.build_request(&path, &request)?;

        let chunk_stream = self.transport.post_streaming(http_request).await.map_err(|e| {
            let error: GeminiError = e.into();
            tracing::error!(model, error = %error, "streaming request failed");
            error
        })?;

        let byte_stream = chunk_stream.map(|result| result.map_err(GeminiError::from));
        let objects = JsonObjectStream::new(Box::pin(byte_stream));

        let model_name = model.to_string();
        let typed = objects.map(move |result| {
            let value = result?;
            serde_json::from_value::<GenerateContentResponse>(value.clone()).map_err(|e| {
                tracing::warn!(model = %model_name, error = %e, "streamed object failed typed decode");
                GeminiError::Response(ResponseError::Deserialization {
                    message: e.to_string(),
                    body: value.to_string(),
                })
            })
        });

        Ok(Box::pin(typed))
    }
}
