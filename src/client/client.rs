//! Main client for the Generative Language API.

use once_cell::sync::OnceCell;
use std::sync::Arc;

use super::builder::GeminiClientBuilder;
use crate::auth::AuthManager;
use crate::config::GeminiConfig;
use crate::error::GeminiError;
use crate::services::content::{ContentService, ContentServiceImpl};
use crate::transport::HttpTransport;

/// Client for the Generative Language API.
///
/// # Example
///
/// ```no_run
/// use gemini_stream::GeminiClient;
/// use secrecy::SecretString;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = GeminiClient::builder()
///     .api_key(SecretString::new("your-api-key".into()))
///     .build()?;
///
/// let content = client.content();
/// # Ok(())
/// # }
/// ```
pub struct GeminiClient {
    config: GeminiConfig,
    transport: Arc<dyn HttpTransport>,
    auth_manager: Arc<dyn AuthManager>,

    // Lazily initialized on first access
    content_service: OnceCell<ContentServiceImpl>,
}

impl GeminiClient {
    /// Creates a new client builder.
    pub fn builder() -> GeminiClientBuilder {
        GeminiClientBuilder::new()
    }

    /// Creates a client from environment variables
    /// (`GEMINI_API_KEY`/`GOOGLE_API_KEY` and friends).
    pub fn from_env() -> Result<Self, GeminiError> {
        let config = GeminiConfig::from_env()?;
        Self::new(config)
    }

    /// Creates a client from a configuration object.
    pub fn new(config: GeminiConfig) -> Result<Self, GeminiError> {
        GeminiClientBuilder::from_config(config).build()
    }

    pub(super) fn from_parts(
        config: GeminiConfig,
        transport: Arc<dyn HttpTransport>,
        auth_manager: Arc<dyn AuthManager>,
    ) -> Self {
        Self {
            config,
            transport,
            auth_manager,
            content_service: OnceCell::new(),
        }
    }

    /// Returns the client configuration.
    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    /// Access the content generation service.
    pub fn content(&self) -> &dyn ContentService {
        self.content_service.get_or_init(|| {
            ContentServiceImpl::new(
                &self.config,
                Arc::clone(&self.transport),
                self.auth_manager.as_ref(),
            )
        })
    }
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Create a shared client from configuration.
pub fn create_client(config: GeminiConfig) -> Result<Arc<GeminiClient>, GeminiError> {
    Ok(Arc::new(GeminiClient::new(config)?))
}

/// Create a shared client from environment variables.
pub fn create_client_from_env() -> Result<Arc<GeminiClient>, GeminiError> {
    Ok(Arc::new(GeminiClient::from_env()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AuthMethod, DEFAULT_API_VERSION, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
    use secrecy::SecretString;
    use std::time::Duration;

    #[test]
    fn test_builder_with_api_key() {
        let client = GeminiClientBuilder::new()
            .api_key(SecretString::new("test-api-key".into()))
            .build()
            .unwrap();

        assert_eq!(client.config().api_version, DEFAULT_API_VERSION);
        assert_eq!(client.config().auth_method, AuthMethod::Header);
    }

    #[test]
    fn test_builder_custom_settings() {
        let client = GeminiClientBuilder::new()
            .api_key(SecretString::new("test-api-key".into()))
            .api_version("v1")
            .timeout(Duration::from_secs(60))
            .auth_method(AuthMethod::QueryParam)
            .build()
            .unwrap();

        assert_eq!(client.config().api_version, "v1");
        assert_eq!(client.config().timeout, Duration::from_secs(60));
        assert_eq!(client.config().auth_method, AuthMethod::QueryParam);
    }

    #[test]
    fn test_new_from_config() {
        let config = GeminiConfig::builder()
            .api_key(SecretString::new("test-key".into()))
            .build()
            .unwrap();

        assert!(GeminiClient::new(config).is_ok());
    }

    #[test]
    fn test_default_values() {
        let client = GeminiClientBuilder::new()
            .api_key(SecretString::new("test-key".into()))
            .build()
            .unwrap();

        assert_eq!(
            client.config().base_url.as_str(),
            format!("{DEFAULT_BASE_URL}/")
        );
        assert_eq!(
            client.config().timeout,
            Duration::from_secs(DEFAULT_TIMEOUT_SECS)
        );
    }
}
