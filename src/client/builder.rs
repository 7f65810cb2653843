//! Builder for [`GeminiClient`].

use secrecy::SecretString;
use std::sync::Arc;
use std::time::Duration;

use super::client::GeminiClient;
use crate::auth::ApiKeyAuthManager;
use crate::config::{AuthMethod, GeminiConfig};
use crate::error::{ConfigurationError, GeminiError};
use crate::transport::{HttpTransport, ReqwestTransport};

/// Builder for `GeminiClient`.
///
/// The API key falls back to `GEMINI_API_KEY`/`GOOGLE_API_KEY` when not set
/// explicitly. A custom transport can be injected, which is how the test
/// suites run the client against a mock.
#[derive(Default)]
pub struct GeminiClientBuilder {
    config: Option<GeminiConfig>,
    api_key: Option<SecretString>,
    base_url: Option<String>,
    api_version: Option<String>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    auth_method: Option<AuthMethod>,
    transport: Option<Arc<dyn HttpTransport>>,
}

impl GeminiClientBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder seeded from an existing configuration.
    pub fn from_config(config: GeminiConfig) -> Self {
        Self {
            config: Some(config),
            ..Self::default()
        }
    }

    /// Set the API key.
    pub fn api_key(mut self, api_key: SecretString) -> Self {
        self.api_key = Some(api_key);
        self
    }

    /// Set the base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the API version.
    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = Some(version.into());
        self
    }

    /// Set the whole-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the connect timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Set the authentication method.
    pub fn auth_method(mut self, method: AuthMethod) -> Self {
        self.auth_method = Some(method);
        self
    }

    /// Inject a custom transport instead of the default reqwest one.
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    fn resolve_config(&mut self) -> Result<GeminiConfig, GeminiError> {
        if let Some(config) = self.config.take() {
            return Ok(config);
        }

        let api_key = match self.api_key.take() {
            Some(key) => key,
            None => {
                let from_env = std::env::var("GEMINI_API_KEY")
                    .or_else(|_| std::env::var("GOOGLE_API_KEY"))
                    .map_err(|_| ConfigurationError::MissingApiKey)?;
                SecretString::new(from_env)
            }
        };

        let mut builder = GeminiConfig::builder().api_key(api_key);
        if let Some(base_url) = &self.base_url {
            builder = builder.base_url(base_url)?;
        }
        if let Some(version) = &self.api_version {
            builder = builder.api_version(version);
        }
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = self.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(method) = self.auth_method {
            builder = builder.auth_method(method);
        }

        builder.build()
    }

    /// Build the client.
    pub fn build(mut self) -> Result<GeminiClient, GeminiError> {
        let config = self.resolve_config()?;

        let transport: Arc<dyn HttpTransport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(
                ReqwestTransport::new(config.timeout, config.connect_timeout).map_err(|e| {
                    ConfigurationError::InvalidConfiguration {
                        message: e.to_string(),
                    }
                })?,
            ),
        };

        let auth_manager = Arc::new(ApiKeyAuthManager::from_config(&config));

        Ok(GeminiClient::from_parts(config, transport, auth_manager))
    }
}
