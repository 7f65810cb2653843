//! HTTP request builder for the Generative Language API.
//!
//! Joins the base URL, API version and endpoint path, applies
//! authentication, and serializes the JSON body.

use bytes::Bytes;
use serde::Serialize;
use std::collections::HashMap;
use url::Url;

use super::http::HttpRequest;
use crate::auth::AuthManager;
use crate::error::GeminiError;

/// Builder for requests to the API.
pub struct RequestBuilder {
    base_url: Url,
    api_version: String,
    auth_manager: Box<dyn AuthManager>,
}

impl RequestBuilder {
    /// Creates a new request builder.
    pub fn new(base_url: Url, api_version: String, auth_manager: Box<dyn AuthManager>) -> Self {
        Self {
            base_url,
            api_version,
            auth_manager,
        }
    }

    /// Builds a complete URL for the given endpoint path, prepending the
    /// API version and appending the auth query parameter when configured.
    pub fn build_url(&self, path: &str) -> Result<Url, GeminiError> {
        let path = path.trim_start_matches('/');
        let full_path = format!("{}/{}", self.api_version, path);

        let mut url = self.base_url.join(&full_path)?;

        if let Some((key, value)) = self.auth_manager.auth_query_param() {
            url.query_pairs_mut().append_pair(&key, &value);
        }

        Ok(url)
    }

    /// Builds a POST request with a JSON body for the given endpoint path.
    pub fn build_request<T: Serialize>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<HttpRequest, GeminiError> {
        let url = self.build_url(path)?;

        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        if let Some((key, value)) = self.auth_manager.auth_header() {
            headers.insert(key, value);
        }

        let body = Bytes::from(serde_json::to_vec(body)?);

        Ok(HttpRequest {
            url: url.to_string(),
            headers,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::ApiKeyAuthManager;
    use crate::config::{AuthMethod, GeminiConfig};
    use secrecy::SecretString;
    use serde::Serialize;

    #[derive(Serialize)]
    struct TestBody {
        message: String,
    }

    fn create_test_builder(auth_method: AuthMethod) -> RequestBuilder {
        let config = GeminiConfig::builder()
            .api_key(SecretString::new("test-api-key".into()))
            .auth_method(auth_method)
            .build()
            .unwrap();

        let auth_manager = ApiKeyAuthManager::from_config(&config);

        RequestBuilder::new(
            config.base_url,
            config.api_version,
            Box::new(auth_manager),
        )
    }

    #[test]
    fn test_build_url_with_version() {
        let builder = create_test_builder(AuthMethod::Header);
        let url = builder
            .build_url("/models/gemini-pro:streamGenerateContent")
            .unwrap();

        assert!(url
            .as_str()
            .contains("/v1beta/models/gemini-pro:streamGenerateContent"));
    }

    #[test]
    fn test_build_url_with_query_param_auth() {
        let builder = create_test_builder(AuthMethod::QueryParam);
        let url = builder.build_url("/models").unwrap();

        assert!(url.query().unwrap().contains("key=test-api-key"));
    }

    #[test]
    fn test_build_url_strips_leading_slash() {
        let builder = create_test_builder(AuthMethod::Header);
        let url1 = builder.build_url("/models").unwrap();
        let url2 = builder.build_url("models").unwrap();

        assert_eq!(url1, url2);
    }

    #[test]
    fn test_build_request_sets_headers_and_body() {
        let builder = create_test_builder(AuthMethod::Header);
        let body = TestBody {
            message: "hello".to_string(),
        };

        let request = builder.build_request("/models", &body).unwrap();

        assert_eq!(
            request.headers.get("Content-Type").map(String::as_str),
            Some("application/json")
        );
        assert_eq!(
            request.headers.get("x-goog-api-key").map(String::as_str),
            Some("test-api-key")
        );
        assert_eq!(&request.body[..], br#"{"message":"hello"}"#);
    }
}
