//! Mapping from HTTP status codes and API error bodies to typed errors.

use serde::Deserialize;

use super::categories::*;
use super::types::GeminiError;

/// Standard Google API error envelope.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
}

/// Extract the error message from a Google API error body, falling back to
/// the raw body text when it is not the standard envelope.
fn extract_message(body: &[u8]) -> String {
    match serde_json::from_slice::<ApiErrorBody>(body) {
        Ok(parsed) if !parsed.error.message.is_empty() => {
            if parsed.error.status.is_empty() {
                parsed.error.message
            } else {
                format!("{} ({})", parsed.error.message, parsed.error.status)
            }
        }
        _ => String::from_utf8_lossy(body).trim().to_string(),
    }
}

/// Maps an HTTP status code (with response body) to a `GeminiError`.
///
/// - 400 -> `RequestError::Validation`
/// - 401 -> `AuthenticationError::InvalidApiKey`
/// - 403 -> `AuthenticationError::QuotaExceeded`
/// - 404 -> `RequestError::NotFound`
/// - 429 -> `RateLimitError::TooManyRequests`
/// - 503 -> `ServerError::ServiceUnavailable`
/// - other 5xx -> `ServerError::InternalError`
pub fn map_http_status(status: u16, body: &[u8]) -> GeminiError {
    let message = extract_message(body);

    match status {
        401 => GeminiError::Authentication(AuthenticationError::InvalidApiKey),
        403 => GeminiError::Authentication(AuthenticationError::QuotaExceeded),
        404 => GeminiError::Request(RequestError::NotFound { message }),
        429 => GeminiError::RateLimit(RateLimitError::TooManyRequests { retry_after: None }),
        503 => GeminiError::Server(ServerError::ServiceUnavailable { retry_after: None }),
        s if s >= 500 => GeminiError::Server(ServerError::InternalError { message }),
        _ => GeminiError::Request(RequestError::Validation { message }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maps_standard_error_body() {
        let body = br#"{"error":{"code":400,"message":"Invalid model name","status":"INVALID_ARGUMENT"}}"#;
        let err = map_http_status(400, body);
        match err {
            GeminiError::Request(RequestError::Validation { message }) => {
                assert_eq!(message, "Invalid model name (INVALID_ARGUMENT)");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_maps_auth_statuses() {
        assert!(matches!(
            map_http_status(401, b""),
            GeminiError::Authentication(AuthenticationError::InvalidApiKey)
        ));
        assert!(matches!(
            map_http_status(403, b""),
            GeminiError::Authentication(AuthenticationError::QuotaExceeded)
        ));
    }

    #[test]
    fn test_maps_server_statuses() {
        assert!(matches!(
            map_http_status(500, b"boom"),
            GeminiError::Server(ServerError::InternalError { .. })
        ));
        assert!(matches!(
            map_http_status(503, b""),
            GeminiError::Server(ServerError::ServiceUnavailable { .. })
        ));
    }

    #[test]
    fn test_falls_back_to_raw_body() {
        let err = map_http_status(404, b"no such model");
        match err {
            GeminiError::Request(RequestError::NotFound { message }) => {
                assert_eq!(message, "no such model");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
