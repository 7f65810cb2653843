//! Request validation for the content service.

use crate::error::{GeminiError, RequestError};
use crate::types::GenerateContentRequest;

pub(crate) fn validate_generate_request(
    model: &str,
    request: &GenerateContentRequest,
) -> Result<(), GeminiError> {
    if model.trim().is_empty() {
        return Err(validation_error("model must not be empty"));
    }

    if request.contents.is_empty() {
        return Err(validation_error("contents must not be empty"));
    }

    for (i, content) in request.contents.iter().enumerate() {
        if content.parts.is_empty() {
            return Err(validation_error(&format!("contents[{i}] has no parts")));
        }
    }

    if let Some(config) = &request.generation_config {
        if let Some(count) = config.candidate_count {
            if count < 1 {
                return Err(validation_error("candidateCount must be at least 1"));
            }
        }
        if let Some(temperature) = config.temperature {
            if !(0.0..=2.0).contains(&temperature) {
                return Err(validation_error("temperature must be within [0.0, 2.0]"));
            }
        }
    }

    Ok(())
}

fn validation_error(message: &str) -> GeminiError {
    GeminiError::Request(RequestError::Validation {
        message: message.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{GenerateContentRequest, GenerationConfig};

    #[test]
    fn test_valid_request_passes() {
        let request = GenerateContentRequest::from_prompt("hello");
        assert!(validate_generate_request("gemini-pro", &request).is_ok());
    }

    #[test]
    fn test_empty_model_rejected() {
        let request = GenerateContentRequest::from_prompt("hello");
        assert!(validate_generate_request("  ", &request).is_err());
    }

    #[test]
    fn test_empty_contents_rejected() {
        let mut request = GenerateContentRequest::from_prompt("hello");
        request.contents.clear();
        assert!(validate_generate_request("gemini-pro", &request).is_err());
    }

    #[test]
    fn test_bad_candidate_count_rejected() {
        let mut request = GenerateContentRequest::from_prompt("hello");
        request.generation_config = Some(GenerationConfig {
            candidate_count: Some(0),
            ..Default::default()
        });
        assert!(validate_generate_request("gemini-pro", &request).is_err());
    }

    #[test]
    fn test_out_of_range_temperature_rejected() {
        let mut request = GenerateContentRequest::from_prompt("hello");
        request.generation_config = Some(GenerationConfig {
            temperature: Some(3.5),
            ..Default::default()
        });
        assert!(validate_generate_request("gemini-pro", &request).is_err());
    }
}
