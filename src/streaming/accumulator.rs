//! Accumulates streamed response chunks into one complete response.

use crate::types::{Candidate, Content, GenerateContentResponse, Part, PromptFeedback, UsageMetadata};

/// Combines streamed `GenerateContentResponse` chunks: text parts are
/// concatenated per candidate, metadata fields take the last chunk's value.
#[derive(Default)]
pub struct StreamAccumulator {
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
    usage_metadata: Option<UsageMetadata>,
    model_version: Option<String>,
}

impl StreamAccumulator {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one streamed chunk into the accumulated state.
    pub fn add_chunk(&mut self, chunk: GenerateContentResponse) {
        if chunk.prompt_feedback.is_some() {
            self.prompt_feedback = chunk.prompt_feedback;
        }
        if chunk.usage_metadata.is_some() {
            self.usage_metadata = chunk.usage_metadata;
        }
        if chunk.model_version.is_some() {
            self.model_version = chunk.model_version;
        }

        if let Some(new_candidates) = chunk.candidates {
            for (idx, incoming) in new_candidates.into_iter().enumerate() {
                match self.candidates.get_mut(idx) {
                    Some(existing) => merge_candidate(existing, incoming),
                    None => self.candidates.push(incoming),
                }
            }
        }
    }

    /// Consume the accumulator and produce the combined response.
    pub fn finalize(self) -> GenerateContentResponse {
        GenerateContentResponse {
            candidates: if self.candidates.is_empty() {
                None
            } else {
                Some(self.candidates)
            },
            prompt_feedback: self.prompt_feedback,
            usage_metadata: self.usage_metadata,
            model_version: self.model_version,
        }
    }
}

fn merge_candidate(existing: &mut Candidate, incoming: Candidate) {
    if let Some(new_content) = incoming.content {
        match existing.content.as_mut() {
            Some(content) => merge_content(content, new_content),
            None => existing.content = Some(new_content),
        }
    }

    if incoming.finish_reason.is_some() {
        existing.finish_reason = incoming.finish_reason;
    }
    if incoming.safety_ratings.is_some() {
        existing.safety_ratings = incoming.safety_ratings;
    }
    if incoming.index.is_some() {
        existing.index = incoming.index;
    }
    if incoming.token_count.is_some() {
        existing.token_count = incoming.token_count;
    }
}

fn merge_content(existing: &mut Content, incoming: Content) {
    if existing.role.is_none() {
        existing.role = incoming.role;
    }

    for part in incoming.parts {
        match (existing.parts.last_mut(), part) {
            (Some(Part::Text { text }), Part::Text { text: addition }) => {
                text.push_str(&addition);
            }
            (_, part) => existing.parts.push(part),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FinishReason, Role};

    fn text_chunk(text: &str) -> GenerateContentResponse {
        GenerateContentResponse {
            candidates: Some(vec![Candidate {
                content: Some(Content {
                    role: Some(Role::Model),
                    parts: vec![Part::text(text)],
                }),
                finish_reason: None,
                safety_ratings: None,
                index: Some(0),
                token_count: None,
            }]),
            prompt_feedback: None,
            usage_metadata: None,
            model_version: None,
        }
    }

    #[test]
    fn test_concatenates_text_parts() {
        let mut accumulator = StreamAccumulator::new();
        accumulator.add_chunk(text_chunk("Hello"));
        accumulator.add_chunk(text_chunk(" World"));

        let response = accumulator.finalize();
        assert_eq!(response.text(), "Hello World");
        let candidate = &response.candidates.unwrap()[0];
        assert_eq!(candidate.content.as_ref().unwrap().parts.len(), 1);
    }

    #[test]
    fn test_last_chunk_metadata_wins() {
        let mut accumulator = StreamAccumulator::new();
        accumulator.add_chunk(text_chunk("a"));

        let mut last = text_chunk("b");
        last.usage_metadata = Some(UsageMetadata {
            prompt_token_count: 5,
            candidates_token_count: Some(2),
            total_token_count: 7,
        });
        if let Some(candidates) = last.candidates.as_mut() {
            candidates[0].finish_reason = Some(FinishReason::Stop);
        }
        accumulator.add_chunk(last);

        let response = accumulator.finalize();
        assert_eq!(response.usage_metadata.unwrap().total_token_count, 7);
        assert_eq!(
            response.candidates.unwrap()[0].finish_reason,
            Some(FinishReason::Stop)
        );
    }

    #[test]
    fn test_finish_only_chunk_merges_without_content() {
        let mut accumulator = StreamAccumulator::new();
        accumulator.add_chunk(text_chunk("done"));
        accumulator.add_chunk(GenerateContentResponse {
            candidates: Some(vec![Candidate {
                content: None,
                finish_reason: Some(FinishReason::MaxTokens),
                safety_ratings: None,
                index: Some(0),
                token_count: Some(12),
            }]),
            prompt_feedback: None,
            usage_metadata: None,
            model_version: None,
        });

        let response = accumulator.finalize();
        assert_eq!(response.text(), "done");
        let candidate = &response.candidates.unwrap()[0];
        assert_eq!(candidate.finish_reason, Some(FinishReason::MaxTokens));
        assert_eq!(candidate.token_count, Some(12));
    }

    #[test]
    fn test_empty_accumulator_finalizes_to_empty_response() {
        let response = StreamAccumulator::new().finalize();
        assert!(response.candidates.is_none());
        assert!(response.usage_metadata.is_none());
    }
}
