//! Request and response types for the `generateContent` API surface.

mod content;
mod generation;
mod safety;

pub use content::{Blob, Content, Part, Role};
pub use generation::{
    BlockReason, Candidate, FinishReason, GenerateContentRequest, GenerateContentResponse,
    GenerationConfig, PromptFeedback, UsageMetadata,
};
pub use safety::{HarmBlockThreshold, HarmCategory, HarmProbability, SafetyRating, SafetySetting};
