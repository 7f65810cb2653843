//! Safety categories, probabilities and settings.

use serde::{Deserialize, Serialize};

/// Harm category for safety classification.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HarmCategory {
    /// Harassment content.
    HarmCategoryHarassment,
    /// Hate speech.
    HarmCategoryHateSpeech,
    /// Sexually explicit content.
    HarmCategorySexuallyExplicit,
    /// Dangerous content.
    HarmCategoryDangerousContent,
    /// Civic integrity content.
    HarmCategoryCivicIntegrity,
}

/// Probability that content falls into a harm category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HarmProbability {
    /// Unspecified probability.
    HarmProbabilityUnspecified,
    /// Negligible probability.
    Negligible,
    /// Low probability.
    Low,
    /// Medium probability.
    Medium,
    /// High probability.
    High,
}

/// Safety rating attached to a candidate or prompt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SafetyRating {
    /// The harm category being rated.
    pub category: HarmCategory,
    /// The probability of harm.
    pub probability: HarmProbability,
    /// Whether the content was blocked for this category.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocked: Option<bool>,
}

/// Threshold at which a harm category blocks content.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HarmBlockThreshold {
    /// Block when probability is low or above.
    BlockLowAndAbove,
    /// Block when probability is medium or above.
    BlockMediumAndAbove,
    /// Block only high-probability content.
    BlockOnlyHigh,
    /// Never block.
    BlockNone,
}

/// Per-category safety setting for a request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SafetySetting {
    /// The harm category to configure.
    pub category: HarmCategory,
    /// The blocking threshold for the category.
    pub threshold: HarmBlockThreshold,
}
