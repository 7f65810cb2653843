//! Endpoint path builders for the Generative Language API.

/// Base path for models endpoints.
pub const MODELS: &str = "/models";

/// Path for the generateContent endpoint of a model.
///
/// ```
/// use gemini_stream::transport::endpoints;
///
/// assert_eq!(
///     endpoints::generate_content("gemini-pro"),
///     "/models/gemini-pro:generateContent"
/// );
/// ```
pub fn generate_content(model: &str) -> String {
    format!("{MODELS}/{model}:generateContent")
}

/// Path for the streamGenerateContent endpoint of a model.
///
/// ```
/// use gemini_stream::transport::endpoints;
///
/// assert_eq!(
///     endpoints::stream_generate_content("gemini-pro"),
///     "/models/gemini-pro:streamGenerateContent"
/// );
/// ```
pub fn stream_generate_content(model: &str) -> String {
    format!("{MODELS}/{model}:streamGenerateContent")
}
