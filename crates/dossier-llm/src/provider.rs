use crate::error::LlmError;

/// Capability interface over an external model endpoint: raw prompt
/// completion and text embedding. Concrete providers are swappable without
/// touching the pipeline.
pub trait LlmProvider: Send + Sync {
    /// Generate a completion for a raw prompt.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint cannot be reached or replies with
    /// an invalid response.
    fn complete(&self, prompt: &str) -> impl Future<Output = Result<String, LlmError>> + Send;

    /// Embed a text into a fixed-length vector.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint cannot be reached or replies with
    /// an invalid response.
    fn embed(&self, text: &str) -> impl Future<Output = Result<Vec<f32>, LlmError>> + Send;

    fn name(&self) -> &str;
}
