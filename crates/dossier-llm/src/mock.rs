//! Test-only mock LLM provider.

use std::sync::{Arc, Mutex};

use crate::error::LlmError;
use crate::provider::LlmProvider;

#[derive(Debug, Clone)]
pub struct MockProvider {
    responses: Arc<Mutex<Vec<String>>>,
    prompts: Arc<Mutex<Vec<String>>>,
    embed_inputs: Arc<Mutex<Vec<String>>>,
    pub default_response: String,
    pub embedding: Vec<f32>,
    pub fail_complete: bool,
    pub fail_embed: bool,
}

impl Default for MockProvider {
    fn default() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            prompts: Arc::new(Mutex::new(Vec::new())),
            embed_inputs: Arc::new(Mutex::new(Vec::new())),
            default_response: "mock response".into(),
            embedding: vec![0.0; 4096],
            fail_complete: false,
            fail_embed: false,
        }
    }
}

impl MockProvider {
    #[must_use]
    pub fn with_responses(responses: Vec<String>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses)),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_embedding(mut self, embedding: Vec<f32>) -> Self {
        self.embedding = embedding;
        self
    }

    #[must_use]
    pub fn failing() -> Self {
        Self {
            fail_complete: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn failing_embed() -> Self {
        Self {
            fail_embed: true,
            ..Self::default()
        }
    }

    /// Prompts passed to `complete`, in call order.
    #[must_use]
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    /// Texts passed to `embed`, in call order.
    #[must_use]
    pub fn embed_inputs(&self) -> Vec<String> {
        self.embed_inputs.lock().unwrap().clone()
    }
}

impl LlmProvider for MockProvider {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_owned());
        if self.fail_complete {
            return Err(LlmError::Other("mock LLM error".into()));
        }
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok(self.default_response.clone())
        } else {
            Ok(responses.remove(0))
        }
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, LlmError> {
        self.embed_inputs.lock().unwrap().push(text.to_owned());
        if self.fail_embed {
            return Err(LlmError::Other("mock embed error".into()));
        }
        Ok(self.embedding.clone())
    }

    #[allow(clippy::unnecessary_literal_bound)]
    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_default_response_when_no_scripted() {
        let provider = MockProvider::default();
        let response = provider.complete("hi").await.unwrap();
        assert_eq!(response, "mock response");
    }

    #[tokio::test]
    async fn scripted_responses_in_order() {
        let provider = MockProvider::with_responses(vec!["first".into(), "second".into()]);
        assert_eq!(provider.complete("a").await.unwrap(), "first");
        assert_eq!(provider.complete("b").await.unwrap(), "second");
        assert_eq!(provider.complete("c").await.unwrap(), "mock response");
    }

    #[tokio::test]
    async fn records_prompts() {
        let provider = MockProvider::default();
        provider.complete("one").await.unwrap();
        provider.complete("two").await.unwrap();
        assert_eq!(provider.prompts(), vec!["one", "two"]);
    }

    #[tokio::test]
    async fn records_embed_inputs() {
        let provider = MockProvider::default().with_embedding(vec![0.5; 4]);
        provider.embed("chunk one").await.unwrap();
        provider.embed("chunk two").await.unwrap();
        assert_eq!(provider.embed_inputs(), vec!["chunk one", "chunk two"]);
    }

    #[tokio::test]
    async fn failing_complete_errors() {
        let provider = MockProvider::failing();
        assert!(provider.complete("hi").await.is_err());
    }

    #[tokio::test]
    async fn failing_embed_errors() {
        let provider = MockProvider::failing_embed();
        assert!(provider.embed("hi").await.is_err());
    }

    #[tokio::test]
    async fn embedding_is_configurable() {
        let provider = MockProvider::default().with_embedding(vec![1.0, 2.0]);
        assert_eq!(provider.embed("x").await.unwrap(), vec![1.0, 2.0]);
    }
}
