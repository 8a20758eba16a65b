//! Embedding gateway: every vector entering the index or a query passes
//! through validation here first.

use std::sync::Arc;

use dossier_llm::LlmProvider;

use crate::error::EngineError;

pub struct EmbeddingGateway<P> {
    provider: Arc<P>,
    dims: usize,
}

impl<P> std::fmt::Debug for EmbeddingGateway<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmbeddingGateway")
            .field("dims", &self.dims)
            .finish_non_exhaustive()
    }
}

impl<P> Clone for EmbeddingGateway<P> {
    fn clone(&self) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
            dims: self.dims,
        }
    }
}

impl<P: LlmProvider> EmbeddingGateway<P> {
    #[must_use]
    pub fn new(provider: Arc<P>, dims: usize) -> Self {
        Self { provider, dims }
    }

    /// Embed `text` and validate the result against the index schema.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider fails or produces a vector that is
    /// empty, contains non-numeric values, or has the wrong dimension count.
    pub async fn embed(&self, text: &str) -> Result<Vec<f32>, EngineError> {
        let vector = self.provider.embed(text).await?;
        validate_embedding(&vector, self.dims)?;
        Ok(vector)
    }
}

/// Reject vectors that the index schema cannot hold.
///
/// # Errors
///
/// Returns [`EngineError::InvalidEmbedding`] naming the first violated rule.
pub fn validate_embedding(vector: &[f32], dims: usize) -> Result<(), EngineError> {
    if vector.is_empty() {
        return Err(EngineError::InvalidEmbedding {
            reason: "empty vector".into(),
        });
    }
    if let Some(position) = vector.iter().position(|v| !v.is_finite()) {
        return Err(EngineError::InvalidEmbedding {
            reason: format!("non-numeric value at position {position}"),
        });
    }
    if vector.len() != dims {
        return Err(EngineError::InvalidEmbedding {
            reason: format!("expected {dims} dimensions, got {}", vector.len()),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use dossier_llm::mock::MockProvider;

    use super::*;

    fn reason(result: Result<(), EngineError>) -> String {
        match result.unwrap_err() {
            EngineError::InvalidEmbedding { reason } => reason,
            other => panic!("expected invalid embedding, got {other:?}"),
        }
    }

    #[test]
    fn valid_vector_passes() {
        assert!(validate_embedding(&[0.1, -0.2, 0.3], 3).is_ok());
    }

    #[test]
    fn empty_vector_rejected() {
        assert_eq!(reason(validate_embedding(&[], 3)), "empty vector");
    }

    #[test]
    fn nan_rejected_with_position() {
        let vector = [0.1, f32::NAN, 0.3];
        assert_eq!(
            reason(validate_embedding(&vector, 3)),
            "non-numeric value at position 1"
        );
    }

    #[test]
    fn infinity_rejected() {
        let vector = [f32::INFINITY, 0.2];
        assert_eq!(
            reason(validate_embedding(&vector, 2)),
            "non-numeric value at position 0"
        );
    }

    #[test]
    fn dimension_mismatch_rejected() {
        assert_eq!(
            reason(validate_embedding(&[0.1, 0.2], 3)),
            "expected 3 dimensions, got 2"
        );
    }

    #[tokio::test]
    async fn gateway_accepts_schema_conformant_vector() {
        let provider = Arc::new(MockProvider::default().with_embedding(vec![0.5; 4]));
        let gateway = EmbeddingGateway::new(provider, 4);
        assert_eq!(gateway.embed("hello").await.unwrap(), vec![0.5; 4]);
    }

    #[tokio::test]
    async fn gateway_rejects_wrong_dims() {
        let provider = Arc::new(MockProvider::default().with_embedding(vec![0.5; 3]));
        let gateway = EmbeddingGateway::new(provider, 4);
        let err = gateway.embed("hello").await.unwrap_err();
        assert!(matches!(err, EngineError::InvalidEmbedding { .. }));
    }

    #[tokio::test]
    async fn gateway_propagates_provider_failure() {
        let provider = Arc::new(MockProvider::failing_embed());
        let gateway = EmbeddingGateway::new(provider, 4);
        let err = gateway.embed("hello").await.unwrap_err();
        assert!(matches!(err, EngineError::Llm(_)));
    }
}
