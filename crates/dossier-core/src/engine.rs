//! Engine: the four entry points the transport calls.
//!
//! `ensure_collection` and `delete_collection` manage the per-identity
//! index, `ingest` runs the document pipeline, `answer` runs hybrid
//! retrieval and answer composition.

use std::sync::Arc;

use dossier_llm::LlmProvider;
use dossier_search::SearchStore;

use crate::chunker;
use crate::config::Config;
use crate::embedding::EmbeddingGateway;
use crate::encoding;
use crate::error::EngineError;
use crate::merge;
use crate::prompt;

#[derive(Debug, Clone)]
pub struct EngineOptions {
    pub top_k_text: usize,
    pub top_k_vector: usize,
    pub cited_chunks: usize,
    pub language: String,
}

impl EngineOptions {
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            top_k_text: config.retrieval.top_k_text,
            top_k_vector: config.retrieval.top_k_vector,
            cited_chunks: config.answer.cited_chunks,
            language: config.answer.language.clone(),
        }
    }
}

/// Cheaply cloneable handle over the shared provider and search client.
pub struct Engine<P> {
    provider: Arc<P>,
    gateway: EmbeddingGateway<P>,
    store: SearchStore,
    options: EngineOptions,
}

impl<P> std::fmt::Debug for Engine<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl<P> Clone for Engine<P> {
    fn clone(&self) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
            gateway: self.gateway.clone(),
            store: self.store.clone(),
            options: self.options.clone(),
        }
    }
}

impl<P: LlmProvider> Engine<P> {
    #[must_use]
    pub fn new(provider: Arc<P>, store: SearchStore, dims: usize, options: EngineOptions) -> Self {
        Self {
            gateway: EmbeddingGateway::new(Arc::clone(&provider), dims),
            provider,
            store,
            options,
        }
    }

    /// Make sure the identity's collection exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the search backend is unreachable or rejects the
    /// creation.
    pub async fn ensure_collection(&self, identity: &str) -> Result<(), EngineError> {
        self.store.ensure_index(identity).await?;
        Ok(())
    }

    /// Drop the identity's collection and all documents in it.
    ///
    /// # Errors
    ///
    /// Returns an error if the search backend fails; an already-absent
    /// collection is not an error.
    pub async fn delete_collection(&self, identity: &str) -> Result<(), EngineError> {
        self.store.delete_index(identity).await?;
        tracing::info!(identity, "collection deleted");
        Ok(())
    }

    /// Run the ingestion pipeline: decode, chunk, embed and store.
    ///
    /// Returns the number of chunks written. Chunks are processed strictly
    /// in order and the first failure aborts the remainder; everything
    /// stored before it stays in the index.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::IngestionAborted`] carrying the committed
    /// chunk count, or a search error if the index cannot be ensured.
    pub async fn ingest(
        &self,
        identity: &str,
        bytes: &[u8],
        chunk_size: usize,
    ) -> Result<usize, EngineError> {
        let text = encoding::decode_bytes(bytes);
        let chunks = chunker::split_words(&text, chunk_size);
        tracing::info!(identity, chunks = chunks.len(), "ingesting document");

        self.store.ensure_index(identity).await?;

        let mut stored = 0usize;
        for chunk in &chunks {
            let embedding = match self.gateway.embed(chunk).await {
                Ok(vector) => vector,
                Err(e) => return Err(abort(stored, e)),
            };
            if let Err(e) = self.store.add_document(identity, chunk, &embedding).await {
                return Err(abort(stored, e.into()));
            }
            stored += 1;
        }

        tracing::info!(identity, stored, "document ingested");
        Ok(stored)
    }

    /// Answer a question over the identity's documents.
    ///
    /// The query is embedded once, both retrieval channels run against the
    /// identity's index (a failing channel degrades to no hits), and the
    /// merged documents ground the completion.
    ///
    /// # Errors
    ///
    /// Returns an error if the query embedding is invalid or the completion
    /// endpoint fails. Retrieval-channel failures are not errors.
    pub async fn answer(&self, identity: &str, question: &str) -> Result<String, EngineError> {
        let embedding = self.gateway.embed(question).await?;

        let vector_hits = match self
            .store
            .search_vector(identity, &embedding, self.options.top_k_vector)
            .await
        {
            Ok(hits) => hits,
            Err(e) => {
                tracing::warn!(identity, "vector channel degraded: {e}");
                Vec::new()
            }
        };

        let text_hits = match self
            .store
            .search_text(identity, question, self.options.top_k_text)
            .await
        {
            Ok(hits) => hits,
            Err(e) => {
                tracing::warn!(identity, "text channel degraded: {e}");
                Vec::new()
            }
        };

        let documents = merge::merge_channels(vector_hits, text_hits);
        tracing::info!(identity, documents = documents.len(), "composing answer");

        let grounded = prompt::grounding_prompt(&documents, question, &self.options.language);
        let answer = self.provider.complete(&grounded).await?;
        Ok(prompt::format_reply(
            &answer,
            &documents,
            self.options.cited_chunks,
        ))
    }
}

fn abort(chunks_stored: usize, source: EngineError) -> EngineError {
    EngineError::IngestionAborted {
        chunks_stored,
        source: Box::new(source),
    }
}
