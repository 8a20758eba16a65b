use dossier_llm::LlmError;
use dossier_search::SearchError;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("invalid embedding: {reason}")]
    InvalidEmbedding { reason: String },

    /// Ingestion stops at the first failed chunk. Chunks written before the
    /// failure stay in the index.
    #[error("ingestion aborted after {chunks_stored} stored chunks: {source}")]
    IngestionAborted {
        chunks_stored: usize,
        #[source]
        source: Box<EngineError>,
    },

    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error(transparent)]
    Search(#[from] SearchError),
}

pub type Result<T> = std::result::Result<T, EngineError>;
