//! Core pipeline: chunking, embedding validation, hybrid retrieval and
//! answer composition over per-identity document collections.

pub mod chunker;
pub mod config;
pub mod embedding;
pub mod encoding;
pub mod engine;
pub mod error;
pub mod merge;
pub mod prompt;

pub use config::Config;
pub use embedding::EmbeddingGateway;
pub use engine::{Engine, EngineOptions};
pub use error::EngineError;
