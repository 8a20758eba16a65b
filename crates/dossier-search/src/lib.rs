//! Elasticsearch-backed document storage and hybrid search.
//!
//! Every identity gets its own index; lifecycle, writes and the two search
//! channels (lexical match and cosine `script_score`) all go through
//! [`SearchStore`].

pub mod error;
mod query;
pub mod store;

pub use error::SearchError;
pub use store::SearchStore;
