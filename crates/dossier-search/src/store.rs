use serde::{Deserialize, Serialize};

use crate::error::SearchError;
use crate::query;

/// HTTP client for one Elasticsearch cluster.
///
/// Index names are derived from the caller identity, so every user reads and
/// writes a disjoint namespace.
#[derive(Debug, Clone)]
pub struct SearchStore {
    client: reqwest::Client,
    base_url: String,
    index_prefix: String,
    dims: usize,
}

#[derive(Serialize)]
struct IndexDocument<'a> {
    content: &'a str,
    embedding: &'a [f32],
}

#[derive(Deserialize)]
struct SearchResponse {
    hits: HitsEnvelope,
}

#[derive(Deserialize)]
struct HitsEnvelope {
    hits: Vec<Hit>,
}

#[derive(Deserialize)]
struct Hit {
    #[serde(rename = "_source")]
    source: HitSource,
}

#[derive(Deserialize)]
struct HitSource {
    content: String,
}

impl SearchStore {
    /// Create a store talking to the cluster at `base_url`.
    ///
    /// # Panics
    ///
    /// Panics if the underlying `reqwest` client cannot be constructed
    /// (unreachable in practice).
    #[must_use]
    pub fn new(base_url: &str, index_prefix: &str, dims: usize) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("reqwest client builder should not fail with timeout only");
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            index_prefix: index_prefix.to_owned(),
            dims,
        }
    }

    /// Elasticsearch index names must be lowercase.
    fn index_name(&self, identity: &str) -> String {
        format!("{}{identity}", self.index_prefix).to_lowercase()
    }

    /// Check that the cluster answers at all.
    ///
    /// # Errors
    ///
    /// Returns an error if the cluster is unreachable or replies with a
    /// non-success status.
    pub async fn ping(&self) -> Result<(), SearchError> {
        let resp = self.client.get(&self.base_url).send().await?;
        check_status(resp).await?;
        Ok(())
    }

    /// Create the identity's index if it does not exist yet.
    ///
    /// Idempotent: no-op when the index is already there.
    ///
    /// # Errors
    ///
    /// Returns an error if the existence probe or the creation request fails.
    pub async fn ensure_index(&self, identity: &str) -> Result<(), SearchError> {
        let index = self.index_name(identity);
        let head = self
            .client
            .head(format!("{}/{index}", self.base_url))
            .send()
            .await?;

        if head.status().is_success() {
            return Ok(());
        }
        if head.status() != reqwest::StatusCode::NOT_FOUND {
            let status = head.status().as_u16();
            let body = head.text().await.unwrap_or_default();
            return Err(SearchError::Status { status, body });
        }

        tracing::debug!(index, dims = self.dims, "creating index");
        let resp = self
            .client
            .put(format!("{}/{index}", self.base_url))
            .json(&query::index_mappings(self.dims))
            .send()
            .await?;
        check_status(resp).await?;
        Ok(())
    }

    /// Drop the identity's index and everything in it.
    ///
    /// Deleting an absent index succeeds: the end state is the same.
    ///
    /// # Errors
    ///
    /// Returns an error if the cluster is unreachable or rejects the delete
    /// for any reason other than the index not existing.
    pub async fn delete_index(&self, identity: &str) -> Result<(), SearchError> {
        let index = self.index_name(identity);
        let resp = self
            .client
            .delete(format!("{}/{index}", self.base_url))
            .send()
            .await?;

        let status = resp.status();
        if status.is_success() || status == reqwest::StatusCode::NOT_FOUND {
            return Ok(());
        }
        let body = resp.text().await.unwrap_or_default();
        Err(SearchError::Status {
            status: status.as_u16(),
            body,
        })
    }

    /// Store one chunk with its embedding in the identity's index.
    ///
    /// # Errors
    ///
    /// Returns an error if the write is rejected or the cluster is
    /// unreachable.
    pub async fn add_document(
        &self,
        identity: &str,
        content: &str,
        embedding: &[f32],
    ) -> Result<(), SearchError> {
        let index = self.index_name(identity);
        let resp = self
            .client
            .post(format!("{}/{index}/_doc", self.base_url))
            .json(&IndexDocument { content, embedding })
            .send()
            .await?;
        check_status(resp).await?;
        Ok(())
    }

    /// Lexical channel: top `limit` chunks by BM25 match on `content`.
    ///
    /// # Errors
    ///
    /// Returns an error if the search request fails or the response cannot
    /// be parsed.
    pub async fn search_text(
        &self,
        identity: &str,
        text: &str,
        limit: usize,
    ) -> Result<Vec<String>, SearchError> {
        self.run_search(identity, &query::match_query(text, limit))
            .await
    }

    /// Vector channel: top `limit` chunks by cosine similarity to the query
    /// embedding.
    ///
    /// # Errors
    ///
    /// Returns an error if the search request fails or the response cannot
    /// be parsed.
    pub async fn search_vector(
        &self,
        identity: &str,
        embedding: &[f32],
        limit: usize,
    ) -> Result<Vec<String>, SearchError> {
        self.run_search(identity, &query::script_score_query(embedding, limit))
            .await
    }

    async fn run_search(
        &self,
        identity: &str,
        body: &serde_json::Value,
    ) -> Result<Vec<String>, SearchError> {
        let index = self.index_name(identity);
        let resp = self
            .client
            .post(format!("{}/{index}/_search", self.base_url))
            .json(body)
            .send()
            .await?;
        let resp = check_status(resp).await?;

        let bytes = resp.bytes().await?;
        let parsed: SearchResponse = serde_json::from_slice(&bytes)?;
        Ok(parsed
            .hits
            .hits
            .into_iter()
            .map(|hit| hit.source.content)
            .collect())
    }
}

async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, SearchError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(SearchError::Status {
        status: status.as_u16(),
        body,
    })
}
