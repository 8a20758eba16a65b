//! Request body builders for the Elasticsearch HTTP API.

/// Mapping body for a per-identity index: full-text `content` plus a
/// fixed-dimension `dense_vector` for the embedding.
pub(crate) fn index_mappings(dims: usize) -> serde_json::Value {
    serde_json::json!({
        "mappings": {
            "properties": {
                "content": { "type": "text" },
                "embedding": { "type": "dense_vector", "dims": dims }
            }
        }
    })
}

/// Lexical channel: BM25 match over `content`.
pub(crate) fn match_query(text: &str, limit: usize) -> serde_json::Value {
    serde_json::json!({
        "size": limit,
        "query": { "match": { "content": text } }
    })
}

/// Vector channel: cosine similarity over every stored embedding, shifted
/// by +1.0 so the script score stays non-negative.
pub(crate) fn script_score_query(embedding: &[f32], limit: usize) -> serde_json::Value {
    serde_json::json!({
        "size": limit,
        "query": {
            "script_score": {
                "query": { "match_all": {} },
                "script": {
                    "source": "cosineSimilarity(params.query_vector, 'embedding') + 1.0",
                    "params": { "query_vector": embedding }
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mappings_declare_text_and_dense_vector() {
        let body = index_mappings(4096);
        assert_eq!(
            body,
            serde_json::json!({
                "mappings": {
                    "properties": {
                        "content": { "type": "text" },
                        "embedding": { "type": "dense_vector", "dims": 4096 }
                    }
                }
            })
        );
    }

    #[test]
    fn mappings_carry_configured_dims() {
        let body = index_mappings(8);
        assert_eq!(
            body["mappings"]["properties"]["embedding"]["dims"],
            serde_json::json!(8)
        );
    }

    #[test]
    fn match_query_shape() {
        let body = match_query("rust ownership", 2);
        assert_eq!(
            body,
            serde_json::json!({
                "size": 2,
                "query": { "match": { "content": "rust ownership" } }
            })
        );
    }

    #[test]
    fn script_score_query_shape() {
        let body = script_score_query(&[0.5, 0.25], 7);
        assert_eq!(body["size"], serde_json::json!(7));
        assert_eq!(
            body["query"]["script_score"]["query"],
            serde_json::json!({ "match_all": {} })
        );
        assert_eq!(
            body["query"]["script_score"]["script"]["source"],
            serde_json::json!("cosineSimilarity(params.query_vector, 'embedding') + 1.0")
        );
        assert_eq!(
            body["query"]["script_score"]["script"]["params"]["query_vector"],
            serde_json::json!([0.5, 0.25])
        );
    }
}
