//! Merging the two retrieval channels into one cited document list.

/// Concatenate vector hits then text hits, keeping the first occurrence of
/// every document. Vector ranking therefore wins ties between channels.
///
/// Hit lists stay single-digit sized per query.
#[must_use]
pub fn merge_channels(vector_hits: Vec<String>, text_hits: Vec<String>) -> Vec<String> {
    let mut merged: Vec<String> = Vec::new();
    for doc in vector_hits.into_iter().chain(text_hits) {
        if !merged.contains(&doc) {
            merged.push(doc);
        }
    }
    merged
}
