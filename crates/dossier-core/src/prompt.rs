//! Deterministic prompt and reply templates.
//!
//! The model only ever sees documents through [`grounding_prompt`], and the
//! user only ever sees the model through [`format_reply`]. Both are pure
//! string assembly so the exact wording is pinned by tests.

const SEPARATOR: &str = "\n\n=========================\n\n";

/// Build the grounding prompt: instructions, the merged documents joined by
/// blank lines, then the trimmed question.
#[must_use]
pub fn grounding_prompt(documents: &[String], question: &str, language: &str) -> String {
    let docs_joined = documents.join("\n\n");
    format!(
        "You are an assistant that answers questions based on the supplied documents.\n\
         Use only facts from the documents. If the answer is not there, say you do not know.\n\
         Reply only in {language}.\n\n\
         Documents:\n{docs_joined}\n\n\
         Question:\n{question}",
        question = question.trim()
    )
}

/// Assemble the user-facing reply: the model answer, then up to
/// `cited_chunks` source documents, each closed off by a separator rule.
#[must_use]
pub fn format_reply(answer: &str, documents: &[String], cited_chunks: usize) -> String {
    let mut reply = format!("Model answer:\n{answer}{SEPARATOR}");
    for doc in documents.iter().take(cited_chunks) {
        reply.push_str(doc);
        reply.push_str(SEPARATOR);
    }
    reply
}
