//! Word-window chunking.
//!
//! Input text is tokenized on whitespace and regrouped into windows of
//! `chunk_size` words joined by single spaces. The final window keeps
//! whatever remains, so original whitespace runs are not preserved.

/// Split `text` into word windows of at most `chunk_size` words.
///
/// A `chunk_size` of zero yields no chunks, as does whitespace-only input.
#[must_use]
pub fn split_words(text: &str, chunk_size: usize) -> Vec<String> {
    if chunk_size == 0 {
        return Vec::new();
    }
    let words: Vec<&str> = text.split_whitespace().collect();
    words
        .chunks(chunk_size)
        .map(|window| window.join(" "))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_yields_no_chunks() {
        assert!(split_words("", 100).is_empty());
    }

    #[test]
    fn whitespace_only_yields_no_chunks() {
        assert!(split_words("  \n\t  ", 100).is_empty());
    }

    #[test]
    fn zero_chunk_size_yields_no_chunks() {
        assert!(split_words("some words here", 0).is_empty());
    }

    #[test]
    fn short_text_fits_one_chunk() {
        let chunks = split_words("hello brave new world", 100);
        assert_eq!(chunks, vec!["hello brave new world"]);
    }

    #[test]
    fn exact_multiple_fills_all_windows() {
        let chunks = split_words("a b c d e f", 3);
        assert_eq!(chunks, vec!["a b c", "d e f"]);
    }

    #[test]
    fn remainder_goes_to_final_window() {
        let chunks = split_words("a b c d e", 2);
        assert_eq!(chunks, vec!["a b", "c d", "e"]);
    }

    #[test]
    fn whitespace_runs_collapse_to_single_spaces() {
        let chunks = split_words("one\t\ttwo\n\nthree    four", 10);
        assert_eq!(chunks, vec!["one two three four"]);
    }

    #[test]
    fn hundred_word_default_window() {
        let text = (0..250).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ");
        let chunks = split_words(&text, 100);
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].split_whitespace().count(), 100);
        assert_eq!(chunks[1].split_whitespace().count(), 100);
        assert_eq!(chunks[2].split_whitespace().count(), 50);
    }

    mod proptest_chunker {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(1000))]

            #[test]
            fn split_never_panics(
                text in "\\PC{0,2000}",
                chunk_size in 0usize..300,
            ) {
                let _ = split_words(&text, chunk_size);
            }

            #[test]
            fn chunk_count_matches_word_count(
                text in "[a-z ]{0,500}",
                chunk_size in 1usize..50,
            ) {
                let words = text.split_whitespace().count();
                let chunks = split_words(&text, chunk_size);
                prop_assert_eq!(chunks.len(), words.div_ceil(chunk_size));
            }

            #[test]
            fn all_windows_full_except_last(
                text in "[a-z ]{1,500}",
                chunk_size in 1usize..50,
            ) {
                let chunks = split_words(&text, chunk_size);
                for chunk in chunks.iter().rev().skip(1) {
                    prop_assert_eq!(chunk.split_whitespace().count(), chunk_size);
                }
                if let Some(last) = chunks.last() {
                    let count = last.split_whitespace().count();
                    prop_assert!(count >= 1 && count <= chunk_size);
                }
            }

            #[test]
            fn rejoined_chunks_preserve_words(
                text in "[a-z \n\t]{0,500}",
                chunk_size in 1usize..50,
            ) {
                let chunks = split_words(&text, chunk_size);
                let rejoined = chunks.join(" ");
                let original: Vec<&str> = text.split_whitespace().collect();
                prop_assert_eq!(rejoined.split_whitespace().collect::<Vec<_>>(), original);
            }

            #[test]
            fn no_empty_chunks(
                text in "\\PC{0,500}",
                chunk_size in 1usize..50,
            ) {
                for chunk in split_words(&text, chunk_size) {
                    prop_assert!(!chunk.is_empty());
                }
            }
        }
    }
}
