//! Byte-to-text decoding with encoding detection.

use chardetng::EncodingDetector;

/// Decode raw file bytes into text, sniffing the encoding first.
///
/// Decoding is total: a BOM wins over detection, and malformed sequences
/// become replacement characters instead of errors.
#[must_use]
pub fn decode_bytes(bytes: &[u8]) -> String {
    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let encoding = detector.guess(None, true);
    let (text, detected, had_errors) = encoding.decode(bytes);
    if had_errors {
        tracing::warn!(
            encoding = detected.name(),
            "malformed sequences replaced during decode"
        );
    }
    text.into_owned()
}
