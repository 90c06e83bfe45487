//! Fixed-window document chunking.
//!
//! Splits a document into ordered, contiguous, non-overlapping windows of
//! `max_tokens * chars_per_token` characters. Concatenating the chunks in
//! index order reproduces the document content exactly. Splitting is a pure
//! function of (content, budget, ratio): no randomness, no clock.

use condense_types::{Chunk, Document};

use crate::token_estimator::TokenEstimator;

/// Splits `document` into chunks whose estimated token count fits
/// `max_tokens`.
///
/// A document whose whole-text estimate already fits the budget comes back
/// as a single chunk, avoiding needless fragmentation. The last window may
/// be shorter than the rest. Windows are counted in characters, never bytes,
/// so multi-byte content cannot split mid-character.
#[must_use]
pub fn split_into_chunks(
    document: &Document,
    max_tokens: usize,
    estimator: TokenEstimator,
) -> Vec<Chunk> {
    let content = document.content();
    let total_estimate = estimator.estimate(content);

    if total_estimate <= max_tokens {
        tracing::debug!(
            estimated_tokens = total_estimate,
            max_tokens,
            "document fits budget, single chunk"
        );
        return vec![Chunk {
            index: 0,
            content: content.to_string(),
            estimated_tokens: total_estimate,
        }];
    }

    let max_chars = max_tokens * estimator.chars_per_token();
    let mut chunks = Vec::new();
    let mut window = String::with_capacity(max_chars.min(content.len()));
    let mut window_chars = 0usize;

    for ch in content.chars() {
        window.push(ch);
        window_chars += 1;
        if window_chars == max_chars {
            chunks.push(Chunk {
                index: chunks.len(),
                content: std::mem::take(&mut window),
                estimated_tokens: estimator.estimate_chars(window_chars),
            });
            window_chars = 0;
        }
    }
    if window_chars > 0 {
        chunks.push(Chunk {
            index: chunks.len(),
            content: window,
            estimated_tokens: estimator.estimate_chars(window_chars),
        });
    }

    tracing::debug!(
        chunks = chunks.len(),
        max_chars,
        estimated_tokens = total_estimate,
        "split document into chunks"
    );
    chunks
}

#[cfg(test)]
mod tests {
    use super::split_into_chunks;
    use crate::token_estimator::TokenEstimator;
    use condense_types::Document;

    fn doc(text: &str) -> Document {
        Document::new(text).expect("non-empty test document")
    }

    #[test]
    fn document_within_budget_is_one_chunk() {
        let document = doc(&"a".repeat(12_000));
        let chunks = split_into_chunks(&document, 5000, TokenEstimator::new(4));

        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].index, 0);
        assert_eq!(chunks[0].content, document.content());
        assert_eq!(chunks[0].estimated_tokens, 3000);
    }

    #[test]
    fn oversized_document_splits_into_full_windows() {
        // 25_000 chars with budget 1000 tokens * ratio 4 = 4000-char windows.
        let document = doc(&"b".repeat(25_000));
        let chunks = split_into_chunks(&document, 1000, TokenEstimator::new(4));

        assert_eq!(chunks.len(), 7);
        for chunk in &chunks[..6] {
            assert_eq!(chunk.char_count(), 4000);
            assert_eq!(chunk.estimated_tokens, 1000);
        }
        assert_eq!(chunks[6].char_count(), 1000);
        assert_eq!(chunks[6].estimated_tokens, 250);
    }

    #[test]
    fn chunks_cover_the_document_exactly() {
        let text: String = (0..9137).map(|i| char::from(b'a' + (i % 26) as u8)).collect();
        let document = doc(&text);
        let chunks = split_into_chunks(&document, 500, TokenEstimator::new(4));

        assert!(chunks.len() > 1);
        for (expected, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.index, expected);
        }
        let rebuilt: String = chunks.iter().map(|c| c.content.as_str()).collect();
        assert_eq!(rebuilt, document.content());
    }

    #[test]
    fn multibyte_content_never_splits_mid_character() {
        let text = "héllo wörld ☃ ".repeat(800);
        let document = doc(&text);
        let chunks = split_into_chunks(&document, 250, TokenEstimator::new(4));

        assert!(chunks.len() > 1);
        let rebuilt: String = chunks.iter().map(|c| c.content.as_str()).collect();
        assert_eq!(rebuilt, document.content());
        for chunk in &chunks[..chunks.len() - 1] {
            assert_eq!(chunk.char_count(), 1000);
        }
    }

    #[test]
    fn splitting_is_deterministic() {
        let document = doc(&"c".repeat(10_500));
        let first = split_into_chunks(&document, 600, TokenEstimator::new(4));
        let second = split_into_chunks(&document, 600, TokenEstimator::new(4));
        assert_eq!(first, second);
    }

    #[test]
    fn boundary_document_exactly_at_budget_is_one_chunk() {
        // 20_000 chars / ratio 4 = exactly 5000 tokens.
        let document = doc(&"d".repeat(20_000));
        let chunks = split_into_chunks(&document, 5000, TokenEstimator::new(4));
        assert_eq!(chunks.len(), 1);
    }

    #[test]
    fn one_token_over_budget_splits() {
        let document = doc(&"e".repeat(20_004));
        let chunks = split_into_chunks(&document, 5000, TokenEstimator::new(4));
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].char_count(), 20_000);
        assert_eq!(chunks[1].char_count(), 4);
    }
}
