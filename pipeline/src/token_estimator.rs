//! Approximate token estimation from character counts.
//!
//! This module provides **approximate** token counting using a fixed
//! characters-per-token ratio (default 4, the heuristic many LLMs quote).
//! Counts may diverge from the provider's real tokenizer; the chunk budget
//! is sized conservatively to absorb that.

/// Approximate token estimator over character counts.
///
/// Pure and total: empty text estimates to 0, and a longer text (by
/// character count) never yields a smaller estimate.
#[derive(Debug, Clone, Copy)]
pub struct TokenEstimator {
    chars_per_token: usize,
}

impl TokenEstimator {
    pub const DEFAULT_CHARS_PER_TOKEN: usize = 4;

    /// # Panics
    ///
    /// Panics if `chars_per_token` is zero; callers validate the ratio at
    /// configuration setup.
    #[must_use]
    pub const fn new(chars_per_token: usize) -> Self {
        assert!(chars_per_token > 0, "chars_per_token must be at least 1");
        Self { chars_per_token }
    }

    #[must_use]
    pub const fn chars_per_token(self) -> usize {
        self.chars_per_token
    }

    /// Estimated token count for `text`: `ceil(chars / ratio)`.
    #[must_use]
    pub fn estimate(self, text: &str) -> usize {
        self.estimate_chars(text.chars().count())
    }

    /// Estimate from an already-known character count.
    #[must_use]
    pub const fn estimate_chars(self, char_count: usize) -> usize {
        char_count.div_ceil(self.chars_per_token)
    }
}

impl Default for TokenEstimator {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CHARS_PER_TOKEN)
    }
}
