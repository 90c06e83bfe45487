//! Deterministic fallback responses for a categorically unavailable service.
//!
//! The fallback path is taken when an invocation fails permanently
//! (credentials absent, request rejected). It never retries and never counts
//! against the retry budget; it simply guarantees the caller some text.

/// Fixed marker prefixing every fallback response.
///
/// Downstream consumers and tests distinguish substitutes from genuine model
/// answers with a substring check against this prefix.
pub const FALLBACK_PREFIX: &str = "[FALLBACK RESPONSE]";

/// Renders the substitute response for a permanent failure.
#[must_use]
pub fn fallback_response(reason: &str) -> String {
    format!(
        "{FALLBACK_PREFIX}\n\
         This is a substitute summary; the remote inference service is unavailable.\n\
         Reason: {reason}"
    )
}
