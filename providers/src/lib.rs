//! Remote inference client with resilient invocation.
//!
//! # Architecture
//!
//! - [`claude`] - Messages API client that issues one call attempt and maps
//!   failures onto the [`ServiceError`] taxonomy
//! - [`retry`] - the resilient invocation loop: exponential backoff for
//!   transient failures, immediate fallback for permanent ones
//! - [`fallback`] - deterministic, prefix-tagged substitute responses
//!
//! # Error Handling
//!
//! Service errors are values inspected by the retry loop, never unwound past
//! the invocation boundary: every call path terminates in an
//! [`InvocationOutcome`](condense_types::InvocationOutcome) carrying either a
//! genuine response, a tagged fallback, or a structured failure diagnostic.

pub mod claude;
pub mod fallback;
pub mod retry;

use std::sync::OnceLock;
use std::time::Duration;

pub use condense_types::{InvocationOutcome, ServiceError};

/// Canonical Anthropic Messages API endpoint.
pub const MESSAGES_API_URL: &str = "https://api.anthropic.com/v1/messages";

const CONNECT_TIMEOUT_SECS: u64 = 30;
const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Shared HTTP client for all invocations.
///
/// Built once; hardened defaults (TLS only, no redirects, bounded timeouts).
pub fn http_client() -> &'static reqwest::Client {
    static CLIENT: OnceLock<reqwest::Client> = OnceLock::new();
    CLIENT.get_or_init(|| {
        reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .unwrap_or_else(|e| {
                tracing::error!("Failed to build HTTP client: {e}. Using default client.");
                reqwest::Client::new()
            })
    })
}
