//! Resilient invocation with exponential backoff.
//!
//! # Retry Policy
//!
//! - Transient failures retry up to `max_attempts` total attempts.
//! - Delay before retry k (k >= 1) is `base_delay * 2^k`: the exponent uses
//!   the post-increment attempt number, so the first retry already waits
//!   twice the base. This reproduces the reference backoff curve exactly.
//! - Permanent failures (credentials, rejected request) never retry; the
//!   caller receives a prefix-tagged fallback response instead.
//! - Cancellation observed during backoff aborts the remaining sleep and
//!   returns a structured failure promptly.
//!
//! The attempt itself is a pluggable strategy: production code plugs in
//! [`ClaudeClient::send`](crate::claude::ClaudeClient::send), tests plug in
//! deterministic closures.

use std::future::Future;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use condense_types::{ConfigError, InvocationOutcome, ServiceError, SummarizerConfig};

use crate::fallback::fallback_response;

/// Diagnostic carried by a [`InvocationOutcome::Failure`] after exhaustion.
pub const MAX_RETRIES_DIAGNOSTIC: &str = "max retries exceeded";

/// Diagnostic carried by a [`InvocationOutcome::Failure`] after cancellation.
pub const CANCELLED_DIAGNOSTIC: &str = "invocation cancelled";

/// Validated retry configuration.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    max_attempts: u32,
    base_delay: Duration,
}

impl RetryConfig {
    /// Fails loudly at setup on a zero attempt budget or zero base delay,
    /// before any attempt is made.
    pub fn new(max_attempts: u32, base_delay: Duration) -> Result<Self, ConfigError> {
        if max_attempts == 0 {
            return Err(ConfigError::ZeroRetries);
        }
        if base_delay.is_zero() {
            return Err(ConfigError::ZeroBaseDelay);
        }
        Ok(Self {
            max_attempts,
            base_delay,
        })
    }

    pub fn from_settings(settings: &SummarizerConfig) -> Result<Self, ConfigError> {
        Self::new(settings.max_retries, settings.base_delay)
    }

    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    #[must_use]
    pub const fn base_delay(&self) -> Duration {
        self.base_delay
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay: Duration::from_secs(1),
        }
    }
}

/// Delay before retry `next_attempt` (1-based): `base * 2^next_attempt`.
///
/// Pure so the curve is assertable without waiting on a clock. Saturates
/// rather than overflowing for absurd attempt numbers.
#[must_use]
pub fn backoff_delay(next_attempt: u32, base: Duration) -> Duration {
    base.saturating_mul(2u32.saturating_pow(next_attempt))
}

/// Invokes `attempt_call` with retries until success, permanent failure,
/// exhaustion, or cancellation.
///
/// `attempt_call` receives the zero-based attempt number and issues one call
/// to the remote service. The returned [`InvocationOutcome`] is terminal:
/// service errors never escape this boundary.
///
/// - Success on any attempt returns immediately with `attempts` counting the
///   successful attempt.
/// - A permanent error aborts the loop and returns the tagged fallback
///   response through the success variant (the caller always gets text).
/// - Exhausting the budget returns `Failure` with
///   [`MAX_RETRIES_DIAGNOSTIC`].
/// - Cancellation during backoff returns `Failure` with
///   [`CANCELLED_DIAGNOSTIC`] without completing the sleep.
pub async fn invoke_with_retry<F, Fut>(
    mut attempt_call: F,
    config: &RetryConfig,
    cancel: &CancellationToken,
) -> InvocationOutcome
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<String, ServiceError>>,
{
    let mut attempt: u32 = 0;

    while attempt < config.max_attempts {
        tracing::info!(attempt = attempt + 1, "issuing inference attempt");

        match attempt_call(attempt).await {
            Ok(response) => {
                tracing::info!(attempts = attempt + 1, "inference call succeeded");
                return InvocationOutcome::Success {
                    attempts: attempt + 1,
                    response,
                };
            }
            Err(error) if error.is_transient() => {
                attempt += 1;
                let delay = backoff_delay(attempt, config.base_delay);
                tracing::warn!(
                    error = %error,
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    "transient failure, backing off before retry"
                );
                tokio::select! {
                    () = cancel.cancelled() => {
                        tracing::warn!(attempts = attempt, "invocation cancelled during backoff");
                        return InvocationOutcome::Failure {
                            attempts: attempt,
                            diagnostic: CANCELLED_DIAGNOSTIC.to_string(),
                        };
                    }
                    () = tokio::time::sleep(delay) => {}
                }
            }
            Err(error) => {
                tracing::warn!(
                    error = %error,
                    attempts = attempt + 1,
                    "permanent failure, returning fallback response"
                );
                return InvocationOutcome::Success {
                    attempts: attempt + 1,
                    response: fallback_response(&error.to_string()),
                };
            }
        }
    }

    tracing::error!(attempts = config.max_attempts, "max retries exceeded");
    InvocationOutcome::Failure {
        attempts: config.max_attempts,
        diagnostic: MAX_RETRIES_DIAGNOSTIC.to_string(),
    }
}
