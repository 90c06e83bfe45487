//! Service error taxonomy and the terminal invocation outcome.

use thiserror::Error;

/// Errors reported by the remote inference service.
///
/// The retry loop inspects the error kind rather than unwinding: only
/// [`ServiceError::Transient`] is retried; the other two are permanent and
/// route to the fallback path.
#[derive(Debug, Clone, Error)]
pub enum ServiceError {
    /// Throttling or temporary unavailability - expected to resolve on retry.
    #[error("transient service failure: {0}")]
    Transient(String),
    /// Credentials absent or rejected; retrying cannot fix this.
    #[error("credentials unavailable: {0}")]
    Credentials(String),
    /// The request itself was rejected as malformed or unauthorized.
    #[error("client request rejected: {0}")]
    Client(String),
}

impl ServiceError {
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Transient(_))
    }

    #[must_use]
    pub const fn is_permanent(&self) -> bool {
        !self.is_transient()
    }
}

/// Terminal result of one resilient invocation.
///
/// This is a sum type that structurally distinguishes success from failure,
/// ensuring callers cannot accidentally treat a diagnostic as a summary.
/// `Success` is also the carrier for fallback responses (tagged by prefix),
/// so the caller always receives some textual result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvocationOutcome {
    /// The service (or the fallback policy) produced text.
    Success {
        /// Number of attempts issued, including the successful one. Always >= 1.
        attempts: u32,
        response: String,
    },
    /// Retries were exhausted without a response.
    Failure {
        attempts: u32,
        diagnostic: String,
    },
}

impl InvocationOutcome {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    #[must_use]
    pub const fn attempts(&self) -> u32 {
        match self {
            Self::Success { attempts, .. } | Self::Failure { attempts, .. } => *attempts,
        }
    }

    /// The response text, if the invocation produced one.
    #[must_use]
    pub fn response(&self) -> Option<&str> {
        match self {
            Self::Success { response, .. } => Some(response),
            Self::Failure { .. } => None,
        }
    }

    /// Consumes the outcome, returning the response or the diagnostic.
    pub fn into_text(self) -> Result<String, String> {
        match self {
            Self::Success { response, .. } => Ok(response),
            Self::Failure { diagnostic, .. } => Err(diagnostic),
        }
    }
}
