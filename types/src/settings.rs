//! Pipeline configuration surface.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default model identifier sent to the inference service.
pub const DEFAULT_MODEL: &str = "anthropic.claude-3-sonnet-20240229-v1:0";

/// Configuration recognized by the summarization pipeline.
///
/// Invalid configurations fail loudly at call setup via [`validate`], before
/// any attempt is made; nothing downstream re-checks these invariants.
///
/// [`validate`]: SummarizerConfig::validate
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SummarizerConfig {
    /// Maximum estimated tokens allowed per chunk.
    pub max_chunk_tokens: usize,
    /// Approximate characters consumed per token.
    pub chars_per_token: usize,
    /// Maximum invocation attempts, including the first.
    pub max_retries: u32,
    /// Base backoff delay; the first retry already waits twice this.
    pub base_delay: Duration,
    /// Model identifier passed to the inference service.
    pub model: String,
    /// Sampling temperature for the summary request.
    pub temperature: f32,
    /// Output token cap for the summary request.
    pub max_output_tokens: u32,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            max_chunk_tokens: 5000,
            chars_per_token: 4,
            max_retries: 5,
            base_delay: Duration::from_secs(1),
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.2,
            max_output_tokens: 300,
        }
    }
}

#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("max_retries must be at least 1")]
    ZeroRetries,
    #[error("chars_per_token must be at least 1")]
    ZeroRatio,
    #[error("max_chunk_tokens must be at least 1")]
    ZeroChunkBudget,
    #[error("base_delay must be positive")]
    ZeroBaseDelay,
}

impl SummarizerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_retries == 0 {
            return Err(ConfigError::ZeroRetries);
        }
        if self.chars_per_token == 0 {
            return Err(ConfigError::ZeroRatio);
        }
        if self.max_chunk_tokens == 0 {
            return Err(ConfigError::ZeroChunkBudget);
        }
        if self.base_delay.is_zero() {
            return Err(ConfigError::ZeroBaseDelay);
        }
        Ok(())
    }
}
