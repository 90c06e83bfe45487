//! Core domain types for Condense.
//!
//! This crate contains pure domain types with no IO, no async, and minimal
//! dependencies. Everything here can be used from any layer of the pipeline.

mod outcome;
mod settings;
mod summary;

pub use outcome::{InvocationOutcome, ServiceError};
pub use settings::{ConfigError, DEFAULT_MODEL, SummarizerConfig};
pub use summary::{PromptSpec, SummaryStyle};

use thiserror::Error;

/// A document accepted for summarization, guaranteed non-empty.
///
/// Construction is the ingestion boundary: leading/trailing whitespace is
/// stripped and empty content is rejected here, so the chunker downstream
/// never sees an empty input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    content: String,
}

#[derive(Debug, Error)]
#[error("document is empty")]
pub struct EmptyDocumentError;

impl Document {
    pub fn new(content: impl Into<String>) -> Result<Self, EmptyDocumentError> {
        let content = content.into();
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Err(EmptyDocumentError);
        }
        Ok(Self {
            content: trimmed.to_string(),
        })
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Character count (not byte length) of the document content.
    #[must_use]
    pub fn char_count(&self) -> usize {
        self.content.chars().count()
    }

    #[must_use]
    pub fn into_content(self) -> String {
        self.content
    }
}

impl TryFrom<String> for Document {
    type Error = EmptyDocumentError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Document {
    type Error = EmptyDocumentError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A contiguous slice of a document sized to fit within a token budget.
///
/// Chunks are derived data: concatenating the chunks of a document in
/// `index` order reproduces the document content exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Position of this chunk within the document's chunk sequence.
    pub index: usize,
    /// The contiguous substring this chunk covers.
    pub content: String,
    /// Estimated token count for this chunk alone.
    pub estimated_tokens: usize,
}

impl Chunk {
    /// Character count of the chunk content.
    #[must_use]
    pub fn char_count(&self) -> usize {
        self.content.chars().count()
    }
}
