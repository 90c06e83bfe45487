//! Document summarization pipeline.
//!
//! One request pipeline ties the pieces together:
//! chunk -> build prompt -> invoke-with-retry -> fallback-or-result.
//!
//! - [`token_estimator`] - approximate token counts from character length
//! - [`chunker`] - fixed-window splitting within a token budget
//! - [`prompt`] - style selection and instruction rendering
//! - [`summarize_chunk`] / [`summarize_document`] - per-chunk orchestration
//!   over the resilient invoker
//!
//! Chunks share no mutable state, so callers are free to fan the per-chunk
//! invocations out across tasks; [`summarize_document`] itself runs them
//! sequentially in index order and performs no result stitching.

pub mod chunker;
pub mod prompt;
pub mod token_estimator;

pub use chunker::split_into_chunks;
pub use prompt::build_summarization_prompt;
pub use token_estimator::TokenEstimator;

use std::future::Future;

use tokio_util::sync::CancellationToken;

use condense_providers::claude::ClaudeClient;
use condense_providers::retry::{RetryConfig, invoke_with_retry};
use condense_types::{
    Chunk, ConfigError, Document, InvocationOutcome, PromptSpec, ServiceError, SummarizerConfig,
    SummaryStyle,
};

/// Caller-facing result for one chunk.
#[derive(Debug, Clone)]
pub struct ChunkSummary {
    /// Index of the chunk this summary belongs to.
    pub index: usize,
    pub style: Option<SummaryStyle>,
    /// Why this prompt style was (or was not) chosen; observability only.
    pub reasoning: String,
    /// `None` when the prompt policy requested no summary for the segment.
    pub outcome: Option<InvocationOutcome>,
}

/// Chunks `document` and renders one prompt per chunk.
///
/// Fails loudly on invalid configuration before any work happens.
pub fn prepare(
    document: &Document,
    settings: &SummarizerConfig,
) -> Result<Vec<(Chunk, PromptSpec)>, ConfigError> {
    settings.validate()?;
    let estimator = TokenEstimator::new(settings.chars_per_token);
    let chunks = split_into_chunks(document, settings.max_chunk_tokens, estimator);
    Ok(chunks
        .into_iter()
        .map(|chunk| {
            let spec = build_summarization_prompt(&chunk.content);
            (chunk, spec)
        })
        .collect())
}

/// Summarizes one chunk through the resilient invoker.
///
/// `attempt_call` issues one call to the remote service with the rendered
/// instruction; production plugs in
/// [`ClaudeClient::send`], tests plug in deterministic closures. Service
/// errors never escape: the outcome is a genuine response, a prefix-tagged
/// fallback, or a structured failure.
pub async fn summarize_chunk<F, Fut>(
    chunk: &Chunk,
    attempt_call: F,
    settings: &SummarizerConfig,
    cancel: &CancellationToken,
) -> Result<ChunkSummary, ConfigError>
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = Result<String, ServiceError>>,
{
    let retry = RetryConfig::from_settings(settings)?;
    let spec = build_summarization_prompt(&chunk.content);

    let Some(instruction) = spec.instruction else {
        tracing::info!(chunk = chunk.index, reasoning = %spec.reasoning, "segment requested no summary");
        return Ok(ChunkSummary {
            index: chunk.index,
            style: None,
            reasoning: spec.reasoning,
            outcome: None,
        });
    };

    tracing::info!(
        chunk = chunk.index,
        chars = spec.char_count,
        style = spec.style.map(SummaryStyle::tag),
        "invoking summarization"
    );
    let outcome = invoke_with_retry(|_attempt| attempt_call(instruction.clone()), &retry, cancel).await;

    Ok(ChunkSummary {
        index: chunk.index,
        style: spec.style,
        reasoning: spec.reasoning,
        outcome: Some(outcome),
    })
}

/// Summarizes every chunk of `document`, in index order.
///
/// Each chunk gets an independent resilient invocation; no aggregation of
/// the per-chunk summaries is performed.
pub async fn summarize_document<F, Fut>(
    document: &Document,
    attempt_call: F,
    settings: &SummarizerConfig,
    cancel: &CancellationToken,
) -> Result<Vec<ChunkSummary>, ConfigError>
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = Result<String, ServiceError>>,
{
    settings.validate()?;
    let estimator = TokenEstimator::new(settings.chars_per_token);
    let chunks = split_into_chunks(document, settings.max_chunk_tokens, estimator);
    tracing::info!(
        chunks = chunks.len(),
        chars = document.char_count(),
        "summarizing document"
    );

    let mut summaries = Vec::with_capacity(chunks.len());
    for chunk in &chunks {
        summaries.push(summarize_chunk(chunk, &attempt_call, settings, cancel).await?);
    }
    Ok(summaries)
}

/// Convenience wiring of [`summarize_document`] to the HTTP client.
pub async fn summarize_document_with_client(
    document: &Document,
    client: &ClaudeClient,
    settings: &SummarizerConfig,
    cancel: &CancellationToken,
) -> anyhow::Result<Vec<ChunkSummary>> {
    let summaries = summarize_document(
        document,
        |instruction: String| async move { client.send(&instruction).await },
        settings,
        cancel,
    )
    .await?;
    Ok(summaries)
}
