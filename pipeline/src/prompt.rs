//! Summarization prompt construction.
//!
//! The instruction template embeds a role statement, a task naming the
//! selected style, a fidelity constraint, the verbatim segment, and a
//! trailing cue. Style selection is a pure function of segment character
//! length; the reasoning string exists for observability only.

use condense_types::{PromptSpec, SummaryStyle};

/// Reasoning reported when a segment is empty or whitespace-only.
///
/// This is a normal, non-error outcome: the builder simply requests no
/// summary for such segments.
pub const EMPTY_INPUT_REASONING: &str = "empty input, no summary requested";

/// Builds the summarization instruction for one text segment.
#[must_use]
pub fn build_summarization_prompt(segment: &str) -> PromptSpec {
    let char_count = segment.chars().count();

    if segment.trim().is_empty() {
        return PromptSpec {
            instruction: None,
            style: None,
            reasoning: EMPTY_INPUT_REASONING.to_string(),
            char_count,
        };
    }

    let style = SummaryStyle::for_char_count(char_count);

    let instruction = format!(
        "You are an AI assistant specialized in document summarization.\n\
         \n\
         Task:\n\
         Generate a {task} while preserving factual accuracy.\n\
         Do not introduce information not present in the document.\n\
         \n\
         Document:\n\
         {segment}\n\
         \n\
         Summary:",
        task = style.task_phrase(),
    );

    let reasoning = format!(
        "Prompt style selected from segment length ({char_count} characters): {tag}.",
        tag = style.tag(),
    );

    PromptSpec {
        instruction: Some(instruction),
        style: Some(style),
        reasoning,
        char_count,
    }
}
