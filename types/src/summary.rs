//! Summary style selection and the rendered prompt specification.

/// Summarization style, selected from segment length.
///
/// Variants are ordered from least to most detailed, so style detail is
/// non-decreasing in segment length by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SummaryStyle {
    /// Short, high-level summary for segments under 1000 characters.
    Short,
    /// Concise paragraph-wise summary for mid-sized segments.
    Paragraph,
    /// Structured summary (bullet points, key insights, concluding
    /// paragraph) for segments of 5000 characters or more.
    Structured,
}

impl SummaryStyle {
    pub const PARAGRAPH_THRESHOLD: usize = 1000;
    pub const STRUCTURED_THRESHOLD: usize = 5000;

    /// Selects the style for a segment of `chars` characters.
    ///
    /// Pure function of the character count; the thresholds are the policy.
    #[must_use]
    pub const fn for_char_count(chars: usize) -> Self {
        if chars < Self::PARAGRAPH_THRESHOLD {
            Self::Short
        } else if chars < Self::STRUCTURED_THRESHOLD {
            Self::Paragraph
        } else {
            Self::Structured
        }
    }

    /// Phrase naming the requested summary shape inside the instruction.
    #[must_use]
    pub const fn task_phrase(self) -> &'static str {
        match self {
            Self::Short => "short, high-level summary",
            Self::Paragraph => "concise paragraph-wise summary",
            Self::Structured => {
                "structured summary with bullet points, key insights, and a concluding paragraph"
            }
        }
    }

    /// Stable tag for logs and caller-facing results.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Short => "short-summary",
            Self::Paragraph => "paragraph-summary",
            Self::Structured => "structured-summary",
        }
    }
}

/// A rendered summarization instruction for one segment.
///
/// `instruction` is `None` for empty/whitespace segments; that is a normal
/// outcome, not a failure, and `reasoning` says why. The reasoning string
/// exists for observability, never for program logic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptSpec {
    pub instruction: Option<String>,
    pub style: Option<SummaryStyle>,
    pub reasoning: String,
    /// Character count of the segment that drove the style decision.
    pub char_count: usize,
}

impl PromptSpec {
    #[must_use]
    pub const fn has_instruction(&self) -> bool {
        self.instruction.is_some()
    }
}
