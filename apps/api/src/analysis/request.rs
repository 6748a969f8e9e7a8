//! Prompt Builder. Turns extracted text and an optional role into an immutable
//! `AnalysisRequest`.

use tracing::warn;

use crate::analysis::prompts::{analysis_prompt, ANALYSIS_SYSTEM, FALLBACK_ROLE};

/// Hard cap on resume characters embedded in the prompt.
pub const MAX_RESUME_CHARS: usize = 20_000;

/// A fully composed analysis, ready to send.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRequest {
    target_role: String,
    prompt: String,
    truncated: bool,
    extracted_chars: usize,
}

impl AnalysisRequest {
    /// Builds the request. The resume text is cut to its first
    /// `MAX_RESUME_CHARS` characters; a missing or blank role falls back to
    /// `FALLBACK_ROLE`.
    pub fn build(extracted_text: &str, job_role: Option<&str>) -> Self {
        let target_role = match job_role {
            Some(role) if !role.trim().is_empty() => role.to_string(),
            _ => FALLBACK_ROLE.to_string(),
        };

        let (resume_text, truncated) = truncate_chars(extracted_text, MAX_RESUME_CHARS);
        let extracted_chars = extracted_text.chars().count();
        if truncated {
            warn!(
                "Resume text truncated from {} to {} characters",
                extracted_chars, MAX_RESUME_CHARS
            );
        }

        let prompt = analysis_prompt(&target_role, resume_text);

        Self {
            target_role,
            prompt,
            truncated,
            extracted_chars,
        }
    }

    pub fn target_role(&self) -> &str {
        &self.target_role
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn system(&self) -> &'static str {
        ANALYSIS_SYSTEM
    }

    pub fn truncated(&self) -> bool {
        self.truncated
    }

    /// Character count of the text before truncation.
    pub fn extracted_chars(&self) -> usize {
        self.extracted_chars
    }
}

/// Returns the first `max` characters of `text` and whether anything was cut.
fn truncate_chars(text: &str, max: usize) -> (&str, bool) {
    match text.char_indices().nth(max) {
        Some((byte_idx, _)) => (&text[..byte_idx], true),
        None => (text, false),
    }
}
