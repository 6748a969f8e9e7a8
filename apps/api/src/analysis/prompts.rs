//! Prompt text for resume analysis. The template is fixed; only the role and
//! the resume body vary.

/// System message sent with every analysis.
pub const ANALYSIS_SYSTEM: &str = "You are a helpful and professional career coach.";

/// Role label used when the caller supplies none.
pub const FALLBACK_ROLE: &str = "General Application";

/// Renders the user message. Both values are inserted in one pass, so braces
/// inside the role or the resume are never treated as placeholders.
pub fn analysis_prompt(job_role: &str, resume_text: &str) -> String {
    format!(
        "You are an experienced technical recruiter.
Analyze the following resume and provide constructive feedback.

Target Job Role: {job_role}

Focus on:
1. Content clarity and impact
2. Skills presentation (Identify missing critical skills for the target role)
3. Experience descriptions (Are they result-oriented?)
4. Specific improvements

Resume Content:
{resume_text}

Provide the feedback in a clear, structured format with bullet points."
    )
}
