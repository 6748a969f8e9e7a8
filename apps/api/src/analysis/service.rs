//! Analysis pipeline: extract → build prompt → request feedback.
//! One upload in, one reply out. Nothing is kept between calls.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::analysis::feedback::FeedbackProvider;
use crate::analysis::request::AnalysisRequest;
use crate::errors::AppError;
use crate::extraction::{extract_text, DocumentKind, UploadedDocument};

/// What a caller gets back for one analysis.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResponse {
    pub analysis_id: Uuid,
    pub model: String,
    pub target_role: String,
    pub feedback: String,
    /// True when the resume exceeded the character cap and was cut.
    pub truncated: bool,
    pub extracted_chars: usize,
    pub analyzed_at: DateTime<Utc>,
}

/// Runs one analysis. The provider is never called if extraction fails.
pub async fn analyze_resume(
    document: UploadedDocument,
    job_role: Option<&str>,
    provider: &dyn FeedbackProvider,
) -> Result<AnalysisResponse, AppError> {
    let analysis_id = Uuid::new_v4();
    info!(
        "Analysis {analysis_id}: {:?} upload ({} bytes, file={:?})",
        document.kind,
        document.bytes.len(),
        document.file_name
    );

    let text = extract(document).await?;

    let request = AnalysisRequest::build(&text, job_role);
    info!(
        "Analysis {analysis_id}: extracted {} chars, role={:?}",
        request.extracted_chars(),
        request.target_role()
    );

    let feedback = provider.request_feedback(&request).await?;
    info!("Analysis {analysis_id}: received {} chars of feedback", feedback.len());

    Ok(AnalysisResponse {
        analysis_id,
        model: provider.model().to_string(),
        target_role: request.target_role().to_string(),
        feedback,
        truncated: request.truncated(),
        extracted_chars: request.extracted_chars(),
        analyzed_at: Utc::now(),
    })
}

/// PDF parsing is CPU-bound, so it runs on the blocking pool.
async fn extract(document: UploadedDocument) -> Result<String, AppError> {
    match document.kind {
        DocumentKind::Pdf => {
            let text = tokio::task::spawn_blocking(move || extract_text(&document))
                .await
                .map_err(|e| AppError::Internal(e.into()))??;
            Ok(text)
        }
        DocumentKind::PlainText => Ok(extract_text(&document)?),
    }
}
