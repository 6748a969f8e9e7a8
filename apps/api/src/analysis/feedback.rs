//! Feedback Requester. The seam between the analysis pipeline and the hosted model.
//!
//! `AppState` holds an `Arc<dyn FeedbackProvider>`; production uses `LlmClient`.

use async_trait::async_trait;

use crate::analysis::request::AnalysisRequest;
use crate::errors::AppError;
use crate::llm_client::{LlmClient, MODEL};

#[async_trait]
pub trait FeedbackProvider: Send + Sync {
    /// Sends one composed analysis and returns the model's reply as-is.
    async fn request_feedback(&self, request: &AnalysisRequest) -> Result<String, AppError>;

    /// Identifier of the model producing the feedback.
    fn model(&self) -> &str;
}

#[async_trait]
impl FeedbackProvider for LlmClient {
    async fn request_feedback(&self, request: &AnalysisRequest) -> Result<String, AppError> {
        self.complete(request.prompt(), request.system())
            .await
            .map_err(|e| AppError::Llm(e.to_string()))
    }

    fn model(&self) -> &str {
        MODEL
    }
}
