use std::sync::Arc;

use crate::analysis::feedback::FeedbackProvider;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
/// Built once at startup and never mutated.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable feedback backend. Default: `LlmClient` against the hosted model.
    pub feedback: Arc<dyn FeedbackProvider>,
    pub config: Config,
}
