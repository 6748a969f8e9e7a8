//! Axum route handlers for the Analysis API.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    Json,
};
use bytes::Bytes;

use crate::analysis::service::{analyze_resume, AnalysisResponse};
use crate::errors::AppError;
use crate::extraction::{DocumentKind, UploadedDocument};
use crate::state::AppState;

const RESUME_FIELD: &str = "resume";
const JOB_ROLE_FIELD: &str = "job_role";

/// POST /api/v1/analyze
///
/// Multipart form: `resume` (PDF or TXT file, required), `job_role` (optional).
/// Returns the model's feedback with analysis metadata.
pub async fn handle_analyze(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalysisResponse>, AppError> {
    let mut document: Option<UploadedDocument> = None;
    let mut job_role: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some(RESUME_FIELD) => {
                let file_name = field
                    .file_name()
                    .filter(|name| !name.is_empty())
                    .map(String::from);
                let content_type = field.content_type().map(String::from);
                let bytes = field.bytes().await.map_err(multipart_error)?;

                // Browsers send an empty, unnamed part when no file was picked.
                if file_name.is_none() && bytes.is_empty() {
                    continue;
                }
                document = Some(to_document(bytes, content_type.as_deref(), file_name)?);
            }
            Some(JOB_ROLE_FIELD) => {
                job_role = Some(field.text().await.map_err(multipart_error)?);
            }
            _ => {}
        }
    }

    let document = document.ok_or(AppError::MissingUpload)?;
    let response = analyze_resume(document, job_role.as_deref(), state.feedback.as_ref()).await?;

    Ok(Json(response))
}

fn to_document(
    bytes: Bytes,
    content_type: Option<&str>,
    file_name: Option<String>,
) -> Result<UploadedDocument, AppError> {
    let head = &bytes[..bytes.len().min(8)];
    let kind = DocumentKind::detect(content_type, file_name.as_deref(), head).ok_or_else(|| {
        AppError::Validation("Unsupported file type; upload a PDF or TXT resume".to_string())
    })?;

    Ok(UploadedDocument {
        bytes,
        kind,
        file_name,
    })
}

fn multipart_error(e: MultipartError) -> AppError {
    AppError::Validation(format!("Invalid upload: {}", e.body_text()))
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::analysis::service::tests::RecordingProvider;
    use crate::config::Config;
    use crate::routes::build_router;
    use crate::state::AppState;

    const BOUNDARY: &str = "----resume-analyzer-test";

    enum Part<'a> {
        File {
            name: &'a str,
            file_name: &'a str,
            content_type: &'a str,
            body: &'a [u8],
        },
        Text {
            name: &'a str,
            value: &'a str,
        },
    }

    fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
        let mut body = Vec::new();
        for part in parts {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            match part {
                Part::File {
                    name,
                    file_name,
                    content_type,
                    body: bytes,
                } => {
                    body.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                             Content-Type: {content_type}\r\n\r\n"
                        )
                        .as_bytes(),
                    );
                    body.extend_from_slice(bytes);
                }
                Part::Text { name, value } => {
                    body.extend_from_slice(
                        format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}")
                            .as_bytes(),
                    );
                }
            }
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn test_state(provider: RecordingProvider) -> AppState {
        AppState {
            feedback: std::sync::Arc::new(provider),
            config: Config {
                groq_api_key: "gsk_test".to_string(),
                groq_api_base_url: "http://127.0.0.1:9".to_string(),
                port: 0,
                max_upload_bytes: 1024 * 1024,
                rust_log: "info".to_string(),
            },
        }
    }

    async fn post_analyze(provider: RecordingProvider, parts: &[Part<'_>]) -> (StatusCode, Value) {
        let app = build_router(test_state(provider));
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/analyze")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(multipart_body(parts)))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_analyze_text_resume_with_role() {
        let provider = RecordingProvider::default();
        let (status, body) = post_analyze(
            provider.clone(),
            &[
                Part::File {
                    name: "resume",
                    file_name: "resume.txt",
                    content_type: "text/plain",
                    body: b"Jane Doe\nShipped a Rust ingestion service",
                },
                Part::Text {
                    name: "job_role",
                    value: "Platform Engineer",
                },
            ],
        )
        .await;

        assert_eq!(status, StatusCode::OK, "{body}");
        assert_eq!(body["feedback"], "- Quantify your impact");
        assert_eq!(body["target_role"], "Platform Engineer");
        assert_eq!(body["model"], "test-model");
        assert_eq!(body["truncated"], false);
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_analyze_without_role_uses_fallback() {
        let provider = RecordingProvider::default();
        let (status, body) = post_analyze(
            provider,
            &[Part::File {
                name: "resume",
                file_name: "resume.txt",
                content_type: "text/plain",
                body: b"Jane Doe",
            }],
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["target_role"], "General Application");
    }

    #[tokio::test]
    async fn test_missing_file_is_warning() {
        let provider = RecordingProvider::default();
        let (status, body) = post_analyze(
            provider.clone(),
            &[Part::Text {
                name: "job_role",
                value: "Data Engineer",
            }],
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "MISSING_FILE");
        assert_eq!(body["error"]["message"], "Please upload a resume file.");
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_empty_unnamed_part_counts_as_missing() {
        let provider = RecordingProvider::default();
        let (status, body) = post_analyze(
            provider,
            &[Part::File {
                name: "resume",
                file_name: "",
                content_type: "application/octet-stream",
                body: b"",
            }],
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "MISSING_FILE");
    }

    #[tokio::test]
    async fn test_whitespace_resume_fails_without_llm_call() {
        let provider = RecordingProvider::default();
        let (status, body) = post_analyze(
            provider.clone(),
            &[Part::File {
                name: "resume",
                file_name: "blank.txt",
                content_type: "text/plain",
                body: b"   \n \t \n",
            }],
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "EMPTY_EXTRACTION");
        assert_eq!(
            body["error"]["message"],
            "Could not extract text from the resume."
        );
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_unsupported_file_type_rejected() {
        let provider = RecordingProvider::default();
        let (status, body) = post_analyze(
            provider.clone(),
            &[Part::File {
                name: "resume",
                file_name: "resume.docx",
                content_type: "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
                body: b"PK\x03\x04",
            }],
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_llm_failure_surfaces_raw_text() {
        let provider = RecordingProvider {
            fail_with: Some("API error (status 401): Invalid API Key".to_string()),
            ..Default::default()
        };
        let (status, body) = post_analyze(
            provider,
            &[Part::File {
                name: "resume",
                file_name: "resume.txt",
                content_type: "text/plain",
                body: b"Jane Doe",
            }],
        )
        .await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], "LLM_ERROR");
        assert_eq!(
            body["error"]["message"],
            "An error occurred: API error (status 401): Invalid API Key"
        );
    }
}
