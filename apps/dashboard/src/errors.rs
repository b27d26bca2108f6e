use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::jobs::JobFetchError;
use crate::matching::embedding::EmbeddingError;

pub const JOB_FETCH_FAILED_MESSAGE: &str = "Failed to fetch job data. Please try again later.";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Upload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Job listing fetch failed: {0}")]
    JobFetch(#[from] JobFetchError),

    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("Embedding failed: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Machine-readable code carried in the error body.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::PayloadTooLarge(_) => "PAYLOAD_TOO_LARGE",
            AppError::JobFetch(_) => "JOB_FETCH_ERROR",
            AppError::Pdf(_) => "PDF_ERROR",
            AppError::Embedding(_) => "EMBEDDING_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = self.code();
        let (status, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::PayloadTooLarge(msg) => (StatusCode::PAYLOAD_TOO_LARGE, msg.clone()),
            AppError::JobFetch(e) => {
                tracing::error!("Job listing fetch failed: {e}");
                (StatusCode::BAD_GATEWAY, JOB_FETCH_FAILED_MESSAGE.to_string())
            }
            AppError::Pdf(msg) => {
                tracing::error!("PDF error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, processing_failed(msg))
            }
            AppError::Embedding(e) => {
                tracing::error!("Embedding error: {e}");
                (StatusCode::INTERNAL_SERVER_ERROR, processing_failed(e))
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (StatusCode::INTERNAL_SERVER_ERROR, processing_failed(e))
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

fn processing_failed(detail: impl std::fmt::Display) -> String {
    format!("An error occurred while processing the resume: {detail}")
}
