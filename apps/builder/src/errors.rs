use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::editor::lists::ListError;
use crate::editor::section::SectionError;
use crate::editor::validation::ValidationError;
use crate::export::ExportError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// Required fields missing or malformed; the document was not changed.
    #[error("Invalid fields: {0}")]
    InvalidFields(ValidationError),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::InvalidFields(err)
    }
}

impl From<SectionError> for AppError {
    fn from(err: SectionError) -> Self {
        match err {
            SectionError::Validation(v) => AppError::InvalidFields(v),
            e @ SectionError::IndexOutOfRange { .. } => AppError::NotFound(e.to_string()),
            e @ (SectionError::NotEditing(_)
            | SectionError::AssistInFlight(_)
            | SectionError::NoSuggestions(_)) => AppError::Conflict(e.to_string()),
            e @ (SectionError::AssistUnsupported(_)
            | SectionError::Unsupported(_)
            | SectionError::MalformedDraft { .. }) => AppError::Validation(e.to_string()),
        }
    }
}

impl From<ListError> for AppError {
    fn from(err: ListError) -> Self {
        match err {
            ListError::Validation(v) => AppError::InvalidFields(v),
            e @ ListError::IndexOutOfRange { .. } => AppError::NotFound(e.to_string()),
        }
    }
}

impl From<ExportError> for AppError {
    fn from(err: ExportError) -> Self {
        match err {
            e @ ExportError::Superseded => AppError::Conflict(e.to_string()),
            e => AppError::Export(e.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::InvalidFields(err) => {
                let body = Json(json!({
                    "error": {
                        "code": "INVALID_FIELDS",
                        "message": err.to_string(),
                        "fields": err.fields,
                    }
                }));
                return (StatusCode::UNPROCESSABLE_ENTITY, body).into_response();
            }
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
            AppError::Llm(msg) => {
                tracing::error!("LLM error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "LLM_ERROR",
                    "An AI processing error occurred".to_string(),
                )
            }
            AppError::Export(msg) => {
                tracing::error!("Export error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "EXPORT_FAILED",
                    "Failed to generate PDF. Please try again.".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
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
