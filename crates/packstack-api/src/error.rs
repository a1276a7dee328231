//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Every error is returned as `{"error": {"code": ..., "message": ...}}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured JSON error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "NOT_FOUND", "VALIDATION_ERROR").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

/// Application-level error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Pack does not exist or could not be fetched (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Pack data or request parameters failed validation (422).
    #[error("validation error: {0}")]
    Validation(String),

    /// Query string could not be parsed (400).
    #[error("bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    /// HTTP status and machine-readable code for this error.
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR"),
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<packstack_core::EngineError> for AppError {
    fn from(err: packstack_core::EngineError) -> Self {
        Self::Validation(err.to_string())
    }
}
