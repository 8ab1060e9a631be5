//! Error handling for the GeoYIELD HTTP service
//!
//! Every failure leaves the server as a JSON `{ "error": { code, message, field } }` body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::CoreError;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {message}")]
    Validation { field: String, message: String },

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        AppError::Validation {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ErrorDetail {
    fn new(code: &str, message: impl Into<String>, field: Option<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            field,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            AppError::Validation { field, message } => (
                StatusCode::BAD_REQUEST,
                ErrorDetail::new("VALIDATION_ERROR", message.clone(), Some(field.clone())),
            ),
            AppError::NotFound(resource) => (
                StatusCode::NOT_FOUND,
                ErrorDetail::new("NOT_FOUND", format!("{} not found", resource), None),
            ),
            AppError::Core(CoreError::InvalidPageSize) => (
                StatusCode::BAD_REQUEST,
                ErrorDetail::new(
                    "VALIDATION_ERROR",
                    "Page size must be at least 1",
                    Some("per_page".to_string()),
                ),
            ),
            AppError::Core(CoreError::InvalidInputShape { field, .. }) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorDetail::new("INVALID_RECORD", self.to_string(), Some(field.to_string())),
            ),
            AppError::Core(
                CoreError::MisalignedSeries { series, .. } | CoreError::MisalignedDates { series, .. },
            ) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorDetail::new("MISALIGNED_SERIES", self.to_string(), Some(series.to_string())),
            ),
            AppError::Core(CoreError::DuplicateFarmId(_)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail::new("DATASET_ERROR", self.to_string(), Some("farmId".to_string())),
            ),
            AppError::Core(CoreError::NonFiniteTotal(field)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail::new("DATASET_ERROR", self.to_string(), Some(field.to_string())),
            ),
            AppError::Core(CoreError::Serialization(_) | CoreError::Io(_)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail::new("DATASET_ERROR", "The farm dataset could not be read", None),
            ),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail::new("INTERNAL_ERROR", msg.clone(), None),
            ),
        };

        if status.is_server_error() {
            tracing::error!("Error: {:?}", self);
        } else {
            tracing::debug!("Request rejected: {}", self);
        }

        (status, Json(ErrorResponse { error: detail })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::validation("format", "bad"), StatusCode::BAD_REQUEST),
            (AppError::NotFound("Farm".into()), StatusCode::NOT_FOUND),
            (AppError::Core(CoreError::InvalidPageSize), StatusCode::BAD_REQUEST),
            (
                AppError::Core(CoreError::InvalidInputShape {
                    farm_id: "FARM-AAAAAA".into(),
                    field: "expectedYield",
                    reason: "is missing".into(),
                }),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                AppError::Core(CoreError::NonFiniteTotal("farmSize")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (AppError::Internal("boom".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (error, status) in cases {
            assert_eq!(error.into_response().status(), status);
        }
    }
}
