use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Failures surfaced before scoring starts. The scoring core itself never fails.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Missing input: {0}")]
    InputMissing(String),

    #[error("Could not extract text from the document: {0}")]
    Extraction(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Scan(ScanError::InputMissing(msg)) => {
                (StatusCode::BAD_REQUEST, "INPUT_MISSING", msg.clone())
            }
            AppError::Scan(ScanError::Extraction(detail)) => {
                tracing::warn!("Extraction failed: {detail}");
                (
                    StatusCode::BAD_REQUEST,
                    "EXTRACTION_ERROR",
                    "Could not extract text from the document".to_string(),
                )
            }
            AppError::Scan(ScanError::Validation(msg)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            AppError::Scan(ScanError::Internal(msg)) => {
                tracing::error!("Scan error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::PayloadTooLarge(msg) => {
                (StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE", msg.clone())
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

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_boundary_errors_are_client_errors() {
        assert_eq!(
            status_of(ScanError::InputMissing("resume".into()).into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(ScanError::Extraction("corrupt".into()).into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(ScanError::Validation("blank".into()).into()),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_internal_errors_are_500() {
        assert_eq!(
            status_of(ScanError::Internal("decoder panicked".into()).into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(AppError::Internal(anyhow::anyhow!("boom"))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_payload_too_large_is_413() {
        assert_eq!(
            status_of(AppError::PayloadTooLarge("10 MiB".into())),
            StatusCode::PAYLOAD_TOO_LARGE
        );
    }
}
