//! Error types for the social events API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for client handling.
    pub error: String,
    /// Human-readable error message.
    pub message: String,
}

/// Errors raised by the HTTP boundary itself.
///
/// Publish failures are not errors here: they are a normal outcome and get
/// their own response body.
#[derive(Debug, Error)]
pub enum SocialApiError {
    /// Body is not valid JSON for the endpoint.
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// Body parsed but a required field is missing.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The payload that was just published could not be read back.
    #[error("Failed to rebuild response from published event: {0}")]
    ResponseReconstruction(String),

    /// Internal server error.
    #[error("Internal error")]
    Internal(String),
}

impl IntoResponse for SocialApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match &self {
            Self::InvalidBody(msg) => (StatusCode::BAD_REQUEST, "invalid_body", msg.clone()),
            Self::Validation(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation_error",
                msg.clone(),
            ),
            Self::ResponseReconstruction(msg) => {
                tracing::error!(
                    "Published event could not be decoded for the response: {}",
                    msg
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
            Self::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_code.to_string(),
            message,
        });

        (status, body).into_response()
    }
}

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, SocialApiError>;

impl From<validator::ValidationErrors> for SocialApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::Validation(err.to_string())
    }
}
