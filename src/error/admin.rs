use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use thiserror::Error as ThisError;

use super::storage::StorageError;
use super::validation::ValidationError;

#[derive(Debug, ThisError)]
pub enum AdminError {
    /// Missing or invalid settings; fatal at startup.
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl AdminError {
    /// Message safe to show an end user.
    ///
    /// Validation errors and key conflicts keep their reason; everything else is generic.
    pub fn user_message(&self, generic: &str) -> String {
        match self {
            AdminError::Validation(e) => e.to_string(),
            AdminError::Storage(e @ (StorageError::DuplicateKey(_) | StorageError::NotFound(_))) => {
                e.to_string()
            }
            AdminError::Storage(_) | AdminError::Configuration(_) => generic.to_string(),
        }
    }
}

impl IntoResponse for AdminError {
    fn into_response(self) -> axum::response::Response {
        let (status, code, message) = match &self {
            AdminError::Validation(e @ ValidationError::DuplicateKey(_)) => {
                (StatusCode::CONFLICT, "DUPLICATE_KEY", e.to_string())
            }
            AdminError::Validation(e) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "VALIDATION_FAILED",
                e.to_string(),
            ),
            AdminError::Storage(e @ StorageError::DuplicateKey(_)) => {
                (StatusCode::CONFLICT, "DUPLICATE_KEY", e.to_string())
            }
            AdminError::Storage(e @ StorageError::NotFound(_)) => {
                (StatusCode::NOT_FOUND, "NOT_FOUND", e.to_string())
            }
            AdminError::Storage(_) => (
                StatusCode::BAD_GATEWAY,
                "STORAGE_ERROR",
                "The warehouse request failed. Please try again.".to_string(),
            ),
            AdminError::Configuration(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal server error occurred.".to_string(),
            ),
        };
        let body = ApiErrorObject {
            code: code.to_string(),
            message,
        };
        (status, Json(ApiErrorBody { inner: body })).into_response()
    }
}

/// Standardized API error response payload.
#[derive(Debug, Serialize)]
pub struct ApiErrorObject {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    #[serde(rename = "error")]
    pub inner: ApiErrorObject,
}
