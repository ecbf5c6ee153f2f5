use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use sqlx::error::ErrorKind;
use thiserror::Error;

/// Failure taxonomy for repository operations. The dispatcher maps each
/// kind onto exactly one HTTP status code.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A required field is missing or a referenced entity does not exist.
    #[error("{0}")]
    Validation(String),

    /// A uniqueness constraint was violated.
    #[error("{0}")]
    Conflict(String),

    /// The requested row does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Any other persistence failure, connectivity loss included.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Classify a write failure: unique violations are conflicts, foreign
    /// key violations mean the payload referenced a nonexistent entity.
    pub fn classify_write(err: sqlx::Error, conflict: &str, reference: &str) -> Self {
        if let sqlx::Error::Database(db) = &err {
            match db.kind() {
                ErrorKind::UniqueViolation => return ApiError::Conflict(conflict.to_owned()),
                ErrorKind::ForeignKeyViolation => {
                    return ApiError::Validation(reference.to_owned());
                }
                _ => {}
            }
        }
        ApiError::Database(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            // Internals stay in the log, not in the response body.
            ApiError::Database(err) => {
                tracing::error!(error = %err, "database error");
                "Database error".to_owned()
            }
            other => other.to_string(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
