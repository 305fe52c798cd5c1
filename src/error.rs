//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("validation: {0}")]
    Validation(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("unauthorized")]
    Unauthorized,
    #[error("not configured: {0}")]
    NotConfigured(&'static str),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("notification failed: {0}")]
    Notify(String),
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl AppError {
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error"),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized"),
            AppError::NotConfigured(_) => (StatusCode::INTERNAL_SERVER_ERROR, "not_configured"),
            AppError::Db(e) => match e {
                sqlx::Error::RowNotFound => (StatusCode::NOT_FOUND, "not_found"),
                sqlx::Error::Database(d) if d.is_unique_violation() => (StatusCode::BAD_REQUEST, "duplicate"),
                sqlx::Error::Database(d) if d.is_foreign_key_violation() => {
                    (StatusCode::BAD_REQUEST, "invalid_reference")
                }
                _ => (StatusCode::INTERNAL_SERVER_ERROR, "database_error"),
            },
            AppError::Notify(_) => (StatusCode::INTERNAL_SERVER_ERROR, "notification_error"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        // driver and bot errors are logged, not echoed
        let message = match &self {
            AppError::Db(e) if status == StatusCode::INTERNAL_SERVER_ERROR => {
                tracing::error!(error = %e, "database error");
                "database error".to_string()
            }
            AppError::Db(_) if code == "duplicate" => "a record with the same slug or key already exists".to_string(),
            AppError::Db(_) if code == "invalid_reference" => "referenced record does not exist".to_string(),
            AppError::Notify(e) => {
                tracing::error!(error = %e, "contact notification failed");
                "message could not be delivered".to_string()
            }
            _ => self.to_string(),
        };
        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        };
        (status, Json(body)).into_response()
    }
}
