pub mod codes;
pub mod handlers;
pub mod messages;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    Json,
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Error body returned for every failed request.
///
/// # JSON Example
///
/// ```json
/// { "error": "validation error" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Application error type that can be converted to HTTP responses.
///
/// Client errors carry the message the client sees. Server errors carry a
/// detail that is logged; the client only ever sees [`messages::INTERNAL_ERROR`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("JSON parsing error: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationErrors),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Method not allowed, expected {0}")]
    MethodNotAllowed(Method),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),

    #[error("Service Unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidJson(_)
            | AppError::ValidationError(_)
            | AppError::BadRequest(_)
            | AppError::InvalidQuery(_)
            | AppError::MethodNotAllowed(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(_) | AppError::InternalServerError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            AppError::InvalidJson(e) => {
                tracing::info!(
                    error_code = ErrorCode::InvalidJson.code(),
                    "JSON parsing error: {}",
                    e
                );
                messages::INVALID_JSON.to_string()
            }
            AppError::ValidationError(e) => {
                tracing::info!(
                    error_code = ErrorCode::ValidationError.code(),
                    details = %serde_json::to_value(&e).unwrap_or(serde_json::Value::Null),
                    "Validation error"
                );
                messages::VALIDATION_FAILED.to_string()
            }
            AppError::BadRequest(msg) => {
                tracing::info!("Bad request: {}", msg);
                msg
            }
            AppError::InvalidQuery(msg) => {
                tracing::info!(
                    error_code = ErrorCode::InvalidQuery.code(),
                    "Invalid query: {}",
                    msg
                );
                msg
            }
            AppError::MethodNotAllowed(method) => {
                tracing::info!(
                    error_code = ErrorCode::MethodNotAllowed.code(),
                    "Method not allowed, expected {}",
                    method
                );
                messages::only_method_allowed(&method)
            }
            AppError::NotFound(msg) => {
                tracing::info!(
                    error_code = ErrorCode::NotFound.code(),
                    "Not found: {}",
                    msg
                );
                msg
            }
            AppError::Database(e) => {
                tracing::error!(
                    error_code = ErrorCode::DatabaseError.code(),
                    "Database error: {:?}",
                    e
                );
                messages::INTERNAL_ERROR.to_string()
            }
            AppError::InternalServerError(detail) => {
                tracing::error!(
                    error_code = ErrorCode::InternalError.code(),
                    "Internal server error: {}",
                    detail
                );
                messages::INTERNAL_ERROR.to_string()
            }
            AppError::ServiceUnavailable(msg) => {
                tracing::warn!(
                    error_code = ErrorCode::ServiceUnavailable.code(),
                    "Service unavailable: {}",
                    msg
                );
                msg
            }
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

/// Helper to write an error body with an explicit status.
pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ErrorResponse::new(message))).into_response()
}
