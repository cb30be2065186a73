//! Type-safe error codes attached to error logs.
//!
//! Codes never reach the client body; they tag the `error_code` field of the
//! log line emitted when an [`AppError`](super::AppError) becomes a response.
//!
//! # Example
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::ValidationError;
//! assert_eq!(code.as_str(), "VALIDATION_ERROR");
//! assert_eq!(code.code(), 1001);
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors (1000-1999)
    /// Request body decoded but failed its field rules
    ValidationError,

    /// Request body is not valid JSON for the target shape
    InvalidJson,

    /// Query string value missing or malformed
    InvalidQuery,

    /// Route exists but was called with a different method
    MethodNotAllowed,

    /// Requested resource was not found
    NotFound,

    // Server errors (2000-2999)
    /// An unexpected internal server error occurred
    InternalError,

    /// A database operation failed
    DatabaseError,

    /// A dependency is unavailable
    ServiceUnavailable,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::InvalidJson => "INVALID_JSON",
            Self::InvalidQuery => "INVALID_QUERY",
            Self::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            Self::NotFound => "NOT_FOUND",
            Self::InternalError => "INTERNAL_ERROR",
            Self::DatabaseError => "DATABASE_ERROR",
            Self::ServiceUnavailable => "SERVICE_UNAVAILABLE",
        }
    }

    /// Integer code for structured logs and alerting.
    ///
    /// - 1000-1999: client errors
    /// - 2000-2999: server errors
    pub fn code(&self) -> i32 {
        match self {
            Self::ValidationError => 1001,
            Self::InvalidJson => 1002,
            Self::InvalidQuery => 1003,
            Self::MethodNotAllowed => 1004,
            Self::NotFound => 1005,

            Self::InternalError => 2001,
            Self::DatabaseError => 2002,
            Self::ServiceUnavailable => 2003,
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
