//! Event domain error types

use axum_helpers::{AppError, errors::messages};
use sea_orm::DbErr;
use thiserror::Error;

/// Result type for event operations
pub type EventResult<T> = Result<T, EventError>;

pub const EVENT_NOT_FOUND: &str = "event not found";

/// Event domain errors
///
/// Layers add context by wrapping in [`EventError::Context`]; callers branch on
/// [`EventError::kind`], which looks through any number of wraps.
#[derive(Debug, Error)]
pub enum EventError {
    /// The `date` query parameter is absent or empty
    #[error("query string \"date\" is empty")]
    MissingDate,

    /// The `date` query parameter does not parse, or its window overflows
    #[error("invalid date {value:?}")]
    InvalidDate { value: String },

    /// No row matched the targeted id
    #[error("{}", EVENT_NOT_FOUND)]
    NotFound,

    /// Statement failed in the store
    #[error("{op} - {source}")]
    Database {
        op: &'static str,
        #[source]
        source: DbErr,
    },

    /// Call-site context around another event error
    #[error("{op} - {source}")]
    Context {
        op: &'static str,
        #[source]
        source: Box<EventError>,
    },
}

/// What an [`EventError`] means to a caller, independent of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MissingDate,
    InvalidDate,
    NotFound,
    Internal,
}

impl EventError {
    pub fn database(op: &'static str, source: DbErr) -> Self {
        Self::Database { op, source }
    }

    /// Wraps `self` with the name of the operation that observed it.
    pub fn context(self, op: &'static str) -> Self {
        Self::Context {
            op,
            source: Box::new(self),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingDate => ErrorKind::MissingDate,
            Self::InvalidDate { .. } => ErrorKind::InvalidDate,
            Self::NotFound => ErrorKind::NotFound,
            Self::Database { .. } => ErrorKind::Internal,
            Self::Context { source, .. } => source.kind(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}

// Convert to axum_helpers::AppError for HTTP responses
impl From<EventError> for AppError {
    fn from(err: EventError) -> Self {
        match err.kind() {
            ErrorKind::MissingDate => AppError::InvalidQuery(messages::empty_query_param("date")),
            ErrorKind::InvalidDate => {
                tracing::debug!(error = %err, "Rejected date query parameter");
                AppError::InvalidQuery(messages::INVALID_QUERY.to_string())
            }
            ErrorKind::NotFound => AppError::NotFound(EVENT_NOT_FOUND.to_string()),
            ErrorKind::Internal => AppError::InternalServerError(err.to_string()),
        }
    }
}

impl axum::response::IntoResponse for EventError {
    fn into_response(self) -> axum::response::Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
