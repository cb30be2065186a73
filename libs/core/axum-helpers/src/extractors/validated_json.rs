//! JSON extractor with automatic validation using the validator crate.

use crate::errors::{AppError, messages};
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON extractor with automatic validation.
///
/// Decodes the raw body regardless of `Content-Type` (GET endpoints carry a
/// JSON body too), then runs the `validator` rules.
///
/// - unreadable body or malformed JSON: `400 {"error": "invalid json"}`
/// - failed field rules: `400 {"error": "validation error"}`, field detail logged
///
/// # Example
/// ```ignore
/// use axum::Router;
/// use axum::routing::post;
/// use axum_helpers::extractors::ValidatedJson;
/// use serde::Deserialize;
/// use validator::Validate;
///
/// #[derive(Deserialize, Validate)]
/// struct CreateUser {
///     #[validate(length(min = 3, max = 50))]
///     username: String,
/// }
///
/// async fn create_user(ValidatedJson(payload): ValidatedJson<CreateUser>) -> String {
///     format!("Creating user: {}", payload.username)
/// }
///
/// let app = Router::new().route("/users", post(create_user));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            tracing::info!("Failed to read request body: {}", e);
            AppError::BadRequest(messages::INVALID_JSON.to_string())
        })?;

        let data: T = serde_json::from_slice(&bytes)?;
        data.validate()?;

        Ok(ValidatedJson(data))
    }
}
