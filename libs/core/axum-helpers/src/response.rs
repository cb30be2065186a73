//! Success envelope shared by every JSON endpoint.

use axum::{
    Json,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Success body: `{"result": <value>}`.
///
/// Pair with a status code for anything other than `200`:
/// `(StatusCode::CREATED, ResultResponse::new(id))`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ResultResponse<T> {
    pub result: T,
}

impl<T> ResultResponse<T> {
    pub fn new(result: T) -> Self {
        Self { result }
    }
}

impl<T: Serialize> IntoResponse for ResultResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}
