use axum::{
    http::{Method, StatusCode},
    response::Response,
    routing::MethodRouter,
};

use super::{AppError, error_response, messages};

/// Fallback for unknown paths.
pub async fn not_found() -> Response {
    error_response(StatusCode::NOT_FOUND, messages::NOT_FOUND_RESOURCE)
}

/// Restricts a route to a single method.
///
/// Any other method is answered with `400 {"error": "only method <M> allowed"}`
/// instead of axum's default `405`.
///
/// # Example
/// ```ignore
/// use axum::{http::Method, routing::post, Router};
/// use axum_helpers::errors::handlers::only;
///
/// let app = Router::new().route("/create_event", only(Method::POST, post(create_event)));
/// ```
pub fn only<S>(method: Method, route: MethodRouter<S>) -> MethodRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    route.fallback(move || {
        let method = method.clone();
        async move { AppError::MethodNotAllowed(method) }
    })
}
