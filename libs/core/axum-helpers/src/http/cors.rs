use axum::http::{HeaderName, HeaderValue, Method, header, request::Parts};
use core_config::cors::CorsConfig;
use std::io;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Creates the CORS layer for the API.
///
/// - origins: any `http://` origin, or the configured list
/// - methods: POST, PUT, DELETE, GET
/// - headers: Accept, Authorization, Content-Type, X-CSRF-Token
/// - exposed: Link
/// - no credentials, 5 minute max age
///
/// # Errors
/// Returns `InvalidInput` when a configured origin is not a valid header value.
pub fn create_cors_layer(config: &CorsConfig) -> io::Result<CorsLayer> {
    let allow_origin = match config {
        CorsConfig::AnyHttp => AllowOrigin::predicate(|origin: &HeaderValue, _: &Parts| {
            origin.as_bytes().starts_with(b"http://")
        }),
        CorsConfig::List(origins) => {
            let origins = origins
                .iter()
                .map(|o| o.parse::<HeaderValue>())
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| {
                    io::Error::new(
                        io::ErrorKind::InvalidInput,
                        format!("Invalid CORS_ALLOWED_ORIGIN value: {}", e),
                    )
                })?;
            AllowOrigin::list(origins)
        }
    };

    Ok(CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::POST, Method::PUT, Method::DELETE, Method::GET])
        .allow_headers([
            header::ACCEPT,
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            HeaderName::from_static("x-csrf-token"),
        ])
        .expose_headers([header::LINK])
        .allow_credentials(false)
        .max_age(Duration::from_secs(300)))
}
