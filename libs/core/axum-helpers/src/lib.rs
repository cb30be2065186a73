//! # Axum Helpers
//!
//! Shared plumbing for the HTTP services in this workspace.
//!
//! ## Modules
//!
//! - **[`server`]**: Router setup, health checks, graceful shutdown
//! - **[`http`]**: HTTP middleware (CORS)
//! - **[`errors`]**: `{"error": ...}` bodies with error codes
//! - **[`extractors`]**: Validated JSON body extractor
//! - **[`response`]**: `{"result": ...}` success envelope
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::server::{create_production_app, create_router};
//! use core_config::{cors::CorsConfig, server::ServerConfig};
//! use utoipa::OpenApi;
//!
//! #[derive(OpenApi)]
//! #[openapi(paths())]
//! struct ApiDoc;
//!
//! #[tokio::main]
//! async fn main() -> std::io::Result<()> {
//!     let config = ServerConfig::default();
//!     let router = create_router::<ApiDoc>(Router::new(), &config, &CorsConfig::default())?;
//!     create_production_app(router, &config, async {}).await
//! }
//! ```

pub mod errors;
pub mod extractors;
pub mod http;
pub mod response;
pub mod server;

pub use errors::{AppError, ErrorCode, ErrorResponse};
pub use extractors::ValidatedJson;
pub use http::create_cors_layer;
pub use response::ResultResponse;
pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, close_postgres, create_production_app,
    create_router, health_router, run_health_checks, serve_with_shutdown,
};
