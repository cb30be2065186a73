//! Server infrastructure module.
//!
//! This module provides:
//! - Application setup with OpenAPI documentation and middleware
//! - Health and readiness endpoints
//! - Graceful shutdown coordination
//! - Database connection cleanup
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::server::{create_production_app, create_router, health_router};
//! use core_config::app_info;
//!
//! let router = create_router::<ApiDoc>(api_routes, &config.server, &config.cors)?;
//! let app = router.merge(health_router(app_info!()));
//!
//! create_production_app(app, &config.server, async move { db.close().await.ok(); }).await?;
//! ```

pub mod app;
pub mod cleanup;
pub mod health;
pub mod shutdown;

pub use app::{REQUEST_ID_HEADER, create_production_app, create_router, serve_with_shutdown};
pub use cleanup::close_postgres;
pub use health::{HealthCheckFuture, HealthResponse, health_router, run_health_checks};
pub use shutdown::ShutdownCoordinator;
