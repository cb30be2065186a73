use axum_helpers::server::{close_postgres, create_production_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::postgres::{connect_from_config_with_retry, run_migrations};
use eyre::WrapErr;
use migration::Migrator;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    // Initialize tracing with ErrorLayer for span trace capture
    init_tracing(&config.environment, config.log_file.as_deref())
        .wrap_err("Failed to open log file")?;

    info!(
        name = config.app.name,
        version = config.app.version,
        environment = ?config.environment,
        "Starting calendar API"
    );

    let db = connect_from_config_with_retry(config.database.clone())
        .await
        .wrap_err("PostgreSQL connection failed")?;

    if config.run_migrations {
        run_migrations::<Migrator>(&db, config.app.name)
            .await
            .wrap_err("Database migrations failed")?;
    }

    let state = AppState { config, db };

    // Build router with API routes (pass reference, not ownership!)
    let api_routes = api::routes(&state);

    // create_router adds docs/middleware to our composed routes
    let router = axum_helpers::create_router::<openapi::ApiDoc>(
        api_routes,
        &state.config.server,
        &state.config.cors,
    )?;

    // - /health: liveness check with app name/version
    // - /ready: readiness check against the database
    let app = router
        .merge(health_router(state.config.app))
        .merge(api::ready_router(state.clone()));

    info!(
        "Serving with graceful shutdown ({:?} drain)",
        state.config.server.shutdown_timeout
    );

    let server_config = state.config.server.clone();
    create_production_app(app, &server_config, async move {
        info!("Shutting down: closing database connections");
        close_postgres(state.db, "events").await;
    })
    .await
    .wrap_err("Server error")?;

    info!("Calendar API shutdown complete");
    Ok(())
}
