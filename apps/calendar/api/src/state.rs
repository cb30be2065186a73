//! Application state shared by the route builders and the readiness probe.

/// Shared application state.
///
/// Cloned per router; the connection pool is reference-counted internally.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// PostgreSQL database connection pool
    pub db: database::postgres::DatabaseConnection,
}
