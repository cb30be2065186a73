use core_config::{AppInfo, FromEnv, app_info, cors::CorsConfig, env_parse, server::ServerConfig};
use database::postgres::PostgresConfig;
use std::path::PathBuf;

pub use core_config::Environment;

/// Application-specific configuration
/// Composes shared config components from the `config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub database: PostgresConfig,
    pub server: ServerConfig,
    pub cors: CorsConfig,
    pub environment: Environment,
    /// Optional JSON log file next to console output
    pub log_file: Option<PathBuf>,
    /// Apply pending migrations before serving
    pub run_migrations: bool,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let database = PostgresConfig::from_env()?; // Required - will fail if not set
        let server = ServerConfig::from_env()?; // Uses defaults: HOST=0.0.0.0, PORT=8080
        let cors = CorsConfig::from_env()?;
        let log_file = std::env::var_os("LOG_FILE_PATH")
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);
        let run_migrations = env_parse("RUN_MIGRATIONS", true)?;

        Ok(Self {
            app: app_info!(),
            database,
            server,
            cors,
            environment,
            log_file,
            run_migrations,
        })
    }
}
