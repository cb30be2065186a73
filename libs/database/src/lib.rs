//! PostgreSQL connection management on top of SeaORM
//!
//! # Features
//!
//! - `config` - `core_config::FromEnv` for [`postgres::PostgresConfig`]
//!
//! # Example
//!
//! ```ignore
//! use database::postgres::{self, PostgresConfig};
//! use migration::Migrator;
//!
//! let db = postgres::connect_from_config_with_retry(PostgresConfig::from_env()?).await?;
//! postgres::run_migrations::<Migrator>(&db, "calendar_api").await?;
//! postgres::check_health(&db).await?;
//! ```

pub mod common;
pub mod postgres;

pub use common::{DatabaseError, DatabaseResult};
