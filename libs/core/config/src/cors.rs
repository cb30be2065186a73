use crate::{ConfigError, FromEnv};
use std::env;

/// Which browser origins may call the API.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum CorsConfig {
    /// Any `http://` origin
    #[default]
    AnyHttp,
    /// Exact origins, as listed in `CORS_ALLOWED_ORIGIN`
    List(Vec<String>),
}

impl FromEnv for CorsConfig {
    /// `CORS_ALLOWED_ORIGIN`: comma-separated origins. Unset falls back to any `http://` origin.
    fn from_env() -> Result<Self, ConfigError> {
        let Ok(raw) = env::var("CORS_ALLOWED_ORIGIN") else {
            return Ok(CorsConfig::AnyHttp);
        };

        let origins: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        if origins.is_empty() {
            return Err(ConfigError::ParseError {
                key: "CORS_ALLOWED_ORIGIN".to_string(),
                details: "no origins listed".to_string(),
            });
        }

        Ok(CorsConfig::List(origins))
    }
}
