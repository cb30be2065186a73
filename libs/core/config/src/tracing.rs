use crate::Environment;
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Arc;
use tracing::{Subscriber, debug, info};
use tracing_subscriber::{EnvFilter, Layer, prelude::*, registry::LookupSpan};

/// Install color-eyre with a project-standard configuration.
///
/// Call this early in the main() before any fallible operations to ensure
/// colored error output. Safe to call multiple times.
///
/// Configuration:
/// - Shows file:line where errors occur
/// - Hides environment variables (less noise)
pub fn install_color_eyre() {
    let _ = color_eyre::config::HookBuilder::default()
        .display_location_section(true)
        .display_env_section(false)
        .install();
}

/// Initialize tracing with environment-aware configuration and error span capture.
///
/// - **Production** (`APP_ENV=prod`): JSON to stderr at `info`, module targets hidden.
/// - **Development** (default): pretty output to stdout at `debug`.
///
/// Both install `ErrorLayer` so span traces are captured on errors. `RUST_LOG`
/// overrides the level in either mode.
///
/// When `log_file` is given, every event is also appended to that file as JSON.
/// Missing parent directories are created.
///
/// Safe to call more than once; later calls leave the first subscriber in place.
pub fn init_tracing(environment: &Environment, log_file: Option<&Path>) -> io::Result<()> {
    let is_production = environment.is_production();
    let file = log_file.map(open_log_file).transpose()?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if is_production {
            EnvFilter::new("info,tower_http=info,sea_orm=warn,sqlx=warn")
        } else {
            EnvFilter::new("debug,hyper_util=info,sqlx=info")
        }
    });

    let result = if is_production {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(false)
                    .flatten_event(true)
                    .with_writer(io::stderr),
            )
            .with(json_file_layer(file))
            .with(tracing_error::ErrorLayer::default())
            .with(filter)
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_file(false)
                    .with_line_number(false)
                    .pretty(),
            )
            .with(json_file_layer(file))
            .with(tracing_error::ErrorLayer::default())
            .with(filter)
            .try_init()
    };

    match result {
        Ok(_) => {
            info!(
                environment = ?environment,
                log_file = ?log_file,
                "Tracing initialized with ErrorLayer"
            );
        }
        Err(_) => {
            debug!("Tracing already initialized, skipping re-initialization");
        }
    }

    Ok(())
}

fn open_log_file(path: &Path) -> io::Result<Arc<File>> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    Ok(Arc::new(file))
}

fn json_file_layer<S>(file: Option<Arc<File>>) -> Option<impl Layer<S>>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    file.map(|file| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_ansi(false)
            .with_writer(file)
    })
}
