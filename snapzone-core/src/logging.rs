//! Logging setup for SnapZone, built on the `tracing` ecosystem.
//!
//! Supports console output and an optional non-blocking file layer with
//! text or JSON formatting.

use std::path::Path;
use std::sync::Mutex;

use once_cell::sync::Lazy;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt,
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

use crate::config::{LogFormat, LoggingConfig};
use crate::error::CoreError;

/// Global holder for the file logger's `WorkerGuard`.
///
/// The guard must stay alive for the lifetime of the process so buffered log
/// records are flushed.
static LOG_WORKER_GUARD: Lazy<Mutex<Option<WorkerGuard>>> = Lazy::new(|| Mutex::new(None));

/// Initializes a minimal logging setup, directing messages to `stderr`.
///
/// Intended for tests and early application startup before configuration is
/// loaded. Filters based on `RUST_LOG`, defaulting to "info". Errors (e.g. a
/// global subscriber already being set) are ignored.
pub fn init_minimal_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(Level::INFO.to_string()));

    let _ = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(atty::is(atty::Stream::Stderr))
        .try_init();
}

/// Initializes the global logging system from the given [`LoggingConfig`].
///
/// Installs a console layer and, when `file_path` is set, a non-blocking
/// daily-rolling file layer in the configured format.
pub fn initialize_logging(config: &LoggingConfig) -> Result<(), CoreError> {
    let level_filter_str = match config.level.to_lowercase().as_str() {
        "trace" => Level::TRACE.to_string(),
        "debug" => Level::DEBUG.to_string(),
        "info" => Level::INFO.to_string(),
        "warn" => Level::WARN.to_string(),
        "error" => Level::ERROR.to_string(),
        invalid_level => {
            return Err(CoreError::LoggingInitialization(format!(
                "invalid log level in config: {}",
                invalid_level
            )));
        }
    };

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(atty::is(atty::Stream::Stderr))
        .with_filter(EnvFilter::new(level_filter_str.clone()))
        .boxed();

    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync + 'static>> = vec![console_layer];
    let mut file_guard: Option<WorkerGuard> = None;
    if let Some(log_path) = &config.file_path {
        let (file_layer, guard) = create_file_layer(log_path, config.format)?;
        layers.push(file_layer.with_filter(EnvFilter::new(level_filter_str)).boxed());
        file_guard = Some(guard);
    }

    Registry::default()
        .with(layers)
        .try_init()
        .map_err(|e| {
            CoreError::LoggingInitialization(format!(
                "failed to set global tracing subscriber: {}",
                e
            ))
        })?;

    if let Ok(mut slot) = LOG_WORKER_GUARD.lock() {
        *slot = file_guard;
    }
    Ok(())
}

/// Creates the file logging layer and its flush guard.
///
/// Ensures the parent directory for the log file exists and sets up a
/// daily-rolling appender.
fn create_file_layer(
    log_path: &Path,
    format: LogFormat,
) -> Result<(Box<dyn Layer<Registry> + Send + Sync + 'static>, WorkerGuard), CoreError> {
    if let Some(parent) = log_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let file_appender = tracing_appender::rolling::daily(
        log_path.parent().unwrap_or_else(|| Path::new(".")),
        log_path
            .file_name()
            .unwrap_or_else(|| std::ffi::OsStr::new("snapzone.log")),
    );
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let layer: Box<dyn Layer<Registry> + Send + Sync + 'static> = match format {
        LogFormat::Json => Box::new(fmt::layer().json().with_writer(writer).with_ansi(false)),
        LogFormat::Text => Box::new(fmt::layer().with_writer(writer).with_ansi(false)),
    };
    Ok((layer, guard))
}
