//! Structured logging with tracing
//!
//! Provides centralized logging configuration using the tracing ecosystem:
//! level parsing, env-filter support, and optional JSON output.

use crate::constants::LOG_ENV_VAR;
use pdl_domain::error::{Error, Result};
use std::path::Path;
use tracing::{debug, info, warn, Level};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

// Re-export LoggingConfig for convenience
pub use crate::config::LoggingConfig;

/// Initialize logging with the provided configuration
///
/// The `PDL_LOG` environment variable overrides the configured level with a
/// full env-filter directive set. Calling this more than once per process
/// fails, since the global subscriber can only be installed once.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let level = parse_log_level(&config.level)?;
    let filter =
        EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(&config.level));

    // Types differ between the two branches, so each initializes separately
    if config.json_format {
        let stdout = fmt::layer().json().with_target(true);
        Registry::default()
            .with(filter)
            .with(stdout)
            .try_init()
            .map_err(|e| Error::infrastructure_with("Failed to initialize logging", e))?;
    } else {
        let stdout = fmt::layer().with_target(true);
        Registry::default()
            .with(filter)
            .with(stdout)
            .try_init()
            .map_err(|e| Error::infrastructure_with("Failed to initialize logging", e))?;
    }

    info!("Logging initialized with level: {}", level);
    Ok(())
}

/// Parse log level string to tracing Level
pub fn parse_log_level(level: &str) -> Result<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" | "warning" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => Err(Error::config(format!("Invalid log level: {}", level))),
    }
}

/// Log the outcome of looking for a configuration file
pub fn log_config_loaded(path: &Path, found: bool) {
    if found {
        debug!(path = %path.display(), "configuration file merged");
    } else {
        warn!(path = %path.display(), "configuration file not found, using defaults");
    }
}
