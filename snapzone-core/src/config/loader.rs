//! Configuration loading and validation.

use std::fs;
use std::path::PathBuf;

use directories_next::ProjectDirs;
use tracing::{debug, info};

use crate::error::{ConfigError, CoreError};

use super::types::CoreConfig;

/// Name of the configuration file looked up in the project config directory.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Loads and validates the [`CoreConfig`].
///
/// Loading proceeds as follows:
/// 1. The platform configuration directory is resolved (e.g.
///    `~/.config/snapzone/` on Linux).
/// 2. If `config.toml` exists there, it is read and parsed as TOML.
/// 3. If it does not exist, a default `CoreConfig` is used.
/// 4. The resulting configuration is validated; validation failures surface
///    as [`ConfigError::ValidationError`].
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads the configuration from the platform config directory, falling
    /// back to defaults when no file is present.
    pub fn load() -> Result<CoreConfig, CoreError> {
        let Some(path) = Self::config_file_path() else {
            info!("No project directory available; using default configuration.");
            let config = CoreConfig::default();
            Self::validate(&config)?;
            return Ok(config);
        };

        if !path.exists() {
            debug!(?path, "Configuration file not found; using defaults.");
            let config = CoreConfig::default();
            Self::validate(&config)?;
            return Ok(config);
        }

        let content = fs::read_to_string(&path).map_err(|source| ConfigError::ReadError {
            path: path.clone(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        info!(?path, "Configuration loaded.");
        Ok(config)
    }

    /// Parses and validates a configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<CoreConfig, CoreError> {
        let config: CoreConfig = toml::from_str(content).map_err(ConfigError::ParseError)?;
        Self::validate(&config)?;
        Ok(config)
    }

    fn config_file_path() -> Option<PathBuf> {
        ProjectDirs::from("org", "snapzone", "snapzone")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    fn validate(config: &CoreConfig) -> Result<(), ConfigError> {
        match config.logging.level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            other => {
                return Err(ConfigError::ValidationError(format!(
                    "unknown log level '{}'",
                    other
                )))
            }
        }
        if config.switcher.event_capacity == 0 {
            return Err(ConfigError::ValidationError(
                "switcher.event_capacity must be at least 1".to_string(),
            ));
        }
        if config.overlay.default_border_radius < 0.0 {
            return Err(ConfigError::ValidationError(
                "overlay.default_border_radius must not be negative".to_string(),
            ));
        }
        if config.overlay.default_border_width < 0.0 {
            return Err(ConfigError::ValidationError(
                "overlay.default_border_width must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}
