//! Error handling for the SnapZone core layer.
//!
//! Error types are defined with the `thiserror` crate. The main error type of
//! this crate is [`CoreError`], which encapsulates more specific errors like
//! [`ConfigError`].

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for the SnapZone utility.
///
/// Represents all failures that can occur in the core layer. Higher layers
/// wrap or convert this type rather than inventing parallel hierarchies.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Errors related to configuration loading, parsing, or validation.
    #[error("Configuration Error: {0}")]
    Config(#[from] ConfigError),

    /// Errors that occur during the initialization of the logging system.
    #[error("Logging Initialization Failed: {0}")]
    LoggingInitialization(String),

    /// General I/O errors not covered by other specific variants.
    #[error("I/O Error: {0}")]
    Io(#[from] std::io::Error),

    /// Catch-all for unexpected internal errors within the core library.
    #[error("An unexpected internal error occurred: {0}")]
    Internal(String),
}

/// Error type for configuration-related operations.
///
/// Typically wrapped by [`CoreError::Config`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An error occurred while attempting to read a configuration file.
    #[error("Failed to read configuration file from {path:?}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An error occurred while parsing a configuration file.
    #[error("Failed to parse configuration file: {0}")]
    ParseError(#[from] toml::de::Error),

    /// A configuration value failed validation after successful parsing.
    #[error("Configuration validation failed: {0}")]
    ValidationError(String),

    /// No configuration file was found at any of the expected locations.
    #[error("No configuration file found. Checked locations: {locations:?}")]
    NotFound { locations: Vec<PathBuf> },
}
