//! # SnapZone Core Library (`snapzone-core`)
//!
//! `snapzone-core` is the foundational layer of the SnapZone window-zoning
//! utility. It provides the infrastructure shared by all higher layers:
//!
//! - **Error Handling**: a unified error system through the [`CoreError`] enum
//!   and the more specific [`ConfigError`].
//! - **Core Data Types**: geometry primitives ([`Point`], [`Size`], [`Rect`])
//!   and RGBA color representation ([`Color`]).
//! - **Configuration Management**: TOML-based configuration loading with
//!   default fallbacks and validation, through [`ConfigLoader`] and
//!   [`CoreConfig`].
//! - **Logging**: a `tracing`-based logging framework configurable for console
//!   and file output.
//!
//! Key components are re-exported at the crate root for ease of use.
//!
//! ```rust,ignore
//! use snapzone_core::config::ConfigLoader;
//! use snapzone_core::logging::initialize_logging;
//!
//! let config = ConfigLoader::load()?;
//! initialize_logging(&config.logging)?;
//! tracing::info!("SnapZone core initialized.");
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod types;

pub use config::{ConfigLoader, CoreConfig, LoggingConfig, OverlayConfig, SwitcherConfig};
pub use error::{ConfigError, CoreError};
pub use types::{Color, Point, Rect, Size, ZoneRect};
