//! Configuration management for SnapZone.
//!
//! Configuration is TOML-based and loaded through [`ConfigLoader`]. Missing
//! files fall back to defaults; present files are parsed with serde and then
//! validated. Submodules:
//!
//! - [`types`]: the configuration struct definitions ([`CoreConfig`],
//!   [`LoggingConfig`], [`SwitcherConfig`], [`OverlayConfig`]).
//! - [`defaults`]: default values used when a configuration file is missing
//!   or incomplete.
//! - [`loader`]: the loading and validation logic.

pub mod defaults;
pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::{CoreConfig, LogFormat, LoggingConfig, OverlayConfig, SwitcherConfig};
