//! Configuration struct definitions.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Root configuration structure for the SnapZone core layer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    /// Logging subsystem configuration.
    pub logging: LoggingConfig,
    /// Unified layout switcher configuration.
    pub switcher: SwitcherConfig,
    /// Zone overlay configuration.
    pub overlay: OverlayConfig,
}

/// Configuration for the logging subsystem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (`trace`, `debug`, `info`, `warn`, `error`).
    pub level: String,
    /// Optional log file path. When absent, only console logging is active.
    pub file_path: Option<PathBuf>,
    /// Output format for the file layer.
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: defaults::default_log_level(),
            file_path: None,
            format: LogFormat::default(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable text lines.
    #[default]
    Text,
    /// Structured JSON records.
    Json,
}

/// Configuration for the unified layout switcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwitcherConfig {
    /// Capacity of the broadcast channel carrying switcher events.
    pub event_capacity: usize,
    /// Whether applying a layout emits the on-screen-display events.
    pub show_osd_on_apply: bool,
}

impl Default for SwitcherConfig {
    fn default() -> Self {
        SwitcherConfig {
            event_capacity: defaults::default_event_capacity(),
            show_osd_on_apply: true,
        }
    }
}

/// Configuration for the zone overlay encoder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Default zone border corner radius, in pixels.
    pub default_border_radius: f32,
    /// Default zone border width, in pixels.
    pub default_border_width: f32,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        OverlayConfig {
            default_border_radius: defaults::DEFAULT_BORDER_RADIUS,
            default_border_width: defaults::DEFAULT_BORDER_WIDTH,
        }
    }
}
