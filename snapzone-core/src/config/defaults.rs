//! Default values for configuration settings.

/// Default log level filter.
pub fn default_log_level() -> String {
    "info".to_string()
}

/// Default broadcast channel capacity for switcher events.
pub fn default_event_capacity() -> usize {
    32
}

/// Default zone border corner radius, in pixels.
pub const DEFAULT_BORDER_RADIUS: f32 = 8.0;

/// Default zone border width, in pixels.
pub const DEFAULT_BORDER_WIDTH: f32 = 2.0;
