//! Mode-aware routing of global shortcut actions.
//!
//! The router resolves each of the three logical window actions (cycle,
//! rotate, toggle-float) to exactly one backend call, based on the placement
//! mode at the moment of invocation. It holds no state of its own: the mode
//! source is consulted on every call, so mode changes between calls are
//! observed immediately.

use std::sync::Arc;

use tracing::debug;

use crate::ports::{Attached, AutotileEngine, ModeSource, WindowTracker};

/// Dispatches shortcut actions to the autotile engine or the manual
/// zone-tracking backend.
///
/// Dispatch rules, per action:
/// 1. With no mode source attached, the manual backend is used
///    unconditionally.
/// 2. Otherwise, when the mode is autotile and the engine reports itself
///    enabled, the autotile backend is used.
/// 3. Otherwise the manual backend is used. Autotile mode with a disabled
///    engine falls back to manual dispatch; it is a graceful degradation,
///    not an error.
///
/// No action ever reaches both backends. When the selected backend is not
/// attached, the call is a side-effect-free no-op.
pub struct ShortcutRouter {
    mode_source: Attached<dyn ModeSource>,
    autotile: Attached<dyn AutotileEngine>,
    tracker: Attached<dyn WindowTracker>,
}

impl ShortcutRouter {
    pub fn new(
        mode_source: Attached<dyn ModeSource>,
        autotile: Attached<dyn AutotileEngine>,
        tracker: Attached<dyn WindowTracker>,
    ) -> Self {
        Self {
            mode_source,
            autotile,
            tracker,
        }
    }

    /// Cycles window focus forward or backward: next/previous window in
    /// tiling order under autotile, window cycling within the active zone
    /// under manual mode.
    pub fn cycle_windows(&self, forward: bool) {
        if let Some(engine) = self.active_autotile() {
            debug!(forward, "routing window cycle to the autotile engine");
            if forward {
                engine.focus_next();
            } else {
                engine.focus_previous();
            }
        } else if let Some(tracker) = &self.tracker {
            debug!(forward, "routing window cycle to the zone tracker");
            tracker.cycle_windows_in_zone(forward);
        } else {
            debug!("window cycle ignored: no backend attached");
        }
    }

    /// Rotates the window order: stacking order under autotile, zone
    /// assignment order under manual mode.
    pub fn rotate_windows(&self, clockwise: bool) {
        if let Some(engine) = self.active_autotile() {
            debug!(clockwise, "routing window rotation to the autotile engine");
            engine.rotate_window_order(clockwise);
        } else if let Some(tracker) = &self.tracker {
            debug!(clockwise, "routing window rotation to the zone tracker");
            tracker.rotate_windows_in_layout(clockwise);
        } else {
            debug!("window rotation ignored: no backend attached");
        }
    }

    /// Toggles the float state of the focused window: tiled/floating under
    /// autotile, snapped/unsnapped under manual mode.
    pub fn toggle_float(&self) {
        if let Some(engine) = self.active_autotile() {
            debug!("routing float toggle to the autotile engine");
            engine.toggle_focused_window_float();
        } else if let Some(tracker) = &self.tracker {
            debug!("routing float toggle to the zone tracker");
            tracker.toggle_window_float();
        } else {
            debug!("float toggle ignored: no backend attached");
        }
    }

    /// The autotile engine, when it should service the current call: mode
    /// source attached, mode reported as autotile, engine attached and
    /// enabled.
    fn active_autotile(&self) -> Option<&Arc<dyn AutotileEngine>> {
        let mode_source = self.mode_source.as_ref()?;
        if !mode_source.is_autotile_mode() {
            return None;
        }
        self.autotile.as_ref().filter(|engine| engine.is_enabled())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{MockAutotileEngine, MockModeSource, MockWindowTracker};

    fn autotile_mode(is_autotile: bool) -> Arc<dyn ModeSource> {
        let mut source = MockModeSource::new();
        source.expect_is_autotile_mode().return_const(is_autotile);
        Arc::new(source)
    }

    #[test]
    fn autotile_mode_with_enabled_engine_routes_cycle_to_engine() {
        let mut engine = MockAutotileEngine::new();
        engine.expect_is_enabled().return_const(true);
        engine.expect_focus_next().times(1).return_const(());
        let mut tracker = MockWindowTracker::new();
        tracker.expect_cycle_windows_in_zone().never();

        let router = ShortcutRouter::new(
            Some(autotile_mode(true)),
            Some(Arc::new(engine)),
            Some(Arc::new(tracker)),
        );
        router.cycle_windows(true);
    }

    #[test]
    fn backward_cycle_focuses_previous_window() {
        let mut engine = MockAutotileEngine::new();
        engine.expect_is_enabled().return_const(true);
        engine.expect_focus_previous().times(1).return_const(());

        let router = ShortcutRouter::new(Some(autotile_mode(true)), Some(Arc::new(engine)), None);
        router.cycle_windows(false);
    }

    #[test]
    fn manual_mode_routes_cycle_to_tracker() {
        let mut engine = MockAutotileEngine::new();
        engine.expect_focus_next().never();
        engine.expect_focus_previous().never();
        let mut tracker = MockWindowTracker::new();
        tracker
            .expect_cycle_windows_in_zone()
            .withf(|forward| *forward)
            .times(1)
            .return_const(());

        let router = ShortcutRouter::new(
            Some(autotile_mode(false)),
            Some(Arc::new(engine)),
            Some(Arc::new(tracker)),
        );
        router.cycle_windows(true);
    }

    #[test]
    fn disabled_engine_falls_back_to_tracker() {
        let mut engine = MockAutotileEngine::new();
        engine.expect_is_enabled().return_const(false);
        engine.expect_rotate_window_order().never();
        let mut tracker = MockWindowTracker::new();
        tracker
            .expect_rotate_windows_in_layout()
            .withf(|clockwise| *clockwise)
            .times(1)
            .return_const(());

        let router = ShortcutRouter::new(
            Some(autotile_mode(true)),
            Some(Arc::new(engine)),
            Some(Arc::new(tracker)),
        );
        router.rotate_windows(true);
    }

    #[test]
    fn missing_mode_source_always_routes_to_tracker() {
        let mut engine = MockAutotileEngine::new();
        engine.expect_toggle_focused_window_float().never();
        engine.expect_focus_next().never();
        engine.expect_rotate_window_order().never();
        let mut tracker = MockWindowTracker::new();
        tracker.expect_toggle_window_float().times(1).return_const(());
        tracker.expect_cycle_windows_in_zone().times(1).return_const(());
        tracker.expect_rotate_windows_in_layout().times(1).return_const(());

        let router = ShortcutRouter::new(None, Some(Arc::new(engine)), Some(Arc::new(tracker)));
        router.toggle_float();
        router.cycle_windows(true);
        router.rotate_windows(false);
    }

    #[test]
    fn autotile_mode_without_engine_falls_back_to_tracker() {
        let mut tracker = MockWindowTracker::new();
        tracker.expect_toggle_window_float().times(1).return_const(());

        let router = ShortcutRouter::new(Some(autotile_mode(true)), None, Some(Arc::new(tracker)));
        router.toggle_float();
    }

    #[test]
    fn no_backends_attached_is_a_noop() {
        let router = ShortcutRouter::new(Some(autotile_mode(false)), None, None);
        router.cycle_windows(true);
        router.rotate_windows(false);
        router.toggle_float();
    }

    #[test]
    fn float_toggle_reaches_exactly_one_backend_per_mode() {
        for is_autotile in [false, true] {
            let mut engine = MockAutotileEngine::new();
            engine.expect_is_enabled().return_const(true);
            engine
                .expect_toggle_focused_window_float()
                .times(usize::from(is_autotile))
                .return_const(());
            let mut tracker = MockWindowTracker::new();
            tracker
                .expect_toggle_window_float()
                .times(usize::from(!is_autotile))
                .return_const(());

            let router = ShortcutRouter::new(
                Some(autotile_mode(is_autotile)),
                Some(Arc::new(engine)),
                Some(Arc::new(tracker)),
            );
            router.toggle_float();
        }
    }
}
