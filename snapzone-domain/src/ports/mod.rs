//! Port traits for the external collaborators of the SnapZone control plane.
//!
//! Each collaborator is modeled as an optional capability reference resolved
//! at construction time (`Option<Arc<dyn Trait>>`); every caller defines an
//! explicit behavior for the absent case rather than assuming presence.
//! Window placement itself, layout persistence, and compositor window
//! enumeration live behind these traits and are out of scope here.

use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use snapzone_core::types::ZoneRect;

#[cfg(test)]
use mockall::automock;

/// Reports which placement paradigm is currently active.
#[cfg_attr(test, automock)]
pub trait ModeSource: Send + Sync {
    /// `true` when the active placement mode is autotile, `false` for manual
    /// zones. Re-read on every dispatch; never cached by consumers.
    fn is_autotile_mode(&self) -> bool;
}

/// A built-in automatic window-placement strategy, as enumerated by the
/// autotile engine. The `id` is stable across sessions; `name` is for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutotileAlgorithm {
    pub id: String,
    pub name: String,
}

/// The automatic tiling engine.
#[cfg_attr(test, automock)]
pub trait AutotileEngine: Send + Sync {
    /// Whether the engine is currently enabled. A disabled engine never
    /// receives shortcut dispatches even while the mode source reports
    /// autotile mode.
    fn is_enabled(&self) -> bool;

    /// Moves focus to the next window in tiling order.
    fn focus_next(&self);

    /// Moves focus to the previous window in tiling order.
    fn focus_previous(&self);

    /// Rotates the window stacking order.
    fn rotate_window_order(&self, clockwise: bool);

    /// Toggles the floating state of the currently focused tiled window.
    fn toggle_focused_window_float(&self);

    /// Activates the tiling algorithm with the given id. Returns `false` when
    /// the id is unknown to the engine.
    fn activate_algorithm(&self, algorithm_id: &str) -> bool;

    /// The available algorithms, in their declared order.
    fn algorithms(&self) -> Vec<AutotileAlgorithm>;

    /// The id of the currently active algorithm, if any.
    fn active_algorithm_id(&self) -> Option<String>;
}

/// The manual zone-tracking backend operating on windows snapped to zones.
#[cfg_attr(test, automock)]
pub trait WindowTracker: Send + Sync {
    /// Cycles window focus within the active zone.
    fn cycle_windows_in_zone(&self, forward: bool);

    /// Rotates windows through the zone assignment order.
    fn rotate_windows_in_layout(&self, clockwise: bool);

    /// Unsnaps the focused window from its zone (or re-snaps a floating one).
    fn toggle_window_float(&self);
}

/// A persisted, user-defined arrangement of zones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManualLayout {
    /// Stable unique identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Zone rectangles in pixel space, in zone-number order.
    pub zones: Vec<ZoneRect>,
}

/// The manual layout catalog and its apply operation.
#[cfg_attr(test, automock)]
pub trait LayoutManager: Send + Sync {
    /// All layouts in persisted order.
    fn layouts(&self) -> Vec<ManualLayout>;

    /// Applies the layout with the given id. Returns the applied layout
    /// object, or `None` when the id does not resolve.
    fn apply_layout(&self, id: &str) -> Option<ManualLayout>;

    /// The id of the layout currently active in the manual subsystem, if any.
    fn active_layout_id(&self) -> Option<String>;
}

/// An in-memory [`LayoutManager`], used by tests and as the default catalog
/// before a persistence backend is attached.
#[derive(Debug, Default)]
pub struct InMemoryLayoutManager {
    state: Mutex<InMemoryLayoutState>,
}

#[derive(Debug, Default)]
struct InMemoryLayoutState {
    layouts: Vec<ManualLayout>,
    active_id: Option<String>,
}

impl InMemoryLayoutManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a layout with a freshly assigned id and returns that id.
    pub fn add_layout(&self, name: impl Into<String>, zones: Vec<ZoneRect>) -> String {
        let id = Uuid::new_v4().to_string();
        let layout = ManualLayout {
            id: id.clone(),
            name: name.into(),
            zones,
        };
        self.lock_state().layouts.push(layout);
        id
    }

    /// Removes the layout with the given id. Returns `true` when a layout was
    /// removed. The active id is left untouched even when it referenced the
    /// removed layout; stale selections are a normal state for consumers.
    pub fn remove_layout(&self, id: &str) -> bool {
        let mut state = self.lock_state();
        let before = state.layouts.len();
        state.layouts.retain(|layout| layout.id != id);
        state.layouts.len() != before
    }

    fn lock_state(&self) -> MutexGuard<'_, InMemoryLayoutState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl LayoutManager for InMemoryLayoutManager {
    fn layouts(&self) -> Vec<ManualLayout> {
        self.lock_state().layouts.clone()
    }

    fn apply_layout(&self, id: &str) -> Option<ManualLayout> {
        let mut state = self.lock_state();
        let layout = state.layouts.iter().find(|layout| layout.id == id).cloned()?;
        debug!(layout_id = %id, "applying manual layout");
        state.active_id = Some(layout.id.clone());
        Some(layout)
    }

    fn active_layout_id(&self) -> Option<String> {
        self.lock_state().active_id.clone()
    }
}

/// Convenience alias for an optionally attached collaborator.
pub type Attached<T> = Option<Arc<T>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_manager_assigns_unique_ids() {
        let manager = InMemoryLayoutManager::new();
        let a = manager.add_layout("Halves", vec![ZoneRect::new(0, 0, 960, 1080)]);
        let b = manager.add_layout("Thirds", vec![ZoneRect::new(0, 0, 640, 1080)]);
        assert_ne!(a, b);
        assert_eq!(manager.layouts().len(), 2);
    }

    #[test]
    fn apply_layout_sets_active_id() {
        let manager = InMemoryLayoutManager::new();
        let id = manager.add_layout("Halves", vec![]);
        assert_eq!(manager.active_layout_id(), None);
        let applied = manager.apply_layout(&id).unwrap();
        assert_eq!(applied.name, "Halves");
        assert_eq!(manager.active_layout_id(), Some(id));
    }

    #[test]
    fn apply_unknown_layout_fails_without_side_effects() {
        let manager = InMemoryLayoutManager::new();
        let id = manager.add_layout("Halves", vec![]);
        manager.apply_layout(&id).unwrap();
        assert!(manager.apply_layout("no-such-id").is_none());
        assert_eq!(manager.active_layout_id(), Some(id));
    }

    #[test]
    fn remove_layout_keeps_stale_active_id() {
        let manager = InMemoryLayoutManager::new();
        let id = manager.add_layout("Halves", vec![]);
        manager.apply_layout(&id).unwrap();
        assert!(manager.remove_layout(&id));
        assert!(!manager.remove_layout(&id));
        assert_eq!(manager.active_layout_id(), Some(id));
        assert!(manager.layouts().is_empty());
    }

    #[test]
    fn manual_layout_serde_roundtrip() {
        let layout = ManualLayout {
            id: Uuid::new_v4().to_string(),
            name: "Columns".to_string(),
            zones: vec![ZoneRect::new(0, 0, 640, 1080), ZoneRect::new(640, 0, 640, 1080)],
        };
        let json = serde_json::to_string(&layout).unwrap();
        let back: ManualLayout = serde_json::from_str(&json).unwrap();
        assert_eq!(layout, back);
    }
}
