//! The unified layout switcher.
//!
//! Presents two structurally different catalogs — persisted manual layouts
//! and built-in autotile algorithms — as one addressable, orderable sequence,
//! and keeps a durable notion of "current" that survives catalog churn.
//!
//! The current selection is tracked by id, never by position, so insertion,
//! removal, or reordering in either catalog cannot silently change what is
//! considered current. A selection whose id no longer resolves in the merged
//! list is a normal state: lookups return `None` and cycling restarts from
//! the first or last entry.

use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use serde::{Deserialize, Serialize};
use snapzone_core::config::SwitcherConfig;

use crate::error::LayoutSwitchError;
use crate::ports::{Attached, AutotileEngine, LayoutManager, ModeSource};

pub mod events;

pub use events::LayoutSwitchEvent;

/// Id prefix distinguishing autotile entries from manual layout ids in the
/// merged catalog.
pub const AUTOTILE_ID_PREFIX: &str = "autotile:";

/// One entry of the merged layout catalog.
///
/// Entries are transient: they are recomputed from the two source catalogs on
/// demand and never persisted. Within one computed list the `id` is unique
/// and determines both the entry kind and the target layout or algorithm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnifiedLayoutEntry {
    /// A manual layout id, or `"autotile:"` followed by an algorithm id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Whether this entry targets the autotile engine.
    pub is_autotile: bool,
}

/// Merges manual layouts and autotile algorithms into one cyclable catalog
/// and applies entries through the matching backend.
///
/// Single-threaded by design: all methods are control-thread calls, and the
/// merged-list cache is invalidated synchronously by
/// [`invalidate_catalogs`](Self::invalidate_catalogs) before the next read.
pub struct LayoutSwitcher {
    layout_manager: Attached<dyn LayoutManager>,
    autotile: Attached<dyn AutotileEngine>,
    mode_source: Attached<dyn ModeSource>,
    show_osd_on_apply: bool,
    current_id: Option<String>,
    cache: Option<Vec<UnifiedLayoutEntry>>,
    event_publisher: broadcast::Sender<LayoutSwitchEvent>,
}

impl LayoutSwitcher {
    pub fn new(
        layout_manager: Attached<dyn LayoutManager>,
        autotile: Attached<dyn AutotileEngine>,
        mode_source: Attached<dyn ModeSource>,
        config: &SwitcherConfig,
    ) -> Self {
        let (event_publisher, _) = broadcast::channel(config.event_capacity.max(1));
        Self {
            layout_manager,
            autotile,
            mode_source,
            show_osd_on_apply: config.show_osd_on_apply,
            current_id: None,
            cache: None,
            event_publisher,
        }
    }

    /// Subscribes to switcher events.
    pub fn subscribe(&self) -> broadcast::Receiver<LayoutSwitchEvent> {
        self.event_publisher.subscribe()
    }

    /// The merged catalog: all manual layouts in persisted order, followed by
    /// all autotile algorithms in their declared order.
    pub fn layouts(&mut self) -> Vec<UnifiedLayoutEntry> {
        self.entries().to_vec()
    }

    /// Drops the cached merged list and broadcasts
    /// [`LayoutSwitchEvent::CatalogsChanged`]. Must be called whenever either
    /// source catalog mutates; the next read recomputes the list.
    pub fn invalidate_catalogs(&mut self) {
        self.cache = None;
        let _ = self.event_publisher.send(LayoutSwitchEvent::CatalogsChanged);
    }

    /// The id of the current selection, if any. The id may reference an
    /// entry absent from the current merged list.
    pub fn current_layout_id(&self) -> Option<&str> {
        self.current_id.as_deref()
    }

    /// The entry of the current selection within the freshly computed merged
    /// list, or `None` when the selection id no longer resolves.
    pub fn current_layout(&mut self) -> Option<UnifiedLayoutEntry> {
        let id = self.current_id.clone()?;
        self.entries().iter().find(|entry| entry.id == id).cloned()
    }

    /// Applies the `n`-th entry of the merged catalog, 1-based.
    pub fn apply_by_number(&mut self, number: usize) -> Result<(), LayoutSwitchError> {
        if number == 0 {
            return Err(LayoutSwitchError::NumberOutOfRange(number));
        }
        self.apply_by_index(number - 1)
    }

    /// Applies the entry at `index` in the merged catalog.
    pub fn apply_by_index(&mut self, index: usize) -> Result<(), LayoutSwitchError> {
        let entries = self.entries();
        let len = entries.len();
        let entry = entries
            .get(index)
            .cloned()
            .ok_or(LayoutSwitchError::IndexOutOfRange { index, len })?;
        self.apply_entry(entry)
    }

    /// Applies the entry with the given id.
    pub fn apply_by_id(&mut self, id: &str) -> Result<(), LayoutSwitchError> {
        let entry = self
            .entries()
            .iter()
            .find(|entry| entry.id == id)
            .cloned()
            .ok_or_else(|| LayoutSwitchError::EntryNotFound(id.to_string()))?;
        self.apply_entry(entry)
    }

    /// Applies the entry after the current selection, wrapping around.
    pub fn cycle_next(&mut self) -> Result<(), LayoutSwitchError> {
        self.cycle(true)
    }

    /// Applies the entry before the current selection, wrapping around.
    pub fn cycle_previous(&mut self) -> Result<(), LayoutSwitchError> {
        self.cycle(false)
    }

    /// Cycles through the merged catalog in the given direction.
    ///
    /// An unresolvable (or absent) selection restarts the cycle: forward from
    /// the first entry, backward from the last.
    pub fn cycle(&mut self, forward: bool) -> Result<(), LayoutSwitchError> {
        let entries = self.entries().to_vec();
        if entries.is_empty() {
            return Err(LayoutSwitchError::EmptyCatalog);
        }
        let len = entries.len();
        let position = self
            .current_id
            .as_ref()
            .and_then(|id| entries.iter().position(|entry| &entry.id == id));
        let next = match (position, forward) {
            (Some(index), true) => (index + 1) % len,
            (Some(index), false) => (index + len - 1) % len,
            (None, true) => 0,
            (None, false) => len - 1,
        };
        self.apply_entry(entries[next].clone())
    }

    /// Re-derives the current selection from the live state of whichever
    /// backend is externally reported active, without applying anything.
    ///
    /// Used when the selection changes through a path other than this
    /// switcher (direct manual switch, external IPC). Idempotent: a
    /// [`LayoutSwitchEvent::SelectionChanged`] is broadcast only when the
    /// derived id differs from the stored one, and no backend apply call is
    /// ever made.
    pub fn sync_from_external_state(&mut self) {
        let autotile_active = self
            .mode_source
            .as_ref()
            .map(|source| source.is_autotile_mode())
            .unwrap_or(false);
        let derived = if autotile_active {
            self.autotile
                .as_ref()
                .and_then(|engine| engine.active_algorithm_id())
                .map(|id| format!("{AUTOTILE_ID_PREFIX}{id}"))
        } else {
            self.layout_manager
                .as_ref()
                .and_then(|manager| manager.active_layout_id())
        };
        let Some(new_id) = derived else {
            debug!("external sync: no externally active layout reported");
            return;
        };
        if self.current_id.as_deref() == Some(new_id.as_str()) {
            return;
        }
        let old_id = self.current_id.replace(new_id.clone());
        debug!(?old_id, new_id = %new_id, "selection synced from external state");
        let _ = self.event_publisher.send(LayoutSwitchEvent::SelectionChanged {
            old_id,
            new_id: Some(new_id),
        });
    }

    /// Applies a resolved entry through the matching backend. On success the
    /// selection id is updated and notifications are broadcast; on failure
    /// the selection is left unchanged and nothing is emitted.
    fn apply_entry(&mut self, entry: UnifiedLayoutEntry) -> Result<(), LayoutSwitchError> {
        if entry.is_autotile {
            let engine = self
                .autotile
                .as_ref()
                .ok_or(LayoutSwitchError::BackendUnavailable("autotile engine"))?;
            let algorithm_id = entry
                .id
                .strip_prefix(AUTOTILE_ID_PREFIX)
                .unwrap_or(&entry.id)
                .to_string();
            if !engine.activate_algorithm(&algorithm_id) {
                warn!(algorithm_id = %algorithm_id, "autotile engine rejected algorithm");
                return Err(LayoutSwitchError::ApplyRejected(entry.id));
            }
            info!(algorithm_id = %algorithm_id, "autotile algorithm applied");
            if self.show_osd_on_apply {
                let _ = self
                    .event_publisher
                    .send(LayoutSwitchEvent::AutotileApplied { algorithm_id });
            }
        } else {
            let manager = self
                .layout_manager
                .as_ref()
                .ok_or(LayoutSwitchError::BackendUnavailable("layout manager"))?;
            let layout = manager
                .apply_layout(&entry.id)
                .ok_or_else(|| LayoutSwitchError::ApplyRejected(entry.id.clone()))?;
            info!(layout_id = %entry.id, "manual layout applied");
            if self.show_osd_on_apply {
                let _ = self
                    .event_publisher
                    .send(LayoutSwitchEvent::LayoutApplied(layout));
            }
        }

        let old_id = self.current_id.replace(entry.id.clone());
        let _ = self.event_publisher.send(LayoutSwitchEvent::SelectionChanged {
            old_id,
            new_id: Some(entry.id),
        });
        Ok(())
    }

    /// The merged list, recomputed when the cache is invalid.
    fn entries(&mut self) -> &[UnifiedLayoutEntry] {
        if self.cache.is_none() {
            let merged = self.compute_entries();
            debug!(entries = merged.len(), "recomputed merged layout catalog");
            self.cache = Some(merged);
        }
        match &self.cache {
            Some(entries) => entries,
            None => &[],
        }
    }

    fn compute_entries(&self) -> Vec<UnifiedLayoutEntry> {
        let mut merged = Vec::new();
        if let Some(manager) = &self.layout_manager {
            for layout in manager.layouts() {
                merged.push(UnifiedLayoutEntry {
                    id: layout.id,
                    name: layout.name,
                    is_autotile: false,
                });
            }
        }
        if let Some(engine) = &self.autotile {
            for algorithm in engine.algorithms() {
                merged.push(UnifiedLayoutEntry {
                    id: format!("{AUTOTILE_ID_PREFIX}{}", algorithm.id),
                    name: algorithm.name,
                    is_autotile: true,
                });
            }
        }
        merged
    }
}
