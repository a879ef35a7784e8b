use serde::{Deserialize, Serialize};

use crate::ports::ManualLayout;

/// Events broadcast by the unified layout switcher.
///
/// `LayoutApplied` and `AutotileApplied` are intended for on-screen-display
/// consumers and are gated by `SwitcherConfig::show_osd_on_apply`;
/// `SelectionChanged` and `CatalogsChanged` always fire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LayoutSwitchEvent {
    /// A manual layout was applied; carries the applied layout object.
    LayoutApplied(ManualLayout),
    /// An autotile algorithm was activated.
    AutotileApplied { algorithm_id: String },
    /// The current selection id changed, through an apply or an external
    /// state sync.
    SelectionChanged {
        old_id: Option<String>,
        new_id: Option<String>,
    },
    /// One of the underlying catalogs changed; cached merged lists are stale.
    CatalogsChanged,
}
