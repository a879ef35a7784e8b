//! # SnapZone Domain Library (`snapzone-domain`)
//!
//! The control plane of the SnapZone window-zoning utility. Windows can be
//! snapped into predefined screen regions ("manual layouts") or handed to
//! automatic tiling algorithms ("autotile"); this crate decides, per
//! operation, which of the two subsystems services a request and keeps a
//! consistent view of what is currently active.
//!
//! ## Components
//!
//! - [`ports`]: trait contracts for the external collaborators (mode source,
//!   autotile engine, zone window tracker, manual layout manager). All are
//!   optionally attached; absent collaborators degrade to defined fallbacks.
//! - [`shortcuts`]: the [`ShortcutRouter`](shortcuts::ShortcutRouter),
//!   dispatching cycle / rotate / toggle-float actions to exactly one backend
//!   based on the placement mode at call time.
//! - [`switcher`]: the [`LayoutSwitcher`](switcher::LayoutSwitcher), merging
//!   manual layouts and autotile algorithms into one cyclable,
//!   ID-addressable catalog with identity-based current-selection tracking
//!   and broadcast events for OSD and IPC consumers.
//! - [`overlay`]: the [`ZoneImageEncoder`](overlay::ZoneImageEncoder),
//!   serializing zone geometry and style into a fixed-layout RGBA8 bitmap
//!   with a race-free handoff to the render thread.
//!
//! Routing and switching run on a single control thread; the encoded zone
//! image is the only resource shared with another thread.

pub mod error;
pub mod overlay;
pub mod ports;
pub mod shortcuts;
pub mod switcher;

pub use error::LayoutSwitchError;
pub use overlay::{ZoneDescriptor, ZoneImageEncoder};
pub use ports::{AutotileAlgorithm, AutotileEngine, LayoutManager, ManualLayout, ModeSource, WindowTracker};
pub use shortcuts::ShortcutRouter;
pub use switcher::{LayoutSwitchEvent, LayoutSwitcher, UnifiedLayoutEntry, AUTOTILE_ID_PREFIX};
