//! Error types for the SnapZone domain layer.

use thiserror::Error;

/// Errors surfaced by the unified layout switcher.
///
/// All of these are local and recoverable: a failed apply leaves the current
/// selection untouched and emits no events.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutSwitchError {
    #[error("No layout entry with id '{0}' exists in the merged catalog.")]
    EntryNotFound(String),

    #[error("Layout index {index} is out of range for a catalog of {len} entries.")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Layout number {0} is out of range; numbers are 1-based.")]
    NumberOutOfRange(usize),

    #[error("The merged layout catalog is empty.")]
    EmptyCatalog,

    #[error("The {0} backend is not attached.")]
    BackendUnavailable(&'static str),

    #[error("The backend rejected applying layout entry '{0}'.")]
    ApplyRejected(String),
}
