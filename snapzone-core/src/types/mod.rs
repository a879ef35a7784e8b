//! Core data types for SnapZone.

pub mod color;
pub mod geometry;

pub use color::Color;
pub use geometry::{Point, Rect, Size, ZoneRect};
