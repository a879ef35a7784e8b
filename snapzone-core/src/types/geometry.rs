//! Geometric primitives like points, sizes, and rectangles.

use num_traits::Num;
use serde::{Deserialize, Serialize};

// --- Generic Point<T> ---

/// Represents a 2D point with generic coordinates.
///
/// # Type Parameters
///
/// * `T`: The numeric type for the coordinates (e.g., `u16`, `i32`).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(bound(
    serialize = "T: Serialize + Num + Copy",
    deserialize = "T: Deserialize<'de> + Num + Copy"
))]
pub struct Point<T: Num + Copy> {
    /// The x-coordinate of the point.
    pub x: T,
    /// The y-coordinate of the point.
    pub y: T,
}

impl<T: Num + Copy + Eq> Eq for Point<T> {}

impl<T: Num + Copy> Point<T> {
    /// Creates a new point with the given coordinates.
    pub const fn new(x: T, y: T) -> Self {
        Point { x, y }
    }
}

// --- Generic Size<T> ---

/// Represents a 2D size with generic width and height.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(bound(
    serialize = "T: Serialize + Num + Copy",
    deserialize = "T: Deserialize<'de> + Num + Copy"
))]
pub struct Size<T: Num + Copy> {
    /// The width component.
    pub width: T,
    /// The height component.
    pub height: T,
}

impl<T: Num + Copy + Eq> Eq for Size<T> {}

impl<T: Num + Copy> Size<T> {
    /// Creates a new size with the given width and height.
    pub const fn new(width: T, height: T) -> Self {
        Size { width, height }
    }

    /// Computes the area (`width * height`).
    pub fn area(&self) -> T {
        self.width * self.height
    }
}

// --- Generic Rect<T> ---

/// Represents an axis-aligned rectangle defined by a position and a size.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(bound(
    serialize = "T: Serialize + Num + Copy",
    deserialize = "T: Deserialize<'de> + Num + Copy"
))]
pub struct Rect<T: Num + Copy> {
    /// The position of the rectangle's top-left corner.
    pub position: Point<T>,
    /// The size of the rectangle.
    pub size: Size<T>,
}

impl<T: Num + Copy + Eq> Eq for Rect<T> {}

impl<T: Num + Copy> Rect<T> {
    /// Creates a new rectangle from individual coordinates and dimensions.
    pub const fn new(x: T, y: T, width: T, height: T) -> Self {
        Rect {
            position: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    /// The x-coordinate of the rectangle's left edge.
    pub fn x(&self) -> T {
        self.position.x
    }

    /// The y-coordinate of the rectangle's top edge.
    pub fn y(&self) -> T {
        self.position.y
    }

    /// The width of the rectangle.
    pub fn width(&self) -> T {
        self.size.width
    }

    /// The height of the rectangle.
    pub fn height(&self) -> T {
        self.size.height
    }
}

/// Zone geometry in pixel space. Each coordinate and dimension of a zone is
/// representable in 16 bits (0–65535), which the overlay encoder relies on.
pub type ZoneRect = Rect<u16>;
