//! Color representation and quantization utilities.
//!
//! This module provides the [`Color`] struct for representing RGBA colors with
//! `f32` components in the unit interval, along with the 8-bit quantization
//! helpers used by the zone overlay encoder.

use serde::{Deserialize, Serialize};

/// Represents a color in RGBA (Red, Green, Blue, Alpha) format.
///
/// Components `r`, `g`, `b` (color channels) and `a` (alpha/opacity) are
/// stored as `f32` values, nominally in the range `[0.0, 1.0]`.
/// - `0.0` means no intensity or fully transparent.
/// - `1.0` means full intensity or fully opaque.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red component, typically in the range `[0.0, 1.0]`.
    pub r: f32,
    /// Green component, typically in the range `[0.0, 1.0]`.
    pub g: f32,
    /// Blue component, typically in the range `[0.0, 1.0]`.
    pub b: f32,
    /// Alpha (opacity) component. `0.0` is fully transparent, `1.0` opaque.
    pub a: f32,
}

impl Color {
    /// Fully opaque white.
    pub const WHITE: Color = Color { r: 1.0, g: 1.0, b: 1.0, a: 1.0 };

    /// Fully transparent black.
    pub const TRANSPARENT: Color = Color { r: 0.0, g: 0.0, b: 0.0, a: 0.0 };

    /// Creates a new `Color` with the given RGBA components.
    ///
    /// Each component should be in the range `[0.0, 1.0]`; values outside
    /// this range are clamped.
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Color {
            r: r.clamp(0.0, 1.0),
            g: g.clamp(0.0, 1.0),
            b: b.clamp(0.0, 1.0),
            a: a.clamp(0.0, 1.0),
        }
    }

    /// Creates a new opaque `Color` (alpha = 1.0) with the given RGB components.
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Color::new(r, g, b, 1.0)
    }

    /// Creates a new `Color` from RGBA components in the range `[0, 255]`.
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color::new(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
            f32::from(a) / 255.0,
        )
    }

    /// Returns this color with the given alpha, other components unchanged.
    pub fn with_alpha(&self, a: f32) -> Self {
        Color::new(self.r, self.g, self.b, a)
    }

    /// Quantizes the color to four 8-bit channels in `[r, g, b, a]` order.
    ///
    /// Each component is clamped to the unit interval before scaling, so
    /// out-of-range inputs saturate instead of wrapping.
    pub fn to_rgba8(&self) -> [u8; 4] {
        [
            unit_to_u8(self.r),
            unit_to_u8(self.g),
            unit_to_u8(self.b),
            unit_to_u8(self.a),
        ]
    }
}

impl Default for Color {
    /// Defaults to fully transparent black.
    fn default() -> Self {
        Color::TRANSPARENT
    }
}

/// Quantizes a unit-interval value to an 8-bit channel.
///
/// The value is clamped to `[0.0, 1.0]` first; `-0.5` quantizes to `0` and
/// `1.5` quantizes to `255` rather than wrapping.
pub fn unit_to_u8(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}
