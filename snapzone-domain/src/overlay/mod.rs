//! Zone overlay state encoding.
//!
//! Live zone geometry and style state is serialized into a small RGBA8 bitmap
//! with a fixed bit-exact layout, consumed by a GPU-backed rendering stage.
//! Columns are zone slots; rows are fixed semantic channels:
//!
//! | row | channels (r, g, b, a)                                        |
//! |-----|--------------------------------------------------------------|
//! | 0   | position: x low, x high, y low, y high (16-bit pairs)        |
//! | 1   | size: width low, width high, height low, height high         |
//! | 2   | fill color, clamped to the unit interval, 8-bit quantized    |
//! | 3   | border color, same quantization                              |
//! | 4   | border radius / 255, border width / 255, highlight flag, zone number / 255 |
//! | 5–7 | reserved, zero                                               |
//!
//! The encoder builds each frame as a fresh buffer and swaps it in under a
//! lock, so the render thread never observes a partially written image. The
//! lock is held only for the swap and for cloning the `Arc` on read, never
//! across the encoding itself.

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::warn;

use snapzone_core::config::OverlayConfig;
use snapzone_core::types::color::unit_to_u8;
use snapzone_core::types::{Color, Size, ZoneRect};

/// Number of zone slots (bitmap columns). Zones beyond this capacity are
/// silently dropped.
pub const ZONE_SLOT_CAPACITY: usize = 32;

/// Number of bitmap rows. Rows beyond [`ROW_PARAMS`] are reserved.
pub const ROW_COUNT: usize = 8;

/// Bytes per RGBA8 pixel.
const BYTES_PER_PIXEL: usize = 4;

/// Row carrying zone x/y, packed as two 16-bit little-endian values.
pub const ROW_POSITION: usize = 0;
/// Row carrying zone width/height, packed like [`ROW_POSITION`].
pub const ROW_SIZE: usize = 1;
/// Row carrying the quantized fill color.
pub const ROW_FILL: usize = 2;
/// Row carrying the quantized border color.
pub const ROW_BORDER: usize = 3;
/// Row carrying border radius, border width, highlight flag, and zone number.
pub const ROW_PARAMS: usize = 4;

/// Per-zone input to the encoder.
///
/// Descriptors are produced fresh on every geometry or style change and
/// consumed exactly once; the encoded image is the only retained artifact.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneDescriptor {
    /// Pixel-space rectangle of the zone.
    pub rect: ZoneRect,
    /// Fill color.
    pub fill: Color,
    /// Border color; defaults to fully opaque white.
    pub border: Color,
    /// Border corner radius in pixels.
    pub border_radius: f32,
    /// Border width in pixels.
    pub border_width: f32,
    /// Whether the zone is currently highlighted.
    pub highlighted: bool,
    /// Small positive zone number, shown by the overlay.
    pub zone_number: u8,
}

impl ZoneDescriptor {
    /// Creates a descriptor with default styling (opaque white border,
    /// radius 8, width 2, not highlighted, zone number 1).
    pub fn new(rect: ZoneRect, fill: Color) -> Self {
        ZoneDescriptor {
            rect,
            fill,
            border: Color::WHITE,
            border_radius: 8.0,
            border_width: 2.0,
            highlighted: false,
            zone_number: 1,
        }
    }
}

/// Encodes zone descriptors into the overlay bitmap and hands it off to a
/// concurrently reading renderer.
///
/// Single writer (the control thread calling [`set_zones`](Self::set_zones)),
/// single reader (the render thread calling
/// [`request_image`](Self::request_image)); the image behind the lock is
/// replaced wholesale, never mutated in place.
#[derive(Debug)]
pub struct ZoneImageEncoder {
    config: OverlayConfig,
    image: Mutex<Arc<Vec<u8>>>,
}

impl ZoneImageEncoder {
    pub fn new(config: OverlayConfig) -> Self {
        ZoneImageEncoder {
            config,
            image: Mutex::new(Arc::new(vec![
                0;
                ZONE_SLOT_CAPACITY * ROW_COUNT * BYTES_PER_PIXEL
            ])),
        }
    }

    /// Creates a descriptor styled with this encoder's configured defaults.
    pub fn descriptor(&self, rect: ZoneRect, fill: Color) -> ZoneDescriptor {
        ZoneDescriptor {
            border_radius: self.config.default_border_radius,
            border_width: self.config.default_border_width,
            ..ZoneDescriptor::new(rect, fill)
        }
    }

    /// Encodes the given zones and swaps the result in as the current image.
    ///
    /// Zones beyond [`ZONE_SLOT_CAPACITY`] are dropped; truncation is logged,
    /// not reported as an error.
    pub fn set_zones(&self, zones: &[ZoneDescriptor]) {
        if zones.len() > ZONE_SLOT_CAPACITY {
            warn!(
                dropped = zones.len() - ZONE_SLOT_CAPACITY,
                capacity = ZONE_SLOT_CAPACITY,
                "zone overlay truncated to slot capacity"
            );
        }

        let mut buffer = vec![0u8; ZONE_SLOT_CAPACITY * ROW_COUNT * BYTES_PER_PIXEL];
        for (column, zone) in zones.iter().take(ZONE_SLOT_CAPACITY).enumerate() {
            write_cell(
                &mut buffer,
                ROW_POSITION,
                column,
                pack_u16_pair(zone.rect.x(), zone.rect.y()),
            );
            write_cell(
                &mut buffer,
                ROW_SIZE,
                column,
                pack_u16_pair(zone.rect.width(), zone.rect.height()),
            );
            write_cell(&mut buffer, ROW_FILL, column, zone.fill.to_rgba8());
            write_cell(&mut buffer, ROW_BORDER, column, zone.border.to_rgba8());
            write_cell(
                &mut buffer,
                ROW_PARAMS,
                column,
                [
                    unit_to_u8(zone.border_radius / 255.0),
                    unit_to_u8(zone.border_width / 255.0),
                    if zone.highlighted { 255 } else { 0 },
                    unit_to_u8(f32::from(zone.zone_number) / 255.0),
                ],
            );
        }

        *self.lock_image() = Arc::new(buffer);
    }

    /// Returns the current image and its pixel dimensions.
    ///
    /// The `id` and `requested_size` arguments mirror the image-provider
    /// interface of the rendering stage; they are accepted but not
    /// interpreted, since a single always-current image is served.
    pub fn request_image(
        &self,
        _id: &str,
        _requested_size: Option<Size<u32>>,
    ) -> (Arc<Vec<u8>>, Size<u32>) {
        let image = self.lock_image().clone();
        (
            image,
            Size::new(ZONE_SLOT_CAPACITY as u32, ROW_COUNT as u32),
        )
    }

    fn lock_image(&self) -> MutexGuard<'_, Arc<Vec<u8>>> {
        match self.image.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

/// Packs two 16-bit values into four channels as low/high byte pairs.
fn pack_u16_pair(first: u16, second: u16) -> [u8; 4] {
    let [first_low, first_high] = first.to_le_bytes();
    let [second_low, second_high] = second.to_le_bytes();
    [first_low, first_high, second_low, second_high]
}

/// Recovers the two 16-bit values of a position or size cell. Used by the
/// renderer side and by round-trip tests.
pub fn read_u16_pair(cell: [u8; 4]) -> (u16, u16) {
    (
        u16::from_le_bytes([cell[0], cell[1]]),
        u16::from_le_bytes([cell[2], cell[3]]),
    )
}

/// Reads one RGBA8 cell out of an encoded image.
pub fn read_cell(buffer: &[u8], row: usize, column: usize) -> [u8; 4] {
    if row >= ROW_COUNT || column >= ZONE_SLOT_CAPACITY {
        warn!(row, column, "zone image cell read out of range");
        return [0; 4];
    }
    let offset = (row * ZONE_SLOT_CAPACITY + column) * BYTES_PER_PIXEL;
    [
        buffer[offset],
        buffer[offset + 1],
        buffer[offset + 2],
        buffer[offset + 3],
    ]
}

fn write_cell(buffer: &mut [u8], row: usize, column: usize, value: [u8; 4]) {
    if row >= ROW_COUNT || column >= ZONE_SLOT_CAPACITY {
        warn!(row, column, "zone image cell write out of range; ignored");
        return;
    }
    let offset = (row * ZONE_SLOT_CAPACITY + column) * BYTES_PER_PIXEL;
    buffer[offset..offset + BYTES_PER_PIXEL].copy_from_slice(&value);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoder() -> ZoneImageEncoder {
        ZoneImageEncoder::new(OverlayConfig::default())
    }

    #[test]
    fn position_and_size_roundtrip_is_16_bit_exact() {
        let enc = encoder();
        let zone = ZoneDescriptor::new(ZoneRect::new(100, 200, 300, 400), Color::rgb(0.5, 0.5, 0.5));
        enc.set_zones(&[zone]);

        let (image, _) = enc.request_image("overlay", None);
        assert_eq!(read_u16_pair(read_cell(&image, ROW_POSITION, 0)), (100, 200));
        assert_eq!(read_u16_pair(read_cell(&image, ROW_SIZE, 0)), (300, 400));
    }

    #[test]
    fn extreme_coordinates_survive_packing() {
        let enc = encoder();
        let zone = ZoneDescriptor::new(
            ZoneRect::new(0, u16::MAX, u16::MAX, 1),
            Color::TRANSPARENT,
        );
        enc.set_zones(&[zone]);

        let (image, _) = enc.request_image("overlay", None);
        assert_eq!(read_u16_pair(read_cell(&image, ROW_POSITION, 0)), (0, 65535));
        assert_eq!(read_u16_pair(read_cell(&image, ROW_SIZE, 0)), (65535, 1));
    }

    #[test]
    fn fill_color_components_saturate_instead_of_wrapping() {
        let enc = encoder();
        let mut zone = ZoneDescriptor::new(ZoneRect::new(0, 0, 1, 1), Color::TRANSPARENT);
        // Bypass the constructor clamp to exercise the encoder's own clamping.
        zone.fill = Color { r: -0.5, g: 1.5, b: 0.0, a: 1.0 };
        enc.set_zones(&[zone]);

        let (image, _) = enc.request_image("overlay", None);
        assert_eq!(read_cell(&image, ROW_FILL, 0), [0, 255, 0, 255]);
    }

    #[test]
    fn border_defaults_to_opaque() {
        let enc = encoder();
        let zone = ZoneDescriptor::new(ZoneRect::new(0, 0, 1, 1), Color::TRANSPARENT);
        enc.set_zones(&[zone]);

        let (image, _) = enc.request_image("overlay", None);
        assert_eq!(read_cell(&image, ROW_BORDER, 0)[3], 255);
    }

    #[test]
    fn params_row_encodes_style_and_highlight() {
        let enc = encoder();
        let mut zone = ZoneDescriptor::new(ZoneRect::new(0, 0, 1, 1), Color::TRANSPARENT);
        zone.border_radius = 8.0;
        zone.border_width = 2.0;
        zone.highlighted = true;
        zone.zone_number = 5;
        enc.set_zones(&[zone]);

        let (image, _) = enc.request_image("overlay", None);
        let params = read_cell(&image, ROW_PARAMS, 0);
        assert_eq!(params, [8, 2, 255, 5]);
    }

    #[test]
    fn oversized_style_values_clamp_to_full_channel() {
        let enc = encoder();
        let mut zone = ZoneDescriptor::new(ZoneRect::new(0, 0, 1, 1), Color::TRANSPARENT);
        zone.border_radius = 1000.0;
        zone.border_width = -3.0;
        enc.set_zones(&[zone]);

        let (image, _) = enc.request_image("overlay", None);
        let params = read_cell(&image, ROW_PARAMS, 0);
        assert_eq!(params[0], 255);
        assert_eq!(params[1], 0);
    }

    #[test]
    fn zones_beyond_capacity_are_dropped() {
        let enc = encoder();
        let zones: Vec<ZoneDescriptor> = (0..40)
            .map(|i| {
                ZoneDescriptor::new(
                    ZoneRect::new(1000 + i as u16, 0, 50, 50),
                    Color::rgb(1.0, 0.0, 0.0),
                )
            })
            .collect();
        enc.set_zones(&zones);

        let (image, _) = enc.request_image("overlay", None);
        // The last retained slot holds descriptor 31; descriptor 32 is gone.
        assert_eq!(
            read_u16_pair(read_cell(&image, ROW_POSITION, 31)).0,
            1031
        );
        let x32 = 1032u16.to_le_bytes();
        for row in 0..ROW_COUNT {
            for column in 0..ZONE_SLOT_CAPACITY {
                let cell = read_cell(&image, row, column);
                assert_ne!(
                    (row, [cell[0], cell[1]]),
                    (ROW_POSITION, x32),
                    "descriptor 32 must not appear in the encoded image"
                );
            }
        }
    }

    #[test]
    fn reserved_rows_stay_zero() {
        let enc = encoder();
        let zone = ZoneDescriptor::new(
            ZoneRect::new(10, 20, 30, 40),
            Color::rgb(1.0, 1.0, 1.0),
        );
        enc.set_zones(&[zone]);

        let (image, _) = enc.request_image("overlay", None);
        for row in ROW_PARAMS + 1..ROW_COUNT {
            for column in 0..ZONE_SLOT_CAPACITY {
                assert_eq!(read_cell(&image, row, column), [0; 4]);
            }
        }
    }

    #[test]
    fn set_zones_replaces_the_image_wholesale() {
        let enc = encoder();
        enc.set_zones(&[ZoneDescriptor::new(
            ZoneRect::new(1, 2, 3, 4),
            Color::rgb(1.0, 0.0, 0.0),
        )]);
        let (first, _) = enc.request_image("overlay", None);

        enc.set_zones(&[]);
        let (second, size) = enc.request_image("overlay", None);
        assert!(!Arc::ptr_eq(&first, &second));
        assert!(second.iter().all(|byte| *byte == 0));
        assert_eq!((size.width, size.height), (32, 8));
        // The previously handed-out snapshot is unchanged.
        assert_eq!(read_u16_pair(read_cell(&first, ROW_POSITION, 0)), (1, 2));
    }

    #[test]
    fn request_image_arguments_are_not_interpreted() {
        let enc = encoder();
        enc.set_zones(&[ZoneDescriptor::new(ZoneRect::new(7, 0, 1, 1), Color::WHITE)]);
        let (a, size_a) = enc.request_image("zones", Some(Size::new(512, 512)));
        let (b, size_b) = enc.request_image("other", None);
        assert_eq!(a, b);
        assert_eq!(size_a, size_b);
    }

    #[test]
    fn descriptor_helper_applies_configured_defaults() {
        let enc = ZoneImageEncoder::new(OverlayConfig {
            default_border_radius: 12.0,
            default_border_width: 3.0,
        });
        let zone = enc.descriptor(ZoneRect::new(0, 0, 10, 10), Color::rgb(0.0, 0.0, 1.0));
        assert_eq!(zone.border_radius, 12.0);
        assert_eq!(zone.border_width, 3.0);
        assert_eq!(zone.zone_number, 1);
        assert!(!zone.highlighted);
    }

    #[test]
    fn concurrent_reader_always_sees_a_complete_frame() {
        use std::sync::atomic::{AtomicBool, Ordering};

        let enc = Arc::new(encoder());
        let stop = Arc::new(AtomicBool::new(false));

        let reader = {
            let enc = Arc::clone(&enc);
            let stop = Arc::clone(&stop);
            std::thread::spawn(move || {
                while !stop.load(Ordering::Relaxed) {
                    let (image, _) = enc.request_image("overlay", None);
                    let (x, y) = read_u16_pair(read_cell(&image, ROW_POSITION, 0));
                    let (w, h) = read_u16_pair(read_cell(&image, ROW_SIZE, 0));
                    // Every frame writes x == y == w == h; a torn frame would
                    // mix values from two generations.
                    assert_eq!(x, y);
                    assert_eq!(x, w);
                    assert_eq!(x, h);
                }
            })
        };

        for value in 0..2000u16 {
            let zone = ZoneDescriptor::new(
                ZoneRect::new(value, value, value, value),
                Color::rgb(0.2, 0.4, 0.6),
            );
            enc.set_zones(&[zone]);
        }
        stop.store(true, Ordering::Relaxed);
        reader.join().unwrap();
    }
}
