//! Pixel surface abstraction the rasterizer draws onto

use image::{Rgba, RgbaImage};

use crate::config::ShapeColor;

/// A grid of RGBA8 pixels with a top-left origin.
///
/// Coordinates are signed so that shapes may extend past the edges;
/// reads outside the surface return `None` and writes are dropped.
pub trait Surface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    fn read_pixel(&self, x: i32, y: i32) -> Option<[u8; 4]>;

    fn write_pixel(&mut self, x: i32, y: i32, rgba: [u8; 4]);

    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as i64) < self.width() as i64 && (y as i64) < self.height() as i64
    }

    /// Source-over composite `color` onto the pixel at `(x, y)`
    fn composite_pixel(&mut self, x: i32, y: i32, color: ShapeColor) {
        if color.a == 0 {
            return;
        }
        let Some(dst) = self.read_pixel(x, y) else {
            return;
        };
        if color.a == 255 {
            self.write_pixel(x, y, [color.r, color.g, color.b, 255]);
            return;
        }

        let src_a = color.a as u32;
        let inv_a = 255 - src_a;
        let mix = |s: u8, d: u8| ((s as u32 * src_a + d as u32 * inv_a) / 255) as u8;
        self.write_pixel(
            x,
            y,
            [
                mix(color.r, dst[0]),
                mix(color.g, dst[1]),
                mix(color.b, dst[2]),
                (src_a + dst[3] as u32 * inv_a / 255) as u8,
            ],
        );
    }
}

impl Surface for RgbaImage {
    fn width(&self) -> u32 {
        image::ImageBuffer::width(self)
    }

    fn height(&self) -> u32 {
        image::ImageBuffer::height(self)
    }

    fn read_pixel(&self, x: i32, y: i32) -> Option<[u8; 4]> {
        if !Surface::in_bounds(self, x, y) {
            return None;
        }
        Some(self.get_pixel(x as u32, y as u32).0)
    }

    fn write_pixel(&mut self, x: i32, y: i32, rgba: [u8; 4]) {
        if Surface::in_bounds(self, x, y) {
            self.put_pixel(x as u32, y as u32, Rgba(rgba));
        }
    }
}

/// Clamp an inclusive pixel span to `[0, len)`; `None` when nothing is left
pub(crate) fn clip_span(lo: i32, hi: i32, len: u32) -> Option<(i32, i32)> {
    let max = i32::try_from(len).unwrap_or(i32::MAX) - 1;
    let lo = lo.max(0);
    let hi = hi.min(max);
    (lo <= hi).then_some((lo, hi))
}
