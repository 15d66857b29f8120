//! Shared geometry calculations for annotations
//!
//! Constants and math used by the rasterizer and by the editor preview.

use crate::domain::{Point, Rect};

/// Arrow geometry constants
pub mod arrow {
    use crate::domain::Point;

    /// Shortest arrowhead, in pixels
    pub const MIN_HEAD_LENGTH: f32 = 12.0;
    /// Arrowhead length per pixel of stroke width
    pub const HEAD_LENGTH_PER_WIDTH: f32 = 5.0;
    /// Half-width of the head relative to its length
    pub const HEAD_HALF_WIDTH_RATIO: f32 = 0.5;
    /// Minimum shaft length for a head to be drawn
    pub const MIN_LENGTH: f32 = 1.0;

    /// Arrowhead triangle `[tip, left, right]` for a shaft from `start` to `end`.
    ///
    /// Returns `None` when the shaft is too short to have a direction.
    pub fn head_points(start: Point, end: Point, width: u32) -> Option<[Point; 3]> {
        let dx = (end.x - start.x) as f32;
        let dy = (end.y - start.y) as f32;
        let length = dx.hypot(dy);
        if length < MIN_LENGTH {
            return None;
        }

        let width = width.min(super::stroke::MAX_WIDTH);
        let head_len = (width as f32 * HEAD_LENGTH_PER_WIDTH).max(MIN_HEAD_LENGTH);
        let half_width = head_len * HEAD_HALF_WIDTH_RATIO;

        // Unit direction vector (pointing from start to end) and its normal
        let ux = dx / length;
        let uy = dy / length;
        let nx = -uy;
        let ny = ux;

        let base_x = end.x as f32 - ux * head_len;
        let base_y = end.y as f32 - uy * head_len;

        let left = Point::new(
            (base_x + nx * half_width).round() as i32,
            (base_y + ny * half_width).round() as i32,
        );
        let right = Point::new(
            (base_x - nx * half_width).round() as i32,
            (base_y - ny * half_width).round() as i32,
        );
        Some([end, left, right])
    }
}

/// Shape (rectangle/ellipse) constants
pub mod shape {
    /// Alpha of the interior wash of filled shapes
    pub const FILL_ALPHA: u8 = 80;
}

/// Stroke constants shared by all distance-field primitives
pub mod stroke {
    /// Half-width floor so hairlines stay visible
    pub const MIN_HALF_WIDTH: f32 = 0.75;
    /// Widest stroke drawn; wider requests are capped
    pub const MAX_WIDTH: u32 = 256;

    /// Half of the stroke width, between [`MIN_HALF_WIDTH`] and half of [`MAX_WIDTH`]
    #[inline]
    pub fn half_width(width: u32) -> f32 {
        (width.min(MAX_WIDTH) as f32 / 2.0).max(MIN_HALF_WIDTH)
    }
}

/// Mosaic constants
pub mod mosaic {
    /// Block size used when an annotation carries none
    pub const DEFAULT_BLOCK_SIZE: u32 = 10;
}

/// Integer ellipse center and radii inscribed in `r`
#[inline]
pub fn ellipse_from_bounds(r: &Rect) -> (i32, i32, i32, i32) {
    let cx = (r.left + r.right) / 2;
    let cy = (r.top + r.bottom) / 2;
    let rx = (r.right - r.left) / 2;
    let ry = (r.bottom - r.top) / 2;
    (cx, cy, rx, ry)
}

/// Normalized rectangle spanned by a corner pair
#[inline]
pub fn normalize_rect(a: Point, b: Point) -> Rect {
    Rect::from_corners(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_head_points_horizontal() {
        let [tip, left, right] =
            arrow::head_points(Point::new(0, 50), Point::new(100, 50), 2).unwrap();
        // width 2 -> head length max(10, 12) = 12, half-width 6
        assert_eq!(tip, Point::new(100, 50));
        assert_eq!(left, Point::new(88, 56));
        assert_eq!(right, Point::new(88, 44));
    }

    #[test]
    fn test_head_scales_with_width() {
        let [_, left, right] =
            arrow::head_points(Point::new(0, 0), Point::new(0, 100), 4).unwrap();
        // length 20, half-width 10, pointing down
        assert_eq!(left, Point::new(-10, 80));
        assert_eq!(right, Point::new(10, 80));
    }

    #[test]
    fn test_zero_length_has_no_head() {
        assert!(arrow::head_points(Point::new(5, 5), Point::new(5, 5), 3).is_none());
    }

    #[test]
    fn test_half_width_floor() {
        assert_eq!(stroke::half_width(0), 0.75);
        assert_eq!(stroke::half_width(1), 0.75);
        assert_eq!(stroke::half_width(6), 3.0);
    }
}
