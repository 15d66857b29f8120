//! Anti-aliased raster primitives
//!
//! Strokes are rendered from a distance field: every candidate pixel measures
//! its distance to the ideal outline and gets full coverage inside
//! `half_width - 0.5`, a linear ramp across the next pixel, nothing beyond.

use super::geometry::stroke::half_width;
use super::surface::{Surface, clip_span};
use crate::config::ShapeColor;
use crate::domain::{Point, Rect};

/// Paint one pixel with coverage derived from its distance to the outline
#[inline]
fn coverage_pixel<S: Surface + ?Sized>(
    s: &mut S,
    x: i32,
    y: i32,
    color: ShapeColor,
    dist: f32,
    half: f32,
) {
    if dist > half + 0.5 {
        return;
    }
    if dist <= half - 0.5 {
        s.composite_pixel(x, y, color);
    } else {
        let frac = half + 0.5 - dist;
        s.composite_pixel(x, y, color.with_alpha((color.a as f32 * frac) as u8));
    }
}

/// Visit every on-surface pixel of the inclusive box `[x0, x1] x [y0, y1]`
#[inline]
fn for_each_in_box<S: Surface + ?Sized>(
    s: &mut S,
    (x0, y0): (i32, i32),
    (x1, y1): (i32, i32),
    mut f: impl FnMut(&mut S, i32, i32),
) {
    let (Some((x0, x1)), Some((y0, y1))) =
        (clip_span(x0, x1, s.width()), clip_span(y0, y1, s.height()))
    else {
        return;
    };
    for y in y0..=y1 {
        for x in x0..=x1 {
            f(s, x, y);
        }
    }
}

/// Draw a segment of uniform thickness with round caps.
///
/// A segment shorter than half a pixel is drawn as a filled circle with the
/// same half-width.
pub fn draw_thick_line<S: Surface + ?Sized>(
    s: &mut S,
    p0: Point,
    p1: Point,
    color: ShapeColor,
    width: u32,
) {
    let half = half_width(width);

    let dx = (p1.x - p0.x) as f32;
    let dy = (p1.y - p0.y) as f32;
    let length = dx.hypot(dy);
    if length < 0.5 {
        fill_circle(s, p0.x as f32, p0.y as f32, half, color);
        return;
    }

    let (ux, uy) = (dx / length, dy / length);
    let (nx, ny) = (-uy, ux);

    let margin = half as i32 + 2;
    let min = (
        p0.x.min(p1.x).saturating_sub(margin),
        p0.y.min(p1.y).saturating_sub(margin),
    );
    let max = (
        p0.x.max(p1.x).saturating_add(margin),
        p0.y.max(p1.y).saturating_add(margin),
    );

    let (x0, y0) = (p0.x as f32, p0.y as f32);
    let (x1, y1) = (p1.x as f32, p1.y as f32);

    for_each_in_box(s, min, max, |s, px, py| {
        let vx = px as f32 - x0;
        let vy = py as f32 - y0;
        let along = vx * ux + vy * uy;

        let dist = if along <= 0.0 {
            vx.hypot(vy)
        } else if along >= length {
            (px as f32 - x1).hypot(py as f32 - y1)
        } else {
            (vx * nx + vy * ny).abs()
        };

        coverage_pixel(s, px, py, color, dist, half);
    });
}

/// Anti-aliased disc of radius `r`
pub fn fill_circle<S: Surface + ?Sized>(s: &mut S, cx: f32, cy: f32, r: f32, color: ShapeColor) {
    let ri = (r as i32).saturating_add(2);
    let (cxi, cyi) = (cx as i32, cy as i32);
    let min = (cxi.saturating_sub(ri), cyi.saturating_sub(ri));
    let max = (cxi.saturating_add(ri), cyi.saturating_add(ri));
    for_each_in_box(s, min, max, |s, px, py| {
        let dist = (px as f32 - cx).hypot(py as f32 - cy);
        coverage_pixel(s, px, py, color, dist, r);
    });
}

/// Composite `color` over every pixel of `r`
pub fn fill_rect<S: Surface + ?Sized>(s: &mut S, r: &Rect, color: ShapeColor) {
    if r.is_empty() {
        return;
    }
    for_each_in_box(s, (r.left, r.top), (r.right - 1, r.bottom - 1), |s, x, y| {
        s.composite_pixel(x, y, color);
    });
}

/// Outline `r` with four capsules along its outermost pixel rows/columns
pub fn stroke_rect<S: Surface + ?Sized>(s: &mut S, r: &Rect, color: ShapeColor, width: u32) {
    if r.is_empty() {
        return;
    }
    let (l, t, rt, b) = (r.left, r.top, r.right - 1, r.bottom - 1);
    draw_thick_line(s, Point::new(l, t), Point::new(rt, t), color, width);
    draw_thick_line(s, Point::new(l, b), Point::new(rt, b), color, width);
    draw_thick_line(s, Point::new(l, t), Point::new(l, b), color, width);
    draw_thick_line(s, Point::new(rt, t), Point::new(rt, b), color, width);
}

/// Scanline ellipse fill with fractional coverage on the row ends
pub fn fill_ellipse<S: Surface + ?Sized>(
    s: &mut S,
    cx: i32,
    cy: i32,
    rx: i32,
    ry: i32,
    color: ShapeColor,
) {
    if rx <= 0 || ry <= 0 {
        return;
    }
    let (rxf, ryf, cxf) = (rx as f32, ry as f32, cx as f32);

    for dy in -ry - 1..=ry + 1 {
        let t = 1.0 - (dy * dy) as f32 / (ryf * ryf);
        if t < -0.02 {
            continue;
        }
        let half_extent = rxf * t.max(0.0).sqrt();
        let x_left = cxf - half_extent;
        let x_right = cxf + half_extent;
        let y = cy + dy;
        if y < 0 || y as i64 >= s.height() as i64 {
            continue;
        }

        if let Some((inner_left, inner_right)) =
            clip_span(x_left.ceil() as i32, x_right.floor() as i32, s.width())
        {
            for x in inner_left..=inner_right {
                s.composite_pixel(x, y, color);
            }
        }

        let frac_left = x_left.ceil() - x_left;
        if frac_left > 0.0 {
            let alpha = (color.a as f32 * frac_left) as u8;
            s.composite_pixel(x_left.floor() as i32, y, color.with_alpha(alpha));
        }
        let frac_right = x_right - x_right.floor();
        if frac_right > 0.0 {
            let alpha = (color.a as f32 * frac_right) as u8;
            s.composite_pixel(x_right.ceil() as i32, y, color.with_alpha(alpha));
        }
    }
}

/// Approximate distance from `(px, py)` to the ellipse outline.
///
/// Projects the point radially onto the ellipse in normalized space and
/// measures the euclidean distance to that boundary point.
fn ellipse_point_dist(px: f32, py: f32, cx: f32, cy: f32, rx: f32, ry: f32) -> f32 {
    let dx = (px - cx) / rx;
    let dy = (py - cy) / ry;
    let r = dx.hypot(dy);
    if r < 0.001 {
        return rx.min(ry);
    }
    let ex = cx + rx * dx / r;
    let ey = cy + ry * dy / r;
    (px - ex).hypot(py - ey)
}

/// Distance-field ellipse outline
pub fn stroke_ellipse<S: Surface + ?Sized>(
    s: &mut S,
    cx: i32,
    cy: i32,
    rx: i32,
    ry: i32,
    color: ShapeColor,
    width: u32,
) {
    if rx <= 0 || ry <= 0 {
        return;
    }
    let half = half_width(width);
    let (rxf, ryf) = (rx as f32, ry as f32);
    let (cxf, cyf) = (cx as f32, cy as f32);

    // Pixels outside the outer ellipse or inside the inner one cannot be covered
    let outer_rx = rxf + half + 1.5;
    let outer_ry = ryf + half + 1.5;
    let inner_rx = rxf - half - 1.5;
    let inner_ry = ryf - half - 1.5;

    let min = (cx - outer_rx as i32 - 1, cy - outer_ry as i32 - 1);
    let max = (cx + outer_rx as i32 + 1, cy + outer_ry as i32 + 1);

    for_each_in_box(s, min, max, |s, px, py| {
        let dx = px as f32 - cxf;
        let dy = py as f32 - cyf;

        if (dx * dx) / (outer_rx * outer_rx) + (dy * dy) / (outer_ry * outer_ry) > 1.0 {
            return;
        }
        if inner_rx > 0.0
            && inner_ry > 0.0
            && (dx * dx) / (inner_rx * inner_rx) + (dy * dy) / (inner_ry * inner_ry) < 1.0
        {
            return;
        }

        let dist = ellipse_point_dist(px as f32, py as f32, cxf, cyf, rxf, ryf);
        coverage_pixel(s, px, py, color, dist, half);
    });
}

/// X where the scanline `y` crosses edge `a`-`b`, skipping horizontal edges
fn edge_x(y: i32, a: Point, b: Point) -> Option<i32> {
    let (a, b) = if a.y > b.y { (b, a) } else { (a, b) };
    if y < a.y || y > b.y || a.y == b.y {
        return None;
    }
    let t = (y - a.y) as f32 / (b.y - a.y) as f32;
    Some((a.x as f32 + t * (b.x - a.x) as f32).round() as i32)
}

/// Scanline triangle fill (no anti-aliasing)
pub fn fill_triangle<S: Surface + ?Sized>(
    s: &mut S,
    p1: Point,
    p2: Point,
    p3: Point,
    color: ShapeColor,
) {
    let min_y = p1.y.min(p2.y).min(p3.y);
    let max_y = p1.y.max(p2.y).max(p3.y);
    let Some((min_y, max_y)) = clip_span(min_y, max_y, s.height()) else {
        return;
    };

    for y in min_y..=max_y {
        let xs = [edge_x(y, p1, p2), edge_x(y, p2, p3), edge_x(y, p3, p1)];
        if xs.iter().flatten().count() < 2 {
            continue;
        }
        let x_min = xs.iter().flatten().copied().min().unwrap_or_default();
        let x_max = xs.iter().flatten().copied().max().unwrap_or_default();
        let Some((x_min, x_max)) = clip_span(x_min, x_max, s.width()) else {
            continue;
        };
        for x in x_min..=x_max {
            s.composite_pixel(x, y, color);
        }
    }
}
