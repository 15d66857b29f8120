//! Rasterizing annotations onto images
//!
//! These functions draw annotations onto any [`Surface`]; the editor uses
//! them for live previews and for the final flattened image.

use image::RgbaImage;

use super::geometry::{arrow, ellipse_from_bounds, mosaic, normalize_rect, shape};
use super::primitives::{
    draw_thick_line, fill_ellipse, fill_rect, fill_triangle, stroke_ellipse, stroke_rect,
};
use super::surface::Surface;
use super::text::draw_text;
use crate::domain::{
    Annotation, FreehandAnnotation, LineAnnotation, MosaicAnnotation, Rect, ShapeAnnotation,
};

/// Draw a rectangle: translucent interior first when filled, then the outline
pub fn draw_rect<S: Surface + ?Sized>(s: &mut S, rect: &ShapeAnnotation) {
    let r = normalize_rect(rect.start, rect.end);
    if rect.filled {
        fill_rect(s, &r, rect.color.with_alpha(shape::FILL_ALPHA));
    }
    stroke_rect(s, &r, rect.color, rect.width);
}

/// Draw an ellipse inscribed in the corner pair
pub fn draw_ellipse<S: Surface + ?Sized>(s: &mut S, ellipse: &ShapeAnnotation) {
    let (cx, cy, rx, ry) = ellipse_from_bounds(&normalize_rect(ellipse.start, ellipse.end));
    if rx <= 0 || ry <= 0 {
        return;
    }
    if ellipse.filled {
        fill_ellipse(s, cx, cy, rx, ry, ellipse.color.with_alpha(shape::FILL_ALPHA));
    }
    stroke_ellipse(s, cx, cy, rx, ry, ellipse.color, ellipse.width);
}

/// Draw an arrow: capsule shaft plus a solid head at `end`
pub fn draw_arrow<S: Surface + ?Sized>(s: &mut S, arrow_ann: &LineAnnotation) {
    draw_thick_line(s, arrow_ann.start, arrow_ann.end, arrow_ann.color, arrow_ann.width);
    if let Some([tip, left, right]) =
        arrow::head_points(arrow_ann.start, arrow_ann.end, arrow_ann.width)
    {
        fill_triangle(s, tip, left, right, arrow_ann.color);
    }
}

pub fn draw_line<S: Surface + ?Sized>(s: &mut S, line: &LineAnnotation) {
    draw_thick_line(s, line.start, line.end, line.color, line.width);
}

/// Draw a polyline as consecutive capsules
pub fn draw_freehand<S: Surface + ?Sized>(s: &mut S, stroke: &FreehandAnnotation) {
    for pair in stroke.points.windows(2) {
        draw_thick_line(s, pair[0], pair[1], stroke.color, stroke.width);
    }
}

/// Pixelate the rectangle spanned by the annotation's corners.
///
/// The rectangle is clipped to the surface and split into non-overlapping
/// blocks anchored at its top-left; every pixel of a block is replaced by
/// the block's rounded mean color at full opacity.
pub fn draw_mosaic<S: Surface + ?Sized>(s: &mut S, pixelate: &MosaicAnnotation) {
    let block_size = match i32::try_from(pixelate.block_size) {
        Ok(size) if size > 0 => size,
        _ => mosaic::DEFAULT_BLOCK_SIZE as i32,
    };
    let surface_rect = Rect::new(
        0,
        0,
        i32::try_from(s.width()).unwrap_or(i32::MAX),
        i32::try_from(s.height()).unwrap_or(i32::MAX),
    );
    let Some(r) = normalize_rect(pixelate.start, pixelate.end).intersect(surface_rect) else {
        return;
    };

    let mut block_y = r.top;
    while block_y < r.bottom {
        let block_end_y = block_y.saturating_add(block_size).min(r.bottom);

        let mut block_x = r.left;
        while block_x < r.right {
            let block_end_x = block_x.saturating_add(block_size).min(r.right);

            let mut totals = [0u64; 3];
            let mut pixel_count: u64 = 0;
            for py in block_y..block_end_y {
                for px in block_x..block_end_x {
                    if let Some(pixel) = s.read_pixel(px, py) {
                        totals[0] += pixel[0] as u64;
                        totals[1] += pixel[1] as u64;
                        totals[2] += pixel[2] as u64;
                        pixel_count += 1;
                    }
                }
            }

            if pixel_count > 0 {
                let mean = |total: u64| ((total + pixel_count / 2) / pixel_count) as u8;
                let avg_color = [mean(totals[0]), mean(totals[1]), mean(totals[2]), 255];
                for py in block_y..block_end_y {
                    for px in block_x..block_end_x {
                        s.write_pixel(px, py, avg_color);
                    }
                }
            }

            block_x = block_end_x;
        }
        block_y = block_end_y;
    }
}

/// Draw a single annotation of any kind
pub fn draw_annotation<S: Surface + ?Sized>(s: &mut S, annotation: &Annotation) {
    match annotation {
        Annotation::Rect(rect) => draw_rect(s, rect),
        Annotation::Ellipse(ellipse) => draw_ellipse(s, ellipse),
        Annotation::Arrow(arrow_ann) => draw_arrow(s, arrow_ann),
        Annotation::Line(line) => draw_line(s, line),
        Annotation::Freehand(stroke) => draw_freehand(s, stroke),
        Annotation::Text(text) => draw_text(s, text),
        Annotation::Mosaic(pixelate) => draw_mosaic(s, pixelate),
    }
}

/// Draw all annotations in list order; later entries land on top
pub fn draw_annotations_in_order<S: Surface + ?Sized>(s: &mut S, annotations: &[Annotation]) {
    for annotation in annotations {
        draw_annotation(s, annotation);
    }
}

/// Compose a frame: a copy of `base` with every annotation and an optional
/// in-progress preview drawn on top
pub fn render_scene(
    base: &RgbaImage,
    annotations: &[Annotation],
    preview: Option<&Annotation>,
) -> RgbaImage {
    let mut frame = base.clone();
    draw_annotations_in_order(&mut frame, annotations);
    if let Some(preview) = preview {
        draw_annotation(&mut frame, preview);
    }
    frame
}
