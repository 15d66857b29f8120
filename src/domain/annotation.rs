//! Annotation types for drawing on screenshots
//!
//! All annotation types store coordinates in canvas coordinates, i.e.
//! relative to the top-left corner of the selection they were drawn on.

use serde::{Deserialize, Serialize};

use super::geometry::{Point, Rect};
use crate::config::ShapeColor;

/// Rectangle or ellipse spanned by two corners
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeAnnotation {
    pub start: Point,
    pub end: Point,
    pub color: ShapeColor,
    pub width: u32,
    /// Fill the interior with a translucent wash before stroking
    #[serde(default)]
    pub filled: bool,
}

/// Straight segment, drawn plain or with an arrowhead at `end`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineAnnotation {
    pub start: Point,
    pub end: Point,
    pub color: ShapeColor,
    pub width: u32,
}

/// Polyline following the pointer
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreehandAnnotation {
    pub points: Vec<Point>,
    pub color: ShapeColor,
    pub width: u32,
}

/// Bitmap text anchored at its top-left corner
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextAnnotation {
    pub anchor: Point,
    pub text: String,
    pub font_size: u32,
    pub color: ShapeColor,
}

/// Pixelation of the rectangle spanned by two corners
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MosaicAnnotation {
    pub start: Point,
    pub end: Point,
    pub block_size: u32,
}

/// Unified annotation type for ordered drawing and undo/redo
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Annotation {
    Rect(ShapeAnnotation),
    Ellipse(ShapeAnnotation),
    Arrow(LineAnnotation),
    Line(LineAnnotation),
    Freehand(FreehandAnnotation),
    Text(TextAnnotation),
    Mosaic(MosaicAnnotation),
}

impl Annotation {
    /// Geometry points in drawing order
    pub fn points(&self) -> Vec<Point> {
        match self {
            Annotation::Rect(s) | Annotation::Ellipse(s) => vec![s.start, s.end],
            Annotation::Arrow(l) | Annotation::Line(l) => vec![l.start, l.end],
            Annotation::Freehand(f) => f.points.clone(),
            Annotation::Text(t) => vec![t.anchor],
            Annotation::Mosaic(m) => vec![m.start, m.end],
        }
    }

    /// Stroke width in pixels (0 for kinds without a stroke)
    pub fn stroke_width(&self) -> u32 {
        match self {
            Annotation::Rect(s) | Annotation::Ellipse(s) => s.width,
            Annotation::Arrow(l) | Annotation::Line(l) => l.width,
            Annotation::Freehand(f) => f.width,
            Annotation::Text(_) | Annotation::Mosaic(_) => 0,
        }
    }

    pub fn color(&self) -> Option<ShapeColor> {
        match self {
            Annotation::Rect(s) | Annotation::Ellipse(s) => Some(s.color),
            Annotation::Arrow(l) | Annotation::Line(l) => Some(l.color),
            Annotation::Freehand(f) => Some(f.color),
            Annotation::Text(t) => Some(t.color),
            Annotation::Mosaic(_) => None,
        }
    }

    /// Axis-aligned box of the points, grown by half the stroke width.
    ///
    /// Returns `None` for an annotation without points.
    pub fn bounds(&self) -> Option<Rect> {
        let points = self.points();
        let first = *points.first()?;
        let (mut min, mut max) = (first, first);
        for p in &points[1..] {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        let pad = self.stroke_width().div_ceil(2) as i32;
        Some(Rect::new(min.x - pad, min.y - pad, max.x + pad, max.y + pad))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(start: (i32, i32), end: (i32, i32), width: u32) -> Annotation {
        Annotation::Line(LineAnnotation {
            start: start.into(),
            end: end.into(),
            color: ShapeColor::default(),
            width,
        })
    }

    #[test]
    fn test_bounds_grow_by_half_stroke() {
        let a = line((10, 40), (30, 20), 4);
        assert_eq!(a.bounds(), Some(Rect::new(8, 18, 32, 42)));

        let odd = line((0, 0), (10, 0), 3);
        assert_eq!(odd.bounds(), Some(Rect::new(-2, -2, 12, 2)));
    }

    #[test]
    fn test_empty_freehand_has_no_bounds() {
        let a = Annotation::Freehand(FreehandAnnotation {
            points: Vec::new(),
            color: ShapeColor::default(),
            width: 2,
        });
        assert_eq!(a.bounds(), None);
    }

    #[test]
    fn test_clone_owns_points() {
        let original = Annotation::Freehand(FreehandAnnotation {
            points: vec![Point::new(1, 1), Point::new(2, 2)],
            color: ShapeColor::default(),
            width: 2,
        });
        let mut copy = original.clone();
        if let Annotation::Freehand(f) = &mut copy {
            f.points.push(Point::new(3, 3));
        }
        assert_eq!(original.points().len(), 2);
        assert_eq!(copy.points().len(), 3);
    }

    #[test]
    fn test_json_tagged_by_kind() {
        let json = r#"{"kind":"mosaic","start":{"x":0,"y":0},"end":{"x":20,"y":20},"block_size":5}"#;
        let a: Annotation = serde_json::from_str(json).unwrap();
        assert!(matches!(a, Annotation::Mosaic(MosaicAnnotation { block_size: 5, .. })));
        assert_eq!(a.color(), None);
    }
}
