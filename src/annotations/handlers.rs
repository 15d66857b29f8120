//! In-progress drawing state
//!
//! A [`Draft`] tracks the pointer between press and release and turns it into
//! the preview annotation shown while dragging, or the annotation committed
//! on release.

use crate::config::{ShapeColor, Tool};
use crate::domain::{
    Annotation, FreehandAnnotation, LineAnnotation, MosaicAnnotation, Point, ShapeAnnotation,
    TextAnnotation,
};

/// A freehand stroke needs more points than this to be kept
pub const MIN_FREEHAND_POINTS: usize = 2;
/// Other tools need a drag longer than this (squared, in pixels)
pub const MIN_DRAG_DISTANCE_SQ: i64 = 9;

/// Current tool settings applied to new annotations
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DrawStyle {
    pub color: ShapeColor,
    pub stroke_width: u32,
    pub font_size: u32,
    pub mosaic_block_size: u32,
}

/// Pointer gesture for a drawing tool, in canvas coordinates
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Draft {
    tool: Tool,
    start: Point,
    current: Point,
    points: Vec<Point>,
}

impl Draft {
    /// Start a gesture at `start`; freehand strokes are seeded with it
    pub fn begin(tool: Tool, start: Point) -> Self {
        let points = if tool == Tool::Freehand {
            vec![start]
        } else {
            Vec::new()
        };
        Self {
            tool,
            start,
            current: start,
            points,
        }
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// Move the free end of the gesture
    pub fn update(&mut self, p: Point) {
        self.current = p;
        if self.tool == Tool::Freehand {
            self.points.push(p);
        }
    }

    /// Annotation this gesture would produce right now.
    ///
    /// Text is entered through the keyboard and never comes from a drag.
    pub fn to_annotation(&self, style: &DrawStyle) -> Option<Annotation> {
        let shape = || ShapeAnnotation {
            start: self.start,
            end: self.current,
            color: style.color,
            width: style.stroke_width,
            filled: false,
        };
        let line = || LineAnnotation {
            start: self.start,
            end: self.current,
            color: style.color,
            width: style.stroke_width,
        };

        let annotation = match self.tool {
            Tool::Rectangle => Annotation::Rect(shape()),
            Tool::Ellipse => Annotation::Ellipse(shape()),
            Tool::Arrow => Annotation::Arrow(line()),
            Tool::Line => Annotation::Line(line()),
            Tool::Freehand => Annotation::Freehand(FreehandAnnotation {
                points: self.points.clone(),
                color: style.color,
                width: style.stroke_width,
            }),
            Tool::Mosaic => Annotation::Mosaic(MosaicAnnotation {
                start: self.start,
                end: self.current,
                block_size: style.mosaic_block_size,
            }),
            Tool::Text => return None,
        };
        Some(annotation)
    }

    /// Whether releasing now keeps the annotation (a click is not a shape)
    pub fn should_commit(&self) -> bool {
        match self.tool {
            Tool::Freehand => self.points.len() > MIN_FREEHAND_POINTS,
            _ => self.start.distance_sq(self.current) > MIN_DRAG_DISTANCE_SQ,
        }
    }
}

/// Text annotation for a finished edit; `None` when nothing was typed
pub fn text_annotation(anchor: Point, text: &str, style: &DrawStyle) -> Option<Annotation> {
    if text.is_empty() {
        return None;
    }
    Some(Annotation::Text(TextAnnotation {
        anchor,
        text: text.to_string(),
        font_size: style.font_size,
        color: style.color,
    }))
}
