//! Annotation rendering module
//!
//! This module contains:
//! - The pixel [`Surface`](surface::Surface) the rasterizer targets
//! - Geometry calculations shared between previews and the final image
//! - Anti-aliased primitives and the bitmap font
//! - Per-annotation drawing and scene composition

pub mod geometry;
pub mod image;
pub mod primitives;
pub mod surface;
pub mod text;

pub use self::image::{draw_annotation, draw_annotations_in_order, render_scene};
pub use surface::Surface;
