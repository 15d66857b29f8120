//! Pure domain types with minimal dependencies
//!
//! This module contains the value types shared by the rasterizer, the
//! undo history and the editing session. Nothing here knows about pixels
//! or input devices.

pub mod annotation;
pub mod geometry;
pub mod selection;

pub use annotation::*;
pub use geometry::*;
pub use selection::*;
