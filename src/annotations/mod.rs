//! Annotation history and drawing gestures
//!
//! This module provides:
//! - Snapshot-based undo/redo over the annotation list
//! - In-progress drafts that become previews and committed annotations

pub mod handlers;
pub mod history;

pub use handlers::{Draft, DrawStyle};
pub use history::History;
