//! Editor chrome laid out around the selection

pub mod toolbar;

pub use toolbar::{ButtonKind, ToolbarLayout};
