//! Screenshot annotation engine
//!
//! Captures are edited in an [`session::EditorSession`]: the selection can be
//! moved and resized, annotations are drawn with an anti-aliased rasterizer
//! and kept in an undoable history, and the result is flattened into a
//! single image.

pub mod annotations;
pub mod capture;
pub mod clipboard;
pub mod config;
pub mod core;
pub mod domain;
pub mod export;
pub mod render;
pub mod session;
pub mod storage;
pub mod widget;
