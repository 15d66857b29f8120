//! Core application module
//!
//! This module contains:
//! - The capture flow tying capture, selection, editing, saving and the
//!   clipboard together

pub mod app;

pub use app::{CaptureFlow, run_capture_flow};
