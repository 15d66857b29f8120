//! Screen capture and region selection boundaries
//!
//! This module contains:
//! - The `Capturer` and `RegionSelector` traits the capture flow depends on
//! - Image helpers and a file-backed capturer (image.rs)

pub mod image;

use ::image::RgbaImage;

use crate::domain::Rect;

pub use self::image::{FileCapturer, crop_image};

/// Source of screen pixels
pub trait Capturer {
    /// Capture the whole screen
    fn capture_full_screen(&self) -> anyhow::Result<RgbaImage>;

    /// Capture a region of the screen, clamped to its bounds
    fn capture_region(&self, rect: Rect) -> anyhow::Result<RgbaImage> {
        let full = self.capture_full_screen()?;
        crop_image(&full, rect)
            .ok_or_else(|| anyhow::anyhow!("region {:?} is outside the screen", rect))
    }
}

/// Lets the user pick the region to annotate
pub trait RegionSelector {
    /// Selected rectangle in screen coordinates, or `None` when cancelled
    fn select_region(&self, screen: &RgbaImage) -> Option<Rect>;
}

/// Selector that always answers with a preset rectangle
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FixedRegion(pub Option<Rect>);

impl RegionSelector for FixedRegion {
    fn select_region(&self, _screen: &RgbaImage) -> Option<Rect> {
        self.0
    }
}
