//! Captured image helpers

use std::path::{Path, PathBuf};

use anyhow::Context;
use image::RgbaImage;

use super::Capturer;
use crate::domain::Rect;

/// Bounds of an image as a rectangle at the origin
pub fn image_rect(img: &RgbaImage) -> Rect {
    Rect::new(
        0,
        0,
        i32::try_from(img.width()).unwrap_or(i32::MAX),
        i32::try_from(img.height()).unwrap_or(i32::MAX),
    )
}

/// Copy the part of `img` covered by `rect`; `None` if they do not overlap
pub fn crop_image(img: &RgbaImage, rect: Rect) -> Option<RgbaImage> {
    let r = rect.intersect(image_rect(img))?;
    let dims = r.dimensions()?;
    Some(
        image::imageops::crop_imm(img, r.left as u32, r.top as u32, dims.width(), dims.height())
            .to_image(),
    )
}

/// Capturer that treats an image file as the screen
#[derive(Clone, Debug)]
pub struct FileCapturer {
    path: PathBuf,
}

impl FileCapturer {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Capturer for FileCapturer {
    fn capture_full_screen(&self) -> anyhow::Result<RgbaImage> {
        let rgba = image::open(&self.path)
            .with_context(|| format!("decoding {}", self.path.display()))?
            .into_rgba8();
        log::debug!(
            "Capture loaded: {}x{} pixels from {}",
            rgba.width(),
            rgba.height(),
            self.path.display()
        );
        Ok(rgba)
    }
}
