//! Writing finished images to disk

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use image::RgbaImage;
use image::codecs::jpeg::JpegEncoder;

use crate::config::{ImageFormat, StorageConfig};

/// Destination for flattened images
pub trait ImageStore {
    /// Persist `image` and return where it ended up
    fn save(&self, image: &RgbaImage) -> anyhow::Result<PathBuf>;
}

/// Saves timestamped files into a directory
#[derive(Clone, Debug, PartialEq)]
pub struct FileStore {
    directory: PathBuf,
    format: ImageFormat,
    quality: u8,
}

impl FileStore {
    pub fn new(directory: impl Into<PathBuf>, format: ImageFormat, quality: u8) -> Self {
        Self {
            directory: directory.into(),
            format,
            quality: quality.clamp(1, 100),
        }
    }

    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(config.resolved_directory(), config.format, config.quality)
    }

    /// Unused path for a new screenshot taken now
    pub fn next_path(&self) -> PathBuf {
        let stem = chrono::Local::now()
            .format("Screenshot_%Y-%m-%d_%H-%M-%S")
            .to_string();
        let ext = self.format.extension();
        let mut path = self.directory.join(format!("{stem}.{ext}"));
        let mut counter = 1;
        while path.exists() {
            path = self.directory.join(format!("{stem}_{counter}.{ext}"));
            counter += 1;
        }
        path
    }

    /// Encode `image` into `path` using this store's format
    pub fn save_to(&self, image: &RgbaImage, path: &Path) -> anyhow::Result<()> {
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        match self.format {
            ImageFormat::Png => write_png(&mut writer, image)?,
            ImageFormat::Jpeg => write_jpeg(&mut writer, image, self.quality)?,
        }
        writer
            .flush()
            .with_context(|| format!("writing {}", path.display()))
    }
}

impl ImageStore for FileStore {
    fn save(&self, image: &RgbaImage) -> anyhow::Result<PathBuf> {
        std::fs::create_dir_all(&self.directory)
            .with_context(|| format!("creating {}", self.directory.display()))?;
        let path = self.next_path();
        self.save_to(image, &path)?;
        log::info!("Saved screenshot to {}", path.display());
        Ok(path)
    }
}

pub fn write_png<W: io::Write>(w: W, image: &RgbaImage) -> Result<(), png::EncodingError> {
    let mut encoder = png::Encoder::new(w, image.width(), image.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(image.as_raw())?;
    // Writes the trailing chunk; dropping the writer would discard its error
    writer.finish()
}

/// JPEG has no alpha channel; pixels are written as plain RGB
pub fn write_jpeg<W: io::Write>(w: W, image: &RgbaImage, quality: u8) -> image::ImageResult<()> {
    let rgb = image::DynamicImage::ImageRgba8(image.clone()).to_rgb8();
    JpegEncoder::new_with_quality(w, quality).encode_image(&rgb)
}
