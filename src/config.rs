//! Configuration persistence for snapmark settings

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::render::geometry::stroke::MAX_WIDTH;
use crate::render::text::MAX_FONT_SIZE;

/// Serializable RGBA color used for annotations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShapeColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Default for ShapeColor {
    fn default() -> Self {
        PALETTE[0]
    }
}

impl ShapeColor {
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Same color with a different alpha
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Convert to image crate RGBA format
    pub fn to_rgba_u8(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Colors offered by the secondary toolbar
pub const PALETTE: [ShapeColor; 8] = [
    ShapeColor::rgb(255, 0, 0),
    ShapeColor::rgb(0, 180, 0),
    ShapeColor::rgb(0, 120, 255),
    ShapeColor::rgb(255, 200, 0),
    ShapeColor::rgb(255, 128, 0),
    ShapeColor::rgb(180, 0, 255),
    ShapeColor::rgb(255, 255, 255),
    ShapeColor::rgb(0, 0, 0),
];

/// Stroke widths offered by the secondary toolbar
pub const STROKE_WIDTHS: [u32; 3] = [2, 4, 8];

/// Annotation tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Tool {
    #[default]
    Rectangle,
    Ellipse,
    Arrow,
    Line,
    Freehand,
    Text,
    Mosaic,
}

impl Tool {
    /// Toolbar order; digit shortcuts 1-7 follow it
    pub const ALL: [Tool; 7] = [
        Tool::Rectangle,
        Tool::Ellipse,
        Tool::Arrow,
        Tool::Line,
        Tool::Freehand,
        Tool::Text,
        Tool::Mosaic,
    ];

    /// Tool bound to a 1-based digit shortcut
    pub fn from_shortcut(digit: u32) -> Option<Tool> {
        let index = usize::try_from(digit).ok()?.checked_sub(1)?;
        Self::ALL.get(index).copied()
    }

    /// Whether the stroke/color panel applies to this tool
    pub fn uses_style_panel(self) -> bool {
        !matches!(self, Tool::Text)
    }

    pub fn name(self) -> &'static str {
        match self {
            Tool::Rectangle => "rectangle",
            Tool::Ellipse => "ellipse",
            Tool::Arrow => "arrow",
            Tool::Line => "line",
            Tool::Freehand => "freehand",
            Tool::Text => "text",
            Tool::Mosaic => "mosaic",
        }
    }
}

/// Encoded file format for saved images
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    #[default]
    Png,
    Jpeg,
}

impl ImageFormat {
    /// Get file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpg",
        }
    }
}

/// Where and how finished images are written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Target directory (None = Pictures/Screenshots)
    #[serde(default)]
    pub directory: Option<PathBuf>,
    #[serde(default)]
    pub format: ImageFormat,
    /// JPEG quality 1-100
    #[serde(default = "default_quality")]
    pub quality: u8,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            directory: None,
            format: ImageFormat::Png,
            quality: default_quality(),
        }
    }
}

impl StorageConfig {
    /// Directory that images are saved into
    pub fn resolved_directory(&self) -> PathBuf {
        match &self.directory {
            Some(dir) => expand_home(dir),
            None => dirs::picture_dir()
                .or_else(|| dirs::home_dir().map(|h| h.join("Pictures")))
                .unwrap_or_else(|| PathBuf::from("."))
                .join("Screenshots"),
        }
    }
}

/// Application configuration persisted between sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Initial color for annotations
    #[serde(default)]
    pub shape_color: ShapeColor,
    /// Initial stroke width in pixels
    #[serde(default = "default_stroke_width")]
    pub stroke_width: u32,
    /// Font size for text annotations
    #[serde(default = "default_font_size")]
    pub font_size: u32,
    /// Mosaic block size in pixels
    #[serde(default = "default_mosaic_block_size")]
    pub mosaic_block_size: u32,
    /// Maximum number of undo steps kept
    #[serde(default = "default_max_history")]
    pub max_history: usize,
    #[serde(default)]
    pub storage: StorageConfig,
    /// Copy the saved file path to the clipboard
    #[serde(default = "default_true")]
    pub copy_path_to_clipboard: bool,
}

fn default_stroke_width() -> u32 {
    STROKE_WIDTHS[0]
}

fn default_font_size() -> u32 {
    20
}

fn default_mosaic_block_size() -> u32 {
    10
}

fn default_max_history() -> usize {
    50
}

fn default_quality() -> u8 {
    90
}

fn default_true() -> bool {
    true
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            shape_color: ShapeColor::default(),
            stroke_width: default_stroke_width(),
            font_size: default_font_size(),
            mosaic_block_size: default_mosaic_block_size(),
            max_history: default_max_history(),
            storage: StorageConfig::default(),
            copy_path_to_clipboard: true,
        }
    }
}

impl EditorConfig {
    /// Application directory name under the user config dir
    pub const ID: &'static str = "snapmark";

    /// Location of the config file
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(Self::ID).join("config.json"))
    }

    /// Load configuration from disk, or return defaults if unavailable
    pub fn load() -> Self {
        let Some(path) = Self::path() else {
            log::warn!("No config directory available, using defaults");
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("Error loading config, using defaults: {:?}", err);
                Self::default()
            }
        }
    }

    /// Load and validate a config file
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let mut config: Self = serde_json::from_str(&data)
            .with_context(|| format!("parsing {}", path.display()))?;
        config.validate();
        Ok(config)
    }

    /// Save configuration to disk
    pub fn save(&self) {
        let Some(path) = Self::path() else {
            log::error!("Could not determine config path for saving");
            return;
        };
        if let Err(err) = self.save_to(&path) {
            log::error!("Failed to save config: {:?}", err);
        }
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("creating {}", dir.display()))?;
        }
        let data = serde_json::to_string_pretty(self)?;
        std::fs::write(path, data).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }

    /// Repair out-of-range values in place
    pub fn validate(&mut self) {
        let defaults = Self::default();
        if self.stroke_width == 0 {
            self.stroke_width = defaults.stroke_width;
        }
        self.stroke_width = self.stroke_width.min(MAX_WIDTH);
        if self.font_size == 0 {
            self.font_size = defaults.font_size;
        }
        self.font_size = self.font_size.min(MAX_FONT_SIZE);
        if self.mosaic_block_size == 0 {
            self.mosaic_block_size = defaults.mosaic_block_size;
        }
        if self.max_history == 0 {
            self.max_history = defaults.max_history;
        }
        if !(1..=100).contains(&self.storage.quality) {
            self.storage.quality = defaults.storage.quality;
        }
        // Path traversal guard
        if self
            .storage
            .directory
            .as_ref()
            .is_some_and(|dir| dir.to_string_lossy().contains(".."))
        {
            log::warn!("Ignoring storage directory containing '..'");
            self.storage.directory = None;
        }
    }
}

fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| path.to_path_buf()),
        Err(_) => path.to_path_buf(),
    }
}
