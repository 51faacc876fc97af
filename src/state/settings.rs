/// User-tunable filter and export settings
///
/// These values change how the built-in filters behave and where exports
/// land. They are serialized to JSON in the user's config directory.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::export;

/// Default prefix for exported files
pub const DEFAULT_FILE_PREFIX: &str = "filtered_image_";

/// How the black & white filter computes grey
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum GreyscaleMode {
    /// grey = (R + G + B) / 3, integer division
    #[default]
    Average,
    /// Saturation-zero color matrix (0.213 R + 0.715 G + 0.072 B)
    Luminance,
}

/// Interpolation between the vignette's center and edge stops
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Falloff {
    #[default]
    Linear,
    Smoothstep,
}

/// Vignette shape parameters
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct VignetteParams {
    /// Radius is `width / radius_divisor` (1.5 by default)
    pub radius_divisor: f32,

    /// Mask opacity at (and beyond) the radius, 0.0 to 1.0
    /// - 0.0 = no darkening at all
    /// - 1.0 = fully black edges
    pub edge_alpha: f32,

    pub falloff: Falloff,
}

impl Default for VignetteParams {
    fn default() -> Self {
        Self {
            radius_divisor: 1.5,
            // 0x7f black
            edge_alpha: 127.0 / 255.0,
            falloff: Falloff::Linear,
        }
    }
}

impl VignetteParams {
    /// Radius of the darkening gradient for an image of the given width
    pub fn radius_for(&self, width: u32) -> f32 {
        if self.radius_divisor > 0.0 {
            width as f32 / self.radius_divisor
        } else {
            width as f32
        }
    }
}

/// All settings of a filter session
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    // ========== Filters ==========

    /// Black & white strategy
    pub greyscale: GreyscaleMode,

    /// Vignette shape
    pub vignette: VignetteParams,

    // ========== Export ==========

    /// Where exports are written
    /// - None = the platform pictures directory
    pub output_dir: Option<PathBuf>,

    /// File name prefix, a random identifier and `.png` follow it
    pub file_prefix: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            greyscale: GreyscaleMode::default(),
            vignette: VignetteParams::default(),
            output_dir: None,
            file_prefix: DEFAULT_FILE_PREFIX.to_string(),
        }
    }
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert to a JSON string
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse from a JSON string, missing fields take their defaults
    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Get the path where settings are stored
    /// - Linux: ~/.config/photo-filter/settings.json
    /// - macOS: ~/Library/Application Support/photo-filter/settings.json
    /// - Windows: %APPDATA%\photo-filter\settings.json
    pub fn default_path() -> Option<PathBuf> {
        let mut path = dirs::config_dir().or_else(dirs::home_dir)?;
        path.push("photo-filter");
        path.push("settings.json");
        Some(path)
    }

    /// Read settings from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::parse_file(path, &json)
    }

    fn parse_file(path: &Path, json: &str) -> Result<Self> {
        Self::from_json(json).map_err(|source| Error::Settings {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read settings, or fall back to defaults when the file does not exist
    ///
    /// Only a missing file means defaults. Unreadable or unparsable files
    /// are errors, so a typo or a permission problem does not silently
    /// reset everything.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("No settings at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(Error::io(path, e)),
        };
        Self::parse_file(path, &json)
    }

    /// Write settings as JSON, creating the parent directory if needed
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }

        let json = self.to_json().map_err(|source| Error::Settings {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, json).map_err(|e| Error::io(path, e))?;

        log::debug!("Settings saved to {}", path.display());
        Ok(())
    }

    /// Directory exports go to
    pub fn output_dir(&self) -> Result<PathBuf> {
        match &self.output_dir {
            Some(dir) => Ok(dir.clone()),
            None => export::pictures_dir(),
        }
    }
}
