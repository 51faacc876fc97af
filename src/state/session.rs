/// The editing session
///
/// A session owns exactly two images: the original that was loaded, and
/// the output of the last filter applied to it. Filters always run on the
/// original, so picking "sepia" then "negative" gives the negative of the
/// original rather than of the sepia result.

use image::RgbaImage;
use std::path::{Path, PathBuf};

use super::settings::Settings;
use crate::error::{Error, Result};
use crate::export;
use crate::filter::{self, FilterKind};

/// Decode an image file into RGBA
pub fn decode_file(path: &Path) -> Result<RgbaImage> {
    let image = image::open(path).map_err(|source| Error::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(image.to_rgba8())
}

/// Decode in-memory image data (e.g. an asset bundled with `include_bytes!`)
pub fn decode_bytes(bytes: &[u8]) -> Result<RgbaImage> {
    let image = image::load_from_memory(bytes).map_err(|source| Error::Decode {
        path: PathBuf::from("<memory>"),
        source,
    })?;
    Ok(image.to_rgba8())
}

pub struct Session {
    /// The image as loaded, never modified
    original: RgbaImage,
    /// Output of the last filter, None until one is applied
    filtered: Option<RgbaImage>,
    /// Which filter produced `filtered`
    last_filter: Option<FilterKind>,
    settings: Settings,
}

impl Session {
    /// Start a session from an already decoded image
    pub fn new(original: RgbaImage, settings: Settings) -> Self {
        Self {
            original,
            filtered: None,
            last_filter: None,
            settings,
        }
    }

    /// Start a session from an image file
    pub fn open(path: &Path, settings: Settings) -> Result<Self> {
        let original = decode_file(path)?;
        log::info!(
            "📷 Loaded {}x{} image from {}",
            original.width(),
            original.height(),
            path.display()
        );
        Ok(Self::new(original, settings))
    }

    /// Start a session from encoded image bytes
    pub fn from_bytes(bytes: &[u8], settings: Settings) -> Result<Self> {
        let original = decode_bytes(bytes)?;
        log::info!(
            "📷 Loaded {}x{} image from memory",
            original.width(),
            original.height()
        );
        Ok(Self::new(original, settings))
    }

    /// Replace the original; the previous filter output is dropped with it
    pub fn load_original(&mut self, image: RgbaImage) {
        self.original = image;
        self.filtered = None;
        self.last_filter = None;
    }

    /// Replace the original with a decoded file
    ///
    /// On a decode error the session keeps its current images.
    pub fn load_file(&mut self, path: &Path) -> Result<()> {
        let image = match decode_file(path) {
            Ok(image) => image,
            Err(e) => {
                log::warn!("⚠️  Keeping current image: {}", e);
                return Err(e);
            }
        };

        log::info!(
            "📷 Loaded {}x{} image from {}",
            image.width(),
            image.height(),
            path.display()
        );
        self.load_original(image);
        Ok(())
    }

    /// Run a filter on the original and keep the result
    pub fn apply(&mut self, kind: FilterKind) -> &RgbaImage {
        let output = filter::apply(&self.original, kind, &self.settings);
        log::info!("🎨 Applied {} filter", kind);

        self.last_filter = Some(kind);
        self.filtered.insert(output)
    }

    /// The image to show: the filtered one if any, else the original
    pub fn displayed(&self) -> &RgbaImage {
        self.filtered.as_ref().unwrap_or(&self.original)
    }

    pub fn original(&self) -> &RgbaImage {
        &self.original
    }

    pub fn filtered(&self) -> Option<&RgbaImage> {
        self.filtered.as_ref()
    }

    pub fn last_filter(&self) -> Option<FilterKind> {
        self.last_filter
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Settings changes take effect on the next `apply`
    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    /// Save the filtered image into the configured output directory
    pub fn save(&self) -> Result<PathBuf> {
        // Checked first so a missing pictures dir does not mask it
        if self.filtered.is_none() {
            log::warn!("⚠️  Save requested before any filter was applied");
            return Err(Error::NothingToSave);
        }

        let dir = self.settings.output_dir()?;
        self.save_to(&dir)
    }

    /// Save the filtered image into `dir`
    pub fn save_to(&self, dir: &Path) -> Result<PathBuf> {
        let Some(filtered) = &self.filtered else {
            log::warn!("⚠️  Save requested before any filter was applied");
            return Err(Error::NothingToSave);
        };

        export::write_png(filtered, dir, &self.settings.file_prefix).inspect_err(|e| {
            log::warn!("⚠️  Failed to save image: {}", e);
        })
    }
}
