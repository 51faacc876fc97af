/// Pixel filters
///
/// Every filter is a pure, single-pass function from a source image to a
/// new image of the same dimensions:
/// - Sepia and negative are color matrices (see `color.rs`)
/// - Black & white averages the channels, or uses the luminance matrix
/// - Vignette composites a radial darkening mask (`vignette.rs`)

pub mod vignette;

use image::{Rgba, RgbaImage};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::color::ColorMatrix;
use crate::error::Error;
use crate::state::settings::{GreyscaleMode, Settings};

/// The built-in filters
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FilterKind {
    Sepia,
    BlackAndWhite,
    Negative,
    Vignette,
}

impl FilterKind {
    /// All filters, in menu order
    pub const ALL: [FilterKind; 4] = [
        FilterKind::Sepia,
        FilterKind::BlackAndWhite,
        FilterKind::Negative,
        FilterKind::Vignette,
    ];

    /// Stable lowercase name
    pub fn name(self) -> &'static str {
        match self {
            FilterKind::Sepia => "sepia",
            FilterKind::BlackAndWhite => "black_and_white",
            FilterKind::Negative => "negative",
            FilterKind::Vignette => "vignette",
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FilterKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        FilterKind::ALL
            .into_iter()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| Error::UnknownFilter(s.to_string()))
    }
}

/// Apply a filter to an image, producing a new image of the same size
pub fn apply(image: &RgbaImage, kind: FilterKind, settings: &Settings) -> RgbaImage {
    log::debug!(
        "Applying {} to {}x{} image",
        kind,
        image.width(),
        image.height()
    );

    match kind {
        FilterKind::Sepia => ColorMatrix::sepia().apply_image(image),
        FilterKind::BlackAndWhite => black_and_white(image, settings.greyscale),
        FilterKind::Negative => ColorMatrix::negative().apply_image(image),
        FilterKind::Vignette => vignette::apply(image, &settings.vignette),
    }
}

/// Desaturate an image with the chosen greyscale mode
pub fn black_and_white(image: &RgbaImage, mode: GreyscaleMode) -> RgbaImage {
    match mode {
        GreyscaleMode::Average => {
            let mut output = image.clone();
            for pixel in output.pixels_mut() {
                *pixel = average_grey(*pixel);
            }
            output
        }
        GreyscaleMode::Luminance => ColorMatrix::greyscale_luminance().apply_image(image),
    }
}

/// grey = (R + G + B) / 3, alpha kept
fn average_grey(pixel: Rgba<u8>) -> Rgba<u8> {
    let [r, g, b, a] = pixel.0;
    // At most 765 / 3 = 255, always fits
    let grey = ((r as u16 + g as u16 + b as u16) / 3) as u8;
    Rgba([grey, grey, grey, a])
}
