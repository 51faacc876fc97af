/// Error types for loading, filtering and exporting photos
///
/// Every failure is returned to the caller. None of them poison the
/// session: after an error the previous original and filtered images
/// are still there and the next action can proceed.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Save was requested before any filter was applied
    #[error("no filtered image to save, apply a filter first")]
    NothingToSave,

    /// The input could not be read or decoded as an image
    #[error("failed to decode image {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Creating, writing or persisting a file failed
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// PNG encoding failed
    #[error("failed to encode PNG: {0}")]
    Encode(#[source] image::ImageError),

    /// Neither the platform pictures dir nor $HOME/Pictures could be found
    #[error("could not determine a pictures directory")]
    NoPicturesDir,

    /// A filter name that is not one of the built-in filters
    #[error("unknown filter '{0}' (expected sepia, black_and_white, negative or vignette)")]
    UnknownFilter(String),

    /// The settings file exists but is not valid settings JSON
    #[error("invalid settings file {}: {source}", path.display())]
    Settings {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
