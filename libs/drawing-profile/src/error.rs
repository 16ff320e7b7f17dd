//! # Profile Errors
//!
//! Fatal failures of the raster and contour stages.

use std::path::PathBuf;
use thiserror::Error;

/// The input raster cannot be used.
#[derive(Debug, Error)]
pub enum InputError {
    /// The image file is missing or cannot be decoded.
    #[error("cannot read drawing {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Binarization left no foreground pixel.
    #[error("binary mask of {width}x{height} has no foreground")]
    EmptyMask { width: u32, height: u32 },
}

/// No usable profile could be traced from the binary mask.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContourError {
    /// Border following found no contour enclosing a non-zero area.
    #[error("no contour found ({traced} borders traced, none enclosing area)")]
    NotFound { traced: usize },

    /// A hole polygon leaves the main polygon.
    #[error("hole {index} is not inside the main contour")]
    HoleOutsideMain { index: usize },
}
