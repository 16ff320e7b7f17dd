//! # Raster Loading
//!
//! One-shot grayscale load of a drawing file.

use crate::error::InputError;
use image::GrayImage;
use log::debug;
use std::path::Path;

/// Loads any raster format the `image` crate decodes and converts it to 8-bit
/// grayscale.
///
/// # Errors
///
/// [`InputError::Unreadable`] when the file is missing or undecodable.
pub fn load_grayscale(path: impl AsRef<Path>) -> Result<GrayImage, InputError> {
    let path = path.as_ref();
    let decoded = image::open(path).map_err(|source| InputError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;

    let gray = decoded.to_luma8();
    debug!(
        "loaded {} as {}x{} grayscale",
        path.display(),
        gray.width(),
        gray.height()
    );
    Ok(gray)
}
