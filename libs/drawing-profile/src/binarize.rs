//! # Binarization
//!
//! Grayscale raster → binary ink mask. Dark strokes on light paper become
//! foreground (255); everything else is background (0). A morphological
//! closing with a small square element then bridges single-pixel scan gaps.

use crate::error::InputError;
use config::BinarizeConfig;
use image::{GrayImage, Luma};
use imageproc::distance_transform::Norm;
use imageproc::morphology::close;
use log::debug;

/// Mask value of material candidates.
pub const FOREGROUND: u8 = 255;

/// Mask value of paper / empty space.
pub const BACKGROUND: u8 = 0;

/// Thresholds `raster` into a {0, 255} mask and closes small gaps.
///
/// A pixel is foreground when its intensity is strictly below
/// `cfg.threshold`.
///
/// # Errors
///
/// [`InputError::EmptyMask`] when the mask has no foreground pixel.
///
/// # Example
///
/// ```rust
/// use config::BinarizeConfig;
/// use drawing_profile::binarize::{binarize, FOREGROUND};
/// use image::{GrayImage, Luma};
///
/// let mut paper = GrayImage::from_pixel(16, 16, Luma([255]));
/// for x in 4..12 {
///     paper.put_pixel(x, 8, Luma([0]));
/// }
/// let mask = binarize(&paper, &BinarizeConfig::default()).unwrap();
/// assert_eq!(mask.get_pixel(6, 8)[0], FOREGROUND);
/// ```
pub fn binarize(raster: &GrayImage, cfg: &BinarizeConfig) -> Result<GrayImage, InputError> {
    let (width, height) = raster.dimensions();
    if width == 0 || height == 0 {
        return Err(InputError::EmptyMask { width, height });
    }

    let ink = GrayImage::from_fn(width, height, |x, y| {
        if raster.get_pixel(x, y)[0] < cfg.threshold {
            Luma([FOREGROUND])
        } else {
            Luma([BACKGROUND])
        }
    });

    let mask = if cfg.close_radius > 0 {
        close(&ink, Norm::LInf, cfg.close_radius)
    } else {
        ink
    };

    let count = foreground_count(&mask);
    debug!(
        "binarized {}x{} raster at threshold {}: {} foreground pixels",
        width, height, cfg.threshold, count
    );
    if count == 0 {
        return Err(InputError::EmptyMask { width, height });
    }
    Ok(mask)
}

/// Number of non-zero pixels in a mask.
pub fn foreground_count(mask: &GrayImage) -> usize {
    mask.pixels().filter(|p| p[0] != BACKGROUND).count()
}
