//! # Profile Mask
//!
//! Contour set → occupancy mask in {0, 1}.
//!
//! The main polygon is filled as material, each hole polygon is filled back
//! to empty in discovery order (so repeated or overlapping holes are
//! idempotent), and a close → blur → re-threshold pass removes raster
//! jaggedness without letting thin holes disappear.

use crate::binarize::{BACKGROUND, FOREGROUND};
use crate::contour::{Contour, ContourSet};
use config::ProfileConfig;
use image::{GrayImage, Luma};
use imageproc::distance_transform::Norm;
use imageproc::drawing::draw_polygon_mut;
use imageproc::filter::gaussian_blur_f32;
use imageproc::morphology::close;
use log::debug;

// =============================================================================
// OCCUPANCY MASK
// =============================================================================

/// Row-major 2D grid of material occupancy values in [0, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct OccupancyMask {
    width: u32,
    height: u32,
    data: Vec<f32>,
}

impl OccupancyMask {
    /// Creates an all-empty mask.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0.0; width as usize * height as usize],
        }
    }

    /// Builds a mask from a per-pixel function, clamping values into [0, 1].
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> f32) -> Self {
        let mut data = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y).clamp(0.0, 1.0));
            }
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// Material where `mask` is non-zero.
    pub fn from_binary(mask: &GrayImage) -> Self {
        Self::from_fn(mask.width(), mask.height(), |x, y| {
            if mask.get_pixel(x, y)[0] != BACKGROUND {
                1.0
            } else {
                0.0
            }
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Value at column `x`, row `y`.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> f32 {
        self.data[y as usize * self.width as usize + x as usize]
    }

    /// Row-major values.
    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Number of cells above one half.
    pub fn material_count(&self) -> usize {
        self.data.iter().filter(|&&v| v > 0.5).count()
    }

    /// Fraction of cells that are material.
    pub fn material_ratio(&self) -> f64 {
        if self.data.is_empty() {
            return 0.0;
        }
        self.material_count() as f64 / self.data.len() as f64
    }

    /// Fraction of cells that are not material (holes and background).
    pub fn hole_ratio(&self) -> f64 {
        1.0 - self.material_ratio()
    }

    /// True when every value is exactly 0 or 1.
    pub fn is_binary(&self) -> bool {
        self.data.iter().all(|&v| v == 0.0 || v == 1.0)
    }

    /// Grayscale rendering, 1.0 → 255.
    pub fn to_image(&self) -> GrayImage {
        GrayImage::from_fn(self.width, self.height, |x, y| {
            Luma([(self.get(x, y) * 255.0).round() as u8])
        })
    }
}

// =============================================================================
// PROFILE CONSTRUCTION
// =============================================================================

/// Fills the main contour with material and cuts every hole out of it.
///
/// Returns a {0, 255} canvas of `width` × `height`.
pub fn rasterize_profile(contours: &ContourSet, width: u32, height: u32) -> GrayImage {
    let mut canvas = GrayImage::new(width, height);
    if width == 0 || height == 0 {
        return canvas;
    }

    fill_polygon(&mut canvas, contours.main(), FOREGROUND);
    for hole in contours.holes() {
        fill_polygon(&mut canvas, hole, BACKGROUND);
    }
    canvas
}

/// Close → Gaussian blur → re-threshold of a filled profile canvas.
///
/// The result is strictly {0, 1}.
pub fn clean_profile(filled: &GrayImage, cfg: &ProfileConfig) -> OccupancyMask {
    let (width, height) = filled.dimensions();
    if width == 0 || height == 0 {
        return OccupancyMask::new(width, height);
    }

    let closed = if cfg.close_radius > 0 {
        close(filled, Norm::LInf, cfg.close_radius)
    } else {
        filled.clone()
    };
    let blurred = gaussian_blur_f32(&closed, cfg.blur_sigma);

    let cut = cfg.cut * f32::from(FOREGROUND);
    let mask = OccupancyMask::from_fn(width, height, |x, y| {
        if f32::from(blurred.get_pixel(x, y)[0]) > cut {
            1.0
        } else {
            0.0
        }
    });

    debug!(
        "profile mask {}x{}: material {:.1}%, hole ratio {:.3}",
        width,
        height,
        mask.material_ratio() * 100.0,
        mask.hole_ratio()
    );
    mask
}

/// [`rasterize_profile`] followed by [`clean_profile`].
///
/// # Example
///
/// ```rust
/// use config::ProfileConfig;
/// use drawing_profile::{build_profile_mask, Contour, ContourSet};
///
/// let set = ContourSet::new(
///     Contour::rectangle(10, 10, 50, 50),
///     vec![Contour::rectangle(25, 25, 35, 35)],
/// );
/// let mask = build_profile_mask(&set, 60, 60, &ProfileConfig::default());
/// assert_eq!(mask.get(15, 15), 1.0);
/// assert_eq!(mask.get(30, 30), 0.0);
/// ```
pub fn build_profile_mask(
    contours: &ContourSet,
    width: u32,
    height: u32,
    cfg: &ProfileConfig,
) -> OccupancyMask {
    clean_profile(&rasterize_profile(contours, width, height), cfg)
}

/// Paints the interior and boundary of `contour` with `value`.
fn fill_polygon(canvas: &mut GrayImage, contour: &Contour, value: u8) {
    // draw_polygon_mut rejects rings that repeat their first point; Contour
    // never stores the closing point.
    if contour.len() < 3 {
        return;
    }
    draw_polygon_mut(canvas, contour.points(), Luma([value]));
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::constants::DEFAULT_PROFILE_CUT;

    fn plate_with_hole() -> ContourSet {
        ContourSet::new(
            Contour::rectangle(20, 20, 79, 79),
            vec![Contour::rectangle(44, 44, 55, 55)],
        )
    }

    #[test]
    fn test_rasterize_fills_boundary_and_interior() {
        let canvas = rasterize_profile(&plate_with_hole(), 100, 100);
        assert_eq!(canvas.get_pixel(20, 20)[0], FOREGROUND);
        assert_eq!(canvas.get_pixel(79, 50)[0], FOREGROUND);
        assert_eq!(canvas.get_pixel(19, 50)[0], BACKGROUND);
        assert_eq!(canvas.get_pixel(50, 50)[0], BACKGROUND);
        assert_eq!(canvas.get_pixel(44, 50)[0], BACKGROUND);
    }

    #[test]
    fn test_hole_interior_empty_and_material_full() {
        let mask = build_profile_mask(&plate_with_hole(), 100, 100, &ProfileConfig::default());

        for y in 46..=53 {
            for x in 46..=53 {
                assert_eq!(mask.get(x, y), 0.0, "hole pixel ({x}, {y})");
            }
        }
        for (x, y) in [(22, 22), (77, 77), (30, 50), (50, 30), (42, 50), (57, 50)] {
            assert_eq!(mask.get(x, y), 1.0, "material pixel ({x}, {y})");
        }
        assert_eq!(mask.get(5, 5), 0.0);
    }

    #[test]
    fn test_output_is_strictly_binary() {
        let mask = build_profile_mask(&plate_with_hole(), 100, 100, &ProfileConfig::default());
        assert!(mask.is_binary());
    }

    #[test]
    fn test_repeated_hole_is_idempotent() {
        let cfg = ProfileConfig::default();
        let once = build_profile_mask(&plate_with_hole(), 100, 100, &cfg);

        let hole = Contour::rectangle(44, 44, 55, 55);
        let twice = ContourSet::new(
            Contour::rectangle(20, 20, 79, 79),
            vec![hole.clone(), hole],
        );
        assert_eq!(build_profile_mask(&twice, 100, 100, &cfg), once);
    }

    #[test]
    fn test_thin_hole_survives_cleanup() {
        let set = ContourSet::new(
            Contour::rectangle(5, 5, 60, 60),
            vec![Contour::rectangle(20, 30, 40, 33)],
        );
        let mask = build_profile_mask(&set, 70, 70, &ProfileConfig::default());
        assert_eq!(mask.get(30, 31), 0.0);
        assert_eq!(mask.get(30, 32), 0.0);
    }

    #[test]
    fn test_ratios() {
        let set = ContourSet::new(Contour::rectangle(0, 0, 4, 9), vec![]);
        let mask = build_profile_mask(&set, 10, 10, &ProfileConfig::default());
        assert_eq!(mask.material_count(), 50);
        assert_eq!(mask.material_ratio(), 0.5);
        assert_eq!(mask.hole_ratio(), 0.5);
        assert!(DEFAULT_PROFILE_CUT < 0.5);
    }

    #[test]
    fn test_to_image_scales_values() {
        let mask = OccupancyMask::from_fn(2, 1, |x, _| x as f32);
        let image = mask.to_image();
        assert_eq!(image.get_pixel(0, 0)[0], 0);
        assert_eq!(image.get_pixel(1, 0)[0], 255);
        assert_eq!(mask.as_slice(), &[0.0, 1.0]);
    }
}
