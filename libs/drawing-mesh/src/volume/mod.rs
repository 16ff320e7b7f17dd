//! # Occupancy Volume
//!
//! 2D occupancy mask → 3D occupancy volume of shape (height, width, depth).
//!
//! ## Policies
//!
//! - [`ExtrusionPolicy::HolePreserving`]: every depth slice is an exact copy
//!   of the mask, giving a prism with straight-walled through-holes.
//! - [`ExtrusionPolicy::Tapered`]: slice `z` is the mask times a triangular
//!   falloff `1 - |z - m| / m`, `m = (depth - 1) / 2`. Lens-shaped preview
//!   solids only; hole walls do not survive the full depth.


use crate::error::VolumeError;
use config::constants::MIN_DEPTH;
use config::ExtrusionPolicy;
use drawing_profile::OccupancyMask;
use log::debug;

/// Dense scalar grid indexed by (row, column, slice).
///
/// Rows and columns follow the source image; slices run along the extrusion
/// axis. Storage is slice-fastest: `(row * width + col) * depth + slice`.
#[derive(Debug, Clone, PartialEq)]
pub struct OccupancyVolume {
    height: usize,
    width: usize,
    depth: usize,
    data: Vec<f32>,
}

impl OccupancyVolume {
    /// Builds a volume from a per-voxel function of (row, col, slice).
    pub fn from_fn(
        height: usize,
        width: usize,
        depth: usize,
        mut f: impl FnMut(usize, usize, usize) -> f32,
    ) -> Self {
        let mut data = Vec::with_capacity(height * width * depth);
        for row in 0..height {
            for col in 0..width {
                for slice in 0..depth {
                    data.push(f(row, col, slice));
                }
            }
        }
        Self {
            height,
            width,
            depth,
            data,
        }
    }

    /// Extrudes `mask` to `depth` slices under `policy`.
    ///
    /// # Errors
    ///
    /// - [`VolumeError::InvalidDepth`] when `depth < 2`.
    /// - [`VolumeError::EmptyMask`] when the mask has no pixels.
    pub fn extrude(
        mask: &OccupancyMask,
        depth: usize,
        policy: ExtrusionPolicy,
    ) -> Result<Self, VolumeError> {
        if depth < MIN_DEPTH {
            return Err(VolumeError::InvalidDepth {
                depth,
                min: MIN_DEPTH,
            });
        }
        if mask.width() == 0 || mask.height() == 0 {
            return Err(VolumeError::EmptyMask {
                width: mask.width(),
                height: mask.height(),
            });
        }

        let weights: Vec<f32> = (0..depth).map(|z| slice_weight(policy, z, depth)).collect();
        let volume = Self::from_fn(
            mask.height() as usize,
            mask.width() as usize,
            depth,
            |row, col, slice| {
                let value = mask.get(col as u32, row as u32);
                match policy {
                    ExtrusionPolicy::HolePreserving => value,
                    ExtrusionPolicy::Tapered => value * weights[slice],
                }
            },
        );

        let (min, max) = volume.value_range();
        debug!(
            "extruded {:?} volume {}x{}x{}: values [{}, {}]",
            policy, volume.height, volume.width, volume.depth, min, max
        );
        Ok(volume)
    }

    /// (height, width, depth).
    #[inline]
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.height, self.width, self.depth)
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Number of voxels.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Flat storage offset of a voxel.
    #[inline]
    pub fn index(&self, row: usize, col: usize, slice: usize) -> usize {
        (row * self.width + col) * self.depth + slice
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize, slice: usize) -> f32 {
        self.data[self.index(row, col, slice)]
    }

    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Depth slice `slice` as a 2D mask.
    pub fn slice(&self, slice: usize) -> OccupancyMask {
        OccupancyMask::from_fn(self.width as u32, self.height as u32, |x, y| {
            self.get(y as usize, x as usize, slice)
        })
    }

    /// (min, max) over all voxels; (0, 0) for an empty volume.
    pub fn value_range(&self) -> (f32, f32) {
        let mut values = self.data.iter().copied();
        let Some(first) = values.next() else {
            return (0.0, 0.0);
        };
        values.fold((first, first), |(min, max), v| (min.min(v), max.max(v)))
    }

    /// Voxels whose value is strictly above `level`.
    pub fn count_above(&self, level: f64) -> usize {
        self.data
            .iter()
            .filter(|&&v| f64::from(v) > level)
            .count()
    }

    /// Fraction of voxels above `level`.
    pub fn fraction_above(&self, level: f64) -> f64 {
        if self.data.is_empty() {
            return 0.0;
        }
        self.count_above(level) as f64 / self.data.len() as f64
    }

    /// Copy surrounded by a one-voxel layer of zeros on every side.
    pub fn padded(&self) -> Self {
        let (h, w, d) = self.shape();
        Self::from_fn(h + 2, w + 2, d + 2, |row, col, slice| {
            let inside = (1..=h).contains(&row) && (1..=w).contains(&col) && (1..=d).contains(&slice);
            if inside {
                self.get(row - 1, col - 1, slice - 1)
            } else {
                0.0
            }
        })
    }
}

/// Depth weight of slice `z` under `policy`.
pub fn slice_weight(policy: ExtrusionPolicy, z: usize, depth: usize) -> f32 {
    match policy {
        ExtrusionPolicy::HolePreserving => 1.0,
        ExtrusionPolicy::Tapered => {
            let mid = (depth as f64 - 1.0) / 2.0;
            if mid <= 0.0 {
                return 1.0;
            }
            (1.0 - (z as f64 - mid).abs() / mid).max(0.0) as f32
        }
    }
}
