//! # Mesh Errors
//!
//! Error types for extrusion and isosurface extraction.

use thiserror::Error;

/// The occupancy volume cannot be built.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VolumeError {
    /// Extrusion depth below the minimum the extractor can work with.
    #[error("extrusion depth {depth} is below the minimum of {min}")]
    InvalidDepth { depth: usize, min: usize },

    /// The occupancy mask has no pixels.
    #[error("occupancy mask of {width}x{height} is empty")]
    EmptyMask { width: u32, height: u32 },
}

/// No surface could be extracted from the occupancy volume.
///
/// The pipeline turns this into a "no mesh produced" outcome.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MeshExtractionError {
    /// Some dimension has fewer than two samples.
    #[error("volume {height}x{width}x{depth} is too small for extraction")]
    VolumeTooSmall {
        height: usize,
        width: usize,
        depth: usize,
    },

    /// The volume never crosses the isolevel.
    #[error("no surface at level {level}: volume values span [{min}, {max}]")]
    NoSurface { level: f64, min: f64, max: f64 },
}

impl MeshExtractionError {
    /// Creates a no-surface error.
    pub fn no_surface(level: f64, (min, max): (f32, f32)) -> Self {
        Self::NoSurface {
            level,
            min: f64::from(min),
            max: f64::from(max),
        }
    }
}
