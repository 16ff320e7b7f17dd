//! # Conversion Outcome
//!
//! Result of a conversion that did not fail: either a mesh with its report,
//! or the reason no surface could be extracted.

use drawing_mesh::{CleanupReport, Mesh, MeshExtractionError};
use serde::{Deserialize, Serialize};

/// What one conversion produced.
#[derive(Debug, Clone)]
pub enum ConversionOutcome {
    Mesh(ConvertedMesh),
    /// The volume has no isosurface at the chosen level (e.g. the mask is
    /// all material). Not a failure: batch processing carries on.
    NoMesh { reason: MeshExtractionError },
}

impl ConversionOutcome {
    pub fn is_mesh(&self) -> bool {
        matches!(self, ConversionOutcome::Mesh(_))
    }

    pub fn mesh(&self) -> Option<&ConvertedMesh> {
        match self {
            ConversionOutcome::Mesh(converted) => Some(converted),
            ConversionOutcome::NoMesh { .. } => None,
        }
    }

    pub fn into_mesh(self) -> Option<ConvertedMesh> {
        match self {
            ConversionOutcome::Mesh(converted) => Some(converted),
            ConversionOutcome::NoMesh { .. } => None,
        }
    }
}

/// Cleaned mesh plus the statistics of the run that built it.
#[derive(Debug, Clone)]
pub struct ConvertedMesh {
    pub mesh: Mesh,
    pub report: ConversionReport,
}

/// Wall-clock time of one stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageTiming {
    pub stage: String,
    pub millis: f64,
}

/// Per-stage statistics of a successful conversion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversionReport {
    pub image_width: u32,
    pub image_height: u32,
    pub foreground_pixels: usize,
    pub main_contour_area: f64,
    pub main_contour_points: usize,
    /// Areas of the holes in discovery order.
    pub hole_areas: Vec<f64>,
    /// Fraction of the occupancy mask that is not material.
    pub hole_ratio: f64,
    /// (height, width, depth).
    pub volume_shape: [usize; 3],
    /// Fraction of voxels above the isolevel.
    pub material_fraction: f64,
    pub isolevel: f64,
    pub raw_vertices: usize,
    pub raw_triangles: usize,
    pub cleanup: CleanupReport,
    pub timings: Vec<StageTiming>,
}

impl ConversionReport {
    pub fn hole_count(&self) -> usize {
        self.hole_areas.len()
    }

    /// Total time over all stages.
    pub fn total_millis(&self) -> f64 {
        self.timings.iter().map(|t| t.millis).sum()
    }
}
