//! # Isosurface Extraction
//!
//! Occupancy volume → raw triangle mesh, centred and rescaled.
//!
//! ## Algorithm
//!
//! ```text
//! volume ─► range check ─► [pad] ─► marching tetrahedra ─► normalize
//!               │                          │
//!               └── NoSurface ◄────────────┘ (no triangles)
//! ```
//!
//! Uniform volumes (all empty or all material) have no surface at any level
//! inside (0, 1); that is reported as [`MeshExtractionError::NoSurface`]
//! rather than an empty mesh so callers can turn it into a "no mesh" outcome.
//!
//! World coordinates put x along image columns, y up the image (rows grow
//! downward) and z along the extrusion axis, each scaled by the voxel spacing.

mod tetra;


use crate::error::MeshExtractionError;
use crate::mesh::Mesh;
use crate::volume::OccupancyVolume;
use config::constants::EPSILON;
use config::MesherConfig;
use glam::DVec3;
use log::{debug, info};

/// Isosurface extraction with fixed level, spacing and output size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IsosurfaceMesher {
    level: f64,
    spacing: DVec3,
    target_size: f64,
    pad_boundary: bool,
}

impl IsosurfaceMesher {
    /// Creates a mesher at `level` with the remaining settings from `cfg`.
    pub fn new(level: f64, cfg: &MesherConfig) -> Self {
        Self {
            level,
            spacing: DVec3::from_array(cfg.spacing),
            target_size: cfg.target_size,
            pad_boundary: cfg.pad_boundary,
        }
    }

    #[inline]
    pub fn level(&self) -> f64 {
        self.level
    }

    /// Extracts, centres and rescales the isosurface of `volume`.
    ///
    /// # Errors
    ///
    /// - [`MeshExtractionError::VolumeTooSmall`] when any dimension is below 2.
    /// - [`MeshExtractionError::NoSurface`] when the level is outside the
    ///   volume's value range or no triangle is produced.
    ///
    /// # Example
    ///
    /// ```rust
    /// use config::MesherConfig;
    /// use drawing_mesh::{IsosurfaceMesher, OccupancyVolume};
    ///
    /// let volume = OccupancyVolume::from_fn(6, 6, 6, |r, c, z| {
    ///     let core = |i: usize| (2..4).contains(&i);
    ///     if core(r) && core(c) && core(z) { 1.0 } else { 0.0 }
    /// });
    /// let mesh = IsosurfaceMesher::new(0.5, &MesherConfig::default())
    ///     .extract(&volume)
    ///     .unwrap();
    /// assert!(mesh.triangle_count() > 0);
    /// assert!((mesh.max_extent() - 200.0).abs() < 1e-9);
    /// ```
    pub fn extract(&self, volume: &OccupancyVolume) -> Result<Mesh, MeshExtractionError> {
        let (height, width, depth) = volume.shape();
        if height < 2 || width < 2 || depth < 2 {
            return Err(MeshExtractionError::VolumeTooSmall {
                height,
                width,
                depth,
            });
        }

        let range = volume.value_range();
        debug!(
            "isosurface input {}x{}x{}: values [{}, {}], {:.2}% above level {}",
            height,
            width,
            depth,
            range.0,
            range.1,
            volume.fraction_above(self.level) * 100.0,
            self.level
        );
        if !(f64::from(range.0) < self.level && self.level < f64::from(range.1)) {
            return Err(MeshExtractionError::no_surface(self.level, range));
        }

        let mut mesh = if self.pad_boundary {
            tetra::march(&volume.padded(), self.level, self.spacing)
        } else {
            tetra::march(volume, self.level, self.spacing)
        };
        if mesh.is_empty() {
            return Err(MeshExtractionError::no_surface(self.level, range));
        }

        normalize(&mut mesh, self.target_size);
        info!(
            "isosurface at level {}: {} vertices, {} triangles",
            self.level,
            mesh.vertex_count(),
            mesh.triangle_count()
        );
        Ok(mesh)
    }
}

/// Moves the vertex centroid to the origin and scales uniformly so the
/// largest bounding-box extent equals `target_size`.
///
/// Meshes with no extent are only centred.
pub fn normalize(mesh: &mut Mesh, target_size: f64) {
    let centroid = mesh.centroid();
    mesh.translate(-centroid);

    let extent = mesh.max_extent();
    if extent > EPSILON {
        mesh.scale(target_size / extent);
    }
}
