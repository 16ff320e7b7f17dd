//! # Drawing Mesh
//!
//! 2D occupancy profile → cleaned 3D triangle mesh.
//!
//! ## Architecture
//!
//! ```text
//! OccupancyMask ─► volume (extrude) ─► isosurface (marching tetrahedra,
//!                                        normalize) ─► clean ─► Mesh
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use config::{ConversionConfig, ExtrusionPolicy};
//! use drawing_mesh::{IsosurfaceMesher, MeshCleaner, OccupancyVolume};
//! use drawing_profile::OccupancyMask;
//!
//! let cfg = ConversionConfig::default();
//! let mask = OccupancyMask::from_fn(16, 16, |x, y| {
//!     if (4..12).contains(&x) && (4..12).contains(&y) { 1.0 } else { 0.0 }
//! });
//! let volume = OccupancyVolume::extrude(&mask, 8, ExtrusionPolicy::HolePreserving).unwrap();
//! let mut mesh = IsosurfaceMesher::new(cfg.isolevel(), &cfg.mesher)
//!     .extract(&volume)
//!     .unwrap();
//! let report = MeshCleaner::new(cfg.cleanup).clean(&mut mesh);
//! assert_eq!(report.triangles, mesh.triangle_count());
//! ```

pub mod clean;
pub mod error;
pub mod isosurface;
pub mod mesh;
pub mod topology;
pub mod volume;

pub use clean::{CleanupReport, MeshCleaner};
pub use error::{MeshExtractionError, VolumeError};
pub use isosurface::{normalize, IsosurfaceMesher};
pub use mesh::Mesh;
pub use topology::TopologySummary;
pub use volume::OccupancyVolume;
