//! # Mesh Cleanup
//!
//! Raw isosurface mesh → cleaned mesh plus a [`CleanupReport`].
//!
//! ## Pass Order
//!
//! ```text
//! degenerate triangles → duplicate triangles → duplicate vertices
//!   → non-manifold edges → unreferenced vertices
//!   → normals → Laplacian smoothing → normals → quality check
//! ```
//!
//! Non-manifold repair works on the deduplicated adjacency, so it must run
//! after both duplicate passes. A mesh left with open boundaries (hole
//! openings, volume ends) is reported, not rejected.

mod repair;


pub use repair::{
    laplacian_smooth, merge_duplicate_vertices, remove_degenerate_triangles,
    remove_duplicate_triangles, remove_non_manifold_edges, remove_unreferenced_vertices,
};

use crate::mesh::Mesh;
use crate::topology::TopologySummary;
use config::CleanupConfig;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// What one cleanup run removed and what the result looks like.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanupReport {
    pub degenerate_triangles: usize,
    pub duplicate_triangles: usize,
    pub merged_vertices: usize,
    pub non_manifold_triangles: usize,
    pub unreferenced_vertices: usize,
    pub vertices: usize,
    pub triangles: usize,
    /// Edges used by a single triangle.
    pub boundary_edges: usize,
    /// Edges still used by more than two triangles.
    pub non_manifold_edges: usize,
    pub components: usize,
    pub euler_characteristic: i64,
    pub watertight: bool,
}

impl CleanupReport {
    pub fn removed_triangles(&self) -> usize {
        self.degenerate_triangles + self.duplicate_triangles + self.non_manifold_triangles
    }

    pub fn removed_vertices(&self) -> usize {
        self.merged_vertices + self.unreferenced_vertices
    }
}

/// Runs the cleanup passes with fixed tolerances.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MeshCleaner {
    cfg: CleanupConfig,
}

impl MeshCleaner {
    pub fn new(cfg: CleanupConfig) -> Self {
        Self { cfg }
    }

    /// Cleans `mesh` in place.
    ///
    /// Running it again on its own output removes nothing.
    ///
    /// # Example
    ///
    /// ```rust
    /// use drawing_mesh::{Mesh, MeshCleaner};
    /// use glam::DVec3;
    ///
    /// let mut mesh = Mesh::from_parts(
    ///     vec![DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::X],
    ///     vec![[0, 1, 2], [0, 3, 2], [1, 1, 2]],
    /// );
    /// let report = MeshCleaner::default().clean(&mut mesh);
    /// assert_eq!(mesh.triangle_count(), 1);
    /// assert_eq!(report.merged_vertices, 1);
    /// ```
    pub fn clean(&self, mesh: &mut Mesh) -> CleanupReport {
        let mut report = CleanupReport {
            degenerate_triangles: remove_degenerate_triangles(mesh, self.cfg.degenerate_area),
            duplicate_triangles: remove_duplicate_triangles(mesh),
            ..Default::default()
        };

        report.merged_vertices = merge_duplicate_vertices(mesh, self.cfg.merge_distance);
        if report.merged_vertices > 0 {
            // Merging can collapse or duplicate triangles.
            report.degenerate_triangles +=
                remove_degenerate_triangles(mesh, self.cfg.degenerate_area);
            report.duplicate_triangles += remove_duplicate_triangles(mesh);
        }

        report.non_manifold_triangles = remove_non_manifold_edges(mesh);
        report.unreferenced_vertices = remove_unreferenced_vertices(mesh);

        mesh.compute_normals();
        laplacian_smooth(
            mesh,
            self.cfg.smoothing_iterations,
            self.cfg.smoothing_lambda,
        );
        mesh.compute_normals();

        let topology = TopologySummary::of(mesh);
        report.vertices = topology.vertices;
        report.triangles = topology.triangles;
        report.boundary_edges = topology.boundary_edges;
        report.non_manifold_edges = topology.non_manifold_edges;
        report.components = topology.components;
        report.euler_characteristic = topology.euler_characteristic();
        report.watertight = topology.is_watertight();

        debug!(
            "cleanup removed {} triangles and {} vertices: {:?}",
            report.removed_triangles(),
            report.removed_vertices(),
            report
        );
        if !report.watertight {
            warn!(
                "cleaned mesh is not watertight: {} boundary edges, {} non-manifold edges \
                 (open boundaries at hole openings and volume ends are expected)",
                report.boundary_edges, report.non_manifold_edges
            );
        }
        report
    }
}
