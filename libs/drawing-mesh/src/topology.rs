//! # Mesh Topology
//!
//! Edge adjacency queries used by the cleaner's repair and quality check.

use crate::mesh::Mesh;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Undirected edge with the smaller vertex index first.
pub type Edge = (u32, u32);

#[inline]
pub fn edge_key(a: u32, b: u32) -> Edge {
    (a.min(b), a.max(b))
}

/// The three edges of a triangle.
#[inline]
pub fn triangle_edges(tri: [u32; 3]) -> [Edge; 3] {
    [
        edge_key(tri[0], tri[1]),
        edge_key(tri[1], tri[2]),
        edge_key(tri[2], tri[0]),
    ]
}

/// Edge → indices of the triangles using it, in ascending edge order.
pub fn edge_triangles(mesh: &Mesh) -> BTreeMap<Edge, Vec<usize>> {
    let mut map: BTreeMap<Edge, Vec<usize>> = BTreeMap::new();
    for (i, &tri) in mesh.triangles().iter().enumerate() {
        for edge in triangle_edges(tri) {
            map.entry(edge).or_default().push(i);
        }
    }
    map
}

/// Sorted, deduplicated neighbours of every vertex.
pub fn vertex_neighbors(mesh: &Mesh) -> Vec<Vec<u32>> {
    let mut neighbors = vec![Vec::new(); mesh.vertex_count()];
    for &[a, b, c] in mesh.triangles() {
        for (from, to) in [(a, b), (b, c), (c, a)] {
            neighbors[from as usize].push(to);
            neighbors[to as usize].push(from);
        }
    }
    for list in &mut neighbors {
        list.sort_unstable();
        list.dedup();
    }
    neighbors
}

/// Number of connected components among triangles (shared vertex = connected).
pub fn connected_components(mesh: &Mesh) -> usize {
    let mut parent: Vec<usize> = (0..mesh.vertex_count()).collect();

    fn find(parent: &mut [usize], mut x: usize) -> usize {
        while parent[x] != x {
            parent[x] = parent[parent[x]];
            x = parent[x];
        }
        x
    }

    for &[a, b, c] in mesh.triangles() {
        let root = find(&mut parent, a as usize);
        for v in [b, c] {
            let other = find(&mut parent, v as usize);
            parent[other] = root;
        }
    }

    let mut roots: Vec<usize> = mesh
        .triangles()
        .iter()
        .map(|tri| find(&mut parent, tri[0] as usize))
        .collect();
    roots.sort_unstable();
    roots.dedup();
    roots.len()
}

/// Edge statistics of a mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopologySummary {
    pub vertices: usize,
    pub edges: usize,
    pub triangles: usize,
    /// Edges used by exactly one triangle.
    pub boundary_edges: usize,
    /// Edges used by more than two triangles.
    pub non_manifold_edges: usize,
    pub components: usize,
}

impl TopologySummary {
    /// Gathers the summary for `mesh`.
    pub fn of(mesh: &Mesh) -> Self {
        let edges = edge_triangles(mesh);
        Self {
            vertices: mesh.vertex_count(),
            edges: edges.len(),
            triangles: mesh.triangle_count(),
            boundary_edges: edges.values().filter(|t| t.len() == 1).count(),
            non_manifold_edges: edges.values().filter(|t| t.len() > 2).count(),
            components: connected_components(mesh),
        }
    }

    /// V − E + F. For a closed orientable surface this is 2 − 2·genus per
    /// component.
    pub fn euler_characteristic(&self) -> i64 {
        self.vertices as i64 - self.edges as i64 + self.triangles as i64
    }

    /// Every edge is shared by exactly two triangles.
    pub fn is_watertight(&self) -> bool {
        self.triangles > 0 && self.boundary_edges == 0 && self.non_manifold_edges == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;

    /// Closed tetrahedron with outward winding.
    fn tetrahedron() -> Mesh {
        Mesh::from_parts(
            vec![DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::Z],
            vec![[0, 2, 1], [0, 1, 3], [1, 2, 3], [0, 3, 2]],
        )
    }

    #[test]
    fn test_tetrahedron_is_closed_sphere() {
        let summary = TopologySummary::of(&tetrahedron());
        assert_eq!(summary.edges, 6);
        assert_eq!(summary.boundary_edges, 0);
        assert_eq!(summary.components, 1);
        assert_eq!(summary.euler_characteristic(), 2);
        assert!(summary.is_watertight());
    }

    #[test]
    fn test_open_and_non_manifold_edges() {
        let mut mesh = tetrahedron();
        mesh.add_vertex(DVec3::new(1.0, 1.0, 1.0));
        mesh.add_triangle(1, 2, 4);

        let summary = TopologySummary::of(&mesh);
        assert_eq!(summary.non_manifold_edges, 1);
        assert_eq!(summary.boundary_edges, 2);
        assert!(!summary.is_watertight());
    }

    #[test]
    fn test_components_ignore_unreferenced_vertices() {
        let mut mesh = tetrahedron();
        mesh.add_vertex(DVec3::splat(5.0));
        let a = mesh.add_vertex(DVec3::splat(10.0));
        let b = mesh.add_vertex(DVec3::new(11.0, 10.0, 10.0));
        let c = mesh.add_vertex(DVec3::new(10.0, 11.0, 10.0));
        mesh.add_triangle(a, b, c);
        assert_eq!(connected_components(&mesh), 2);
    }

    #[test]
    fn test_vertex_neighbors() {
        let neighbors = vertex_neighbors(&tetrahedron());
        assert_eq!(neighbors[0], vec![1, 2, 3]);
        assert!(neighbors.iter().all(|n| n.len() == 3));
    }

    #[test]
    fn test_edge_key_is_undirected() {
        assert_eq!(edge_key(7, 3), (3, 7));
        assert_eq!(triangle_edges([2, 0, 1]), [(0, 2), (0, 1), (1, 2)]);
    }
}
