//! Marching tetrahedra over the voxel lattice.
//!
//! Each lattice cell is split into six tetrahedra that share the diagonal
//! from corner 0 to corner 7 (Kuhn split). Neighbouring cells then agree on
//! their face diagonals, so the extracted pieces meet edge to edge. Within a
//! tetrahedron the field is linear and the surface piece is planar: one
//! triangle when one or three corners are inside, a quad when two are.

use crate::mesh::Mesh;
use crate::volume::OccupancyVolume;
use glam::DVec3;
use std::collections::HashMap;

/// Corner `c` of a cell sits at (row + bit1, col + bit0, slice + bit2).
const CELL_TETRAHEDRA: [[usize; 4]; 6] = [
    [0, 1, 3, 7],
    [0, 1, 5, 7],
    [0, 2, 3, 7],
    [0, 2, 6, 7],
    [0, 4, 5, 7],
    [0, 4, 6, 7],
];

/// One lattice corner of the tetrahedron being processed.
#[derive(Clone, Copy)]
struct Corner {
    index: usize,
    position: DVec3,
    value: f64,
}

/// Extracts the `level` isosurface of `volume`. Material (`value > level`)
/// lies behind the triangles' front faces.
pub(crate) fn march(volume: &OccupancyVolume, level: f64, spacing: DVec3) -> Mesh {
    let (height, width, depth) = volume.shape();
    let mut extractor = Extractor {
        level,
        mesh: Mesh::new(),
        edge_vertices: HashMap::new(),
    };

    let position = |row: usize, col: usize, slice: usize| {
        DVec3::new(
            col as f64 * spacing.x,
            (height - 1 - row) as f64 * spacing.y,
            slice as f64 * spacing.z,
        )
    };

    for row in 0..height - 1 {
        for col in 0..width - 1 {
            for slice in 0..depth - 1 {
                let corners: [Corner; 8] = std::array::from_fn(|c| {
                    let (r, k, z) = (row + ((c >> 1) & 1), col + (c & 1), slice + ((c >> 2) & 1));
                    Corner {
                        index: volume.index(r, k, z),
                        position: position(r, k, z),
                        value: f64::from(volume.get(r, k, z)),
                    }
                });

                let inside = corners.iter().filter(|c| c.value > level).count();
                if inside == 0 || inside == 8 {
                    continue;
                }

                for tet in &CELL_TETRAHEDRA {
                    extractor.tetrahedron(tet.map(|c| corners[c]));
                }
            }
        }
    }

    extractor.mesh
}

struct Extractor {
    level: f64,
    mesh: Mesh,
    /// Lattice edge (sorted corner indices) → surface vertex on that edge.
    edge_vertices: HashMap<(usize, usize), u32>,
}

impl Extractor {
    fn tetrahedron(&mut self, corners: [Corner; 4]) {
        let (inside, outside): (Vec<Corner>, Vec<Corner>) =
            corners.iter().partition(|c| c.value > self.level);

        match (inside.as_slice(), outside.as_slice()) {
            ([a], [b, c, d]) | ([b, c, d], [a]) => {
                let ring = [
                    self.edge_vertex(*a, *b),
                    self.edge_vertex(*a, *c),
                    self.edge_vertex(*a, *d),
                ];
                self.emit(ring[0], ring[1], ring[2], &inside, &outside);
            }
            ([i0, i1], [o0, o1]) => {
                let ring = [
                    self.edge_vertex(*i0, *o0),
                    self.edge_vertex(*i0, *o1),
                    self.edge_vertex(*i1, *o1),
                    self.edge_vertex(*i1, *o0),
                ];
                self.emit(ring[0], ring[1], ring[2], &inside, &outside);
                self.emit(ring[0], ring[2], ring[3], &inside, &outside);
            }
            _ => {}
        }
    }

    /// Shared vertex where the surface crosses the edge `a`–`b`.
    fn edge_vertex(&mut self, a: Corner, b: Corner) -> u32 {
        let key = (a.index.min(b.index), a.index.max(b.index));
        if let Some(&vertex) = self.edge_vertices.get(&key) {
            return vertex;
        }

        // Order the endpoints so both cells sharing the edge interpolate
        // identically.
        let (p, q) = if a.index < b.index { (a, b) } else { (b, a) };
        let t = ((self.level - p.value) / (q.value - p.value)).clamp(0.0, 1.0);
        let vertex = self.mesh.add_vertex(p.position.lerp(q.position, t));
        self.edge_vertices.insert(key, vertex);
        vertex
    }

    /// Adds a triangle whose front face points from material to empty space.
    fn emit(&mut self, v0: u32, v1: u32, v2: u32, inside: &[Corner], outside: &[Corner]) {
        let p0 = self.mesh.vertex(v0);
        let normal = (self.mesh.vertex(v1) - p0).cross(self.mesh.vertex(v2) - p0);
        let outward = centroid(outside) - centroid(inside);

        if normal.dot(outward) < 0.0 {
            self.mesh.add_triangle(v0, v2, v1);
        } else {
            self.mesh.add_triangle(v0, v1, v2);
        }
    }
}

fn centroid(corners: &[Corner]) -> DVec3 {
    corners.iter().map(|c| c.position).sum::<DVec3>() / corners.len() as f64
}
