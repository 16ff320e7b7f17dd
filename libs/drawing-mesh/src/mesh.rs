//! # Mesh Data Structure
//!
//! Indexed triangle mesh with optional per-vertex normals and colors.

use config::constants::DEGENERATE_AREA_EPSILON;
use glam::DVec3;

/// A triangle mesh with vertices and indices.
///
/// Geometry is kept in f64; exporters convert to f32 at the boundary.
///
/// # Example
///
/// ```rust
/// use drawing_mesh::Mesh;
/// use glam::DVec3;
///
/// let mut mesh = Mesh::new();
/// mesh.add_vertex(DVec3::new(0.0, 0.0, 0.0));
/// mesh.add_vertex(DVec3::new(1.0, 0.0, 0.0));
/// mesh.add_vertex(DVec3::new(0.0, 1.0, 0.0));
/// mesh.add_triangle(0, 1, 2);
/// assert_eq!(mesh.triangle_area(0), 0.5);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    /// Vertex positions
    vertices: Vec<DVec3>,
    /// Triangle indices, counter-clockwise seen from outside
    triangles: Vec<[u32; 3]>,
    /// Optional vertex colors (RGBA)
    colors: Option<Vec<[f32; 4]>>,
    /// Optional vertex normals
    normals: Option<Vec<DVec3>>,
}

impl Mesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mesh from raw vertex and triangle buffers.
    pub fn from_parts(vertices: Vec<DVec3>, triangles: Vec<[u32; 3]>) -> Self {
        Self {
            vertices,
            triangles,
            colors: None,
            normals: None,
        }
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Returns true if the mesh has no triangles.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Adds a vertex and returns its index.
    pub fn add_vertex(&mut self, position: DVec3) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(position);
        index
    }

    /// Adds a triangle by vertex indices.
    pub fn add_triangle(&mut self, v0: u32, v1: u32, v2: u32) {
        self.triangles.push([v0, v1, v2]);
    }

    #[inline]
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    #[inline]
    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    #[inline]
    pub fn vertex(&self, index: u32) -> DVec3 {
        self.vertices[index as usize]
    }

    #[inline]
    pub fn triangle(&self, index: usize) -> [u32; 3] {
        self.triangles[index]
    }

    /// Replaces the vertex positions, keeping the topology.
    ///
    /// Normals become stale and are dropped.
    pub fn set_positions(&mut self, positions: Vec<DVec3>) {
        debug_assert_eq!(positions.len(), self.vertices.len());
        self.vertices = positions;
        self.normals = None;
    }

    /// Replaces vertices and triangles together. Normals and colors are
    /// dropped since they no longer line up with the vertices.
    pub fn set_geometry(&mut self, vertices: Vec<DVec3>, triangles: Vec<[u32; 3]>) {
        self.vertices = vertices;
        self.triangles = triangles;
        self.normals = None;
        self.colors = None;
    }

    /// Keeps the triangles for which `keep(index, triangle)` is true and
    /// returns how many were removed.
    pub fn retain_triangles(&mut self, mut keep: impl FnMut(usize, [u32; 3]) -> bool) -> usize {
        let before = self.triangles.len();
        let mut index = 0;
        self.triangles.retain(|&tri| {
            let kept = keep(index, tri);
            index += 1;
            kept
        });
        before - self.triangles.len()
    }

    /// Sets a uniform color for all vertices.
    pub fn set_uniform_color(&mut self, color: [f32; 4]) {
        self.colors = Some(vec![color; self.vertices.len()]);
    }

    pub fn colors(&self) -> Option<&[[f32; 4]]> {
        self.colors.as_deref()
    }

    pub fn normals(&self) -> Option<&[DVec3]> {
        self.normals.as_deref()
    }

    /// Unnormalized face normal (length = twice the area).
    pub fn face_normal(&self, index: usize) -> DVec3 {
        let [a, b, c] = self.triangles[index];
        let v0 = self.vertex(a);
        (self.vertex(b) - v0).cross(self.vertex(c) - v0)
    }

    /// Area of triangle `index`.
    pub fn triangle_area(&self, index: usize) -> f64 {
        self.face_normal(index).length() * 0.5
    }

    /// Computes area-weighted vertex normals from the current topology.
    pub fn compute_normals(&mut self) {
        let mut normals = vec![DVec3::ZERO; self.vertices.len()];

        for (i, tri) in self.triangles.iter().enumerate() {
            let normal = self.face_normal(i);
            for &v in tri {
                normals[v as usize] += normal;
            }
        }

        for normal in &mut normals {
            *normal = normal.normalize_or_zero();
        }

        self.normals = Some(normals);
    }

    /// Axis-aligned bounding box as (min, max).
    pub fn bounding_box(&self) -> (DVec3, DVec3) {
        let Some((&first, rest)) = self.vertices.split_first() else {
            return (DVec3::ZERO, DVec3::ZERO);
        };
        rest.iter()
            .fold((first, first), |(min, max), v| (min.min(*v), max.max(*v)))
    }

    /// Largest bounding-box dimension.
    pub fn max_extent(&self) -> f64 {
        let (min, max) = self.bounding_box();
        (max - min).max_element()
    }

    /// Mean of all vertex positions.
    pub fn centroid(&self) -> DVec3 {
        if self.vertices.is_empty() {
            return DVec3::ZERO;
        }
        self.vertices.iter().sum::<DVec3>() / self.vertices.len() as f64
    }

    /// Translates the mesh by a vector.
    pub fn translate(&mut self, offset: DVec3) {
        for v in &mut self.vertices {
            *v += offset;
        }
    }

    /// Scales every vertex uniformly about the origin.
    pub fn scale(&mut self, factor: f64) {
        for v in &mut self.vertices {
            *v *= factor;
        }
    }

    /// Validates the mesh for correctness.
    ///
    /// Checks:
    /// - All triangle indices are valid
    /// - No triangle repeats a vertex
    /// - No zero-area triangles
    pub fn validate(&self) -> bool {
        let vertex_count = self.vertices.len() as u32;

        self.triangles.iter().enumerate().all(|(i, tri)| {
            tri.iter().all(|&v| v < vertex_count)
                && tri[0] != tri[1]
                && tri[1] != tri[2]
                && tri[0] != tri[2]
                && self.triangle_area(i) > DEGENERATE_AREA_EPSILON
        })
    }
}
