//! Individual cleanup passes. Each returns how many elements it removed.

use crate::mesh::Mesh;
use crate::topology::{edge_triangles, vertex_neighbors};
use glam::DVec3;
use std::collections::{HashMap, HashSet};

/// Removes triangles that repeat a vertex or whose area is at most
/// `min_area`.
pub fn remove_degenerate_triangles(mesh: &mut Mesh, min_area: f64) -> usize {
    let areas: Vec<f64> = (0..mesh.triangle_count())
        .map(|i| mesh.triangle_area(i))
        .collect();
    mesh.retain_triangles(|i, [a, b, c]| a != b && b != c && a != c && areas[i] > min_area)
}

/// Removes triangles over the same vertex set as an earlier one, whatever
/// their winding.
pub fn remove_duplicate_triangles(mesh: &mut Mesh) -> usize {
    let mut seen = HashSet::with_capacity(mesh.triangle_count());
    mesh.retain_triangles(|_, mut tri| {
        tri.sort_unstable();
        seen.insert(tri)
    })
}

/// Merges vertices closer than `distance` into the first one seen and
/// rewrites triangle indices. Returns the number of vertices merged away.
///
/// A `distance` of zero merges only bit-identical positions.
pub fn merge_duplicate_vertices(mesh: &mut Mesh, distance: f64) -> usize {
    let remap = if distance > 0.0 {
        grid_remap(mesh.vertices(), distance)
    } else {
        exact_remap(mesh.vertices())
    };

    let kept = remap.iter().enumerate().filter(|&(i, &r)| i == r as usize);
    let mut compact = vec![0u32; remap.len()];
    let mut vertices = Vec::new();
    for (i, _) in kept {
        compact[i] = vertices.len() as u32;
        vertices.push(mesh.vertex(i as u32));
    }
    let merged = remap.len() - vertices.len();
    if merged == 0 {
        return 0;
    }

    let triangles = mesh
        .triangles()
        .iter()
        .map(|tri| tri.map(|v| compact[remap[v as usize] as usize]))
        .collect();
    mesh.set_geometry(vertices, triangles);
    merged
}

/// Representative (lowest index within `distance`) of every vertex, using a
/// uniform grid of cell size `distance`.
fn grid_remap(vertices: &[DVec3], distance: f64) -> Vec<u32> {
    let cell_of = |p: DVec3| {
        let c = (p / distance).floor();
        [c.x as i64, c.y as i64, c.z as i64]
    };
    let mut grid: HashMap<[i64; 3], Vec<u32>> = HashMap::new();
    let mut remap = Vec::with_capacity(vertices.len());

    for (i, &p) in vertices.iter().enumerate() {
        let cell = cell_of(p);
        let mut found = None;
        'search: for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let key = [cell[0] + dx, cell[1] + dy, cell[2] + dz];
                    let Some(candidates) = grid.get(&key) else {
                        continue;
                    };
                    if let Some(&rep) = candidates
                        .iter()
                        .find(|&&r| vertices[r as usize].distance(p) <= distance)
                    {
                        found = Some(rep);
                        break 'search;
                    }
                }
            }
        }

        match found {
            Some(rep) => remap.push(rep),
            None => {
                grid.entry(cell).or_default().push(i as u32);
                remap.push(i as u32);
            }
        }
    }
    remap
}

fn exact_remap(vertices: &[DVec3]) -> Vec<u32> {
    let mut first: HashMap<[u64; 3], u32> = HashMap::with_capacity(vertices.len());
    vertices
        .iter()
        .enumerate()
        .map(|(i, p)| {
            // Adding zero folds -0.0 into 0.0.
            let key = (*p + DVec3::ZERO).to_array().map(f64::to_bits);
            *first.entry(key).or_insert(i as u32)
        })
        .collect()
}

/// Keeps the two largest triangles on every edge used by more than two.
///
/// Edges are visited in ascending order; triangles already dropped for an
/// earlier edge no longer count.
pub fn remove_non_manifold_edges(mesh: &mut Mesh) -> usize {
    let mut dropped = vec![false; mesh.triangle_count()];

    for triangles in edge_triangles(mesh).values() {
        let mut live: Vec<usize> = triangles.iter().copied().filter(|&t| !dropped[t]).collect();
        if live.len() <= 2 {
            continue;
        }
        live.sort_by(|&a, &b| {
            mesh.triangle_area(b)
                .total_cmp(&mesh.triangle_area(a))
                .then(a.cmp(&b))
        });
        for &t in &live[2..] {
            dropped[t] = true;
        }
    }

    mesh.retain_triangles(|i, _| !dropped[i])
}

/// Drops vertices no triangle refers to.
pub fn remove_unreferenced_vertices(mesh: &mut Mesh) -> usize {
    let mut used = vec![false; mesh.vertex_count()];
    for tri in mesh.triangles() {
        for &v in tri {
            used[v as usize] = true;
        }
    }
    let unused = used.iter().filter(|&&u| !u).count();
    if unused == 0 {
        return 0;
    }

    let mut compact = vec![0u32; used.len()];
    let mut vertices = Vec::with_capacity(used.len() - unused);
    for (i, _) in used.iter().enumerate().filter(|&(_, &u)| u) {
        compact[i] = vertices.len() as u32;
        vertices.push(mesh.vertex(i as u32));
    }
    let triangles = mesh
        .triangles()
        .iter()
        .map(|tri| tri.map(|v| compact[v as usize]))
        .collect();
    mesh.set_geometry(vertices, triangles);
    unused
}

/// Uniform-weight Laplacian smoothing: each pass moves every vertex by
/// `lambda` towards the mean of its neighbours.
pub fn laplacian_smooth(mesh: &mut Mesh, iterations: u32, lambda: f64) {
    if iterations == 0 || lambda == 0.0 || mesh.is_empty() {
        return;
    }

    let neighbors = vertex_neighbors(mesh);
    let mut positions = mesh.vertices().to_vec();
    for _ in 0..iterations {
        positions = positions
            .iter()
            .zip(&neighbors)
            .map(|(&p, around)| {
                if around.is_empty() {
                    return p;
                }
                let mean = around
                    .iter()
                    .map(|&n| positions[n as usize])
                    .sum::<DVec3>()
                    / around.len() as f64;
                p + (mean - p) * lambda
            })
            .collect();
    }
    mesh.set_positions(positions);
}
