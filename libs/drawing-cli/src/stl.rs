//! STL export, binary and ASCII.
//!
//! Binary layout: 80-byte header, `u32` triangle count, then per triangle a
//! normal, three vertices (all little-endian `f32`) and a zero `u16`
//! attribute. Normals come from the triangle winding.

use drawing_mesh::Mesh;
use glam::DVec3;
use std::io::{self, Write};

/// Writes `mesh` as binary STL. `header_text` is truncated to 80 bytes and
/// zero-padded.
pub fn write_stl_binary<W: Write>(mesh: &Mesh, mut w: W, header_text: &str) -> io::Result<()> {
    let mut header = [0u8; 80];
    let bytes = header_text.as_bytes();
    let n = bytes.len().min(header.len());
    header[..n].copy_from_slice(&bytes[..n]);
    w.write_all(&header)?;

    let count = u32::try_from(mesh.triangle_count())
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "too many triangles for STL"))?;
    w.write_all(&count.to_le_bytes())?;

    for index in 0..mesh.triangle_count() {
        let [a, b, c] = mesh.triangle(index);
        write_vec3(&mut w, unit_normal(mesh, index))?;
        for v in [a, b, c] {
            write_vec3(&mut w, mesh.vertex(v))?;
        }
        w.write_all(&0u16.to_le_bytes())?;
    }
    Ok(())
}

/// Writes `mesh` as ASCII STL under the solid name `name`.
pub fn write_stl_ascii<W: Write>(mesh: &Mesh, mut w: W, name: &str) -> io::Result<()> {
    writeln!(w, "solid {name}")?;
    for index in 0..mesh.triangle_count() {
        let n = unit_normal(mesh, index);
        writeln!(w, "  facet normal {:e} {:e} {:e}", n.x as f32, n.y as f32, n.z as f32)?;
        writeln!(w, "    outer loop")?;
        for v in mesh.triangle(index) {
            let p = mesh.vertex(v);
            writeln!(w, "      vertex {:e} {:e} {:e}", p.x as f32, p.y as f32, p.z as f32)?;
        }
        writeln!(w, "    endloop")?;
        writeln!(w, "  endfacet")?;
    }
    writeln!(w, "endsolid {name}")?;
    Ok(())
}

/// Zero for degenerate triangles.
fn unit_normal(mesh: &Mesh, index: usize) -> DVec3 {
    mesh.face_normal(index).normalize_or_zero()
}

fn write_vec3<W: Write>(w: &mut W, v: DVec3) -> io::Result<()> {
    for x in [v.x, v.y, v.z] {
        w.write_all(&(x as f32).to_le_bytes())?;
    }
    Ok(())
}
