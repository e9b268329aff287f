// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! STL import

use crate::geometry::{Mesh, Triangle, Vertex};
use anyhow::{Context, Result};
use nalgebra::{Point3, Vector3};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Read an ASCII or binary STL file into an indexed mesh.
///
/// `stl_io` merges identical corner positions, so triangles share vertex
/// indices and edge audits on the result are meaningful.
pub fn import_stl(path: impl AsRef<Path>) -> Result<Mesh> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("Failed to open STL file: {path:?}"))?;
    let mut reader = BufReader::new(file);

    let stl = stl_io::read_stl(&mut reader)
        .with_context(|| format!("Failed to read STL file: {path:?}"))?;

    let mut mesh = Mesh::with_capacity(stl.vertices.len(), stl.faces.len());
    for v in &stl.vertices {
        mesh.add_vertex(Vertex::new(
            Point3::new(f64::from(v[0]), f64::from(v[1]), f64::from(v[2])),
            Vector3::z(),
        ));
    }

    for face in &stl.faces {
        mesh.add_triangle(Triangle::new(face.vertices));
    }

    // Slivers whose corners merged into one point carry no surface
    mesh.remove_degenerate_triangles();
    mesh.remove_orphaned_vertices();
    mesh.recompute_normals();
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{analyze, extrude, Profile};
    use crate::io::{export_stl, StlFormat};
    use tempfile::tempdir;

    #[test]
    fn test_reimported_prism_is_watertight() -> Result<()> {
        let dir = tempdir()?;
        let mesh = extrude(&Profile::centered_rect(0.0, 0.0, 20.0, 10.0)
            .difference(&Profile::centered_rect(0.0, 0.0, 4.0, 4.0)), 3.0)?;

        for format in [StlFormat::Binary, StlFormat::Ascii] {
            let path = dir.path().join(format!("{format:?}.stl"));
            export_stl(&mesh, &path, format)?;

            let imported = import_stl(&path)?;
            let stats = analyze(&imported);
            assert_eq!(imported.vertex_count(), mesh.vertex_count());
            assert_eq!(imported.triangle_count(), mesh.triangle_count());
            assert!(stats.is_watertight);
            assert!((stats.volume - (200.0 - 16.0) * 3.0).abs() < 1e-3);
        }
        Ok(())
    }

    #[test]
    fn test_missing_file() {
        assert!(import_stl("/no/such/file.stl").is_err());
    }
}
