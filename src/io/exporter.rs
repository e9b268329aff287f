// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! STL export

use crate::geometry::Mesh;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// STL flavour to write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StlFormat {
    #[default]
    Binary,
    Ascii,
}

/// Export mesh to STL. Facet normals are taken from the winding order.
pub fn export_stl(mesh: &Mesh, path: impl AsRef<Path>, format: StlFormat) -> Result<()> {
    let path = path.as_ref();
    match format {
        StlFormat::Binary => export_stl_binary(mesh, path),
        StlFormat::Ascii => export_stl_ascii(mesh, path),
    }
    .with_context(|| format!("Failed to export STL: {}", path.display()))
}

fn export_stl_binary(mesh: &Mesh, path: &Path) -> Result<()> {
    use stl_io::{Normal, Triangle as StlTriangle, Vertex as StlVertex};

    let triangles: Vec<StlTriangle> = mesh
        .triangles
        .iter()
        .map(|tri| {
            let [p0, p1, p2] = mesh.triangle_positions(tri);
            let normal = mesh.face_normal(tri);

            StlTriangle {
                normal: Normal::new([normal.x as f32, normal.y as f32, normal.z as f32]),
                vertices: [
                    StlVertex::new([p0.x as f32, p0.y as f32, p0.z as f32]),
                    StlVertex::new([p1.x as f32, p1.y as f32, p1.z as f32]),
                    StlVertex::new([p2.x as f32, p2.y as f32, p2.z as f32]),
                ],
            }
        })
        .collect();

    let mut file = BufWriter::new(File::create(path).context("Failed to create STL file")?);
    stl_io::write_stl(&mut file, triangles.iter()).context("Failed to write STL file")?;
    file.flush()?;

    Ok(())
}

fn export_stl_ascii(mesh: &Mesh, path: &Path) -> Result<()> {
    let mut file = BufWriter::new(File::create(path).context("Failed to create STL file")?);
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "mesh".to_string());

    writeln!(file, "solid {name}")?;

    for tri in &mesh.triangles {
        let [p0, p1, p2] = mesh.triangle_positions(tri);
        let normal = mesh.face_normal(tri);

        writeln!(file, "  facet normal {:e} {:e} {:e}", normal.x, normal.y, normal.z)?;
        writeln!(file, "    outer loop")?;
        for p in [p0, p1, p2] {
            writeln!(file, "      vertex {:e} {:e} {:e}", p.x as f32, p.y as f32, p.z as f32)?;
        }
        writeln!(file, "    endloop")?;
        writeln!(file, "  endfacet")?;
    }

    writeln!(file, "endsolid {name}")?;
    file.flush()?;

    Ok(())
}
