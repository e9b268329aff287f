// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometry analytics and statistics

use super::Mesh;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// Geometry statistics and analytics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeometryStats {
    /// Signed volume in mm³, positive for outward-facing winding
    pub volume: f64,
    /// Total surface area in mm²
    pub surface_area: f64,
    /// Bounding box [min_x, min_y, min_z, max_x, max_y, max_z]
    pub bbox: [f64; 6],
    /// Vertex average [x, y, z]
    pub centroid: [f64; 3],
    pub vertex_count: usize,
    pub triangle_count: usize,
    /// Directed edges without an opposite twin
    pub boundary_edges: usize,
    /// Directed edges used by more than one triangle
    pub non_manifold_edges: usize,
    pub is_watertight: bool,
}

impl GeometryStats {
    pub fn empty() -> Self {
        Self {
            volume: 0.0,
            surface_area: 0.0,
            bbox: [0.0; 6],
            centroid: [0.0; 3],
            vertex_count: 0,
            triangle_count: 0,
            boundary_edges: 0,
            non_manifold_edges: 0,
            is_watertight: false,
        }
    }

    /// Bounding box extents along X, Y and Z
    pub fn size(&self) -> [f64; 3] {
        [
            self.bbox[3] - self.bbox[0],
            self.bbox[4] - self.bbox[1],
            self.bbox[5] - self.bbox[2],
        ]
    }

    /// Pretty print statistics
    pub fn print(&self) {
        let size = self.size();
        println!("╔══════════════════════════════════════════════════════════╗");
        println!("║              GEOMETRY ANALYTICS                          ║");
        println!("╠══════════════════════════════════════════════════════════╣");
        println!("║ Volume:          {:>12.2} mm³                    ║", self.volume);
        println!("║ Surface Area:    {:>12.2} mm²                    ║", self.surface_area);
        println!(
            "║ Size:   {:>8.2} × {:>8.2} × {:>8.2} mm              ║",
            size[0], size[1], size[2]
        );
        println!("║ Vertices:        {:>12}                        ║", self.vertex_count);
        println!("║ Triangles:       {:>12}                        ║", self.triangle_count);
        println!("║ Open edges:      {:>12}                        ║", self.boundary_edges);
        println!(
            "║ Watertight:      {:>12}                        ║",
            if self.is_watertight { "Yes" } else { "No" }
        );
        println!("╚══════════════════════════════════════════════════════════╝");
    }
}

/// Analyze mesh geometry and compute statistics
pub fn analyze(mesh: &Mesh) -> GeometryStats {
    let vertex_count = mesh.vertices.len();
    let triangle_count = mesh.triangles.len();

    if vertex_count == 0 || triangle_count == 0 {
        return GeometryStats::empty();
    }

    let audit = audit_edges(mesh);

    GeometryStats {
        volume: signed_volume(mesh),
        surface_area: surface_area(mesh),
        bbox: calculate_bounding_box(mesh),
        centroid: calculate_centroid(mesh),
        vertex_count,
        triangle_count,
        boundary_edges: audit.boundary_edges,
        non_manifold_edges: audit.non_manifold_edges,
        is_watertight: audit.boundary_edges == 0 && audit.non_manifold_edges == 0,
    }
}

fn calculate_bounding_box(mesh: &Mesh) -> [f64; 6] {
    let bbox = mesh.bounding_box();
    [
        bbox.min.x, bbox.min.y, bbox.min.z, bbox.max.x, bbox.max.y, bbox.max.z,
    ]
}

/// Sum of signed tetrahedron volumes against the origin
pub fn signed_volume(mesh: &Mesh) -> f64 {
    mesh.triangles
        .iter()
        .map(|triangle| {
            let [v0, v1, v2] = mesh.triangle_positions(triangle);
            v0.coords.dot(&v1.coords.cross(&v2.coords)) / 6.0
        })
        .sum()
}

pub fn surface_area(mesh: &Mesh) -> f64 {
    mesh.triangles
        .iter()
        .map(|triangle| {
            let [v0, v1, v2] = mesh.triangle_positions(triangle);
            (v1 - v0).cross(&(v2 - v0)).norm() / 2.0
        })
        .sum()
}

fn calculate_centroid(mesh: &Mesh) -> [f64; 3] {
    let sum = mesh
        .vertices
        .iter()
        .fold(nalgebra::Vector3::zeros(), |acc, v| acc + v.position.coords);
    let centroid = sum / mesh.vertices.len() as f64;
    [centroid.x, centroid.y, centroid.z]
}

/// Result of the directed edge audit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeAudit {
    pub boundary_edges: usize,
    pub non_manifold_edges: usize,
}

/// A closed, consistently wound 2-manifold uses every directed edge exactly
/// once and its reverse exactly once.
pub fn audit_edges(mesh: &Mesh) -> EdgeAudit {
    let mut directed: AHashMap<(usize, usize), usize> =
        AHashMap::with_capacity(mesh.triangles.len() * 3);

    for triangle in &mesh.triangles {
        for edge in triangle.edges() {
            *directed.entry(edge).or_insert(0) += 1;
        }
    }

    let mut audit = EdgeAudit::default();
    for (&(a, b), &count) in &directed {
        if count > 1 {
            audit.non_manifold_edges += 1;
        }
        if !directed.contains_key(&(b, a)) {
            audit.boundary_edges += 1;
        }
    }
    audit
}
