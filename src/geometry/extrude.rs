// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Linear extrusion of planar profiles into closed prisms
//!
//! Caps come from a constrained Delaunay triangulation of each polygon and
//! are stitched to the side walls through shared vertex indices, so the
//! result is a closed 2-manifold whenever the profile is valid.

use super::{audit_edges, Mesh, Profile, Triangle, Vertex};
use crate::error::{ModelError, ModelResult};
use ahash::AHashMap;
use geo::{Coord, LineString, Polygon, TriangulateSpade};
use nalgebra::{Point3, Vector3};
use std::f64::consts::TAU;

/// Ring points closer than this (mm) are merged before triangulation
const MIN_EDGE: f64 = 1e-3;

/// Extrude `profile` from z = 0 to z = `height` (mm)
pub fn extrude(profile: &Profile, height: f64) -> ModelResult<Mesh> {
    if !height.is_finite() || height <= 0.0 {
        return Err(ModelError::InvalidHeight(height));
    }
    if profile.is_empty() {
        return Err(ModelError::EmptyProfile("nothing to extrude".to_string()));
    }

    let mut mesh = Mesh::new();
    for polygon in profile.polygons() {
        extrude_polygon(&mut mesh, polygon, height)?;
    }

    if mesh.is_empty() {
        return Err(ModelError::EmptyProfile(
            "all rings collapsed during cleanup".to_string(),
        ));
    }

    let audit = audit_edges(&mesh);
    if audit.boundary_edges > 0 || audit.non_manifold_edges > 0 {
        return Err(ModelError::Triangulation(format!(
            "extruded prism is not closed: {} open edges, {} non-manifold edges",
            audit.boundary_edges, audit.non_manifold_edges
        )));
    }

    mesh.recompute_normals();
    Ok(mesh)
}

fn extrude_polygon(mesh: &mut Mesh, polygon: &Polygon<f64>, height: f64) -> ModelResult<()> {
    let exterior = clean_ring(polygon.exterior(), true);
    if exterior.is_empty() {
        return Ok(());
    }
    let holes: Vec<Vec<Coord<f64>>> = polygon
        .interiors()
        .iter()
        .map(|ring| clean_ring(ring, false))
        .filter(|ring| !ring.is_empty())
        .collect();

    let mut rings = Vec::with_capacity(holes.len() + 1);
    rings.push(exterior);
    rings.extend(holes);

    let flat: Vec<Coord<f64>> = rings.iter().flatten().copied().collect();
    let total = flat.len();
    let base = mesh.vertex_count();

    for coord in &flat {
        mesh.add_vertex(Vertex::new(Point3::new(coord.x, coord.y, 0.0), -Vector3::z()));
    }
    for coord in &flat {
        mesh.add_vertex(Vertex::new(Point3::new(coord.x, coord.y, height), Vector3::z()));
    }
    let bottom = |k: usize| base + k;
    let top = |k: usize| base + total + k;

    // Side walls
    let mut prev = vec![0; total];
    let mut next = vec![0; total];
    let mut start = 0;
    for ring in &rings {
        let n = ring.len();
        for j in 0..n {
            let a = start + j;
            let b = start + (j + 1) % n;
            next[a] = b;
            prev[b] = a;
            mesh.add_triangle(Triangle::new([bottom(a), bottom(b), top(b)]));
            mesh.add_triangle(Triangle::new([bottom(a), top(b), top(a)]));
        }
        start += n;
    }

    // Caps
    let mut positions: AHashMap<(u64, u64), Vec<usize>> = AHashMap::with_capacity(total);
    for (k, c) in flat.iter().enumerate() {
        positions.entry((c.x.to_bits(), c.y.to_bits())).or_default().push(k);
    }
    let outline = Outline {
        flat: &flat,
        positions,
        prev,
        next,
    };

    let mut ring_iter = rings.into_iter();
    let exterior = LineString::from(ring_iter.next().unwrap_or_default());
    let interiors: Vec<LineString<f64>> = ring_iter.map(LineString::from).collect();
    let cleaned = Polygon::new(exterior, interiors);

    let triangles = cleaned
        .constrained_triangulation(Default::default())
        .map_err(|e| ModelError::Triangulation(format!("{e:?}")))?;

    for triangle in triangles {
        let corners = triangle.to_array();
        let centroid = Coord {
            x: (corners[0].x + corners[1].x + corners[2].x) / 3.0,
            y: (corners[0].y + corners[1].y + corners[2].y) / 3.0,
        };
        let mut indices = [0usize; 3];
        for (slot, corner) in indices.iter_mut().zip(corners.iter()) {
            *slot = outline.resolve(corner, &centroid)?;
        }
        let [i0, i1, i2] = indices;
        if i0 == i1 || i1 == i2 || i0 == i2 {
            continue;
        }

        let (p0, p1, p2) = (flat[i0], flat[i1], flat[i2]);
        let orientation = (p1.x - p0.x) * (p2.y - p0.y) - (p1.y - p0.y) * (p2.x - p0.x);
        let [i0, i1, i2] = if orientation < 0.0 {
            [i0, i2, i1]
        } else {
            [i0, i1, i2]
        };

        mesh.add_triangle(Triangle::new([top(i0), top(i1), top(i2)]));
        mesh.add_triangle(Triangle::new([bottom(i0), bottom(i2), bottom(i1)]));
    }

    Ok(())
}

/// Cleaned rings of one polygon, flattened, with each vertex's ring neighbours
struct Outline<'a> {
    flat: &'a [Coord<f64>],
    positions: AHashMap<(u64, u64), Vec<usize>>,
    prev: Vec<usize>,
    next: Vec<usize>,
}

impl Outline<'_> {
    /// Map a triangulation corner back to its ring vertex.
    ///
    /// A point the outline passes through more than once (a pinch) has one
    /// vertex per pass; the pass whose solid wedge holds the triangle wins.
    fn resolve(&self, corner: &Coord<f64>, centroid: &Coord<f64>) -> ModelResult<usize> {
        let candidates = match self.positions.get(&(corner.x.to_bits(), corner.y.to_bits())) {
            Some(candidates) => candidates,
            None => {
                let nearest = self.nearest(corner)?;
                let c = self.flat[nearest];
                self.positions
                    .get(&(c.x.to_bits(), c.y.to_bits()))
                    .ok_or_else(|| off_outline(corner))?
            }
        };

        match candidates.as_slice() {
            [index] => Ok(*index),
            _ => candidates
                .iter()
                .copied()
                .find(|&k| self.wedge_contains(k, centroid))
                .ok_or_else(|| off_outline(corner)),
        }
    }

    fn nearest(&self, corner: &Coord<f64>) -> ModelResult<usize> {
        let nearest = self
            .flat
            .iter()
            .enumerate()
            .map(|(k, c)| (k, (c.x - corner.x).hypot(c.y - corner.y)))
            .min_by(|a, b| a.1.total_cmp(&b.1));

        match nearest {
            Some((index, distance)) if distance <= MIN_EDGE => Ok(index),
            _ => Err(off_outline(corner)),
        }
    }

    /// The solid lies left of the ring, so at vertex `k` it spans the angle
    /// swept counter-clockwise from the outgoing to the incoming edge.
    fn wedge_contains(&self, k: usize, point: &Coord<f64>) -> bool {
        let vertex = self.flat[k];
        let angle = |c: &Coord<f64>| (c.y - vertex.y).atan2(c.x - vertex.x);
        let start = angle(&self.flat[self.next[k]]);
        let sweep = |c: &Coord<f64>| (angle(c) - start).rem_euclid(TAU);
        sweep(point) < sweep(&self.flat[self.prev[k]])
    }
}

fn off_outline(corner: &Coord<f64>) -> ModelError {
    ModelError::Triangulation(format!(
        "cap vertex ({:.4}, {:.4}) is not on the outline",
        corner.x, corner.y
    ))
}

/// Drop the closing point and near-duplicates, then fix the winding:
/// counter-clockwise for exteriors, clockwise for holes.
/// Rings with fewer than three points come back empty.
fn clean_ring(ring: &LineString<f64>, exterior: bool) -> Vec<Coord<f64>> {
    let mut points: Vec<Coord<f64>> = Vec::with_capacity(ring.0.len());
    for coord in ring.coords() {
        if let Some(last) = points.last() {
            if (coord.x - last.x).hypot(coord.y - last.y) < MIN_EDGE {
                continue;
            }
        }
        points.push(*coord);
    }

    while points.len() > 1 {
        let first = points[0];
        let last = points[points.len() - 1];
        if (first.x - last.x).hypot(first.y - last.y) < MIN_EDGE {
            points.pop();
        } else {
            break;
        }
    }

    if points.len() < 3 {
        return Vec::new();
    }

    let area = ring_signed_area(&points);
    if area.abs() < MIN_EDGE * MIN_EDGE {
        return Vec::new();
    }
    if (area > 0.0) != exterior {
        points.reverse();
    }
    points
}

fn ring_signed_area(points: &[Coord<f64>]) -> f64 {
    let n = points.len();
    let twice: f64 = (0..n)
        .map(|i| {
            let a = points[i];
            let b = points[(i + 1) % n];
            a.x * b.y - b.x * a.y
        })
        .sum();
    twice / 2.0
}
