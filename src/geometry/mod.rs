// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometry module - profiles, extrusion and mesh operations

mod analytics;
mod bbox;
mod extrude;
mod mesh;
mod profile;

pub use analytics::{analyze, audit_edges, signed_volume, surface_area, EdgeAudit, GeometryStats};
pub use bbox::BoundingBox;
pub use extrude::extrude;
pub use mesh::{Mesh, Triangle, Vertex};
pub use profile::Profile;
