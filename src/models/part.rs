// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Printable parts and part sets

use crate::geometry::{analyze, extrude, GeometryStats, Mesh, Profile};
use crate::error::ModelResult;

/// One printable piece, already placed on the bed
#[derive(Debug, Clone)]
pub struct Part {
    /// Human readable name ("front wall")
    pub name: String,
    /// Output file name including the `.stl` extension
    pub file_name: String,
    pub description: String,
    pub mesh: Mesh,
    /// Expected bounding box extents in mm; `None` skips that axis
    pub nominal_size: [Option<f64>; 3],
}

impl Part {
    /// Extrude a profile and rest the result on the bed
    pub fn from_profile(
        name: impl Into<String>,
        file_name: impl Into<String>,
        profile: &Profile,
        thickness: f64,
    ) -> ModelResult<Self> {
        let mut mesh = extrude(profile, thickness)?;
        mesh.place_on_bed();
        Ok(Self {
            name: name.into(),
            file_name: file_name.into(),
            description: String::new(),
            mesh,
            nominal_size: [None; 3],
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_nominal_size(mut self, size: [Option<f64>; 3]) -> Self {
        self.nominal_size = size;
        self
    }

    pub fn stats(&self) -> GeometryStats {
        analyze(&self.mesh)
    }
}

/// Parts produced by one model, in export order
#[derive(Debug, Clone)]
pub struct PartSet {
    pub model: String,
    pub parts: Vec<Part>,
    /// Non-fatal remarks, e.g. a placeholder substituted for missing text
    pub notes: Vec<String>,
}

impl PartSet {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            parts: Vec::new(),
            notes: Vec::new(),
        }
    }

    pub fn part(&self, file_name: &str) -> Option<&Part> {
        self.parts.iter().find(|p| p.file_name == file_name)
    }

    pub fn total_triangles(&self) -> usize {
        self.parts.iter().map(|p| p.mesh.triangle_count()).sum()
    }
}
