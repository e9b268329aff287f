// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Build manifest written next to exported parts

use crate::geometry::analyze;
use crate::models::Part;
use anyhow::{Context, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::Path;

pub const MANIFEST_FILE: &str = "manifest.json";

/// Record of one build run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildManifest {
    pub generator: String,
    pub version: String,
    pub timestamp: String,
    pub units: String,
    pub models: Vec<String>,
    pub parts: Vec<ManifestEntry>,
    pub notes: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub model: String,
    pub name: String,
    pub file: String,
    /// SHA-256 of the written file
    pub sha256: String,
    pub triangles: usize,
    pub volume_mm3: f64,
    pub size_mm: [f64; 3],
}

impl BuildManifest {
    pub fn new() -> Self {
        Self {
            generator: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            units: "mm".to_string(),
            models: Vec::new(),
            parts: Vec::new(),
            notes: Vec::new(),
        }
    }

    /// Add an exported part; the file at `path` is hashed
    pub fn add_part(&mut self, model: &str, part: &Part, path: &Path) -> Result<()> {
        let stats = analyze(&part.mesh);
        self.parts.push(ManifestEntry {
            model: model.to_string(),
            name: part.name.clone(),
            file: part.file_name.clone(),
            sha256: file_sha256(path)?,
            triangles: stats.triangle_count,
            volume_mm3: stats.volume,
            size_mm: stats.size(),
        });
        if !self.models.iter().any(|m| m == model) {
            self.models.push(model.to_string());
        }
        Ok(())
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize manifest")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write manifest: {}", path.display()))?;
        Ok(())
    }

    pub fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse manifest: {}", path.display()))
    }
}

impl Default for BuildManifest {
    fn default() -> Self {
        Self::new()
    }
}

/// Hex encoded SHA-256 of a file's contents
pub fn file_sha256(path: &Path) -> Result<String> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to hash {}", path.display()))?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(format!("{:x}", hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Profile;
    use crate::io::{export_stl, StlFormat};
    use tempfile::tempdir;

    #[test]
    fn test_sha256_of_known_content() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("abc.txt");
        std::fs::write(&path, "abc")?;

        assert_eq!(
            file_sha256(&path)?,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        Ok(())
    }

    #[test]
    fn test_manifest_round_trip() -> Result<()> {
        let dir = tempdir()?;
        let profile = Profile::rect((0.0, 0.0), (2.0, 3.0));
        let part = Part::from_profile("block", "block.stl", &profile, 4.0)?;
        let stl = dir.path().join(&part.file_name);
        export_stl(&part.mesh, &stl, StlFormat::Binary)?;

        let mut manifest = BuildManifest::new();
        manifest.add_part("test", &part, &stl)?;
        manifest.add_part("test", &part, &stl)?;
        let path = dir.path().join(MANIFEST_FILE);
        manifest.write(&path)?;

        let loaded = BuildManifest::read(&path)?;
        assert_eq!(loaded.models, vec!["test".to_string()]);
        assert_eq!(loaded.parts.len(), 2);
        assert_eq!(loaded.parts[0].triangles, 12);
        assert_eq!(loaded.parts[0].sha256.len(), 64);
        assert!((loaded.parts[0].volume_mm3 - 24.0).abs() < 1e-9);
        Ok(())
    }
}
