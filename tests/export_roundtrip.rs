// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Round-trip export/import tests

use anyhow::Result;
use holiday_parts::cli::Runner;
use holiday_parts::geometry::analyze;
use holiday_parts::io::{self, file_sha256, BuildManifest, StlFormat, MANIFEST_FILE};
use holiday_parts::models::{gingerbread, HouseParams, Model};
use holiday_parts::BuildConfig;
use tempfile::tempdir;

fn build_into(dir: &std::path::Path, format: StlFormat) -> Result<BuildManifest> {
    let config = BuildConfig {
        output_dir: dir.to_path_buf(),
        stl_format: format,
        ..BuildConfig::default()
    };
    let outcome = Runner::new(config).build_models(&Model::ALL)?;
    assert!(!outcome.report.has_failures(), "{:#?}", outcome.report.parts);
    Ok(outcome.manifest)
}

#[test]
fn test_binary_stl_roundtrip() -> Result<()> {
    let dir = tempdir()?;
    let manifest = build_into(dir.path(), StlFormat::Binary)?;
    assert_eq!(manifest.parts.len(), 9);

    for entry in &manifest.parts {
        let path = dir.path().join(&entry.file);
        let mesh = io::import_stl(&path)?;
        let stats = analyze(&mesh);

        assert!(stats.is_watertight, "{} is not watertight", entry.file);
        assert_eq!(stats.triangle_count, entry.triangles);
        for axis in 0..3 {
            // STL stores f32 coordinates
            assert!(
                (stats.size()[axis] - entry.size_mm[axis]).abs() < 1e-3,
                "{} axis {axis}: {} vs {}",
                entry.file,
                stats.size()[axis],
                entry.size_mm[axis]
            );
        }
    }
    Ok(())
}

#[test]
fn test_ascii_stl_roundtrip() -> Result<()> {
    let dir = tempdir()?;
    let part = gingerbread::build_one(&HouseParams::default(), gingerbread::Piece::LeftSide)?;
    let path = dir.path().join(&part.file_name);
    io::export_stl(&part.mesh, &path, StlFormat::Ascii)?;

    let content = std::fs::read_to_string(&path)?;
    assert!(content.starts_with("solid "));

    let stats = analyze(&io::import_stl(&path)?);
    assert!(stats.is_watertight);
    assert_eq!(stats.triangle_count, part.mesh.triangle_count());
    Ok(())
}

#[test]
fn test_manifest_hashes_match_files() -> Result<()> {
    let dir = tempdir()?;
    build_into(dir.path(), StlFormat::Binary)?;

    let manifest = BuildManifest::read(&dir.path().join(MANIFEST_FILE))?;
    assert_eq!(manifest.units, "mm");
    assert_eq!(manifest.models, ["gingerbread_house", "holiday_sign"]);
    for entry in &manifest.parts {
        assert_eq!(entry.sha256, file_sha256(&dir.path().join(&entry.file))?);
    }
    Ok(())
}

#[test]
fn test_rebuild_is_deterministic() -> Result<()> {
    let first = tempdir()?;
    let second = tempdir()?;
    let a = build_into(first.path(), StlFormat::Binary)?;
    let b = build_into(second.path(), StlFormat::Binary)?;

    let hashes = |m: &BuildManifest| m.parts.iter().map(|p| p.sha256.clone()).collect::<Vec<_>>();
    assert_eq!(hashes(&a), hashes(&b));
    Ok(())
}
