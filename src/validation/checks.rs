// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Printability checks for parts and STL files

use super::types::{CheckKind, CheckResult, PartReport};
use crate::config::BuildConfig;
use crate::geometry::{analyze, GeometryStats, Mesh};
use crate::models::Part;
use crate::utils::approx_eq;
use rayon::prelude::*;
use std::path::PathBuf;
use std::time::Instant;

const AXES: [&str; 3] = ["X", "Y", "Z"];

/// Thresholds used by the checks
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CheckSettings {
    /// Allowed deviation in mm for size and bed contact
    pub tolerance_mm: f64,
    /// Printer build volume in mm
    pub bed_size_mm: Option<[f64; 3]>,
}

impl Default for CheckSettings {
    fn default() -> Self {
        Self {
            tolerance_mm: 0.1,
            bed_size_mm: None,
        }
    }
}

impl From<&BuildConfig> for CheckSettings {
    fn from(config: &BuildConfig) -> Self {
        Self {
            tolerance_mm: config.tolerance_mm,
            bed_size_mm: config.bed_size_mm,
        }
    }
}

/// Check a generated part against its nominal size
pub fn validate_part(part: &Part, settings: &CheckSettings) -> PartReport {
    validate_mesh(&part.name, &part.mesh, part.nominal_size, settings)
}

/// Check every part in parallel, keeping input order
pub fn validate_parts(parts: &[Part], settings: &CheckSettings) -> Vec<PartReport> {
    parts
        .par_iter()
        .map(|part| validate_part(part, settings))
        .collect()
}

/// Check an arbitrary mesh. Axes with a `None` nominal size are not compared.
pub fn validate_mesh(
    name: &str,
    mesh: &Mesh,
    nominal: [Option<f64>; 3],
    settings: &CheckSettings,
) -> PartReport {
    let start = Instant::now();
    let stats = analyze(mesh);

    let checks = vec![
        check_non_empty(&stats),
        check_watertight(&stats),
        check_volume(&stats),
        check_dimensions(&stats, nominal, settings.tolerance_mm),
        check_flat_on_bed(&stats, settings.tolerance_mm),
        check_fits_bed(&stats, settings.bed_size_mm),
    ];

    PartReport {
        name: name.to_string(),
        file: None,
        stats,
        checks,
        preview: None,
        duration: start.elapsed(),
    }
}

/// Attach the source file to a report
pub fn with_file(mut report: PartReport, file: impl Into<PathBuf>) -> PartReport {
    report.file = Some(file.into());
    report
}

fn check_non_empty(stats: &GeometryStats) -> CheckResult {
    CheckResult::from_bool(
        CheckKind::NonEmpty,
        stats.triangle_count > 0,
        format!("{} triangles", stats.triangle_count),
    )
}

fn check_watertight(stats: &GeometryStats) -> CheckResult {
    if stats.triangle_count == 0 {
        return CheckResult::failed(CheckKind::Watertight, "no surface");
    }
    if stats.is_watertight {
        CheckResult::passed(CheckKind::Watertight, "closed 2-manifold")
    } else {
        CheckResult::failed(
            CheckKind::Watertight,
            format!(
                "{} open edges, {} non-manifold edges",
                stats.boundary_edges, stats.non_manifold_edges
            ),
        )
    }
}

fn check_volume(stats: &GeometryStats) -> CheckResult {
    CheckResult::from_bool(
        CheckKind::PositiveVolume,
        stats.volume > 0.0,
        format!("{:.2} mm³", stats.volume),
    )
}

fn check_dimensions(
    stats: &GeometryStats,
    nominal: [Option<f64>; 3],
    tolerance: f64,
) -> CheckResult {
    if nominal.iter().all(Option::is_none) {
        return CheckResult::skipped(CheckKind::Dimensions, "no nominal size");
    }

    let size = stats.size();
    let mut deviations = Vec::new();
    let mut compared = Vec::new();
    for axis in 0..3 {
        let Some(expected) = nominal[axis] else {
            continue;
        };
        let delta = size[axis] - expected;
        compared.push(format!("{} {:.2}", AXES[axis], size[axis]));
        if !approx_eq(size[axis], expected, tolerance) {
            deviations.push(format!(
                "{} is {:.3} mm, expected {:.3} mm ({:+.3})",
                AXES[axis], size[axis], expected, delta
            ));
        }
    }

    if deviations.is_empty() {
        CheckResult::passed(CheckKind::Dimensions, compared.join(", "))
    } else {
        CheckResult::failed(CheckKind::Dimensions, deviations.join("; "))
    }
}

fn check_flat_on_bed(stats: &GeometryStats, tolerance: f64) -> CheckResult {
    if stats.triangle_count == 0 {
        return CheckResult::skipped(CheckKind::FlatOnBed, "no surface");
    }
    let min_z = stats.bbox[2];
    CheckResult::from_bool(
        CheckKind::FlatOnBed,
        approx_eq(min_z, 0.0, tolerance),
        format!("lowest point at z = {min_z:.3} mm"),
    )
}

/// The footprint may be rotated by 90 degrees on the bed
fn check_fits_bed(stats: &GeometryStats, bed: Option<[f64; 3]>) -> CheckResult {
    let Some([bx, by, bz]) = bed else {
        return CheckResult::skipped(CheckKind::FitsBed, "no bed size configured");
    };
    let [x, y, z] = stats.size();
    let fits_footprint = (x <= bx && y <= by) || (x <= by && y <= bx);
    CheckResult::from_bool(
        CheckKind::FitsBed,
        fits_footprint && z <= bz,
        format!("{x:.1} × {y:.1} × {z:.1} mm on {bx:.0} × {by:.0} × {bz:.0} mm bed"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{extrude, Profile};
    use crate::validation::types::CheckStatus;
    use nalgebra::Vector3;

    fn block(x: f64, y: f64, z: f64) -> Mesh {
        let mut mesh = extrude(&Profile::centered_rect(0.0, 0.0, x, y), z).unwrap();
        mesh.place_on_bed();
        mesh
    }

    fn status(report: &PartReport, kind: CheckKind) -> CheckStatus {
        report.check(kind).unwrap().status
    }

    #[test]
    fn test_good_block_passes() {
        let settings = CheckSettings {
            tolerance_mm: 0.1,
            bed_size_mm: Some([220.0, 220.0, 250.0]),
        };
        let report = validate_mesh(
            "block",
            &block(10.0, 20.0, 5.0),
            [Some(10.0), Some(20.05), Some(5.0)],
            &settings,
        );
        assert!(report.passed(), "{:?}", report.checks);
        assert_eq!(report.checks.len(), CheckKind::ALL.len());
    }

    #[test]
    fn test_dimension_mismatch_fails() {
        let report = validate_mesh(
            "block",
            &block(10.0, 20.0, 5.0),
            [Some(10.0), Some(21.0), None],
            &CheckSettings::default(),
        );
        assert_eq!(status(&report, CheckKind::Dimensions), CheckStatus::Failed);
        assert!(report.check(CheckKind::Dimensions).unwrap().message.contains('Y'));
    }

    #[test]
    fn test_unchecked_axes_are_skipped() {
        let report = validate_mesh(
            "block",
            &block(1.0, 1.0, 1.0),
            [None; 3],
            &CheckSettings::default(),
        );
        assert_eq!(status(&report, CheckKind::Dimensions), CheckStatus::Skipped);
        assert_eq!(status(&report, CheckKind::FitsBed), CheckStatus::Skipped);
        assert!(report.passed());
    }

    #[test]
    fn test_floating_part_fails() {
        let mut mesh = block(5.0, 5.0, 5.0);
        mesh.translate(Vector3::new(0.0, 0.0, 2.0));
        let report = validate_mesh("float", &mesh, [None; 3], &CheckSettings::default());
        assert_eq!(status(&report, CheckKind::FlatOnBed), CheckStatus::Failed);
    }

    #[test]
    fn test_open_mesh_fails() {
        let mut mesh = block(5.0, 5.0, 5.0);
        mesh.triangles.truncate(10);
        let report = validate_mesh("open", &mesh, [None; 3], &CheckSettings::default());
        assert_eq!(status(&report, CheckKind::Watertight), CheckStatus::Failed);
        assert!(!report.passed());
    }

    #[test]
    fn test_empty_mesh_fails() {
        let report = validate_mesh("empty", &Mesh::new(), [None; 3], &CheckSettings::default());
        assert_eq!(status(&report, CheckKind::NonEmpty), CheckStatus::Failed);
        assert_eq!(status(&report, CheckKind::PositiveVolume), CheckStatus::Failed);
    }

    #[test]
    fn test_bed_fit_allows_rotation() {
        let settings = CheckSettings {
            tolerance_mm: 0.1,
            bed_size_mm: Some([100.0, 200.0, 50.0]),
        };
        let report = validate_mesh("long", &block(150.0, 80.0, 10.0), [None; 3], &settings);
        assert_eq!(status(&report, CheckKind::FitsBed), CheckStatus::Passed);

        let report = validate_mesh("tall", &block(50.0, 50.0, 60.0), [None; 3], &settings);
        assert_eq!(status(&report, CheckKind::FitsBed), CheckStatus::Failed);
    }

    #[test]
    fn test_validate_parts_keeps_order() {
        let parts: Vec<Part> = (1..=4)
            .map(|i| {
                let size = i as f64;
                Part::from_profile(
                    format!("part {i}"),
                    format!("part_{i}.stl"),
                    &Profile::centered_rect(0.0, 0.0, size, size),
                    size,
                )
                .unwrap()
            })
            .collect();

        let reports = validate_parts(&parts, &CheckSettings::default());
        let names: Vec<_> = reports.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["part 1", "part 2", "part 3", "part 4"]);
    }
}
