// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Gingerbread house part verification tests

use approx::assert_relative_eq;
use holiday_parts::geometry::analyze;
use holiday_parts::models::gingerbread::{self, Piece};
use holiday_parts::models::HouseParams;
use holiday_parts::validation::{validate_parts, CheckSettings};
use holiday_parts::ModelError;

const IN: f64 = 25.4;

fn settings() -> CheckSettings {
    CheckSettings {
        tolerance_mm: 0.1,
        bed_size_mm: Some([220.0, 220.0, 250.0]),
    }
}

#[test]
fn test_every_piece_is_printable() {
    let set = gingerbread::build(&HouseParams::default()).unwrap();
    assert_eq!(set.parts.len(), Piece::ALL.len());

    for report in validate_parts(&set.parts, &settings()) {
        println!(
            "{}: {} triangles, {:.1} mm³",
            report.name, report.stats.triangle_count, report.stats.volume
        );
        assert!(report.passed(), "{} failed: {:?}", report.name, report.checks);
        assert!(report.stats.is_watertight);
        assert!(report.stats.volume > 0.0);
    }
}

#[test]
fn test_file_names_follow_piece_order() {
    let set = gingerbread::build(&HouseParams::default()).unwrap();
    let files: Vec<&str> = set.parts.iter().map(|p| p.file_name.as_str()).collect();
    let expected: Vec<&str> = Piece::ALL.iter().map(|p| p.file_name()).collect();
    assert_eq!(files, expected);
}

#[test]
fn test_wall_and_roof_extents() {
    let p = HouseParams::default();
    let set = gingerbread::build(&p).unwrap();

    let front = analyze(&set.part("gingerbread_front_wall.stl").unwrap().mesh).size();
    assert_relative_eq!(front[0], (p.house_width + p.tab_width + p.tab_depth) * IN, epsilon = 1e-6);
    assert_relative_eq!(front[1], p.wall_height * IN, epsilon = 1e-6);
    assert_relative_eq!(front[2], p.wall_thickness * IN, epsilon = 1e-9);

    let side = analyze(&set.part("gingerbread_left_side.stl").unwrap().mesh).size();
    assert_relative_eq!(side[0], p.house_depth * IN, epsilon = 1e-6);
    assert_relative_eq!(side[1], (p.wall_height + p.peak_height) * IN, epsilon = 1e-6);

    let roof = analyze(&set.part("gingerbread_roof_left.stl").unwrap().mesh).size();
    assert_relative_eq!(roof[0], p.roof_width() * IN, epsilon = 1e-6);
    assert_relative_eq!(roof[1], (p.roof_length() + p.tab_depth) * IN, epsilon = 1e-6);
    assert_relative_eq!(roof[2], p.roof_thickness * IN, epsilon = 1e-9);
}

#[test]
fn test_chimney_volume() {
    let p = HouseParams::default();
    let chimney = gingerbread::build_one(&p, Piece::Chimney).unwrap();
    let stats = analyze(&chimney.mesh);

    let inner_w = p.chimney_width - p.wall_thickness;
    let inner_d = p.chimney_depth - p.wall_thickness;
    let ring_area = p.chimney_width * p.chimney_depth - inner_w * inner_d;
    let expected = ring_area * p.chimney_height * IN.powi(3);

    assert!(stats.is_watertight);
    assert_relative_eq!(stats.volume, expected, max_relative = 1e-9);
}

#[test]
fn test_openings_remove_material() {
    let p = HouseParams::default();
    let front = analyze(&gingerbread::build_one(&p, Piece::FrontWall).unwrap().mesh);
    let back = analyze(&gingerbread::build_one(&p, Piece::BackWall).unwrap().mesh);

    // Same outline and tabs; the front has a door and one extra window
    assert!(front.volume < back.volume);
}

#[test]
fn test_larger_house_still_printable() {
    let params = HouseParams {
        house_width: 6.0,
        house_depth: 4.5,
        wall_height: 4.0,
        peak_height: 2.0,
        door_width: 1.2,
        door_height: 2.0,
        window_width: 0.8,
        window_height: 0.8,
        window_offset: 1.8,
        arch_segments: 32,
        ..HouseParams::default()
    };
    let set = gingerbread::build(&params).unwrap();

    for report in validate_parts(&set.parts, &settings()) {
        assert!(report.passed(), "{} failed: {:?}", report.name, report.checks);
    }
}

#[test]
fn test_door_wider_than_house_is_rejected() {
    let params = HouseParams {
        door_width: 5.0,
        ..HouseParams::default()
    };
    let err = gingerbread::build(&params).unwrap_err();
    assert!(matches!(err, ModelError::InvalidParameter { .. }), "{err}");
}
