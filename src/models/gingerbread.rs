// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Gingerbread house: four walls, two roof panels and a chimney
//!
//! Every piece is modelled lying flat, with X along the piece width, Y along
//! its height and the material thickness as the extrusion along Z. Front and
//! back walls carry tabs on their vertical edges that slide into matching
//! slots on the side walls.

use super::params::HouseParams;
use super::part::{Part, PartSet};
use crate::error::ModelResult;
use crate::geometry::Profile;
use crate::utils::inches;
use rayon::prelude::*;

/// Heights of the tab/slot pairs as fractions of the wall height
const TAB_LEVELS: [f64; 2] = [0.25, 0.75];

/// The seven pieces, in export order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Piece {
    FrontWall,
    BackWall,
    LeftSide,
    RightSide,
    RoofLeft,
    RoofRight,
    Chimney,
}

impl Piece {
    pub const ALL: [Piece; 7] = [
        Piece::FrontWall,
        Piece::BackWall,
        Piece::LeftSide,
        Piece::RightSide,
        Piece::RoofLeft,
        Piece::RoofRight,
        Piece::Chimney,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Piece::FrontWall => "front wall",
            Piece::BackWall => "back wall",
            Piece::LeftSide => "left side",
            Piece::RightSide => "right side",
            Piece::RoofLeft => "left roof",
            Piece::RoofRight => "right roof",
            Piece::Chimney => "chimney",
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            Piece::FrontWall => "gingerbread_front_wall.stl",
            Piece::BackWall => "gingerbread_back_wall.stl",
            Piece::LeftSide => "gingerbread_left_side.stl",
            Piece::RightSide => "gingerbread_right_side.stl",
            Piece::RoofLeft => "gingerbread_roof_left.stl",
            Piece::RoofRight => "gingerbread_roof_right.stl",
            Piece::Chimney => "gingerbread_chimney.stl",
        }
    }

    fn description(&self) -> &'static str {
        match self {
            Piece::FrontWall => "arched door and two arched windows, edge tabs",
            Piece::BackWall => "one arched window, edge tabs",
            Piece::LeftSide | Piece::RightSide => "peaked gable with arched window and slots",
            Piece::RoofLeft | Piece::RoofRight => "panel with overhang and locating tabs",
            Piece::Chimney => "hollow rectangular stack",
        }
    }
}

/// Parameters converted to millimetres
#[derive(Debug, Clone)]
struct Dims {
    thickness: f64,
    width: f64,
    depth: f64,
    height: f64,
    peak: f64,
    door_w: f64,
    door_h: f64,
    door_off: f64,
    window_w: f64,
    window_h: f64,
    window_off: f64,
    segments: u32,
    roof_thickness: f64,
    roof_w: f64,
    roof_l: f64,
    chimney_w: f64,
    chimney_d: f64,
    chimney_h: f64,
    tab_w: f64,
    tab_d: f64,
    tab_h: f64,
    tab_tol: f64,
}

impl From<&HouseParams> for Dims {
    fn from(p: &HouseParams) -> Self {
        Self {
            thickness: inches(p.wall_thickness),
            width: inches(p.house_width),
            depth: inches(p.house_depth),
            height: inches(p.wall_height),
            peak: inches(p.peak_height),
            door_w: inches(p.door_width),
            door_h: inches(p.door_height),
            door_off: inches(p.door_offset),
            window_w: inches(p.window_width),
            window_h: inches(p.window_height),
            window_off: inches(p.window_offset),
            segments: p.arch_segments,
            roof_thickness: inches(p.roof_thickness),
            roof_w: inches(p.roof_width()),
            roof_l: inches(p.roof_length()),
            chimney_w: inches(p.chimney_width),
            chimney_d: inches(p.chimney_depth),
            chimney_h: inches(p.chimney_height),
            tab_w: inches(p.tab_width),
            tab_d: inches(p.tab_depth),
            tab_h: inches(p.tab_height),
            tab_tol: inches(p.tab_tolerance),
        }
    }
}

/// Build all seven pieces
pub fn build(params: &HouseParams) -> ModelResult<PartSet> {
    params.validate()?;
    let dims = Dims::from(params);

    let parts = Piece::ALL
        .par_iter()
        .map(|piece| build_piece(*piece, &dims))
        .collect::<ModelResult<Vec<Part>>>()?;

    let mut set = PartSet::new("gingerbread house");
    set.parts = parts;
    Ok(set)
}

/// Build a single piece
pub fn build_one(params: &HouseParams, piece: Piece) -> ModelResult<Part> {
    params.validate()?;
    build_piece(piece, &Dims::from(params))
}

fn build_piece(piece: Piece, d: &Dims) -> ModelResult<Part> {
    let (profile, thickness, nominal) = match piece {
        Piece::FrontWall => (
            front_wall(d),
            d.thickness,
            [d.width + d.tab_w + d.tab_d, d.height, d.thickness],
        ),
        Piece::BackWall => (
            back_wall(d),
            d.thickness,
            [d.width + d.tab_w + d.tab_d, d.height, d.thickness],
        ),
        Piece::LeftSide | Piece::RightSide => (
            side_wall(d),
            d.thickness,
            [d.depth, d.height + d.peak, d.thickness],
        ),
        Piece::RoofLeft | Piece::RoofRight => (
            roof_panel(d),
            d.roof_thickness,
            [d.roof_w, d.roof_l + d.tab_d, d.roof_thickness],
        ),
        Piece::Chimney => (chimney(d), d.chimney_h, [d.chimney_w, d.chimney_d, d.chimney_h]),
    };

    Ok(
        Part::from_profile(piece.name(), piece.file_name(), &profile, thickness)?
            .with_description(piece.description())
            .with_nominal_size(nominal.map(Some)),
    )
}

fn arch(d: &Dims, width: f64, height: f64, x: f64, y: f64) -> Profile {
    Profile::arched_opening(width, height, None, d.segments).translate(x, y)
}

/// Rectangular wall with its bottom edge on y = 0
fn wall_outline(d: &Dims) -> Profile {
    Profile::rect((-d.width / 2.0, 0.0), (d.width / 2.0, d.height))
}

/// Tabs on both vertical edges, protruding `tab_d` past the edge
fn edge_tabs(d: &Dims) -> Profile {
    let offset = d.width / 2.0 + d.tab_d / 2.0;
    let tabs: Vec<Profile> = TAB_LEVELS
        .iter()
        .flat_map(|level| {
            let y = d.height * level;
            [-offset, offset].map(|x| Profile::centered_rect(x, y, d.tab_w, d.tab_h))
        })
        .collect();
    Profile::union_all(tabs.iter())
}

/// Slots on both vertical edges of a side wall, grown by the clearance
fn edge_slots(d: &Dims) -> Profile {
    let offset = d.depth / 2.0;
    let slot_w = d.tab_w + 2.0 * d.tab_tol;
    let slot_h = d.tab_h + 2.0 * d.tab_tol;
    let slots: Vec<Profile> = TAB_LEVELS
        .iter()
        .flat_map(|level| {
            let y = d.height * level;
            [-offset, offset].map(|x| Profile::centered_rect(x, y, slot_w, slot_h))
        })
        .collect();
    Profile::union_all(slots.iter())
}

fn front_wall(d: &Dims) -> Profile {
    let openings = [
        arch(d, d.door_w, d.door_h, 0.0, d.door_off),
        arch(d, d.window_w, d.window_h, -d.width / 3.0, d.window_off),
        arch(d, d.window_w, d.window_h, d.width / 3.0, d.window_off),
    ];
    wall_outline(d)
        .union(&edge_tabs(d))
        .difference(&Profile::union_all(openings.iter()))
}

fn back_wall(d: &Dims) -> Profile {
    wall_outline(d)
        .union(&edge_tabs(d))
        .difference(&arch(d, d.window_w, d.window_h, 0.0, d.window_off))
}

fn side_wall(d: &Dims) -> Profile {
    let gable = Profile::polygon(&[
        (-d.depth / 2.0, 0.0),
        (d.depth / 2.0, 0.0),
        (d.depth / 2.0, d.height),
        (0.0, d.height + d.peak),
        (-d.depth / 2.0, d.height),
    ]);
    gable
        .difference(&arch(d, d.window_w, d.window_h, 0.0, d.window_off))
        .difference(&edge_slots(d))
}

/// Roof panel with two tabs on the lower edge at a quarter of the width
/// from each side. Each tab overlaps the panel by `tab_d` so it prints as
/// part of the same body.
fn roof_panel(d: &Dims) -> Profile {
    let panel = Profile::centered_rect(0.0, 0.0, d.roof_w, d.roof_l);
    let edge = -d.roof_l / 2.0;
    let tabs: Vec<Profile> = [-d.roof_w / 4.0, d.roof_w / 4.0]
        .iter()
        .map(|x| {
            Profile::rect(
                (x - d.tab_w / 2.0, edge - d.tab_d),
                (x + d.tab_w / 2.0, edge + d.tab_d),
            )
        })
        .collect();
    panel.union(&Profile::union_all(tabs.iter()))
}

/// Hollow chimney with walls half the house wall thickness
fn chimney(d: &Dims) -> Profile {
    let outer = Profile::centered_rect(0.0, 0.0, d.chimney_w, d.chimney_d);
    let inner = Profile::centered_rect(
        0.0,
        0.0,
        d.chimney_w - d.thickness,
        d.chimney_d - d.thickness,
    );
    outer.difference(&inner)
}
