// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Text outlines from TrueType/OpenType fonts

use crate::error::{ModelError, ModelResult};
use crate::geometry::Profile;
use geo::{Area, LineString, Polygon};
use std::path::{Path, PathBuf};
use ttf_parser::{Face, OutlineBuilder};

/// Line segments per flattened Bezier curve
const CURVE_STEPS: usize = 8;

/// Fonts tried in order when none is configured
pub const DEFAULT_FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSans.ttf",
    "/System/Library/Fonts/Helvetica.ttc",
    "C:/Windows/Fonts/arial.ttf",
];

/// Resolve the font to use. An explicit path must exist; otherwise the
/// first existing default wins.
pub fn find_font(explicit: Option<&Path>) -> ModelResult<PathBuf> {
    if let Some(path) = explicit {
        return if path.is_file() {
            Ok(path.to_path_buf())
        } else {
            Err(ModelError::FontNotFound(path.to_path_buf()))
        };
    }

    DEFAULT_FONT_PATHS
        .iter()
        .map(PathBuf::from)
        .find(|path| path.is_file())
        .ok_or(ModelError::NoFontAvailable)
}

pub fn load_font(path: &Path) -> ModelResult<Vec<u8>> {
    if !path.is_file() {
        return Err(ModelError::FontNotFound(path.to_path_buf()));
    }
    Ok(std::fs::read(path)?)
}

/// Lay out `text` on a single baseline at y = 0 and return its filled
/// outline. One em of the font maps to `size` millimetres.
pub fn text_profile(text: &str, font_data: &[u8], size: f64) -> ModelResult<Profile> {
    let face = Face::parse(font_data, 0).map_err(|e| ModelError::FontParse(e.to_string()))?;
    let units_per_em = f64::from(face.units_per_em());
    let scale = size / units_per_em;

    let mut cursor = 0.0;
    let mut glyphs = Vec::new();

    for ch in text.chars().filter(|c| !c.is_control()) {
        let Some(glyph) = face.glyph_index(ch) else {
            cursor += size * 0.5;
            continue;
        };

        let mut flattener = Flattener::new(scale, cursor);
        if face.outline_glyph(glyph, &mut flattener).is_some() {
            flattener.finish();
            let profile = glyph_profile(flattener.contours);
            if !profile.is_empty() {
                glyphs.push(profile);
            }
        }

        cursor += face
            .glyph_hor_advance(glyph)
            .map(|advance| f64::from(advance) * scale)
            .unwrap_or(size * 0.5);
    }

    let profile = Profile::union_all(glyphs.iter());
    if profile.is_empty() {
        return Err(ModelError::EmptyText(text.to_string()));
    }
    Ok(profile)
}

/// Turn the closed contours of one glyph into a filled profile.
///
/// Fonts disagree on which winding marks an outer contour, so the contour
/// with the largest area decides: contours winding the same way are fills,
/// the rest are holes.
fn glyph_profile(contours: Vec<Vec<(f64, f64)>>) -> Profile {
    let rings: Vec<(Polygon<f64>, f64)> = contours
        .into_iter()
        .filter(|points| points.len() >= 3)
        .map(|points| {
            let polygon = Polygon::new(LineString::from(points), Vec::new());
            let area = polygon.signed_area();
            (polygon, area)
        })
        .filter(|(_, area)| area.abs() > f64::EPSILON)
        .collect();

    let Some(fill_sign) = rings
        .iter()
        .max_by(|a, b| a.1.abs().total_cmp(&b.1.abs()))
        .map(|(_, area)| area.signum())
    else {
        return Profile::empty();
    };

    let (fills, holes): (Vec<_>, Vec<_>) = rings
        .into_iter()
        .partition(|(_, area)| area.signum() == fill_sign);

    // Contours may overlap, so they are unioned one at a time
    let merge = |rings: Vec<(Polygon<f64>, f64)>| {
        let parts: Vec<Profile> = rings
            .into_iter()
            .map(|(polygon, _)| Profile::from_polygons(vec![polygon]))
            .collect();
        Profile::union_all(parts.iter())
    };

    merge(fills).difference(&merge(holes))
}

/// Collects glyph outlines as closed polylines in millimetres
struct Flattener {
    scale: f64,
    offset_x: f64,
    contours: Vec<Vec<(f64, f64)>>,
    current: Vec<(f64, f64)>,
    last: (f64, f64),
}

impl Flattener {
    fn new(scale: f64, offset_x: f64) -> Self {
        Self {
            scale,
            offset_x,
            contours: Vec::new(),
            current: Vec::new(),
            last: (0.0, 0.0),
        }
    }

    fn tx(&self, x: f32, y: f32) -> (f64, f64) {
        (
            f64::from(x) * self.scale + self.offset_x,
            f64::from(y) * self.scale,
        )
    }

    fn push(&mut self, point: (f64, f64)) {
        self.current.push(point);
        self.last = point;
    }

    /// Keep the pending contour if it encloses anything
    fn finish(&mut self) {
        let contour = std::mem::take(&mut self.current);
        if contour.len() >= 3 {
            self.contours.push(contour);
        }
    }
}

impl OutlineBuilder for Flattener {
    fn move_to(&mut self, x: f32, y: f32) {
        // Unclosed subpaths are treated as closed
        self.finish();
        let point = self.tx(x, y);
        self.push(point);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let point = self.tx(x, y);
        self.push(point);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let p0 = self.last;
        let p1 = self.tx(x1, y1);
        let p2 = self.tx(x, y);
        for i in 1..=CURVE_STEPS {
            let t = i as f64 / CURVE_STEPS as f64;
            let mt = 1.0 - t;
            self.push((
                mt * mt * p0.0 + 2.0 * mt * t * p1.0 + t * t * p2.0,
                mt * mt * p0.1 + 2.0 * mt * t * p1.1 + t * t * p2.1,
            ));
        }
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let p0 = self.last;
        let c1 = self.tx(x1, y1);
        let c2 = self.tx(x2, y2);
        let p3 = self.tx(x, y);
        for i in 1..=CURVE_STEPS {
            let t = i as f64 / CURVE_STEPS as f64;
            let mt = 1.0 - t;
            let (a, b, c, d) = (mt * mt * mt, 3.0 * mt * mt * t, 3.0 * mt * t * t, t * t * t);
            self.push((
                a * p0.0 + b * c1.0 + c * c2.0 + d * p3.0,
                a * p0.1 + b * c1.1 + c * c2.1 + d * p3.1,
            ));
        }
    }

    fn close(&mut self) {
        self.finish();
    }
}
