// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Planar profiles and 2D boolean operations
//!
//! A [`Profile`] is the cross-section of a part before extrusion. Boolean
//! operations are delegated to `geo`; every result is re-oriented so
//! exteriors run counter-clockwise and holes clockwise.

use geo::orient::Direction;
use geo::{
    Area, BooleanOps, BoundingRect, Coord, LineString, MultiPolygon, Orient, Polygon, Rect,
    Translate,
};
use std::f64::consts::PI;

/// Region in the XY plane, in millimetres
#[derive(Debug, Clone)]
pub struct Profile {
    shape: MultiPolygon<f64>,
}

impl Profile {
    pub fn empty() -> Self {
        Self {
            shape: MultiPolygon::new(Vec::new()),
        }
    }

    pub fn from_multi_polygon(shape: MultiPolygon<f64>) -> Self {
        Self {
            shape: shape.orient(Direction::Default),
        }
    }

    pub fn from_polygons(polygons: Vec<Polygon<f64>>) -> Self {
        Self::from_multi_polygon(MultiPolygon::new(polygons))
    }

    /// Axis-aligned rectangle spanning two corners
    pub fn rect(min: (f64, f64), max: (f64, f64)) -> Self {
        let rect = Rect::new(Coord { x: min.0, y: min.1 }, Coord { x: max.0, y: max.1 });
        Self::from_polygons(vec![rect.to_polygon()])
    }

    pub fn centered_rect(cx: f64, cy: f64, width: f64, height: f64) -> Self {
        Self::rect(
            (cx - width / 2.0, cy - height / 2.0),
            (cx + width / 2.0, cy + height / 2.0),
        )
    }

    /// Simple polygon from an outline; the closing point is implied
    pub fn polygon(points: &[(f64, f64)]) -> Self {
        let exterior = LineString::from(points.to_vec());
        Self::from_polygons(vec![Polygon::new(exterior, Vec::new())])
    }

    /// Rectangle with a rounded top, centred on x = 0 with its bottom on y = 0.
    ///
    /// `arch_height` defaults to `width / 2` (a semicircle) and is clamped to
    /// `height`. The arc is approximated with `segments` chords.
    pub fn arched_opening(
        width: f64,
        height: f64,
        arch_height: Option<f64>,
        segments: u32,
    ) -> Self {
        let half = width / 2.0;
        let arch_height = arch_height.unwrap_or(half).min(height);
        let rect_height = (height - arch_height).max(0.0);
        let segments = segments.max(2);

        let mut points = Vec::with_capacity(segments as usize + 3);
        points.push((-half, 0.0));
        if rect_height > 0.0 {
            points.push((-half, rect_height));
        }
        for i in 1..segments {
            let angle = PI - PI * f64::from(i) / f64::from(segments);
            points.push((half * angle.cos(), rect_height + arch_height * angle.sin()));
        }
        if rect_height > 0.0 {
            points.push((half, rect_height));
        }
        points.push((half, 0.0));

        Self::polygon(&points)
    }

    pub fn union(&self, other: &Profile) -> Profile {
        Self::from_multi_polygon(self.shape.union(&other.shape))
    }

    pub fn difference(&self, other: &Profile) -> Profile {
        Self::from_multi_polygon(self.shape.difference(&other.shape))
    }

    /// Union of many profiles
    pub fn union_all<'a>(profiles: impl IntoIterator<Item = &'a Profile>) -> Profile {
        profiles
            .into_iter()
            .fold(Profile::empty(), |acc, profile| acc.union(profile))
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Profile {
        Self {
            shape: self.shape.translate(dx, dy),
        }
    }

    pub fn area(&self) -> f64 {
        self.shape.unsigned_area()
    }

    /// Lower-left and upper-right corners, `None` when empty
    pub fn bounds(&self) -> Option<((f64, f64), (f64, f64))> {
        self.shape
            .bounding_rect()
            .map(|r| ((r.min().x, r.min().y), (r.max().x, r.max().y)))
    }

    pub fn polygons(&self) -> &[Polygon<f64>] {
        &self.shape.0
    }

    pub fn hole_count(&self) -> usize {
        self.shape.iter().map(|p| p.interiors().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.shape.0.is_empty() || self.area() <= f64::EPSILON
    }

    pub fn as_multi_polygon(&self) -> &MultiPolygon<f64> {
        &self.shape
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self::empty()
    }
}
