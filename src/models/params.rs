// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Named model parameters
//!
//! Every length is in inches. Geometry code converts to millimetres with
//! [`crate::utils::inches`] before building anything.

use crate::error::{ModelError, ModelResult};
use serde::{Deserialize, Serialize};

/// Upper bound on chords per arch
pub const MAX_ARCH_SEGMENTS: u32 = 1024;

/// Gingerbread house dimensions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HouseParams {
    pub wall_thickness: f64,
    /// Front/back wall width
    pub house_width: f64,
    /// Side wall depth
    pub house_depth: f64,
    /// Wall height up to the roof line
    pub wall_height: f64,
    /// Gable peak above the wall height
    pub peak_height: f64,

    pub door_width: f64,
    pub door_height: f64,
    /// Door bottom above the wall bottom
    pub door_offset: f64,
    pub window_width: f64,
    pub window_height: f64,
    /// Window bottom above the wall bottom
    pub window_offset: f64,
    /// Chords per arch
    pub arch_segments: u32,

    pub roof_overhang: f64,
    pub roof_thickness: f64,

    pub chimney_width: f64,
    pub chimney_depth: f64,
    pub chimney_height: f64,

    pub tab_width: f64,
    /// How far tabs protrude past an edge
    pub tab_depth: f64,
    pub tab_height: f64,
    /// Clearance added on every side of a slot
    pub tab_tolerance: f64,
}

impl Default for HouseParams {
    fn default() -> Self {
        Self {
            wall_thickness: 0.15,
            house_width: 4.0,
            house_depth: 3.0,
            wall_height: 3.0,
            peak_height: 1.5,
            door_width: 0.8,
            door_height: 1.5,
            door_offset: 0.1,
            window_width: 0.6,
            window_height: 0.6,
            window_offset: 1.2,
            arch_segments: 16,
            roof_overhang: 0.3,
            roof_thickness: 0.15,
            chimney_width: 0.6,
            chimney_depth: 0.5,
            chimney_height: 1.0,
            tab_width: 0.3,
            tab_depth: 0.15,
            tab_height: 0.3,
            tab_tolerance: 0.01,
        }
    }
}

impl HouseParams {
    /// Reject parameter sets that cannot produce printable parts
    pub fn validate(&self) -> ModelResult<()> {
        for (name, value) in [
            ("wall_thickness", self.wall_thickness),
            ("house_width", self.house_width),
            ("house_depth", self.house_depth),
            ("wall_height", self.wall_height),
            ("peak_height", self.peak_height),
            ("door_width", self.door_width),
            ("door_height", self.door_height),
            ("window_width", self.window_width),
            ("window_height", self.window_height),
            ("roof_thickness", self.roof_thickness),
            ("chimney_width", self.chimney_width),
            ("chimney_depth", self.chimney_depth),
            ("chimney_height", self.chimney_height),
            ("tab_width", self.tab_width),
            ("tab_depth", self.tab_depth),
            ("tab_height", self.tab_height),
        ] {
            positive(name, value)?;
        }
        for (name, value) in [
            ("door_offset", self.door_offset),
            ("window_offset", self.window_offset),
            ("roof_overhang", self.roof_overhang),
            ("tab_tolerance", self.tab_tolerance),
        ] {
            non_negative(name, value)?;
        }

        if !(2..=MAX_ARCH_SEGMENTS).contains(&self.arch_segments) {
            return Err(ModelError::invalid(
                "arch_segments",
                format!(
                    "need between 2 and {MAX_ARCH_SEGMENTS} segments, got {}",
                    self.arch_segments
                ),
            ));
        }

        let half_width = self.house_width / 2.0;
        if self.door_width >= self.house_width {
            return Err(ModelError::invalid("door_width", "door is wider than the wall"));
        }
        if self.door_offset + self.door_height >= self.wall_height {
            return Err(ModelError::invalid("door_height", "door reaches the top of the wall"));
        }
        if self.window_offset + self.window_height >= self.wall_height {
            return Err(ModelError::invalid(
                "window_height",
                "window reaches the top of the wall",
            ));
        }

        // Front windows sit at x = +-W/3
        let window_center = self.house_width / 3.0;
        let window_half = self.window_width / 2.0;
        if window_center + window_half >= half_width {
            return Err(ModelError::invalid(
                "window_width",
                "front windows extend past the wall edge",
            ));
        }
        if window_center - window_half <= self.door_width / 2.0 {
            return Err(ModelError::invalid("window_width", "front windows overlap the door"));
        }
        if self.window_width >= self.house_depth {
            return Err(ModelError::invalid(
                "window_width",
                "side window is wider than the side wall",
            ));
        }

        if self.tab_width <= self.tab_depth {
            return Err(ModelError::invalid(
                "tab_width",
                "tabs must be wider than they protrude to stay attached",
            ));
        }
        if self.tab_height + 2.0 * self.tab_tolerance > self.wall_height / 4.0 {
            return Err(ModelError::invalid(
                "tab_height",
                "tabs must fit within a quarter of the wall height",
            ));
        }
        if self.tab_width / 2.0 + self.tab_tolerance >= self.house_depth / 2.0 {
            return Err(ModelError::invalid(
                "tab_width",
                "slots would cut through half the side wall",
            ));
        }

        if self.chimney_width <= self.wall_thickness || self.chimney_depth <= self.wall_thickness
        {
            return Err(ModelError::invalid(
                "chimney_width",
                "chimney is too small to hollow out",
            ));
        }

        Ok(())
    }

    /// Sloped length of one roof panel, overhang included
    pub fn roof_length(&self) -> f64 {
        (self.house_depth / 2.0).hypot(self.peak_height) + self.roof_overhang
    }

    pub fn roof_width(&self) -> f64 {
        self.house_width + 2.0 * self.roof_overhang
    }
}

/// Holiday sign dimensions and text settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignParams {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
    pub text: String,
    /// Extrusion depth of the text piece
    pub text_depth: f64,
    /// One em of the font
    pub font_size: f64,
    /// Placeholder width per character, as a multiple of the font size
    pub fallback_width_per_char: f64,
    /// Placeholder height as a multiple of the font size
    pub fallback_height_factor: f64,
}

impl Default for SignParams {
    fn default() -> Self {
        Self {
            width: 8.0,
            height: 6.0,
            depth: 1.0,
            text: "Happy Holidays".to_string(),
            text_depth: 0.5,
            font_size: 1.0,
            fallback_width_per_char: 0.7,
            fallback_height_factor: 1.5,
        }
    }
}

impl SignParams {
    pub fn validate(&self) -> ModelResult<()> {
        for (name, value) in [
            ("width", self.width),
            ("height", self.height),
            ("depth", self.depth),
            ("text_depth", self.text_depth),
            ("font_size", self.font_size),
            ("fallback_width_per_char", self.fallback_width_per_char),
            ("fallback_height_factor", self.fallback_height_factor),
        ] {
            positive(name, value)?;
        }
        if self.text.trim().is_empty() {
            return Err(ModelError::invalid("text", "sign text is empty"));
        }
        Ok(())
    }
}

fn positive(name: &'static str, value: f64) -> ModelResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ModelError::invalid(name, format!("must be positive, got {value}")))
    }
}

fn non_negative(name: &'static str, value: f64) -> ModelResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ModelError::invalid(name, format!("must not be negative, got {value}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejected_field(result: ModelResult<()>) -> &'static str {
        match result {
            Err(ModelError::InvalidParameter { name, .. }) => name,
            other => panic!("expected InvalidParameter, got {other:?}"),
        }
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(HouseParams::default().validate().is_ok());
        assert!(SignParams::default().validate().is_ok());
    }

    #[test]
    fn test_roof_length() {
        let params = HouseParams::default();
        // sqrt(1.5^2 + 1.5^2) + 0.3
        assert!((params.roof_length() - (4.5f64.sqrt() + 0.3)).abs() < 1e-12);
        assert!((params.roof_width() - 4.6).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_non_positive_dimensions() {
        let params = HouseParams {
            wall_thickness: 0.0,
            ..Default::default()
        };
        assert_eq!(rejected_field(params.validate()), "wall_thickness");

        let params = HouseParams {
            house_width: f64::NAN,
            ..Default::default()
        };
        assert_eq!(rejected_field(params.validate()), "house_width");
    }

    #[test]
    fn test_rejects_negative_overhang() {
        let params = HouseParams {
            roof_overhang: -0.1,
            ..Default::default()
        };
        assert_eq!(rejected_field(params.validate()), "roof_overhang");
    }

    #[test]
    fn test_rejects_single_arch_segment() {
        let params = HouseParams {
            arch_segments: 1,
            ..Default::default()
        };
        assert_eq!(rejected_field(params.validate()), "arch_segments");
    }

    #[test]
    fn test_arch_segment_limit() {
        let params = HouseParams {
            arch_segments: 100_000,
            ..Default::default()
        };
        assert_eq!(rejected_field(params.validate()), "arch_segments");

        let params = HouseParams {
            arch_segments: MAX_ARCH_SEGMENTS,
            ..Default::default()
        };
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_rejects_oversized_openings() {
        let params = HouseParams {
            door_height: 3.0,
            ..Default::default()
        };
        assert_eq!(rejected_field(params.validate()), "door_height");

        let params = HouseParams {
            window_width: 1.5,
            ..Default::default()
        };
        assert_eq!(rejected_field(params.validate()), "window_width");

        let params = HouseParams {
            door_width: 2.2,
            ..Default::default()
        };
        assert_eq!(rejected_field(params.validate()), "window_width");
    }

    #[test]
    fn test_rejects_detached_tabs() {
        let params = HouseParams {
            tab_depth: 0.4,
            ..Default::default()
        };
        assert_eq!(rejected_field(params.validate()), "tab_width");
    }

    #[test]
    fn test_rejects_solid_chimney() {
        let params = HouseParams {
            chimney_depth: 0.1,
            ..Default::default()
        };
        assert_eq!(rejected_field(params.validate()), "chimney_width");
    }

    #[test]
    fn test_rejects_blank_text() {
        let params = SignParams {
            text: "   ".to_string(),
            ..Default::default()
        };
        assert_eq!(rejected_field(params.validate()), "text");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let params: HouseParams =
            toml::from_str("house_width = 5.0\narch_segments = 24\n").unwrap();
        assert_eq!(params.house_width, 5.0);
        assert_eq!(params.arch_segments, 24);
        assert_eq!(params.wall_height, HouseParams::default().wall_height);
    }
}
