// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Build configuration

use crate::io::StlFormat;
use crate::models::{HouseParams, SignParams};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory
pub const DEFAULT_CONFIG_FILE: &str = "holiday-parts.toml";

/// Build configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Directory receiving STL files, previews and reports
    pub output_dir: PathBuf,
    pub stl_format: StlFormat,
    /// Render a PNG preview next to every STL
    pub preview: bool,
    /// Font for the sign text; defaults are searched when unset
    pub font_path: Option<PathBuf>,
    /// Allowed deviation from nominal sizes, in mm
    pub tolerance_mm: f64,
    /// Printer build volume in mm, unchecked when unset
    pub bed_size_mm: Option<[f64; 3]>,
    pub house: HouseParams,
    pub sign: SignParams,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("output"),
            stl_format: StlFormat::Binary,
            preview: false,
            font_path: None,
            tolerance_mm: 0.1,
            bed_size_mm: Some([220.0, 220.0, 250.0]),
            house: HouseParams::default(),
            sign: SignParams::default(),
        }
    }
}

impl BuildConfig {
    /// Load configuration from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config: BuildConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides.
    ///
    /// An explicit file must exist. Otherwise `holiday-parts.toml` in the
    /// working directory is used when present.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(DEFAULT_CONFIG_FILE)?
            }
            None => Self::default(),
        };

        config.apply_env()?;
        Ok(config)
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Ok(output_dir) = std::env::var("HOLIDAY_PARTS_OUTPUT_DIR") {
            self.output_dir = PathBuf::from(output_dir);
        }

        if let Ok(font) = std::env::var("HOLIDAY_PARTS_FONT") {
            self.font_path = Some(PathBuf::from(font));
        }

        if let Ok(tolerance) = std::env::var("HOLIDAY_PARTS_TOLERANCE") {
            self.tolerance_mm = tolerance
                .parse()
                .with_context(|| format!("Invalid HOLIDAY_PARTS_TOLERANCE: {tolerance:?}"))?;
        }

        if let Ok(preview) = std::env::var("HOLIDAY_PARTS_PREVIEW") {
            self.preview = preview.parse().unwrap_or(false);
        }

        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))?;
        Ok(())
    }

    /// Check model parameters and validation settings up front
    pub fn validate(&self) -> Result<()> {
        self.house.validate().context("Invalid house parameters")?;
        self.sign.validate().context("Invalid sign parameters")?;
        if !self.tolerance_mm.is_finite() || self.tolerance_mm < 0.0 {
            anyhow::bail!("tolerance_mm must not be negative, got {}", self.tolerance_mm);
        }
        if let Some(bed) = self.bed_size_mm {
            if bed.iter().any(|v| !v.is_finite() || *v <= 0.0) {
                anyhow::bail!("bed_size_mm must be positive, got {bed:?}");
            }
        }
        Ok(())
    }
}
