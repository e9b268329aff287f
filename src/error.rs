// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Error types for geometry construction and model building

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while validating parameters or building part geometry
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("empty profile: {0}")]
    EmptyProfile(String),

    #[error("extrusion height must be positive, got {0} mm")]
    InvalidHeight(f64),

    #[error("cap triangulation failed: {0}")]
    Triangulation(String),

    #[error("font file not found: {}", .0.display())]
    FontNotFound(PathBuf),

    #[error("no usable font found in the default locations")]
    NoFontAvailable,

    #[error("failed to parse font: {0}")]
    FontParse(String),

    #[error("text {0:?} has no printable glyphs")]
    EmptyText(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ModelError {
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

pub type ModelResult<T> = std::result::Result<T, ModelError>;
