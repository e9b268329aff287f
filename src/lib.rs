// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Holiday Parts
//!
//! Parametric generators for a gingerbread house and a holiday sign.
//! Every part is a planar profile extruded into a watertight prism, laid
//! flat for printing and exported as STL. Parameters are given in inches
//! and converted to millimetres before any geometry is built.

pub mod cli;
pub mod config;
pub mod error;
pub mod geometry;
pub mod io;
pub mod models;
pub mod utils;
pub mod validation;

pub use config::BuildConfig;
pub use error::{ModelError, ModelResult};
pub use geometry::{Mesh, Profile};
pub use io::{export_stl, import_stl, StlFormat};
pub use models::{Model, Part, PartSet};

/// Build one model with default parameters
pub fn build_default(model: Model) -> ModelResult<PartSet> {
    model.build(&BuildConfig::default())
}
