// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! I/O module - STL export and import, previews and build manifests

mod exporter;
mod importer;
pub mod manifest;
pub mod preview;

pub use exporter::{export_stl, StlFormat};
pub use importer::import_stl;
pub use manifest::{file_sha256, BuildManifest, ManifestEntry, MANIFEST_FILE};
pub use preview::{render_mesh_to_png, render_stl_to_png};
