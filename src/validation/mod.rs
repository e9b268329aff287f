// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Printability validation for generated parts and STL files

pub mod checks;
pub mod reporter;
pub mod types;

pub use checks::{validate_mesh, validate_part, validate_parts, with_file, CheckSettings};
pub use reporter::ValidationReporter;
pub use types::{CheckKind, CheckResult, CheckStatus, PartReport, ValidationReport};
