// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Shared helpers

pub mod math;

pub use math::{approx_eq, inches, slugify, INCH_TO_MM};
