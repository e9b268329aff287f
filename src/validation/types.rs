// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Printability check results

use crate::geometry::GeometryStats;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::path::PathBuf;
use std::time::Duration;

// Custom serialization for Duration
fn serialize_duration<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_f64(duration.as_secs_f64())
}

fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let secs = f64::deserialize(deserializer)?;
    Ok(Duration::from_secs_f64(secs))
}

/// Individual printability check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckKind {
    NonEmpty,
    Watertight,
    PositiveVolume,
    Dimensions,
    FlatOnBed,
    FitsBed,
}

impl CheckKind {
    pub const ALL: [CheckKind; 6] = [
        CheckKind::NonEmpty,
        CheckKind::Watertight,
        CheckKind::PositiveVolume,
        CheckKind::Dimensions,
        CheckKind::FlatOnBed,
        CheckKind::FitsBed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CheckKind::NonEmpty => "non-empty",
            CheckKind::Watertight => "watertight",
            CheckKind::PositiveVolume => "positive volume",
            CheckKind::Dimensions => "dimensions",
            CheckKind::FlatOnBed => "flat on bed",
            CheckKind::FitsBed => "fits bed",
        }
    }
}

/// Check outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckStatus {
    Passed,
    Failed,
    Skipped,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    pub kind: CheckKind,
    pub status: CheckStatus,
    pub message: String,
}

impl CheckResult {
    pub fn passed(kind: CheckKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            status: CheckStatus::Passed,
            message: message.into(),
        }
    }

    pub fn failed(kind: CheckKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            status: CheckStatus::Failed,
            message: message.into(),
        }
    }

    pub fn skipped(kind: CheckKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            status: CheckStatus::Skipped,
            message: message.into(),
        }
    }

    /// Pass or fail depending on `ok`
    pub fn from_bool(kind: CheckKind, ok: bool, message: impl Into<String>) -> Self {
        if ok {
            Self::passed(kind, message)
        } else {
            Self::failed(kind, message)
        }
    }
}

/// All checks for one part or STL file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartReport {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    pub stats: GeometryStats,
    pub checks: Vec<CheckResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<PathBuf>,
    #[serde(serialize_with = "serialize_duration", deserialize_with = "deserialize_duration")]
    pub duration: Duration,
}

impl PartReport {
    pub fn passed(&self) -> bool {
        self.checks.iter().all(|c| c.status != CheckStatus::Failed)
    }

    pub fn failures(&self) -> impl Iterator<Item = &CheckResult> {
        self.checks.iter().filter(|c| c.status == CheckStatus::Failed)
    }

    pub fn check(&self, kind: CheckKind) -> Option<&CheckResult> {
        self.checks.iter().find(|c| c.kind == kind)
    }
}

/// Complete validation report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    pub timestamp: String,
    pub tolerance_mm: f64,
    pub total_parts: usize,
    pub passed_parts: usize,
    pub failed_parts: usize,
    pub total_checks: usize,
    pub failed_checks: usize,
    pub skipped_checks: usize,
    #[serde(serialize_with = "serialize_duration", deserialize_with = "deserialize_duration")]
    pub total_duration: Duration,
    pub parts: Vec<PartReport>,
}

impl ValidationReport {
    pub fn new(tolerance_mm: f64) -> Self {
        Self {
            timestamp: chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            tolerance_mm,
            total_parts: 0,
            passed_parts: 0,
            failed_parts: 0,
            total_checks: 0,
            failed_checks: 0,
            skipped_checks: 0,
            total_duration: Duration::ZERO,
            parts: Vec::new(),
        }
    }

    pub fn add_part(&mut self, report: PartReport) {
        self.total_parts += 1;
        if report.passed() {
            self.passed_parts += 1;
        } else {
            self.failed_parts += 1;
        }
        for check in &report.checks {
            self.total_checks += 1;
            match check.status {
                CheckStatus::Failed => self.failed_checks += 1,
                CheckStatus::Skipped => self.skipped_checks += 1,
                CheckStatus::Passed => {}
            }
        }
        self.total_duration += report.duration;
        self.parts.push(report);
    }

    pub fn pass_rate(&self) -> f32 {
        if self.total_parts == 0 {
            0.0
        } else {
            (self.passed_parts as f32 / self.total_parts as f32) * 100.0
        }
    }

    pub fn has_failures(&self) -> bool {
        self.failed_parts > 0
    }
}
