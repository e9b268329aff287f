// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Validation report output

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::Path;

use super::types::{CheckStatus, PartReport, ValidationReport};

/// Validation reporter
pub struct ValidationReporter;

impl ValidationReporter {
    /// Write JSON report
    pub fn write_json(report: &ValidationReport, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        fs::write(path.as_ref(), json)
            .with_context(|| format!("Failed to write {}", path.as_ref().display()))?;
        Ok(())
    }

    /// Write Markdown report
    pub fn write_markdown(report: &ValidationReport, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path.as_ref(), Self::markdown(report))
            .with_context(|| format!("Failed to write {}", path.as_ref().display()))?;
        Ok(())
    }

    pub fn markdown(report: &ValidationReport) -> String {
        let mut md = String::new();

        md.push_str("# Holiday Parts Validation Report\n\n");
        md.push_str(&format!("**Generated:** {}\n\n", report.timestamp));
        md.push_str("---\n\n");

        md.push_str("## Summary\n\n");
        md.push_str(&format!("- **Parts:** {}\n", report.total_parts));
        md.push_str(&format!(
            "- **Passed:** {} ({:.1}%)\n",
            report.passed_parts,
            report.pass_rate()
        ));
        md.push_str(&format!("- **Failed:** {}\n", report.failed_parts));
        md.push_str(&format!(
            "- **Checks:** {} ({} failed, {} skipped)\n",
            report.total_checks, report.failed_checks, report.skipped_checks
        ));
        md.push_str(&format!("- **Tolerance:** {} mm\n", report.tolerance_mm));
        md.push_str(&format!(
            "- **Duration:** {:.2}s\n\n",
            report.total_duration.as_secs_f64()
        ));
        md.push_str("---\n\n");

        md.push_str("## Parts\n\n");
        md.push_str("| Part | Size (mm) | Volume (mm³) | Triangles | Result |\n");
        md.push_str("|---|---|---|---|---|\n");
        for part in &report.parts {
            let [x, y, z] = part.stats.size();
            md.push_str(&format!(
                "| {} | {:.2} × {:.2} × {:.2} | {:.1} | {} | {} |\n",
                part.name,
                x,
                y,
                z,
                part.stats.volume,
                part.stats.triangle_count,
                if part.passed() { "pass" } else { "FAIL" }
            ));
        }
        md.push('\n');

        let failed: Vec<&PartReport> = report.parts.iter().filter(|p| !p.passed()).collect();
        if !failed.is_empty() {
            md.push_str("## Failures\n\n");
            for part in failed {
                md.push_str(&format!("### {}\n\n", part.name));
                if let Some(ref file) = part.file {
                    md.push_str(&format!("- File: `{}`\n", file.display()));
                }
                for check in part.failures() {
                    md.push_str(&format!("- **{}**: {}\n", check.kind.as_str(), check.message));
                }
                if let Some(ref preview) = part.preview {
                    md.push_str(&format!("- Preview: `{}`\n", preview.display()));
                }
                md.push('\n');
            }
        }

        md
    }

    /// Print terminal summary
    pub fn print_summary(report: &ValidationReport) {
        Self::print_summary_with_verbose(report, false)
    }

    /// Print terminal summary; verbose mode lists every check
    pub fn print_summary_with_verbose(report: &ValidationReport, verbose: bool) {
        println!("\n{}", "═".repeat(80).white());
        println!("{}", "Validation Report".bold());
        println!("{}", "═".repeat(80).white());
        println!("  {} {}", "Timestamp:".white(), report.timestamp.cyan());
        println!("  {} {}", "Parts:".white(), report.total_parts.to_string().cyan());
        println!(
            "  {} {} ({:.1}%)",
            "Passed:".white(),
            report.passed_parts.to_string().green(),
            report.pass_rate()
        );
        println!(
            "  {} {}",
            "Failed:".white(),
            if report.failed_parts > 0 {
                report.failed_parts.to_string().red()
            } else {
                report.failed_parts.to_string().green()
            }
        );
        println!("  {} {} mm", "Tolerance:".white(), report.tolerance_mm);

        println!("\n{}", "Parts".bold());
        println!("{}", "─".repeat(80).white());

        for part in &report.parts {
            let status_icon = if part.passed() { "✓".green() } else { "✗".red() };
            let [x, y, z] = part.stats.size();
            println!(
                "  {} {} {}",
                status_icon,
                part.name.cyan(),
                format!("{x:.2} × {y:.2} × {z:.2} mm").white()
            );

            for check in &part.checks {
                let show = verbose || check.status == CheckStatus::Failed;
                if !show {
                    continue;
                }
                let label = match check.status {
                    CheckStatus::Passed => "pass".green(),
                    CheckStatus::Failed => "FAIL".red(),
                    CheckStatus::Skipped => "skip".yellow(),
                };
                println!("      {} {}: {}", label, check.kind.as_str(), check.message);
            }
        }

        println!("{}", "═".repeat(80).white());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Mesh;
    use crate::validation::{validate_mesh, CheckSettings};
    use tempfile::tempdir;

    fn failing_report() -> ValidationReport {
        let mut report = ValidationReport::new(0.1);
        report.add_part(validate_mesh("empty", &Mesh::new(), [None; 3], &CheckSettings::default()));
        report
    }

    #[test]
    fn test_markdown_lists_failures() {
        let md = ValidationReporter::markdown(&failing_report());
        assert!(md.contains("# Holiday Parts Validation Report"));
        assert!(md.contains("| empty |"));
        assert!(md.contains("## Failures"));
        assert!(md.contains("**non-empty**"));
    }

    #[test]
    fn test_write_reports() -> Result<()> {
        let dir = tempdir()?;
        let report = failing_report();
        ValidationReporter::write_json(&report, dir.path().join("report.json"))?;
        ValidationReporter::write_markdown(&report, dir.path().join("report.md"))?;

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(dir.path().join("report.json"))?)?;
        assert_eq!(json["failed_parts"], 1);
        assert!(dir.path().join("report.md").exists());
        Ok(())
    }
}
