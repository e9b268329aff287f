// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! CLI output reporter with colored formatting

use crate::models::{Part, PartSet};
use crate::validation::{PartReport, ValidationReport};
use colored::*;
use std::path::Path;
use std::time::Duration;

/// CLI reporter for formatted output
pub struct Reporter;

impl Reporter {
    /// Print the banner shown before a model is built
    pub fn report_model(model: &str, output_dir: &Path) {
        println!("\n{}", "━".repeat(80).bright_black());
        println!("{} {}", "Model:".bold(), model.cyan());
        println!(
            "{} {}",
            "Output:".bold(),
            output_dir.display().to_string().bright_black()
        );
        println!("{}", "━".repeat(80).bright_black());
    }

    /// Report one exported part together with its validation outcome
    pub fn report_part(part: &Part, report: &PartReport) {
        let status = if report.passed() {
            "✓".green()
        } else {
            "✗".red()
        };
        let [x, y, z] = report.stats.size();
        println!(
            "  {} {:<18} {:<28} {:>6} {} {}",
            status,
            part.name.cyan(),
            part.file_name.white(),
            report.stats.triangle_count.to_string().yellow(),
            "tris".bright_black(),
            format!("{x:.2} × {y:.2} × {z:.2} mm").bright_black()
        );

        for check in report.failures() {
            println!(
                "      {} {}: {}",
                "FAIL".red(),
                check.kind.as_str(),
                check.message
            );
        }
    }

    /// Summarize a finished model build
    pub fn report_build(set: &PartSet, report: &ValidationReport, duration: Duration) {
        println!("\n{}", "Summary:".bold());
        println!(
            "  {} {}",
            "Parts:".bright_black(),
            set.parts.len().to_string().cyan()
        );
        println!(
            "  {} {}",
            "Triangles:".bright_black(),
            set.total_triangles().to_string().cyan()
        );
        let failed = report.failed_parts.to_string();
        println!(
            "  {} {}",
            "Failed:".bright_black(),
            if report.has_failures() {
                failed.red()
            } else {
                failed.green()
            }
        );
        println!(
            "  {} {}",
            "Time:".bright_black(),
            Self::format_duration(duration).yellow()
        );
        println!("{}", "━".repeat(80).bright_black());
    }

    /// Report error
    pub fn report_error(message: &str) {
        eprintln!("\n{} {}", "❌ Error:".red().bold(), message);
    }

    /// Report warning
    pub fn report_warning(message: &str) {
        println!("\n{} {}", "⚠️  Warning:".yellow().bold(), message);
    }

    /// Report info
    pub fn report_info(message: &str) {
        println!("{} {}", "ℹ️".bright_blue(), message);
    }

    /// Format duration for display
    pub fn format_duration(duration: Duration) -> String {
        let micros = duration.as_micros();

        if micros < 1_000 {
            format!("{}µs", micros)
        } else if micros < 1_000_000 {
            format!("{:.2}ms", micros as f64 / 1_000.0)
        } else {
            format!("{:.2}s", micros as f64 / 1_000_000.0)
        }
    }

    /// Print progress message
    pub fn progress(message: &str) {
        println!("{} {}...", "⏳".bright_blue(), message.bright_black());
    }

    /// Print success message
    pub fn success(message: &str) {
        println!("{} {}", "✅".green(), message.green());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(
            Reporter::format_duration(Duration::from_micros(500)),
            "500µs"
        );
        assert_eq!(
            Reporter::format_duration(Duration::from_millis(5)),
            "5.00ms"
        );
        assert_eq!(Reporter::format_duration(Duration::from_secs(2)), "2.00s");
    }
}
