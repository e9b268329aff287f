// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Build runner: generates parts, validates them and writes STL files,
//! previews, the build manifest and the validation reports

use super::reporter::Reporter;
use crate::config::BuildConfig;
use crate::io::{self, BuildManifest, MANIFEST_FILE};
use crate::models::Model;
use crate::validation::{
    validate_mesh, validate_parts, with_file, CheckSettings, ValidationReport, ValidationReporter,
};
use anyhow::{bail, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use walkdir::WalkDir;

pub const REPORT_JSON: &str = "validation_report.json";
pub const REPORT_MARKDOWN: &str = "validation_report.md";

const PROGRESS_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}";

/// Everything produced by one build
pub struct BuildOutcome {
    pub manifest: BuildManifest,
    pub report: ValidationReport,
}

/// Runner for build and validation operations
pub struct Runner {
    config: BuildConfig,
    verbose: bool,
}

impl Runner {
    pub fn new(config: BuildConfig) -> Self {
        Self {
            config,
            verbose: false,
        }
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Build the given models into the configured output directory
    pub fn build_models(&self, models: &[Model]) -> Result<BuildOutcome> {
        self.config.validate()?;

        let output_dir = &self.config.output_dir;
        fs::create_dir_all(output_dir).with_context(|| {
            format!("Failed to create output directory {}", output_dir.display())
        })?;

        let mut manifest = BuildManifest::new();
        let mut report = ValidationReport::new(self.config.tolerance_mm);

        for model in models {
            self.build_model(*model, &mut manifest, &mut report)?;
        }

        manifest.write(&output_dir.join(MANIFEST_FILE))?;
        ValidationReporter::write_json(&report, output_dir.join(REPORT_JSON))?;
        ValidationReporter::write_markdown(&report, output_dir.join(REPORT_MARKDOWN))?;

        if self.verbose {
            Reporter::report_info(&format!(
                "Wrote {} and validation reports to {}",
                MANIFEST_FILE,
                output_dir.display()
            ));
        }

        Ok(BuildOutcome { manifest, report })
    }

    fn build_model(
        &self,
        model: Model,
        manifest: &mut BuildManifest,
        report: &mut ValidationReport,
    ) -> Result<()> {
        let output_dir = &self.config.output_dir;
        Reporter::report_model(model.as_str(), output_dir);

        let start = Instant::now();
        let set = model
            .build(&self.config)
            .with_context(|| format!("Failed to build {model}"))?;

        for note in &set.notes {
            Reporter::report_warning(note);
            manifest.notes.push(format!("{model}: {note}"));
        }

        let settings = CheckSettings::from(&self.config);
        let part_reports = validate_parts(&set.parts, &settings);

        let progress = if self.verbose {
            let pb = ProgressBar::new(set.parts.len() as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template(PROGRESS_TEMPLATE)
                    .map_err(|e| anyhow::anyhow!("Invalid progress template: {e}"))?
                    .progress_chars("#>-"),
            );
            Some(pb)
        } else {
            None
        };

        let mut model_report = ValidationReport::new(self.config.tolerance_mm);
        for (part, part_report) in set.parts.iter().zip(part_reports) {
            if let Some(ref pb) = progress {
                pb.set_message(format!("Exporting {}", part.file_name));
            }

            let stl_path = output_dir.join(&part.file_name);
            io::export_stl(&part.mesh, &stl_path, self.config.stl_format)
                .with_context(|| format!("Failed to export {}", part.name))?;
            manifest.add_part(model.as_str(), part, &stl_path)?;

            let mut part_report = with_file(part_report, &stl_path);
            if self.config.preview {
                let png_path = stl_path.with_extension("png");
                io::render_mesh_to_png(&part.mesh, &png_path)?;
                part_report.preview = Some(png_path);
            }

            if let Some(ref pb) = progress {
                pb.inc(1);
            }
            Reporter::report_part(part, &part_report);
            model_report.add_part(part_report.clone());
            report.add_part(part_report);
        }

        if let Some(pb) = progress {
            pb.finish_with_message("done");
        }

        Reporter::report_build(&set, &model_report, start.elapsed());
        Ok(())
    }

    /// Validate existing STL files. Directories are searched recursively.
    ///
    /// Reports are written to `report_dir` when given. Previews go to
    /// `report_dir` as well, or next to each STL file otherwise.
    pub fn validate_paths(
        &self,
        paths: &[PathBuf],
        report_dir: Option<&Path>,
        preview: bool,
    ) -> Result<ValidationReport> {
        let files = collect_stl_files(paths)?;
        if files.is_empty() {
            bail!("No STL files found");
        }

        if let Some(dir) = report_dir {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create report directory {}", dir.display()))?;
        }

        let settings = CheckSettings::from(&self.config);
        let mut report = ValidationReport::new(self.config.tolerance_mm);

        for file in files {
            if self.verbose {
                Reporter::progress(&format!("Checking {}", file.display()));
            }

            let mesh = io::import_stl(&file)?;
            let name = file
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| file.display().to_string());

            let checked = validate_mesh(&name, &mesh, [None; 3], &settings);
            let mut part_report = with_file(checked, &file);
            if self.verbose {
                part_report.stats.print();
            }
            if preview {
                let png_path = match report_dir {
                    Some(dir) => dir.join(format!("{name}.png")),
                    None => file.with_extension("png"),
                };
                io::render_mesh_to_png(&mesh, &png_path)?;
                part_report.preview = Some(png_path);
            }
            report.add_part(part_report);
        }

        if let Some(dir) = report_dir {
            ValidationReporter::write_json(&report, dir.join(REPORT_JSON))?;
            ValidationReporter::write_markdown(&report, dir.join(REPORT_MARKDOWN))?;
        }

        Ok(report)
    }
}

impl Default for Runner {
    fn default() -> Self {
        Self::new(BuildConfig::default())
    }
}

/// Expand files and directories into a sorted list of STL files
fn collect_stl_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            for entry in WalkDir::new(path).follow_links(true) {
                let entry = entry.with_context(|| format!("Failed to walk {}", path.display()))?;
                if entry.file_type().is_file() && is_stl(entry.path()) {
                    files.push(entry.into_path());
                }
            }
        } else if path.is_file() {
            files.push(path.clone());
        } else {
            bail!("Path not found: {}", path.display());
        }
    }
    files.sort();
    files.dedup();
    Ok(files)
}

fn is_stl(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("stl"))
        .unwrap_or(false)
}
