// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! holiday-parts CLI

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use holiday_parts::cli::{Reporter, Runner};
use holiday_parts::config::{BuildConfig, DEFAULT_CONFIG_FILE};
use holiday_parts::io::StlFormat;
use holiday_parts::models::Model;
use holiday_parts::validation::ValidationReporter;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "holiday-parts")]
#[command(
    about = "Parametric gingerbread house and holiday sign parts as printable STL files",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (defaults to ./holiday-parts.toml when present)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the gingerbread house walls, roof panels and chimney
    House {
        #[command(flatten)]
        build: BuildArgs,
    },

    /// Build the holiday sign base and text
    Sign {
        /// Sign text
        #[arg(short, long)]
        text: Option<String>,

        /// Font file for the text
        #[arg(short, long, value_name = "FILE")]
        font: Option<PathBuf>,

        #[command(flatten)]
        build: BuildArgs,
    },

    /// Build every model
    All {
        #[command(flatten)]
        build: BuildArgs,
    },

    /// Check existing STL files for printability
    Validate {
        /// STL files or directories
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Directory for JSON and Markdown reports
        #[arg(short, long, value_name = "DIR")]
        report: Option<PathBuf>,

        /// Render a PNG preview of every file
        #[arg(long)]
        preview: bool,
    },

    /// Write the default configuration as TOML
    Params {
        /// Output file
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        output: PathBuf,
    },

    /// Show version information
    Version,
}

#[derive(Args)]
struct BuildArgs {
    /// Output directory
    #[arg(short, long, value_name = "DIR")]
    out: Option<PathBuf>,

    /// Render a PNG preview next to every STL
    #[arg(long)]
    preview: bool,

    /// Write ASCII STL instead of binary
    #[arg(long)]
    ascii: bool,

    /// Dimension tolerance in mm
    #[arg(long, value_name = "MM")]
    tolerance: Option<f64>,
}

impl BuildArgs {
    fn apply(&self, config: &mut BuildConfig) {
        if let Some(ref out) = self.out {
            config.output_dir = out.clone();
        }
        if self.preview {
            config.preview = true;
        }
        if self.ascii {
            config.stl_format = StlFormat::Ascii;
        }
        if let Some(tolerance) = self.tolerance {
            config.tolerance_mm = tolerance;
        }
    }
}

fn main() {
    let cli = Cli::parse();

    match run(cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            Reporter::report_error(&format!("{e:#}"));
            std::process::exit(1);
        }
    }
}

/// Returns whether every check passed
fn run(cli: Cli) -> Result<bool> {
    match cli.command {
        Commands::House { build } => {
            build_command(cli.config, cli.verbose, &build, &[Model::GingerbreadHouse], |_| {})
        }
        Commands::Sign { text, font, build } => {
            build_command(cli.config, cli.verbose, &build, &[Model::HolidaySign], |config| {
                if let Some(text) = text {
                    config.sign.text = text;
                }
                if let Some(font) = font {
                    config.font_path = Some(font);
                }
            })
        }
        Commands::All { build } => {
            build_command(cli.config, cli.verbose, &build, &Model::ALL, |_| {})
        }
        Commands::Validate {
            paths,
            report,
            preview,
        } => validate_command(cli.config, cli.verbose, &paths, report, preview),
        Commands::Params { output } => {
            BuildConfig::default().save(&output)?;
            Reporter::success(&format!("Wrote default parameters to {}", output.display()));
            Ok(true)
        }
        Commands::Version => {
            println!("holiday-parts v{}", env!("CARGO_PKG_VERSION"));
            Ok(true)
        }
    }
}

fn build_command(
    config_path: Option<PathBuf>,
    verbose: bool,
    args: &BuildArgs,
    models: &[Model],
    customize: impl FnOnce(&mut BuildConfig),
) -> Result<bool> {
    let mut config = BuildConfig::load(config_path.as_deref())?;
    args.apply(&mut config);
    customize(&mut config);

    if verbose {
        Reporter::report_info(&format!(
            "Building {} model(s) into {}",
            models.len(),
            config.output_dir.display()
        ));
    }

    let outcome = Runner::new(config).with_verbose(verbose).build_models(models)?;

    if outcome.report.has_failures() {
        Reporter::report_error(&format!(
            "{} of {} parts failed validation",
            outcome.report.failed_parts, outcome.report.total_parts
        ));
        Ok(false)
    } else {
        Reporter::success(&format!(
            "{} parts written and validated",
            outcome.report.total_parts
        ));
        Ok(true)
    }
}

fn validate_command(
    config_path: Option<PathBuf>,
    verbose: bool,
    paths: &[PathBuf],
    report_dir: Option<PathBuf>,
    preview: bool,
) -> Result<bool> {
    let config = BuildConfig::load(config_path.as_deref())?;
    let runner = Runner::new(config).with_verbose(verbose);

    let report = runner.validate_paths(paths, report_dir.as_deref(), preview)?;
    ValidationReporter::print_summary_with_verbose(&report, verbose);

    if let Some(dir) = report_dir {
        Reporter::report_info(&format!("Reports written to {}", dir.display()));
    }

    Ok(!report.has_failures())
}
