//! CLI logic for the tokenweave design-token pipeline.
//!
//! This module contains the core CLI logic: loading configuration, applying
//! command-line overrides, running the pipeline, and turning the build report
//! into a summary and an exit code.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fmt::Write as _;

use log::info;

use tokenweave::{BuildReport, BuildStatus, Pipeline, TokenweaveError};
use tokenweave_parser::error::Severity;

/// Exit code for a partially successful build.
pub const EXIT_PARTIAL: i32 = 2;

/// Exit code for fatal errors and builds where every theme failed.
pub const EXIT_FAILURE: i32 = 1;

/// Run the tokenweave CLI application
///
/// This function loads the configuration, builds every theme and writes the
/// generated files. Theme failures are not errors here; they are recorded in
/// the returned [`BuildReport`].
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `TokenweaveError` for:
/// - Configuration loading or validation errors
/// - File I/O errors while writing outputs
pub fn run(args: &Args) -> Result<BuildReport, TokenweaveError> {
    let app_config = config::load_config(args.config.as_ref())?;
    let app_config = config::apply_overrides(app_config, args);

    info!(
        input_dir = app_config.input().directory().display().to_string(),
        output_dir = app_config.output().directory().display().to_string(),
        strict = app_config.build().strict();
        "Building design tokens"
    );

    let report = Pipeline::new(app_config).run()?;

    info!(status:? = report.status(); "Design tokens built");

    Ok(report)
}

/// Maps a build status to the process exit code.
pub fn exit_code(status: BuildStatus) -> i32 {
    match status {
        BuildStatus::Success => 0,
        BuildStatus::Partial => EXIT_PARTIAL,
        BuildStatus::Failed => EXIT_FAILURE,
    }
}

/// Summarizes failed themes and token errors, or returns `None` for a clean
/// build.
pub fn summary(report: &BuildReport) -> Option<String> {
    if report.status() == BuildStatus::Success {
        return None;
    }

    let mut out = String::new();
    writeln!(out, "Build {:?}:", report.status()).expect("Writing to String buffer is infallible");

    for failure in report.failures() {
        writeln!(out, "  theme {} failed: {}", failure.theme(), failure.error())
            .expect("Writing to String buffer is infallible");
    }

    for build in report.builds() {
        let errors = build
            .diagnostics()
            .into_iter()
            .filter(|diagnostic| diagnostic.severity() == Severity::Error);
        for diagnostic in errors {
            match diagnostic.token() {
                Some(path) => writeln!(
                    out,
                    "  theme {}: token {path}: {}",
                    build.theme(),
                    diagnostic.message()
                ),
                None => writeln!(out, "  theme {}: {}", build.theme(), diagnostic.message()),
            }
            .expect("Writing to String buffer is infallible");
        }
    }

    let succeeded: Vec<String> = report.succeeded().iter().map(ToString::to_string).collect();
    write!(
        out,
        "  built: {}",
        if succeeded.is_empty() {
            "none".to_string()
        } else {
            succeeded.join(", ")
        }
    )
    .expect("Writing to String buffer is infallible");

    Some(out)
}
