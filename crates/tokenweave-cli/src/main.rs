//! tokenweave CLI entry point.

use std::{process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info, warn};

use tokenweave_cli::{
    Args, EXIT_FAILURE,
    error_adapter::{Reportable, diagnostics_to_reportables, to_reportables},
    exit_code, summary,
};

fn render(reporter: &miette::GraphicalReportHandler, reportable: &Reportable<'_>) -> String {
    let mut writer = String::new();
    reporter
        .render_report(&mut writer, reportable)
        .expect("Writing to String buffer is infallible");
    writer
}

fn main() {
    // Install miette's pretty panic hook early for better panic reports
    miette::set_panic_hook();

    let args = Args::parse();

    let log_level = LevelFilter::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!(
            "Invalid log level: {}. Using 'warn' instead.",
            args.log_level
        );
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    info!(log_level:?; "Starting tokenweave");
    debug!(args:?; "Parsed arguments");

    let reporter = miette::GraphicalReportHandler::new();

    let report = match tokenweave_cli::run(&args) {
        Ok(report) => report,
        Err(err) => {
            for reportable in to_reportables(&err) {
                error!("{}", render(&reporter, &reportable));
            }
            process::exit(EXIT_FAILURE);
        }
    };

    for failure in report.failures() {
        for reportable in to_reportables(failure.error()) {
            error!("{}", render(&reporter, &reportable));
        }
    }

    for build in report.builds() {
        let diagnostics = build.diagnostics();
        for reportable in diagnostics_to_reportables(build.theme(), &diagnostics) {
            warn!("{}", render(&reporter, &reportable));
        }
    }

    if let Some(summary) = summary(&report) {
        eprintln!("{summary}");
    }

    let code = exit_code(report.status());
    if code != 0 {
        process::exit(code);
    }

    info!("Completed successfully");
}
