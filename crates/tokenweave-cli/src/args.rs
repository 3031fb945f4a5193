//! Command-line argument definitions for the tokenweave CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. No argument is required: every flag overrides a value from
//! the configuration file, which itself falls back to defaults.

use clap::Parser;

/// Command-line arguments for the tokenweave design-token pipeline
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Directory containing the token sources
    #[arg(short, long)]
    pub input_dir: Option<String>,

    /// Directory the generated files are written to
    #[arg(short, long)]
    pub output_dir: Option<String>,

    /// Fail a theme when any of its tokens cannot be resolved
    #[arg(long)]
    pub strict: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
