//! Tokenweave - a design-token pipeline.
//!
//! JSON token files are merged, their `{dotted.path}` references resolved,
//! and the result emitted as CSS custom properties, Android XML resources,
//! iOS Swift source and an optional JSON dump for four theme variants.
//!
//! The entry point is [`Pipeline`]:
//!
//! ```rust,no_run
//! use tokenweave::{BuildStatus, Pipeline, config::AppConfig};
//!
//! let config = AppConfig::default()
//!     .with_input_directory("tokens")
//!     .with_output_directory("build");
//! let report = Pipeline::new(config).run().expect("Failed to write outputs");
//!
//! if report.status() != BuildStatus::Success {
//!     for failure in report.failures() {
//!         eprintln!("{}: {}", failure.theme(), failure.error());
//!     }
//! }
//! ```

pub mod config;
pub mod export;
pub mod pipeline;

mod error;

pub use tokenweave_core::{category, color, path, theme, value};

pub use error::TokenweaveError;
pub use export::{Artifact, Platform};
pub use pipeline::{BuildReport, BuildStatus, Pipeline, ThemeBuild, ThemeFailure};
