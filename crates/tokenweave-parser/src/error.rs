//! Error and diagnostic system for the tokenweave parser.
//!
//! This module provides an error handling system with:
//! - Error codes for documentation and searchability
//! - Token path and source file context
//! - Severity levels
//! - Diagnostic collector for accumulating multiple errors
//!
//! # Overview
//!
//! The error system is built around the [`Diagnostic`] type, which represents
//! a single error or warning message with optional error code, the token and
//! source file it concerns, and help text. Fatal diagnostics are wrapped in
//! [`ParseError`] for returning from the loading lifecycle; non-fatal ones
//! travel alongside successful results.
//!
//! # Example
//!
//! ```
//! # use tokenweave_parser::error::{Diagnostic, ErrorCode};
//! # use tokenweave_core::path::TokenPath;
//!
//! let diag = Diagnostic::error("reference `{color.brand}` does not exist")
//!     .with_code(ErrorCode::E200)
//!     .with_token(TokenPath::parse("color.foundation.primary"))
//!     .with_help("check the spelling or define the referenced token");
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod parse_error;
mod severity;

pub(crate) use collector::DiagnosticCollector;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use parse_error::ParseError;
pub use severity::Severity;
