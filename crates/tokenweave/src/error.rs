//! Error types for tokenweave operations.
//!
//! This module provides the main error type [`TokenweaveError`] which wraps
//! the error conditions that can occur while building themes and writing
//! their outputs.

use std::io;

use thiserror::Error;

use tokenweave_core::theme::Theme;
use tokenweave_parser::error::ParseError;

/// The main error type for tokenweave operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant carries the structured diagnostics of the theme that
/// failed, each with an error code, token path and source file where known.
/// It is used both for loading failures and for token errors that fail a
/// theme in strict mode.
#[derive(Debug, Error)]
pub enum TokenweaveError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("theme `{theme}`: {err}")]
    Parse { theme: Theme, err: ParseError },

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error + Send + Sync>),
}

impl From<crate::export::Error> for TokenweaveError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl TokenweaveError {
    /// Create a new `Parse` error for the theme it occurred in.
    pub fn new_parse_error(theme: Theme, err: impl Into<ParseError>) -> Self {
        Self::Parse {
            theme,
            err: err.into(),
        }
    }
}
