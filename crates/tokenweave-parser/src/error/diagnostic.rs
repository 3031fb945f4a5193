//! The core diagnostic type for the tokenweave error system.
//!
//! A [`Diagnostic`] represents a single error or warning with optional
//! error code, the token and source file it concerns, and help text.

use std::{
    fmt,
    path::{Path, PathBuf},
};

use tokenweave_core::path::TokenPath;

use crate::error::{Severity, error_code::ErrorCode};

/// A diagnostic message with token and file context.
///
/// # Example
///
/// ```text
/// error[E201]: circular reference: color.a -> color.b -> color.a
///   token: color.a
///   source: tokens/themes/classic-light.json
///   help: break the cycle by giving one of the tokens a literal value
/// ```
#[derive(Debug, Clone)]
pub struct Diagnostic {
    severity: Severity,
    code: Option<ErrorCode>,
    message: String,
    token: Option<TokenPath>,
    source: Option<PathBuf>,
    help: Option<String>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    ///
    /// # Example
    ///
    /// ```
    /// # use tokenweave_parser::error::{Diagnostic, ErrorCode};
    ///
    /// let diag = Diagnostic::error("source `themes/classic-dark.json` not found")
    ///     .with_code(ErrorCode::E001)
    ///     .with_help("create the file or mark the source as optional");
    /// ```
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Create a warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    /// Get the severity of this diagnostic.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Get the error code, if any.
    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }

    /// Get the primary message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the token this diagnostic concerns, if any.
    pub fn token(&self) -> Option<&TokenPath> {
        self.token.as_ref()
    }

    /// Get the source file this diagnostic concerns, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Get the help text, if any.
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Set the error code.
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Attach the token path this diagnostic concerns.
    pub fn with_token(mut self, token: TokenPath) -> Self {
        self.token = Some(token);
        self
    }

    /// Attach the source file this diagnostic concerns.
    pub fn with_source(mut self, source: impl Into<PathBuf>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Set the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Create a new diagnostic with the given severity and message.
    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: None,
            message: message.into(),
            token: None,
            source: None,
            help: None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Format: "error[E001]: message" or "error: message"
        write!(f, "{}", self.severity)?;
        if let Some(code) = self.code {
            write!(f, "[{}]", code)?;
        }
        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for Diagnostic {}
