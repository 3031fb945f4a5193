//! Error adapter for converting tokenweave errors to miette diagnostics.
//!
//! This module provides the bridge between the library's error and
//! diagnostic types and miette's rich diagnostic formatting used in the CLI.
//!
//! # Multi-Error Support
//!
//! When a [`tokenweave_parser::error::ParseError`] contains multiple
//! diagnostics, each diagnostic is rendered independently. Token diagnostics
//! of themes that built in degraded form are rendered the same way.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, Severity as MietteSeverity};

use tokenweave::{TokenweaveError, theme::Theme};
use tokenweave_parser::error::{Diagnostic, Severity};

/// Adapter for a single token diagnostic.
///
/// Token diagnostics carry no source spans; the token path and source file
/// are shown as part of the help text instead.
pub struct DiagnosticAdapter<'a> {
    /// The wrapped diagnostic
    diag: &'a Diagnostic,
    /// Theme the diagnostic belongs to
    theme: Theme,
    /// Help text with location information
    help: Option<String>,
}

impl<'a> DiagnosticAdapter<'a> {
    /// Create a new diagnostic adapter.
    pub fn new(diag: &'a Diagnostic, theme: Theme) -> Self {
        let location = location(diag);
        let help = match (diag.help(), location) {
            (Some(help), Some(location)) => Some(format!("{help}\n{location}")),
            (Some(help), None) => Some(help.to_string()),
            (None, location) => location,
        };
        Self { diag, theme, help }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }
}

fn location(diag: &Diagnostic) -> Option<String> {
    match (diag.token(), diag.source()) {
        (Some(token), Some(source)) => Some(format!("token `{token}` in {}", source.display())),
        (Some(token), None) => Some(format!("token `{token}`")),
        (None, Some(source)) => Some(format!("in {}", source.display())),
        (None, None) => None,
    }
}

impl fmt::Debug for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticAdapter")
            .field("diag", &self.diag)
            .field("theme", &self.theme)
            .finish()
    }
}

impl fmt::Display for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.theme, self.diag.message())
    }
}

impl std::error::Error for DiagnosticAdapter<'_> {}

impl MietteDiagnostic for DiagnosticAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .code()
            .map(|c| Box::new(c) as Box<dyn fmt::Display>)
    }

    fn severity(&self) -> Option<MietteSeverity> {
        Some(match self.diag.severity() {
            Severity::Error => MietteSeverity::Error,
            Severity::Warning => MietteSeverity::Warning,
        })
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.help
            .as_deref()
            .map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }
}

/// Adapter for non-diagnostic [`TokenweaveError`] variants.
///
/// This adapter handles errors that don't have rich diagnostic information,
/// such as I/O errors, configuration errors, and export errors.
pub struct ErrorAdapter<'a>(pub &'a TokenweaveError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            TokenweaveError::Io(_) => "tokenweave::io",
            TokenweaveError::Config(_) => "tokenweave::config",
            TokenweaveError::Parse { .. } => return None,
            TokenweaveError::Export(_) => "tokenweave::export",
        };
        Some(Box::new(code))
    }
}

/// A reportable error that can be rendered by miette.
///
/// This enum wraps either a single diagnostic or a non-diagnostic error,
/// providing a uniform interface for error rendering.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A token or source diagnostic.
    Diagnostic(DiagnosticAdapter<'a>),
    /// A simple error without diagnostic details.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Diagnostic(d) => fmt::Display::fmt(d, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Diagnostic(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn severity(&self) -> Option<MietteSeverity> {
        match self {
            Reportable::Diagnostic(d) => d.severity(),
            Reportable::Error(e) => e.severity(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.help(),
            Reportable::Error(e) => e.help(),
        }
    }
}

/// Convert a [`TokenweaveError`] into a list of reportable errors.
///
/// For [`TokenweaveError::Parse`], this returns one [`Reportable`] for
/// each diagnostic in the error. For other error variants, this returns a
/// single [`Reportable`].
pub fn to_reportables(err: &TokenweaveError) -> Vec<Reportable<'_>> {
    match err {
        TokenweaveError::Parse {
            theme,
            err: parse_err,
        } => parse_err
            .diagnostics()
            .iter()
            .map(|d| Reportable::Diagnostic(DiagnosticAdapter::new(d, *theme)))
            .collect(),
        _ => vec![Reportable::Error(ErrorAdapter(err))],
    }
}

/// Convert the diagnostics of one theme into reportables.
pub fn diagnostics_to_reportables(theme: Theme, diagnostics: &[Diagnostic]) -> Vec<Reportable<'_>> {
    diagnostics
        .iter()
        .map(|d| Reportable::Diagnostic(DiagnosticAdapter::new(d, theme)))
        .collect()
}
