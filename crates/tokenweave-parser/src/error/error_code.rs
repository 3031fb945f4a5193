//! Error codes for the tokenweave diagnostic system.
//!
//! Error codes are organized by phase:
//! - `E0xx` - Source loading errors
//! - `E1xx` - Token shape errors
//! - `E2xx` - Reference resolution errors
//! - `E3xx` - Output naming errors

use std::fmt;

/// Error codes for categorizing diagnostic errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Source Errors (E0xx)
    // =========================================================================
    /// Source not found.
    ///
    /// A required source pattern matched no file for the theme being built.
    E001,

    /// Unreadable source.
    ///
    /// A matched source file exists but could not be read.
    E002,

    /// Invalid JSON.
    ///
    /// A source file is not well-formed JSON.
    E003,

    /// Invalid source pattern.
    ///
    /// A source pattern is not a valid glob expression.
    E004,

    /// Source root is not an object.
    ///
    /// The top level of a token file must be a JSON object.
    E005,

    // =========================================================================
    // Token Errors (E1xx)
    // =========================================================================
    /// Malformed token.
    ///
    /// A node is neither a group object nor a token with a usable `value`.
    E100,

    /// Malformed reference.
    ///
    /// A value contains braces but is not exactly one `{dotted.path}`
    /// reference filling the whole string.
    E101,

    // =========================================================================
    // Reference Errors (E2xx)
    // =========================================================================
    /// Unresolved reference.
    ///
    /// A reference points to a path that does not exist in the theme's
    /// token set.
    E200,

    /// Circular reference.
    ///
    /// Following a reference chain revisits a token already on the chain.
    E201,

    // =========================================================================
    // Output Errors (E3xx)
    // =========================================================================
    /// Name collision.
    ///
    /// Two token paths produce the same identifier in one generated file.
    E300,
}

impl ErrorCode {
    /// Returns the code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "E001",
            ErrorCode::E002 => "E002",
            ErrorCode::E003 => "E003",
            ErrorCode::E004 => "E004",
            ErrorCode::E005 => "E005",
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E300 => "E300",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "source not found",
            ErrorCode::E002 => "unreadable source",
            ErrorCode::E003 => "invalid JSON",
            ErrorCode::E004 => "invalid source pattern",
            ErrorCode::E005 => "source root is not an object",
            ErrorCode::E100 => "malformed token",
            ErrorCode::E101 => "malformed reference",
            ErrorCode::E200 => "unresolved reference",
            ErrorCode::E201 => "circular reference",
            ErrorCode::E300 => "name collision",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::E001.to_string(), "E001");
        assert_eq!(ErrorCode::E100.to_string(), "E100");
        assert_eq!(ErrorCode::E201.to_string(), "E201");
        assert_eq!(ErrorCode::E300.to_string(), "E300");
    }

    #[test]
    fn test_error_code_description() {
        assert_eq!(ErrorCode::E001.description(), "source not found");
        assert_eq!(ErrorCode::E101.description(), "malformed reference");
        assert_eq!(ErrorCode::E201.description(), "circular reference");
    }
}
