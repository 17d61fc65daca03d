//! Error codes for DOT diagnostics.
//!
//! Error codes are organized by phase:
//! - `E0xx` - Input and lexer errors
//! - `E1xx` - Header errors
//! - `E2xx` - Statement errors
//! - `E3xx` - Attribute list errors

use std::fmt;

/// The stage of the pipeline an [`ErrorCode`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// The document contained no tokens at all.
    Input,
    Lexer,
    Header,
    Statement,
    Attribute,
}

/// Error codes for categorizing diagnostic errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Input and Lexer Errors (E0xx)
    // =========================================================================
    /// Empty document.
    ///
    /// The source contained only whitespace and comments, or nothing.
    E000,

    /// Unterminated quoted text.
    ///
    /// A quoted string was opened but the input ended before its closing quote.
    E001,

    /// Unexpected character.
    ///
    /// A character was encountered that cannot start any DOT token.
    E002,

    /// Unterminated block comment.
    ///
    /// A `/*` comment was opened but never closed with `*/`.
    E003,

    // =========================================================================
    // Header Errors (E1xx)
    // =========================================================================
    /// Invalid header.
    ///
    /// The document does not start with `[strict] (graph | digraph) [ID] {`.
    E100,

    /// Malformed graph ID.
    ///
    /// The header names the graph with a word that is not a valid ID.
    E101,

    // =========================================================================
    // Statement Errors (E2xx)
    // =========================================================================
    /// Invalid statement.
    ///
    /// A token appeared where no statement can start or continue.
    E200,

    /// Incomplete input.
    ///
    /// The input ended before the closing `}` of the graph body.
    E201,

    /// Malformed statement ID.
    ///
    /// A vertex reference is a word that is not a valid ID.
    E202,

    // =========================================================================
    // Attribute Errors (E3xx)
    // =========================================================================
    /// Invalid attributes.
    ///
    /// An attribute list is malformed: a dangling key, a missing value,
    /// a keyword in key or value position, or a missing `]`.
    E300,
}

impl ErrorCode {
    /// Returns the string representation of this error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E000 => "E000",
            ErrorCode::E001 => "E001",
            ErrorCode::E002 => "E002",
            ErrorCode::E003 => "E003",
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E202 => "E202",
            ErrorCode::E300 => "E300",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E000 => "empty document",
            ErrorCode::E001 => "unterminated quoted text",
            ErrorCode::E002 => "unexpected character",
            ErrorCode::E003 => "unterminated block comment",
            ErrorCode::E100 => "invalid header",
            ErrorCode::E101 => "malformed graph ID",
            ErrorCode::E200 => "invalid statement",
            ErrorCode::E201 => "incomplete input",
            ErrorCode::E202 => "malformed statement ID",
            ErrorCode::E300 => "invalid attributes",
        }
    }

    /// Returns the phase that reports this error code.
    pub fn phase(&self) -> Phase {
        match self {
            ErrorCode::E000 => Phase::Input,
            ErrorCode::E001 | ErrorCode::E002 | ErrorCode::E003 => Phase::Lexer,
            ErrorCode::E100 | ErrorCode::E101 => Phase::Header,
            ErrorCode::E200 | ErrorCode::E201 | ErrorCode::E202 => Phase::Statement,
            ErrorCode::E300 => Phase::Attribute,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
