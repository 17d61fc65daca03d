//! Diagnostics produced while lexing and parsing DOT documents.
//!
//! Every failure is reported as a single [`Diagnostic`] carrying an
//! [`ErrorCode`], a message, labelled source spans and optional help text.
//! The code's [`Phase`] tells consumers which stage rejected the input.

mod diagnostic;
mod error_code;
mod label;

pub use diagnostic::Diagnostic;
pub use error_code::{ErrorCode, Phase};
pub use label::Label;

/// A type alias for `Result<T, Diagnostic>`
pub type Result<T> = std::result::Result<T, Diagnostic>;
