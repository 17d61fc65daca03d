//! # DOT Graph Parser
//!
//! Lexer and parser for documents written in the DOT graph description
//! language. The output is a [`Document`]: the graph header followed by the
//! vertex, edge chain and graph attribute statements of the graph body, in
//! document order.
//!
//! ## Usage
//!
//! ```
//! # use dotgraph_parser::{parse, Diagnostic, Statement};
//! fn main() -> Result<(), Diagnostic> {
//!     let document = parse(r#"
//!         digraph deps {
//!             core -> parser -> cli [style = dashed];
//!             cli [label = "command line"]
//!         }
//!     "#)?;
//!
//!     assert!(document.header.directed);
//!     assert_eq!(document.statements.len(), 2);
//!     assert!(matches!(document.statements[0].inner(), Statement::EdgeChain(_)));
//!     Ok(())
//! }
//! ```

mod error;
mod lexer;
mod parser;
#[cfg(test)]
mod parser_tests;
mod parser_types;
mod span;
mod tokens;

pub use error::{Diagnostic, ErrorCode, Label, Phase, Result};
pub use lexer::{Lexer, Tokenized, scan_quoted, tokenize};
pub use parser_types::{
    Attributes, Document, EdgeChain, EdgeLink, EdgeOp, Header, Statement, VertexStatement,
};
pub use span::{Span, Spanned};
pub use tokens::{PositionedToken, Token};

/// Parse DOT source text into a [`Document`].
///
/// The pipeline is fail-fast and reports a single [`Diagnostic`]:
///
/// 1. **Tokenize** - Convert source text to tokens, stopping at the first
///    lexical error
/// 2. **Check for empty input** - A source without tokens fails with
///    [`ErrorCode::E000`]
/// 3. **Parse** - Header, then statements up to the closing `}`. Anything
///    after it, including a lexical error, is ignored.
///
/// # Example
///
/// ```
/// # use dotgraph_parser::{parse, ErrorCode};
/// let error = parse("   // only a comment").unwrap_err();
/// assert_eq!(error.code(), ErrorCode::E000);
/// assert_eq!(error.message(), "Dot string was empty");
/// ```
pub fn parse(source: &str) -> Result<Document> {
    let Tokenized { tokens, error } = lexer::tokenize(source);

    if tokens.is_empty() {
        return Err(error.unwrap_or_else(|| {
            Diagnostic::error(ErrorCode::E000, "Dot string was empty")
                .with_label(Span::new(0..source.len()), ErrorCode::E000.description())
                .with_help("a document needs at least `graph {}`")
        }));
    }

    parser::build_document(&tokens, error)
}
