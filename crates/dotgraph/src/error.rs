//! Error types for DOT imports.
//!
//! [`ImportError`] is the single error an import reports. Failures found
//! while reading the document carry the parser's [`Diagnostic`], with its
//! error code and source spans; failures found while building the graph
//! carry what was being built.

use std::fmt;

use thiserror::Error;

use dotgraph_parser::{Diagnostic, Phase, Span};

/// Error type returned by providers and updaters.
pub type ProviderError = Box<dyn std::error::Error + Send + Sync>;

/// The kind of an [`ImportError`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    EmptyInput,
    Lex,
    Header,
    Statement,
    Attribute,
    Compatibility,
    Update,
    Construction,
}

/// The document asks for a graph the destination cannot represent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompatibilityError {
    #[error("input asks for directed graph but undirected graph provided.")]
    DirectedIntoUndirected,

    #[error("input asks for undirected graph and directed graph provided.")]
    UndirectedIntoDirected,

    #[error("graph defines strict but Multigraph given.")]
    StrictIntoMultigraph,

    #[error("edge operator `--` is not allowed in a directed graph")]
    UndirectedEdgeInDirectedGraph { span: Span },

    #[error("edge operator `->` is not allowed in an undirected graph")]
    DirectedEdgeInUndirectedGraph { span: Span },
}

/// What the importer was building when a provider or updater failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstructionTarget {
    Vertex(String),
    Edge { source: String, target: String },
    Graph,
}

impl fmt::Display for ConstructionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstructionTarget::Vertex(id) => write!(f, "vertex `{id}`"),
            ConstructionTarget::Edge { source, target } => {
                write!(f, "edge `{source}` to `{target}`")
            }
            ConstructionTarget::Graph => write!(f, "graph attributes"),
        }
    }
}

/// The error type for DOT imports.
///
/// The message of each variant is fixed so callers can match on it; the
/// parser variants additionally expose the underlying [`Diagnostic`].
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("{}", .0.message())]
    EmptyInput(Diagnostic),

    #[error("{}", .0.message())]
    Lex(Diagnostic),

    #[error("{}", .0.message())]
    Header(Diagnostic),

    #[error("{}", .0.message())]
    Statement(Diagnostic),

    #[error("{}", .0.message())]
    Attribute(Diagnostic),

    #[error(transparent)]
    Compatibility(#[from] CompatibilityError),

    #[error("Update required for vertex {vertex} but no vertexUpdater provided")]
    Update { vertex: String },

    #[error("failed to construct {target}: {source}")]
    Construction {
        target: ConstructionTarget,
        #[source]
        source: ProviderError,
    },
}

impl ImportError {
    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ImportError::EmptyInput(_) => ErrorKind::EmptyInput,
            ImportError::Lex(_) => ErrorKind::Lex,
            ImportError::Header(_) => ErrorKind::Header,
            ImportError::Statement(_) => ErrorKind::Statement,
            ImportError::Attribute(_) => ErrorKind::Attribute,
            ImportError::Compatibility(_) => ErrorKind::Compatibility,
            ImportError::Update { .. } => ErrorKind::Update,
            ImportError::Construction { .. } => ErrorKind::Construction,
        }
    }

    /// Returns the parser diagnostic behind this error, if any.
    pub fn diagnostic(&self) -> Option<&Diagnostic> {
        match self {
            ImportError::EmptyInput(diagnostic)
            | ImportError::Lex(diagnostic)
            | ImportError::Header(diagnostic)
            | ImportError::Statement(diagnostic)
            | ImportError::Attribute(diagnostic) => Some(diagnostic),
            _ => None,
        }
    }
}

impl From<Diagnostic> for ImportError {
    fn from(diagnostic: Diagnostic) -> Self {
        match diagnostic.code().phase() {
            Phase::Input => ImportError::EmptyInput(diagnostic),
            Phase::Lexer => ImportError::Lex(diagnostic),
            Phase::Header => ImportError::Header(diagnostic),
            Phase::Statement => ImportError::Statement(diagnostic),
            Phase::Attribute => ImportError::Attribute(diagnostic),
        }
    }
}
