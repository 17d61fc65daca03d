//! DotGraph - Import DOT graph descriptions into any graph container.
//!
//! A [`DotImporter`] reads a DOT document and rebuilds it in a caller-owned
//! graph through pluggable providers. The graph is seen only through the
//! [`Destination`] trait; vertices and edges are created by a
//! [`VertexProvider`] and an [`EdgeProvider`], and repeated attributes are
//! merged by the optional [`VertexUpdater`] and [`ComponentUpdater`].
//!
//! Lexing and parsing live in the `dotgraph-parser` crate, whose document
//! types are re-exported here.
//!
//! With the default `petgraph` feature, petgraph's `GraphMap` implements
//! [`Destination`].

pub mod config;

mod destination;
mod error;
mod import;
mod provider;

pub use dotgraph_parser::{
    Attributes, Diagnostic, Document, EdgeChain, EdgeLink, EdgeOp, ErrorCode, Header, Label,
    Phase, Span, Spanned, Statement, VertexStatement, parse,
};

pub use destination::Destination;
pub use error::{CompatibilityError, ConstructionTarget, ErrorKind, ImportError, ProviderError};
pub use import::DotImporter;
pub use provider::{ComponentUpdater, EdgeProvider, VertexProvider, VertexUpdater};
