//! Parsed representation of a DOT document.
//!
//! All text is owned so a [`Document`] outlives the source it came from.

use std::fmt;

use indexmap::IndexMap;

use crate::span::Spanned;

/// Attribute key/value pairs.
///
/// Keys are unique, the last assignment wins, and insertion order is kept so
/// iteration is deterministic.
pub type Attributes = IndexMap<String, String>;

/// A parsed DOT document: the header and the statements of the graph body.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub header: Header,
    pub statements: Vec<Spanned<Statement>>,
}

impl Document {
    /// Iterate over the edge chains of the document.
    pub fn edge_chains(&self) -> impl Iterator<Item = &EdgeChain> {
        self.statements
            .iter()
            .filter_map(|statement| match statement.inner() {
                Statement::EdgeChain(chain) => Some(chain),
                _ => None,
            })
    }
}

/// `[strict] (graph | digraph) [ID]`
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    pub strict: bool,
    pub directed: bool,
    pub id: Option<Spanned<String>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `ID [ "[" attr_list "]" ]`
    Vertex(VertexStatement),
    /// `ID (edge_op ID)+ [ "[" attr_list "]" ]`
    EdgeChain(EdgeChain),
    /// `key = value` or `graph [ attr_list ]` in the graph body.
    GraphAttributes(Attributes),
}

#[derive(Debug, Clone, PartialEq)]
pub struct VertexStatement {
    pub id: Spanned<String>,
    pub attributes: Attributes,
}

/// The direction written between two vertices of an edge chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeOp {
    /// `->`
    Directed,
    /// `--`
    Undirected,
}

impl EdgeOp {
    pub fn is_directed(self) -> bool {
        self == EdgeOp::Directed
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EdgeOp::Directed => "->",
            EdgeOp::Undirected => "--",
        }
    }
}

impl fmt::Display for EdgeOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `edge_op ID` step of an edge chain.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeLink {
    pub operator: Spanned<EdgeOp>,
    pub target: Spanned<String>,
}

/// `a -> b -> c [attrs]`: consecutive pairs are edges sharing `attributes`.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeChain {
    pub head: Spanned<String>,
    pub links: Vec<EdgeLink>,
    pub attributes: Attributes,
}

impl EdgeChain {
    /// Iterate over the `(source, operator, target)` triples of the chain.
    pub fn edges(
        &self,
    ) -> impl Iterator<Item = (&Spanned<String>, &Spanned<EdgeOp>, &Spanned<String>)> {
        let sources =
            std::iter::once(&self.head).chain(self.links.iter().map(|link| &link.target));
        sources
            .zip(&self.links)
            .map(|(source, link)| (source, &link.operator, &link.target))
    }
}
