//! Caller-supplied construction callbacks.
//!
//! The importer never builds vertices or edges itself. It asks a
//! [`VertexProvider`] and an [`EdgeProvider`] for them, and hands repeated
//! attributes to the optional [`VertexUpdater`] and [`ComponentUpdater`].
//!
//! Every trait has a blanket implementation for closures and `fn` items with
//! the matching signature, so simple importers need no named types:
//!
//! ```
//! # use dotgraph::{Attributes, ProviderError, VertexProvider};
//! let mut provider = |id: &str, _: &Attributes| -> Result<String, ProviderError> {
//!     Ok(id.to_uppercase())
//! };
//! let vertex = provider.provide_vertex("a", &Attributes::new()).unwrap();
//! assert_eq!(vertex, "A");
//! ```

use dotgraph_parser::Attributes;

use crate::error::ProviderError;

/// Creates the vertex for an ID seen for the first time.
pub trait VertexProvider<V> {
    /// Build the vertex for `id`.
    ///
    /// `attributes` holds the attribute list of the statement that first
    /// mentioned the vertex. It is empty for vertices introduced by an edge
    /// chain.
    fn provide_vertex(&mut self, id: &str, attributes: &Attributes) -> Result<V, ProviderError>;
}

impl<V, F> VertexProvider<V> for F
where
    F: FnMut(&str, &Attributes) -> Result<V, ProviderError>,
{
    fn provide_vertex(&mut self, id: &str, attributes: &Attributes) -> Result<V, ProviderError> {
        self(id, attributes)
    }
}

/// Creates the edge between two resolved vertices.
pub trait EdgeProvider<V, E> {
    /// Build the edge from `source` to `target`.
    ///
    /// `label` is the value of the configured label attribute, if the edge
    /// chain has one. `attributes` is the full attribute list of the chain,
    /// label included.
    fn provide_edge(
        &mut self,
        source: &V,
        target: &V,
        label: Option<&str>,
        attributes: &Attributes,
    ) -> Result<E, ProviderError>;
}

impl<V, E, F> EdgeProvider<V, E> for F
where
    F: FnMut(&V, &V, Option<&str>, &Attributes) -> Result<E, ProviderError>,
{
    fn provide_edge(
        &mut self,
        source: &V,
        target: &V,
        label: Option<&str>,
        attributes: &Attributes,
    ) -> Result<E, ProviderError> {
        self(source, target, label, attributes)
    }
}

/// Merges the attributes of a repeated vertex statement into an existing vertex.
pub trait VertexUpdater<V> {
    fn update_vertex(&mut self, vertex: &V, attributes: &Attributes) -> Result<(), ProviderError>;
}

impl<V, F> VertexUpdater<V> for F
where
    F: FnMut(&V, &Attributes) -> Result<(), ProviderError>,
{
    fn update_vertex(&mut self, vertex: &V, attributes: &Attributes) -> Result<(), ProviderError> {
        self(vertex, attributes)
    }
}

/// Applies graph-level attributes to the destination graph.
///
/// Called at most once per import, with the header ID and every graph
/// attribute statement merged into one attribute set.
pub trait ComponentUpdater<G> {
    fn update_component(
        &mut self,
        graph: &mut G,
        attributes: &Attributes,
    ) -> Result<(), ProviderError>;
}

impl<G, F> ComponentUpdater<G> for F
where
    F: FnMut(&mut G, &Attributes) -> Result<(), ProviderError>,
{
    fn update_component(
        &mut self,
        graph: &mut G,
        attributes: &Attributes,
    ) -> Result<(), ProviderError> {
        self(graph, attributes)
    }
}
