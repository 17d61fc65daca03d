//! The graph container an import writes into.

/// Capabilities the importer needs from a graph container.
///
/// Vertex handles are produced by a [`VertexProvider`](crate::VertexProvider)
/// and cloned whenever an edge refers to them, so they should be cheap to
/// clone: IDs, indices or shared pointers.
pub trait Destination {
    type Vertex: Clone;
    type Edge;

    /// Whether edges of this graph have a direction.
    fn is_directed(&self) -> bool;

    /// Whether this graph can hold more than one edge between the same
    /// pair of vertices.
    fn allows_parallel_edges(&self) -> bool;

    fn contains_vertex(&self, vertex: &Self::Vertex) -> bool;

    /// Add `vertex`, returning `false` if the graph refused it.
    fn add_vertex(&mut self, vertex: Self::Vertex) -> bool;

    /// Add `edge` from `source` to `target`, returning `false` if the graph
    /// refused it.
    fn add_edge(&mut self, source: &Self::Vertex, target: &Self::Vertex, edge: Self::Edge) -> bool;
}

#[cfg(feature = "petgraph")]
mod graphmap {
    use std::hash::BuildHasher;

    use log::trace;
    use petgraph::{
        EdgeType,
        graphmap::{GraphMap, NodeTrait},
    };

    use super::*;

    /// A [`GraphMap`] is a simple graph: adding an existing edge only
    /// replaces its weight, so it is reported as refused and left untouched.
    impl<N, E, Ty, S> Destination for GraphMap<N, E, Ty, S>
    where
        N: NodeTrait,
        Ty: EdgeType,
        S: BuildHasher,
    {
        type Vertex = N;
        type Edge = E;

        fn is_directed(&self) -> bool {
            Ty::is_directed()
        }

        fn allows_parallel_edges(&self) -> bool {
            false
        }

        fn contains_vertex(&self, vertex: &N) -> bool {
            self.contains_node(*vertex)
        }

        fn add_vertex(&mut self, vertex: N) -> bool {
            if self.contains_node(vertex) {
                return false;
            }
            self.add_node(vertex);
            true
        }

        fn add_edge(&mut self, source: &N, target: &N, edge: E) -> bool {
            if self.contains_edge(*source, *target) {
                trace!("Edge already present in graph map");
                return false;
            }
            GraphMap::add_edge(self, *source, *target, edge);
            true
        }
    }

}
