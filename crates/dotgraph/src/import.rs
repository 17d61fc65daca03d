//! The construction engine.
//!
//! [`DotImporter`] parses a document, checks it against the capabilities of
//! the destination and then applies its statements in document order:
//!
//! 1. **Compatibility** - Directedness, strictness and every edge operator
//!    are checked before the destination is touched
//! 2. **Graph attributes** - The header ID and all graph attribute
//!    statements are merged and handed to the [`ComponentUpdater`]
//! 3. **Statements** - Vertices are created on first mention and updated on
//!    later ones; each link of an edge chain becomes one edge
//!
//! Imports are not transactional. When a later statement fails, the
//! mutations of the earlier ones stay in the destination.

use std::collections::HashMap;

use log::{debug, info, trace, warn};

use dotgraph_parser::{Attributes, Document, EdgeChain, Header, Statement, VertexStatement};

use crate::{
    config::ImportConfig,
    destination::Destination,
    error::{CompatibilityError, ConstructionTarget, ImportError},
    provider::{ComponentUpdater, EdgeProvider, VertexProvider, VertexUpdater},
};

/// Maps each vertex ID of the document to the handle its provider returned.
type Registry<V> = HashMap<String, V>;

/// Imports DOT documents into a [`Destination`] graph.
///
/// # Examples
///
/// ```
/// # #[cfg(feature = "petgraph")]
/// # fn main() -> Result<(), dotgraph::ImportError> {
/// use dotgraph::{Attributes, DotImporter, ProviderError};
/// use petgraph::graphmap::DiGraphMap;
///
/// fn vertex(id: &str, _: &Attributes) -> Result<u32, ProviderError> {
///     Ok(id.parse::<u32>()?)
/// }
///
/// fn edge(_: &u32, _: &u32, label: Option<&str>, _: &Attributes) -> Result<String, ProviderError> {
///     Ok(label.unwrap_or_default().to_string())
/// }
///
/// let mut graph = DiGraphMap::new();
/// let mut importer = DotImporter::<DiGraphMap<u32, String>>::new(vertex, edge);
/// importer.import_graph(&mut graph, "digraph { 1 -> 2 [label = \"next\"] }")?;
///
/// assert_eq!(graph.node_count(), 2);
/// assert_eq!(graph.edge_weight(1, 2).map(String::as_str), Some("next"));
/// # Ok(())
/// # }
/// # #[cfg(not(feature = "petgraph"))]
/// # fn main() {}
/// ```
pub struct DotImporter<'a, G: Destination> {
    vertex_provider: Box<dyn VertexProvider<G::Vertex> + 'a>,
    edge_provider: Box<dyn EdgeProvider<G::Vertex, G::Edge> + 'a>,
    vertex_updater: Option<Box<dyn VertexUpdater<G::Vertex> + 'a>>,
    component_updater: Option<Box<dyn ComponentUpdater<G> + 'a>>,
    config: ImportConfig,
}

impl<'a, G: Destination> DotImporter<'a, G> {
    /// Create an importer from the two required providers.
    ///
    /// Without a vertex updater, a repeated vertex statement with attributes
    /// fails the import. Without a component updater, graph attributes are
    /// dropped.
    pub fn new<VP, EP>(vertex_provider: VP, edge_provider: EP) -> Self
    where
        VP: VertexProvider<G::Vertex> + 'a,
        EP: EdgeProvider<G::Vertex, G::Edge> + 'a,
    {
        Self {
            vertex_provider: Box::new(vertex_provider),
            edge_provider: Box::new(edge_provider),
            vertex_updater: None,
            component_updater: None,
            config: ImportConfig::default(),
        }
    }

    pub fn with_vertex_updater<U>(mut self, updater: U) -> Self
    where
        U: VertexUpdater<G::Vertex> + 'a,
    {
        self.vertex_updater = Some(Box::new(updater));
        self
    }

    pub fn with_component_updater<U>(mut self, updater: U) -> Self
    where
        U: ComponentUpdater<G> + 'a,
    {
        self.component_updater = Some(Box::new(updater));
        self
    }

    pub fn with_config(mut self, config: ImportConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ImportConfig {
        &self.config
    }

    /// Parse `source` and apply it to `graph`.
    ///
    /// # Errors
    ///
    /// Returns the first failure of the import: a parser diagnostic, an
    /// incompatibility between document and destination, a repeated vertex
    /// without an updater, or a failing provider.
    pub fn import_graph(&mut self, graph: &mut G, source: &str) -> Result<(), ImportError> {
        info!(source_len = source.len(); "Importing DOT document");

        let document = dotgraph_parser::parse(source)?;
        debug!(
            strict = document.header.strict,
            directed = document.header.directed,
            statements = document.statements.len();
            "Document parsed successfully"
        );

        check_compatibility(&document, graph)?;
        debug!("Document is compatible with destination");

        let attributes = graph_attributes(&document, self.config.graph_id_attribute());
        self.apply_graph_attributes(graph, &attributes)?;

        let mut registry = Registry::new();
        for statement in &document.statements {
            trace!(statement:?; "Applying statement");
            match statement.inner() {
                Statement::Vertex(vertex) => self.apply_vertex(graph, &mut registry, vertex)?,
                Statement::EdgeChain(chain) => self.apply_edge_chain(graph, &mut registry, chain)?,
                Statement::GraphAttributes(_) => {}
            }
        }

        info!(vertices = registry.len(); "DOT document imported");
        Ok(())
    }

    fn apply_graph_attributes(
        &mut self,
        graph: &mut G,
        attributes: &Attributes,
    ) -> Result<(), ImportError> {
        if attributes.is_empty() {
            return Ok(());
        }

        match self.component_updater.as_mut() {
            Some(updater) => {
                trace!(attributes:?; "Updating graph component");
                updater
                    .update_component(graph, attributes)
                    .map_err(|source| ImportError::Construction {
                        target: ConstructionTarget::Graph,
                        source,
                    })
            }
            None => {
                debug!(count = attributes.len(); "No component updater, graph attributes ignored");
                Ok(())
            }
        }
    }

    fn apply_vertex(
        &mut self,
        graph: &mut G,
        registry: &mut Registry<G::Vertex>,
        statement: &VertexStatement,
    ) -> Result<(), ImportError> {
        let id = statement.id.as_str();

        let Some(vertex) = registry.get(id) else {
            self.create_vertex(graph, registry, id, &statement.attributes)?;
            return Ok(());
        };

        if statement.attributes.is_empty() {
            trace!(id; "Repeated vertex without attributes");
            return Ok(());
        }

        let Some(updater) = self.vertex_updater.as_mut() else {
            return Err(ImportError::Update {
                vertex: id.to_string(),
            });
        };

        trace!(id; "Updating vertex");
        updater
            .update_vertex(vertex, &statement.attributes)
            .map_err(|source| ImportError::Construction {
                target: ConstructionTarget::Vertex(id.to_string()),
                source,
            })
    }

    fn apply_edge_chain(
        &mut self,
        graph: &mut G,
        registry: &mut Registry<G::Vertex>,
        chain: &EdgeChain,
    ) -> Result<(), ImportError> {
        let label = chain
            .attributes
            .get(self.config.edge_label_attribute())
            .map(String::as_str);

        for (source_id, _, target_id) in chain.edges() {
            let source = self.resolve_vertex(graph, registry, source_id)?;
            let target = self.resolve_vertex(graph, registry, target_id)?;

            let edge = self
                .edge_provider
                .provide_edge(&source, &target, label, &chain.attributes)
                .map_err(|error| ImportError::Construction {
                    target: ConstructionTarget::Edge {
                        source: source_id.to_string(),
                        target: target_id.to_string(),
                    },
                    source: error,
                })?;

            if graph.add_edge(&source, &target, edge) {
                trace!(source = source_id.as_str(), target = target_id.as_str(); "Added edge");
            } else {
                warn!(
                    source = source_id.as_str(),
                    target = target_id.as_str();
                    "Destination refused edge"
                );
            }
        }

        Ok(())
    }

    /// Look up the vertex for `id`, creating it without attributes on first
    /// mention.
    fn resolve_vertex(
        &mut self,
        graph: &mut G,
        registry: &mut Registry<G::Vertex>,
        id: &str,
    ) -> Result<G::Vertex, ImportError> {
        match registry.get(id) {
            Some(vertex) => Ok(vertex.clone()),
            None => self.create_vertex(graph, registry, id, &Attributes::new()),
        }
    }

    fn create_vertex(
        &mut self,
        graph: &mut G,
        registry: &mut Registry<G::Vertex>,
        id: &str,
        attributes: &Attributes,
    ) -> Result<G::Vertex, ImportError> {
        let vertex = self
            .vertex_provider
            .provide_vertex(id, attributes)
            .map_err(|source| ImportError::Construction {
                target: ConstructionTarget::Vertex(id.to_string()),
                source,
            })?;

        if graph.contains_vertex(&vertex) {
            debug!(id; "Vertex already in destination, not adding");
        } else if graph.add_vertex(vertex.clone()) {
            trace!(id; "Added vertex");
        } else {
            warn!(id; "Destination refused vertex");
        }

        registry.insert(id.to_string(), vertex.clone());
        Ok(vertex)
    }
}

/// Check the document against what `graph` can represent.
fn check_compatibility<G: Destination>(
    document: &Document,
    graph: &G,
) -> Result<(), CompatibilityError> {
    let Header {
        strict, directed, ..
    } = document.header;

    match (directed, graph.is_directed()) {
        (true, false) => return Err(CompatibilityError::DirectedIntoUndirected),
        (false, true) => return Err(CompatibilityError::UndirectedIntoDirected),
        _ => {}
    }

    if strict && graph.allows_parallel_edges() {
        return Err(CompatibilityError::StrictIntoMultigraph);
    }

    for link in document.edge_chains().flat_map(|chain| &chain.links) {
        match (directed, link.operator.is_directed()) {
            (true, false) => {
                return Err(CompatibilityError::UndirectedEdgeInDirectedGraph {
                    span: link.operator.span(),
                });
            }
            (false, true) => {
                return Err(CompatibilityError::DirectedEdgeInUndirectedGraph {
                    span: link.operator.span(),
                });
            }
            _ => {}
        }
    }

    Ok(())
}

/// Merge the header ID and every graph attribute statement, in document
/// order.
fn graph_attributes(document: &Document, id_attribute: &str) -> Attributes {
    let mut attributes = Attributes::new();

    if let Some(id) = &document.header.id {
        attributes.insert(id_attribute.to_string(), id.inner().clone());
    }

    for statement in &document.statements {
        if let Statement::GraphAttributes(statement_attributes) = statement.inner() {
            attributes.extend(
                statement_attributes
                    .iter()
                    .map(|(key, value)| (key.clone(), value.clone())),
            );
        }
    }

    attributes
}

#[cfg(test)]
mod tests {
    use dotgraph_parser::parse;

    use super::*;

    #[test]
    fn test_graph_attributes_merge_in_order() {
        let document = parse("graph G { rankdir = LR; a; graph [rankdir = TB, ID = H] }")
            .expect("valid document");

        let attributes = graph_attributes(&document, "ID");
        let pairs: Vec<_> = attributes
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
            .collect();
        assert_eq!(pairs, vec![("ID", "H"), ("rankdir", "TB")]);
    }

    #[test]
    fn test_graph_attributes_use_configured_key() {
        let document = parse("digraph deps {}").expect("valid document");
        let attributes = graph_attributes(&document, "name");
        assert_eq!(attributes.get("name").map(String::as_str), Some("deps"));
        assert!(!attributes.contains_key("ID"));
    }

    #[test]
    fn test_graph_attributes_empty_without_id() {
        let document = parse("graph { a -- b }").expect("valid document");
        assert!(graph_attributes(&document, "ID").is_empty());
    }
}
