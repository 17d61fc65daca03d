//! Shared fixtures: an in-memory destination graph, providers and a small
//! DOT exporter used for round trips.

#![allow(dead_code)]

use std::{cell::RefCell, fmt::Write as _, rc::Rc};

use dotgraph::{Attributes, Destination, DotImporter, ProviderError};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Vertex handle: shared so updaters can merge attributes in place.
#[derive(Debug, Clone)]
pub struct Vertex(Rc<VertexData>);

#[derive(Debug)]
pub struct VertexData {
    id: String,
    attributes: RefCell<Attributes>,
}

impl Vertex {
    pub fn new(id: &str, attributes: Attributes) -> Self {
        Self(Rc::new(VertexData {
            id: id.to_string(),
            attributes: RefCell::new(attributes),
        }))
    }

    pub fn id(&self) -> &str {
        &self.0.id
    }

    pub fn attributes(&self) -> Attributes {
        self.0.attributes.borrow().clone()
    }

    pub fn attribute(&self, key: &str) -> Option<String> {
        self.0.attributes.borrow().get(key).cloned()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub label: Option<String>,
    pub attributes: Attributes,
}

/// Adjacency-list graph with configurable directedness and parallel edges.
#[derive(Debug)]
pub struct TestGraph {
    directed: bool,
    multigraph: bool,
    vertices: Vec<Vertex>,
    edges: Vec<(String, String, Edge)>,
    pub graph_attributes: Option<Attributes>,
}

impl TestGraph {
    pub fn new(directed: bool, multigraph: bool) -> Self {
        Self {
            directed,
            multigraph,
            vertices: Vec::new(),
            edges: Vec::new(),
            graph_attributes: None,
        }
    }

    pub fn multigraph() -> Self {
        Self::new(false, true)
    }

    pub fn directed_multigraph() -> Self {
        Self::new(true, true)
    }

    pub fn simple() -> Self {
        Self::new(false, false)
    }

    pub fn directed_simple() -> Self {
        Self::new(true, false)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn vertex(&self, id: &str) -> Option<&Vertex> {
        self.vertices.iter().find(|vertex| vertex.id() == id)
    }

    /// Vertex IDs in insertion order.
    pub fn vertex_ids(&self) -> Vec<&str> {
        self.vertices.iter().map(Vertex::id).collect()
    }

    /// Edge endpoints in insertion order.
    pub fn edge_pairs(&self) -> Vec<(&str, &str)> {
        self.edges
            .iter()
            .map(|(source, target, _)| (source.as_str(), target.as_str()))
            .collect()
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter().map(|(_, _, edge)| edge)
    }

    /// Sorted endpoint pairs; undirected pairs are normalized first.
    pub fn edge_multiset(&self) -> Vec<(String, String)> {
        let mut pairs: Vec<_> = self
            .edges
            .iter()
            .map(|(source, target, _)| {
                if !self.directed && target < source {
                    (target.clone(), source.clone())
                } else {
                    (source.clone(), target.clone())
                }
            })
            .collect();
        pairs.sort();
        pairs
    }

    pub fn sorted_vertex_ids(&self) -> Vec<String> {
        let mut ids: Vec<_> = self.vertices.iter().map(|v| v.id().to_string()).collect();
        ids.sort();
        ids
    }

    fn has_edge(&self, source: &str, target: &str) -> bool {
        self.edges.iter().any(|(s, t, _)| {
            (s == source && t == target) || (!self.directed && s == target && t == source)
        })
    }
}

impl Destination for TestGraph {
    type Vertex = Vertex;
    type Edge = Edge;

    fn is_directed(&self) -> bool {
        self.directed
    }

    fn allows_parallel_edges(&self) -> bool {
        self.multigraph
    }

    fn contains_vertex(&self, vertex: &Vertex) -> bool {
        self.vertex(vertex.id()).is_some()
    }

    fn add_vertex(&mut self, vertex: Vertex) -> bool {
        if self.contains_vertex(&vertex) {
            return false;
        }
        self.vertices.push(vertex);
        true
    }

    fn add_edge(&mut self, source: &Vertex, target: &Vertex, edge: Edge) -> bool {
        if !self.multigraph && self.has_edge(source.id(), target.id()) {
            return false;
        }
        self.edges
            .push((source.id().to_string(), target.id().to_string(), edge));
        true
    }
}

pub fn provide_vertex(id: &str, attributes: &Attributes) -> Result<Vertex, ProviderError> {
    Ok(Vertex::new(id, attributes.clone()))
}

pub fn provide_edge(
    _source: &Vertex,
    _target: &Vertex,
    label: Option<&str>,
    attributes: &Attributes,
) -> Result<Edge, ProviderError> {
    Ok(Edge {
        label: label.map(str::to_string),
        attributes: attributes.clone(),
    })
}

pub fn merge_attributes(vertex: &Vertex, attributes: &Attributes) -> Result<(), ProviderError> {
    vertex
        .0
        .attributes
        .borrow_mut()
        .extend(attributes.iter().map(|(k, v)| (k.clone(), v.clone())));
    Ok(())
}

pub fn record_graph_attributes(
    graph: &mut TestGraph,
    attributes: &Attributes,
) -> Result<(), ProviderError> {
    graph.graph_attributes = Some(attributes.clone());
    Ok(())
}

/// Importer with the two required providers only.
pub fn importer<'a>() -> DotImporter<'a, TestGraph> {
    DotImporter::new(provide_vertex, provide_edge)
}

/// Importer with both updaters.
pub fn full_importer<'a>() -> DotImporter<'a, TestGraph> {
    importer()
        .with_vertex_updater(merge_attributes)
        .with_component_updater(record_graph_attributes)
}

fn quote(text: &str) -> String {
    format!("\"{}\"", text.replace('"', "\\\""))
}

fn write_attributes(out: &mut String, attributes: &Attributes) {
    if attributes.is_empty() {
        return;
    }
    let pairs: Vec<_> = attributes
        .iter()
        .map(|(key, value)| format!("{}={}", quote(key), quote(value)))
        .collect();
    let _ = write!(out, " [{}]", pairs.join(", "));
}

/// Serialize `graph` as a DOT document.
pub fn export(graph: &TestGraph, name: &str) -> String {
    let (keyword, operator) = if graph.directed {
        ("digraph", "->")
    } else {
        ("graph", "--")
    };

    let mut out = String::new();
    let _ = writeln!(out, "{keyword} {} {{", quote(name));
    for vertex in &graph.vertices {
        let _ = write!(out, "  {}", quote(vertex.id()));
        write_attributes(&mut out, &vertex.attributes());
        out.push_str(";\n");
    }
    for (source, target, edge) in &graph.edges {
        let _ = write!(out, "  {} {operator} {}", quote(source), quote(target));
        write_attributes(&mut out, &edge.attributes);
        out.push_str(";\n");
    }
    out.push_str("}\n");
    out
}
