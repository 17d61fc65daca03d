//! Importing into petgraph's `GraphMap`.

#![cfg(feature = "petgraph")]

use dotgraph::{Attributes, DotImporter, ErrorKind, ProviderError};
use petgraph::graphmap::{DiGraphMap, UnGraphMap};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn numeric_vertex(id: &str, _: &Attributes) -> Result<u32, ProviderError> {
    Ok(id.parse::<u32>()?)
}

fn weighted_edge(
    _: &u32,
    _: &u32,
    _: Option<&str>,
    attributes: &Attributes,
) -> Result<f64, ProviderError> {
    match attributes.get("weight") {
        Some(weight) => Ok(weight.parse::<f64>()?),
        None => Ok(1.0),
    }
}

#[test]
fn test_import_into_digraph_map() {
    init_logger();
    let mut graph: DiGraphMap<u32, f64> = DiGraphMap::new();
    DotImporter::new(numeric_vertex, weighted_edge)
        .import_graph(
            &mut graph,
            "digraph routes {\n 1 -> 2 -> 3 [weight = 2.5];\n 3 -> 1;\n 4\n}",
        )
        .expect("import succeeds");

    assert_eq!(graph.node_count(), 4);
    assert_eq!(graph.edge_count(), 3);
    assert_eq!(graph.edge_weight(1, 2), Some(&2.5));
    assert_eq!(graph.edge_weight(3, 1), Some(&1.0));
    assert!(graph.contains_node(4));
}

#[test]
fn test_graph_map_accepts_strict_documents() {
    init_logger();
    let mut graph: UnGraphMap<u32, f64> = UnGraphMap::new();
    DotImporter::new(numeric_vertex, weighted_edge)
        .import_graph(&mut graph, "strict graph { 1 -- 2; 2 -- 1 [weight = 9] }")
        .expect("graph map is a simple graph");

    // The reversed duplicate is refused, the first weight stays
    assert_eq!(graph.edge_count(), 1);
    assert_eq!(graph.edge_weight(1, 2), Some(&1.0));
}

#[test]
fn test_graph_map_directedness_is_checked() {
    init_logger();
    let mut graph: UnGraphMap<u32, f64> = UnGraphMap::new();
    let error = DotImporter::new(numeric_vertex, weighted_edge)
        .import_graph(&mut graph, "digraph { 1 -> 2 }")
        .expect_err("directed document");
    assert_eq!(
        error.to_string(),
        "input asks for directed graph but undirected graph provided."
    );
}

#[test]
fn test_unparsable_id_is_construction_error() {
    init_logger();
    let mut graph: DiGraphMap<u32, f64> = DiGraphMap::new();
    let error = DotImporter::new(numeric_vertex, weighted_edge)
        .import_graph(&mut graph, "digraph { 1 -> two }")
        .expect_err("`two` is not a number");

    assert_eq!(error.kind(), ErrorKind::Construction);
    assert!(error.to_string().starts_with("failed to construct vertex `two`"));
    assert_eq!(graph.node_count(), 1);
}
