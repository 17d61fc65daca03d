use crate::{Document, ErrorCode, Statement, parse};

fn parse_ok(source: &str) -> Document {
    match parse(source) {
        Ok(document) => document,
        Err(diagnostic) => panic!("failed to parse {source:?}: {diagnostic}"),
    }
}

fn parse_err(source: &str) -> crate::Diagnostic {
    match parse(source) {
        Ok(document) => panic!("expected {source:?} to fail, got {document:?}"),
        Err(diagnostic) => diagnostic,
    }
}

fn vertex_ids(document: &Document) -> Vec<&str> {
    document
        .statements
        .iter()
        .filter_map(|statement| match statement.inner() {
            Statement::Vertex(vertex) => Some(vertex.id.as_str()),
            _ => None,
        })
        .collect()
}

#[test]
fn test_empty_input() {
    for source in ["", "   \n\t ", "// comment only", "/* block */"] {
        let diagnostic = parse_err(source);
        assert_eq!(diagnostic.code(), ErrorCode::E000);
        assert_eq!(diagnostic.message(), "Dot string was empty");
    }
}

#[test]
fn test_garbage_is_invalid_header() {
    let diagnostic = parse_err("jsfhg kjdsf hjkdsf\n");
    assert_eq!(diagnostic.code(), ErrorCode::E100);
    assert_eq!(diagnostic.message(), "Invalid Header");
}

#[test]
fn test_invalid_headers() {
    for source in [
        " {}",
        "strict {}",
        "id {}",
        "strict id {}",
        "id strict {}",
        "id strict graph {}",
        "graph strict id {}",
        "graph G",
        "digraph G [",
        "strict strict graph {}",
    ] {
        let diagnostic = parse_err(source);
        assert_eq!(diagnostic.code(), ErrorCode::E100, "{source:?}");
        assert_eq!(diagnostic.message(), "Invalid Header");
    }
}

#[test]
fn test_malformed_graph_id() {
    let diagnostic = parse_err("graph 2test {\n}\n");
    assert_eq!(diagnostic.code(), ErrorCode::E101);
    assert_eq!(
        diagnostic.message(),
        "ID in the graph is not formatted correctly: '2test'"
    );

    for (source, raw) in [
        ("graph my-graph {\n}\n", "my-graph"),
        ("graph G-1 {}", "G-1"),
        ("digraph a.b {}", "a.b"),
    ] {
        let diagnostic = parse_err(source);
        assert_eq!(diagnostic.code(), ErrorCode::E101, "{source:?}");
        assert_eq!(
            diagnostic.message(),
            format!("ID in the graph is not formatted correctly: '{raw}'")
        );
    }
}

#[test]
fn test_separate_words_after_graph_keyword() {
    let diagnostic = parse_err("graph a b {}");
    assert_eq!(diagnostic.code(), ErrorCode::E100);
}

#[test]
fn test_header_variants() {
    let document = parse_ok("strict graph MyGraph {\n}\n");
    assert!(document.header.strict);
    assert!(!document.header.directed);
    assert_eq!(
        document.header.id.as_ref().map(|id| id.as_str()),
        Some("MyGraph")
    );
    assert!(document.statements.is_empty());

    let document = parse_ok("DiGraph \"my graph\" {}");
    assert!(document.header.directed);
    assert_eq!(
        document.header.id.as_ref().map(|id| id.as_str()),
        Some("my graph")
    );

    let document = parse_ok("graph 42 {}");
    assert_eq!(
        document.header.id.as_ref().map(|id| id.as_str()),
        Some("42")
    );

    let document = parse_ok("graph {}");
    assert!(document.header.id.is_none());
}

#[test]
fn test_statements_without_separators() {
    let document = parse_ok("graph { a b ; ; c\n d }");
    assert_eq!(vertex_ids(&document), vec!["a", "b", "c", "d"]);
}

#[test]
fn test_edge_chain_with_attributes() {
    let document = parse_ok("digraph { a -> b -> c [label = \"x\", weight = 2]; }");
    let [statement] = document.statements.as_slice() else {
        panic!("expected one statement");
    };
    let Statement::EdgeChain(chain) = statement.inner() else {
        panic!("expected an edge chain");
    };

    assert_eq!(chain.head.as_str(), "a");
    assert_eq!(chain.links.len(), 2);
    assert_eq!(chain.links[1].target.as_str(), "c");
    assert_eq!(chain.attributes.get("label").map(String::as_str), Some("x"));
    assert_eq!(chain.attributes.get("weight").map(String::as_str), Some("2"));
}

#[test]
fn test_mixed_edge_operators_are_syntactically_valid() {
    let document = parse_ok("graph { a -- b -> c }");
    let chain = document.edge_chains().next().expect("edge chain");
    let operators: Vec<_> = chain
        .edges()
        .map(|(_, operator, _)| operator.as_str())
        .collect();
    assert_eq!(operators, vec!["--", "->"]);
}

#[test]
fn test_node_and_edge_are_ordinary_ids() {
    let document = parse_ok("graph { node [label = \"x\"]; edge; subgraph }");
    assert_eq!(vertex_ids(&document), vec!["node", "edge", "subgraph"]);
}

#[test]
fn test_graph_attribute_statements() {
    let document = parse_ok("graph { rankdir = LR; graph [bgcolor = \"#ffffff\", size = 7.5] }");
    let attributes: Vec<_> = document
        .statements
        .iter()
        .filter_map(|statement| match statement.inner() {
            Statement::GraphAttributes(attributes) => Some(attributes.clone()),
            _ => None,
        })
        .collect();

    assert_eq!(attributes.len(), 2);
    assert_eq!(attributes[0].get("rankdir").map(String::as_str), Some("LR"));
    assert_eq!(
        attributes[1].get("bgcolor").map(String::as_str),
        Some("#ffffff")
    );
    assert_eq!(attributes[1].get("size").map(String::as_str), Some("7.5"));
}

#[test]
fn test_attribute_pairs_separated_by_adjacency() {
    let document = parse_ok("graph { 1 [ label = \"bob\" \"foo\"=bar ] }");
    let Statement::Vertex(vertex) = document.statements[0].inner() else {
        panic!("expected a vertex");
    };
    assert_eq!(vertex.attributes.get("label").map(String::as_str), Some("bob"));
    assert_eq!(vertex.attributes.get("foo").map(String::as_str), Some("bar"));
}

#[test]
fn test_duplicate_attribute_last_wins() {
    let document = parse_ok("graph { a [color = red; color = blue] }");
    let Statement::Vertex(vertex) = document.statements[0].inner() else {
        panic!("expected a vertex");
    };
    assert_eq!(vertex.attributes.len(), 1);
    assert_eq!(vertex.attributes.get("color").map(String::as_str), Some("blue"));
}

#[test]
fn test_valueless_attribute_between_boundaries_is_ignored() {
    let document = parse_ok("graph { a [filled, color = red; bold] }");
    let Statement::Vertex(vertex) = document.statements[0].inner() else {
        panic!("expected a vertex");
    };
    assert_eq!(vertex.attributes.len(), 1);
    assert_eq!(vertex.attributes.get("color").map(String::as_str), Some("red"));
}

#[test]
fn test_invalid_attributes() {
    for source in [
        "graph {\n 1 [ label = \"bob\" \"foo\" ]\n}",
        "graph {\n 1 -- 2 [ label = friend foo]\n}",
        "graph { a [label = ] }",
        "graph { a [graph = x] }",
        "graph { a [label = strict] }",
        "graph { a [label = x }",
        "graph { a [label = x",
        "graph { a [ = x] }",
    ] {
        let diagnostic = parse_err(source);
        assert_eq!(diagnostic.code(), ErrorCode::E300, "{source:?}");
        assert_eq!(diagnostic.message(), "Invalid attributes");
    }
}

#[test]
fn test_labels_with_semicolons_and_dashes() {
    let document = parse_ok("graph { a [label = \"x; y -- z -> w\"] }");
    let Statement::Vertex(vertex) = document.statements[0].inner() else {
        panic!("expected a vertex");
    };
    assert_eq!(
        vertex.attributes.get("label").map(String::as_str),
        Some("x; y -- z -> w")
    );
}

#[test]
fn test_escaped_quotes_in_ids_and_values() {
    let document = parse_ok(r#"graph { "say \"hi\"" [label = "a \"b\""] }"#);
    let Statement::Vertex(vertex) = document.statements[0].inner() else {
        panic!("expected a vertex");
    };
    assert_eq!(vertex.id.as_str(), "say \"hi\"");
    assert_eq!(
        vertex.attributes.get("label").map(String::as_str),
        Some("a \"b\"")
    );
}

#[test]
fn test_malformed_statement_id() {
    let diagnostic = parse_err("graph { 2test }");
    assert_eq!(diagnostic.code(), ErrorCode::E202);
    assert_eq!(diagnostic.message(), "ID is not formatted correctly: '2test'");

    let diagnostic = parse_err("graph { a -- #fff }");
    assert_eq!(diagnostic.code(), ErrorCode::E202);
    assert_eq!(diagnostic.message(), "ID is not formatted correctly: '#fff'");
}

#[test]
fn test_invalid_statements() {
    let diagnostic = parse_err("graph { a -> }");
    assert_eq!(diagnostic.code(), ErrorCode::E200);
    assert_eq!(
        diagnostic.message(),
        "invalid statement: unexpected token `}`"
    );

    let diagnostic = parse_err("graph { [color = red] }");
    assert_eq!(diagnostic.code(), ErrorCode::E200);
    assert_eq!(
        diagnostic.message(),
        "invalid statement: unexpected token `[`"
    );

    let diagnostic = parse_err("graph { a = ; }");
    assert_eq!(diagnostic.code(), ErrorCode::E200);

    let diagnostic = parse_err("graph { graph { } }");
    assert_eq!(diagnostic.code(), ErrorCode::E200);
}

#[test]
fn test_missing_closing_brace() {
    let diagnostic = parse_err("digraph G {\n a -> b\n");
    assert_eq!(diagnostic.code(), ErrorCode::E201);
    assert_eq!(
        diagnostic.message(),
        "unexpected end of input, expected `}`"
    );
}

#[test]
fn test_content_after_closing_brace_is_ignored() {
    let document = parse_ok("graph { a } b c [");
    assert_eq!(vertex_ids(&document), vec!["a"]);

    // Lexical errors after the body do not matter either
    parse_ok("graph { a } $");
    parse_ok("graph { a } \"unterminated");
}

#[test]
fn test_lexical_error_inside_document_is_reported() {
    let diagnostic = parse_err("graph { a [label = \"open] }");
    assert_eq!(diagnostic.code(), ErrorCode::E001);

    let diagnostic = parse_err("graph \"G {}");
    assert_eq!(diagnostic.code(), ErrorCode::E001);

    let diagnostic = parse_err("graph { a $ b }");
    assert_eq!(diagnostic.code(), ErrorCode::E002);

    let diagnostic = parse_err("$");
    assert_eq!(diagnostic.code(), ErrorCode::E002);
}

#[test]
fn test_first_violation_wins() {
    // The statement error at `[` comes before the lexical error at `$`
    let diagnostic = parse_err("graph { [ $ }");
    assert_eq!(diagnostic.code(), ErrorCode::E200);
}

#[test]
fn test_diagnostic_spans_point_into_source() {
    let source = "graph {\n  a [label = x y]\n}";
    let diagnostic = parse_err(source);
    let span = diagnostic.primary_span().expect("primary span");
    assert_eq!(&source[span.start()..span.end()], "[label = x y");
    assert_eq!(span.line_col(source), (2, 5));
}
