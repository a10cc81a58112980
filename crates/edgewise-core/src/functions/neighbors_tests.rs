//! Tests for EDGES and NEIGHBORS.

use super::{GraphFunctions, Neighbor};
use crate::error::Error;
use crate::graph::{Direction, Document, DocumentId, Edge, InMemoryGraph, Vertex};
use serde_json::{json, Value};

fn add_edge(graph: &InMemoryGraph, key: &str, from: &str, to: &str) {
    graph
        .insert_edge(
            Edge::new(
                DocumentId::new("edges", key).unwrap(),
                DocumentId::new("vertices", from).unwrap(),
                DocumentId::new("vertices", to).unwrap(),
            )
            .with_property("what", json!(format!("{from}->{to}"))),
        )
        .unwrap();
}

/// v1..v7, with v5 isolated.
fn build_neighbors_graph() -> InMemoryGraph {
    let graph = InMemoryGraph::new();
    graph.create_vertex_collection("vertices").unwrap();
    graph.create_edge_collection("edges").unwrap();
    for i in 1..=7 {
        graph
            .insert_vertex(Vertex::new(DocumentId::new("vertices", &format!("v{i}")).unwrap()))
            .unwrap();
    }
    let edges = [
        ("v1", "v2"),
        ("v1", "v3"),
        ("v2", "v3"),
        ("v3", "v4"),
        ("v3", "v6"),
        ("v3", "v7"),
        ("v4", "v2"),
        ("v7", "v3"),
        ("v6", "v3"),
    ];
    for (i, (from, to)) in edges.into_iter().enumerate() {
        add_edge(&graph, &format!("e{}", i + 1), from, to);
    }
    graph
}

fn whats(edges: &[Edge]) -> Vec<String> {
    let mut whats: Vec<String> = edges
        .iter()
        .map(|e| e.property("what").and_then(Value::as_str).unwrap().to_string())
        .collect();
    whats.sort();
    whats
}

fn pairs(neighbors: &[Neighbor]) -> Vec<(String, String)> {
    let mut pairs: Vec<(String, String)> = neighbors
        .iter()
        .map(|n| {
            (
                n.vertex.id().key().to_string(),
                n.edge.property("what").and_then(Value::as_str).unwrap().to_string(),
            )
        })
        .collect();
    pairs.sort();
    pairs
}

fn example(what: &str) -> Document {
    let mut doc = Document::new();
    doc.insert("what".to_string(), json!(what));
    doc
}

#[test]
fn test_edges_any() {
    let graph = build_neighbors_graph();
    let functions = GraphFunctions::with_defaults(&graph);

    let edges = functions
        .edges("edges", "vertices/v1", Direction::Any, None)
        .unwrap();
    assert_eq!(whats(&edges), vec!["v1->v2", "v1->v3"]);

    let edges = functions
        .edges("edges", "vertices/v2", Direction::Any, None)
        .unwrap();
    assert_eq!(whats(&edges), vec!["v1->v2", "v2->v3", "v4->v2"]);

    let edges = functions
        .edges("edges", "vertices/v3", Direction::Any, None)
        .unwrap();
    assert_eq!(
        whats(&edges),
        vec!["v1->v3", "v2->v3", "v3->v4", "v3->v6", "v3->v7", "v6->v3", "v7->v3"]
    );
}

#[test]
fn test_edges_inbound_and_outbound() {
    let graph = build_neighbors_graph();
    let functions = GraphFunctions::with_defaults(&graph);

    let edges = functions
        .edges("edges", "vertices/v2", Direction::Inbound, None)
        .unwrap();
    assert_eq!(whats(&edges), vec!["v1->v2", "v4->v2"]);

    let edges = functions
        .edges("edges", "vertices/v3", Direction::Inbound, None)
        .unwrap();
    assert_eq!(whats(&edges), vec!["v1->v3", "v2->v3", "v6->v3", "v7->v3"]);

    let edges = functions
        .edges("edges", "vertices/v3", Direction::Outbound, None)
        .unwrap();
    assert_eq!(whats(&edges), vec!["v3->v4", "v3->v6", "v3->v7"]);
}

#[test]
fn test_edges_in_collection_order() {
    let graph = build_neighbors_graph();
    let functions = GraphFunctions::with_defaults(&graph);

    let keys: Vec<String> = functions
        .edges("edges", "vertices/v3", Direction::Any, None)
        .unwrap()
        .iter()
        .map(|e| e.id().key().to_string())
        .collect();
    assert_eq!(keys, vec!["e2", "e3", "e4", "e5", "e6", "e8", "e9"]);
}

#[test]
fn test_edges_with_examples() {
    let graph = build_neighbors_graph();
    let functions = GraphFunctions::with_defaults(&graph);

    let examples = vec![example("v1->v3"), example("v3->v6")];
    let edges = functions
        .edges("edges", "vertices/v3", Direction::Any, Some(&examples))
        .unwrap();
    assert_eq!(whats(&edges), vec!["v1->v3", "v3->v6"]);

    let edges = functions
        .edges("edges", "vertices/v3", Direction::Any, Some(&[]))
        .unwrap();
    assert!(edges.is_empty());
}

#[test]
fn test_edges_unknown_vertex_is_empty() {
    let graph = build_neighbors_graph();
    let functions = GraphFunctions::with_defaults(&graph);

    let edges = functions
        .edges("edges", "vertices/v8", Direction::Any, None)
        .unwrap();
    assert!(edges.is_empty());

    let edges = functions
        .edges("edges", "vertices/thefox", Direction::Outbound, None)
        .unwrap();
    assert!(edges.is_empty());
}

#[test]
fn test_edges_unknown_collection() {
    let graph = build_neighbors_graph();
    let functions = GraphFunctions::with_defaults(&graph);

    let result = functions.edges("edges", "thefox/thefox", Direction::Any, None);
    assert_eq!(result, Err(Error::CollectionNotFound("thefox".to_string())));

    let result = functions.edges("nope", "vertices/v1", Direction::Any, None);
    assert_eq!(result, Err(Error::CollectionNotFound("nope".to_string())));
}

#[test]
fn test_edges_requires_full_id() {
    let graph = build_neighbors_graph();
    let functions = GraphFunctions::with_defaults(&graph);

    let result = functions.edges("edges", "v1", Direction::Any, None);
    assert!(matches!(result, Err(Error::InvalidDocumentId(_))));
}

#[test]
fn test_edges_self_loop_reported_once() {
    let graph = build_neighbors_graph();
    add_edge(&graph, "loop", "v5", "v5");
    let functions = GraphFunctions::with_defaults(&graph);

    let edges = functions
        .edges("edges", "vertices/v5", Direction::Any, None)
        .unwrap();
    assert_eq!(edges.len(), 1);
}

#[test]
fn test_neighbors_any() {
    let graph = build_neighbors_graph();
    let functions = GraphFunctions::with_defaults(&graph);

    let neighbors = functions
        .neighbors("vertices", "edges", "vertices/v3", Direction::Any, None)
        .unwrap();
    let expected = [
        ("v1", "v1->v3"),
        ("v2", "v2->v3"),
        ("v4", "v3->v4"),
        ("v6", "v3->v6"),
        ("v6", "v6->v3"),
        ("v7", "v3->v7"),
        ("v7", "v7->v3"),
    ]
    .map(|(k, w)| (k.to_string(), w.to_string()));
    assert_eq!(pairs(&neighbors), expected.to_vec());
}

#[test]
fn test_neighbors_inbound_with_bare_key() {
    let graph = build_neighbors_graph();
    let functions = GraphFunctions::with_defaults(&graph);

    let neighbors = functions
        .neighbors("vertices", "edges", "v2", Direction::Inbound, None)
        .unwrap();
    let expected = [("v1", "v1->v2"), ("v4", "v4->v2")]
        .map(|(k, w)| (k.to_string(), w.to_string()));
    assert_eq!(pairs(&neighbors), expected.to_vec());
}

#[test]
fn test_neighbors_with_examples() {
    let graph = build_neighbors_graph();
    let functions = GraphFunctions::with_defaults(&graph);

    let examples = vec![example("v3->v7"), example("v7->v3")];
    let neighbors = functions
        .neighbors("vertices", "edges", "v3", Direction::Any, Some(&examples))
        .unwrap();
    assert_eq!(neighbors.len(), 2);
    assert!(neighbors.iter().all(|n| n.vertex.id().key() == "v7"));
}

#[test]
fn test_neighbors_isolated_vertex_is_empty() {
    let graph = build_neighbors_graph();
    let functions = GraphFunctions::with_defaults(&graph);

    let neighbors = functions
        .neighbors("vertices", "edges", "v5", Direction::Any, None)
        .unwrap();
    assert!(neighbors.is_empty());
}

#[test]
fn test_neighbors_skip_self_loop() {
    let graph = build_neighbors_graph();
    add_edge(&graph, "loop", "v5", "v5");
    let functions = GraphFunctions::with_defaults(&graph);

    let neighbors = functions
        .neighbors("vertices", "edges", "v5", Direction::Any, None)
        .unwrap();
    assert!(neighbors.is_empty());
}

#[test]
fn test_neighbors_skip_missing_vertex() {
    let graph = build_neighbors_graph();
    add_edge(&graph, "ghost", "v1", "ghost");
    let functions = GraphFunctions::with_defaults(&graph);

    let edges = functions
        .edges("edges", "vertices/v1", Direction::Outbound, None)
        .unwrap();
    assert_eq!(edges.len(), 3);

    let neighbors = functions
        .neighbors("vertices", "edges", "v1", Direction::Outbound, None)
        .unwrap();
    let keys: Vec<&str> = neighbors.iter().map(|n| n.vertex.id().key()).collect();
    assert_eq!(keys, vec!["v2", "v3"]);
}

#[test]
fn test_neighbors_unknown_vertex_collection() {
    let graph = build_neighbors_graph();
    let functions = GraphFunctions::with_defaults(&graph);

    let result = functions.neighbors("nope", "edges", "v1", Direction::Any, None);
    assert_eq!(result, Err(Error::CollectionNotFound("nope".to_string())));
}

#[test]
fn test_neighbor_to_value() {
    let graph = build_neighbors_graph();
    let functions = GraphFunctions::with_defaults(&graph);

    let neighbors = functions
        .neighbors("vertices", "edges", "v4", Direction::Outbound, None)
        .unwrap();
    assert_eq!(neighbors.len(), 1);
    let value = neighbors[0].to_value();
    assert_eq!(value["vertex"]["_id"], json!("vertices/v2"));
    assert_eq!(value["edge"]["_from"], json!("vertices/v4"));
    assert_eq!(value["edge"]["what"], json!("v4->v2"));
}
