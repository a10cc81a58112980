//! Tests for InMemoryGraph.

use super::provider::{AdjacencyProvider, VertexResolver};
use super::store::InMemoryGraph;
use super::types::{Direction, DocumentId, Edge, Vertex};
use crate::error::Error;

fn id(s: &str) -> DocumentId {
    s.parse().unwrap()
}

fn edge(key: &str, from: &str, to: &str) -> Edge {
    Edge::new(id(&format!("e/{key}")), id(from), id(to))
}

/// Build: a → b, a → c, b → c, c → a (edge keys deliberately out of
/// insertion order).
fn build_test_graph() -> InMemoryGraph {
    let graph = InMemoryGraph::new();
    graph.create_vertex_collection("v").unwrap();
    graph.create_edge_collection("e").unwrap();
    for key in ["a", "b", "c"] {
        graph.insert_vertex(Vertex::new(id(&format!("v/{key}")))).unwrap();
    }
    graph.insert_edge(edge("3", "v/a", "v/c")).unwrap();
    graph.insert_edge(edge("1", "v/a", "v/b")).unwrap();
    graph.insert_edge(edge("2", "v/b", "v/c")).unwrap();
    graph.insert_edge(edge("4", "v/c", "v/a")).unwrap();
    graph
}

fn keys(edges: &[Edge]) -> Vec<&str> {
    edges.iter().map(|e| e.id().key()).collect()
}

#[test]
fn test_create_collection_twice_fails() {
    let graph = InMemoryGraph::new();
    graph.create_vertex_collection("v").unwrap();
    assert_eq!(
        graph.create_edge_collection("v"),
        Err(Error::CollectionExists("v".to_string()))
    );
    assert!(graph.has_collection("v"));
    assert!(!graph.is_edge_collection("v"));
}

#[test]
fn test_insert_and_get_vertex() {
    let graph = build_test_graph();
    assert_eq!(graph.vertex_count("v"), 3);
    assert!(graph.get_vertex(&id("v/a")).is_some());
    assert!(graph.get_vertex(&id("v/zzz")).is_none());
}

#[test]
fn test_insert_duplicate_vertex_fails() {
    let graph = build_test_graph();
    let result = graph.insert_vertex(Vertex::new(id("v/a")));
    assert!(matches!(result, Err(Error::DocumentExists(_))));
}

#[test]
fn test_insert_vertex_unknown_collection_fails() {
    let graph = InMemoryGraph::new();
    let result = graph.insert_vertex(Vertex::new(id("nope/a")));
    assert_eq!(result, Err(Error::CollectionNotFound("nope".to_string())));
}

#[test]
fn test_insert_edge_requires_endpoint_collections() {
    let graph = build_test_graph();
    let result = graph.insert_edge(edge("9", "v/a", "missing/x"));
    assert!(matches!(result, Err(Error::DanglingEdge(_))));

    // Endpoint documents do not have to exist.
    graph.insert_edge(edge("10", "v/a", "v/ghost")).unwrap();
    assert_eq!(graph.edge_count("e"), 5);
}

#[test]
fn test_insert_duplicate_edge_fails() {
    let graph = build_test_graph();
    let result = graph.insert_edge(edge("1", "v/b", "v/a"));
    assert!(matches!(result, Err(Error::DocumentExists(_))));
}

#[test]
fn test_outgoing_in_key_order() {
    let graph = build_test_graph();
    let edges = graph.edge_collection("e").unwrap();
    let out = edges.incident_edges(&id("v/a"), Direction::Outbound).unwrap();
    assert_eq!(keys(&out), vec!["1", "3"]);
}

#[test]
fn test_incoming() {
    let graph = build_test_graph();
    let edges = graph.edge_collection("e").unwrap();
    let inc = edges.incident_edges(&id("v/c"), Direction::Inbound).unwrap();
    assert_eq!(keys(&inc), vec!["2", "3"]);
}

#[test]
fn test_any_merges_in_key_order() {
    let graph = build_test_graph();
    let edges = graph.edge_collection("e").unwrap();
    let any = edges.incident_edges(&id("v/a"), Direction::Any).unwrap();
    assert_eq!(keys(&any), vec!["1", "3", "4"]);
}

#[test]
fn test_any_reports_self_loop_once() {
    let graph = build_test_graph();
    graph.insert_edge(edge("0", "v/b", "v/b")).unwrap();
    let edges = graph.edge_collection("e").unwrap();
    let any = edges.incident_edges(&id("v/b"), Direction::Any).unwrap();
    assert_eq!(keys(&any), vec!["0", "1", "2"]);
}

#[test]
fn test_incident_edges_unknown_vertex_collection() {
    let graph = build_test_graph();
    let edges = graph.edge_collection("e").unwrap();
    let result = edges.incident_edges(&id("thefox/thefox"), Direction::Any);
    assert_eq!(result, Err(Error::CollectionNotFound("thefox".to_string())));
}

#[test]
fn test_incident_edges_unknown_vertex_is_empty() {
    let graph = build_test_graph();
    let edges = graph.edge_collection("e").unwrap();
    let out = edges.incident_edges(&id("v/nobody"), Direction::Outbound).unwrap();
    assert!(out.is_empty());
}

#[test]
fn test_edge_collection_unknown() {
    let graph = build_test_graph();
    assert!(matches!(
        graph.edge_collection("v"),
        Err(Error::CollectionNotFound(_))
    ));
    assert_eq!(graph.edge_collection("e").unwrap().name(), "e");
}

#[test]
fn test_remove_edge_cleans_indexes() {
    let graph = build_test_graph();
    let removed = graph.remove_edge(&id("e/1"));
    assert!(removed.is_some());
    assert!(graph.get_edge(&id("e/1")).is_none());

    let edges = graph.edge_collection("e").unwrap();
    let out = edges.incident_edges(&id("v/a"), Direction::Outbound).unwrap();
    assert_eq!(keys(&out), vec!["3"]);
    let inc = edges.incident_edges(&id("v/b"), Direction::Inbound).unwrap();
    assert!(inc.is_empty());
}

#[test]
fn test_remove_vertex_does_not_cascade() {
    let graph = build_test_graph();
    assert!(graph.remove_vertex(&id("v/b")).is_some());
    assert_eq!(graph.vertex_count("v"), 2);
    assert_eq!(graph.edge_count("e"), 4);
    assert!(graph.resolve_vertex(&id("v/b")).unwrap().is_none());
}

#[test]
fn test_resolve_vertex() {
    let graph = build_test_graph();
    assert!(graph.resolve_vertex(&id("v/a")).unwrap().is_some());
    assert!(graph.resolve_vertex(&id("v/none")).unwrap().is_none());
    assert!(graph.resolve_vertex(&id("e/1")).unwrap().is_none());
    assert!(matches!(
        graph.resolve_vertex(&id("missing/a")),
        Err(Error::CollectionNotFound(_))
    ));
}

#[test]
fn test_scan_vertices_in_key_order() {
    let graph = InMemoryGraph::new();
    graph.create_vertex_collection("v").unwrap();
    for key in ["c", "a", "b"] {
        graph.insert_vertex(Vertex::new(id(&format!("v/{key}")))).unwrap();
    }
    let scanned: Vec<String> = graph
        .scan_vertices("v")
        .unwrap()
        .iter()
        .map(|v| v.id().key().to_string())
        .collect();
    assert_eq!(scanned, vec!["a", "b", "c"]);
    assert!(graph.scan_vertices("nope").is_err());
}

#[test]
fn test_concurrent_readers() {
    use std::sync::Arc;

    let graph = Arc::new(build_test_graph());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let graph = Arc::clone(&graph);
            std::thread::spawn(move || {
                let edges = graph.edge_collection("e").unwrap();
                edges
                    .incident_edges(&id("v/a"), Direction::Any)
                    .unwrap()
                    .len()
            })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), 3);
    }
}
