//! Document/edge graph model.
//!
//! Provides document identifiers, vertex and edge documents, the provider
//! traits consumed by the traversal engine, and an in-memory store that
//! implements them.
//!
//! # Example
//!
//! ```rust
//! use edgewise_core::graph::{AdjacencyProvider, Direction, Edge, InMemoryGraph, Vertex};
//!
//! let graph = InMemoryGraph::new();
//! graph.create_vertex_collection("v").unwrap();
//! graph.create_edge_collection("e").unwrap();
//! graph.insert_vertex(Vertex::new("v/a".parse().unwrap())).unwrap();
//! graph.insert_vertex(Vertex::new("v/b".parse().unwrap())).unwrap();
//! graph
//!     .insert_edge(Edge::new(
//!         "e/ab".parse().unwrap(),
//!         "v/a".parse().unwrap(),
//!         "v/b".parse().unwrap(),
//!     ))
//!     .unwrap();
//!
//! let edges = graph.edge_collection("e").unwrap();
//! let out = edges
//!     .incident_edges(&"v/a".parse().unwrap(), Direction::Outbound)
//!     .unwrap();
//! assert_eq!(out.len(), 1);
//! ```

mod provider;
mod store;
mod types;

#[cfg(test)]
mod store_tests;

pub use provider::{AdjacencyProvider, VertexResolver};
pub use store::{EdgeCollectionRef, InMemoryGraph};
pub use types::{Direction, Document, DocumentId, Edge, Vertex};
