//! Path State and materialized paths.

use rustc_hash::FxHashMap;
use serde::Serialize;
use serde_json::{json, Value};

use crate::graph::{DocumentId, Edge, Vertex};

/// The chain from the traversal root to the current vertex, with
/// per-path membership counts for uniqueness checks.
///
/// Vertices may repeat on a path when vertex uniqueness is `none`, so
/// membership is tracked as a multiset.
#[derive(Debug, Clone)]
pub struct PathState {
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
    vertex_counts: FxHashMap<DocumentId, usize>,
    edge_counts: FxHashMap<DocumentId, usize>,
}

impl PathState {
    /// Creates a path holding only the start vertex.
    #[must_use]
    pub fn new(start: Vertex) -> Self {
        let mut vertex_counts = FxHashMap::default();
        vertex_counts.insert(start.id().clone(), 1);
        Self {
            vertices: vec![start],
            edges: Vec::new(),
            vertex_counts,
            edge_counts: FxHashMap::default(),
        }
    }

    /// Appends a step.
    pub fn push(&mut self, vertex: Vertex, edge: Edge) {
        *self.vertex_counts.entry(vertex.id().clone()).or_insert(0) += 1;
        *self.edge_counts.entry(edge.id().clone()).or_insert(0) += 1;
        self.vertices.push(vertex);
        self.edges.push(edge);
    }

    /// Removes the last step. The start vertex is never removed.
    pub fn pop(&mut self) -> Option<(Vertex, Edge)> {
        let edge = self.edges.pop()?;
        let vertex = self.vertices.pop()?;
        release(&mut self.vertex_counts, vertex.id());
        release(&mut self.edge_counts, edge.id());
        Some((vertex, edge))
    }

    /// Returns the vertex at the end of the path.
    #[must_use]
    pub fn current(&self) -> &Vertex {
        // `vertices` always holds the start vertex.
        &self.vertices[self.vertices.len() - 1]
    }

    /// Number of edges on the path.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.edges.len()
    }

    #[must_use]
    pub fn contains_vertex(&self, id: &DocumentId) -> bool {
        self.vertex_counts.contains_key(id)
    }

    #[must_use]
    pub fn contains_edge(&self, id: &DocumentId) -> bool {
        self.edge_counts.contains_key(id)
    }

    #[must_use]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Copies the current chain into an owned [`Path`].
    #[must_use]
    pub fn snapshot(&self) -> Path {
        Path {
            vertices: self.vertices.clone(),
            edges: self.edges.clone(),
        }
    }
}

fn release(counts: &mut FxHashMap<DocumentId, usize>, id: &DocumentId) {
    if let Some(count) = counts.get_mut(id) {
        *count -= 1;
        if *count == 0 {
            counts.remove(id);
        }
    }
}

/// An owned vertex/edge chain, `vertices.len() == edges.len() + 1`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Path {
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
}

impl Path {
    #[must_use]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Number of edges.
    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// True for a path consisting of the start vertex only.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// First vertex.
    #[must_use]
    pub fn source(&self) -> &Vertex {
        &self.vertices[0]
    }

    /// Last vertex.
    #[must_use]
    pub fn destination(&self) -> &Vertex {
        &self.vertices[self.vertices.len() - 1]
    }

    /// Renders `{edges, vertices}`.
    #[must_use]
    pub fn to_value(&self) -> Value {
        json!({
            "edges": self.edges.iter().map(Edge::to_document).collect::<Vec<_>>(),
            "vertices": self.vertices.iter().map(Vertex::to_document).collect::<Vec<_>>(),
        })
    }

    /// Renders `{vertices, edges, source, destination}`, the shape returned
    /// by `PATHS`.
    #[must_use]
    pub fn to_value_with_endpoints(&self) -> Value {
        json!({
            "vertices": self.vertices.iter().map(Vertex::to_document).collect::<Vec<_>>(),
            "edges": self.edges.iter().map(Edge::to_document).collect::<Vec<_>>(),
            "source": self.source().to_document(),
            "destination": self.destination().to_document(),
        })
    }
}
