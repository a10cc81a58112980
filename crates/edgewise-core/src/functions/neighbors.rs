//! `EDGES` and `NEIGHBORS`: single-hop lookups without the enumerator.

use serde_json::{json, Value};
use tracing::warn;

use crate::error::Result;
use crate::graph::{
    AdjacencyProvider, Direction, Document, DocumentId, Edge, Vertex, VertexResolver,
};
use crate::traversal::matches_any;

use super::GraphFunctions;

/// A neighbor returned by `NEIGHBORS`.
#[derive(Debug, Clone, PartialEq)]
pub struct Neighbor {
    pub vertex: Vertex,
    /// The edge connecting the start vertex to `vertex`.
    pub edge: Edge,
}

impl Neighbor {
    /// Renders `{edge, vertex}`.
    #[must_use]
    pub fn to_value(&self) -> Value {
        json!({
            "edge": self.edge.to_document(),
            "vertex": self.vertex.to_document(),
        })
    }
}

impl GraphFunctions<'_> {
    /// `EDGES(edgeCollection, vertex, direction, examples?)`.
    ///
    /// `vertex` must be a full `collection/key` id. Returns the incident
    /// edges in collection order, restricted to those matching one of
    /// `examples` when given. An unknown vertex yields no edges.
    ///
    /// # Errors
    ///
    /// Returns `Error::CollectionNotFound` if the edge collection or the
    /// vertex's collection does not exist, and `Error::InvalidDocumentId`
    /// for a malformed id.
    pub fn edges(
        &self,
        edge_collection: &str,
        vertex: &str,
        direction: Direction,
        examples: Option<&[Document]>,
    ) -> Result<Vec<Edge>> {
        let vertex: DocumentId = vertex.parse()?;
        let edges = self.graph.edge_collection(edge_collection)?;
        Ok(retain_examples(
            edges.incident_edges(&vertex, direction)?,
            examples,
        ))
    }

    /// `NEIGHBORS(vertexCollection, edgeCollection, vertex, direction, examples?)`.
    ///
    /// `vertex` may be a bare key inside `vertex_collection`. Self loops back
    /// to the start vertex and neighbors that cannot be resolved are skipped.
    ///
    /// # Errors
    ///
    /// Returns `Error::CollectionNotFound` if a collection does not exist.
    pub fn neighbors(
        &self,
        vertex_collection: &str,
        edge_collection: &str,
        vertex: &str,
        direction: Direction,
        examples: Option<&[Document]>,
    ) -> Result<Vec<Neighbor>> {
        let edges = self.bind(vertex_collection, edge_collection)?;
        let start = DocumentId::resolve(vertex, vertex_collection)?;
        let incident = retain_examples(edges.incident_edges(&start, direction)?, examples);

        let mut neighbors = Vec::new();
        for edge in incident {
            let target = edge.neighbor_of(&start, direction);
            if target == &start {
                continue;
            }
            match self.graph.resolve_vertex(target)? {
                Some(vertex) => neighbors.push(Neighbor { vertex, edge }),
                None => warn!(edge = %edge.id(), vertex = %target, "skipping edge to missing vertex"),
            }
        }
        Ok(neighbors)
    }
}

fn retain_examples(edges: Vec<Edge>, examples: Option<&[Document]>) -> Vec<Edge> {
    match examples {
        Some(examples) => edges
            .into_iter()
            .filter(|edge| matches_any(|name| edge.attribute(name), examples))
            .collect(),
        None => edges,
    }
}
