//! Storage-facing seams consumed by the traversal engine.
//!
//! The engine never touches storage directly. Any store can back a traversal
//! by implementing [`AdjacencyProvider`] for an edge collection and
//! [`VertexResolver`] for its documents.

use crate::error::Result;

use super::types::{DocumentId, Direction, Edge, Vertex};

/// Incident-edge lookup for one edge collection.
///
/// Implementations must return edges in an order that is stable across
/// repeated calls within one traversal, and must fail with
/// `Error::CollectionNotFound` when the collection segment of `vertex` does
/// not exist.
pub trait AdjacencyProvider {
    /// Returns the edges incident to `vertex` for the given direction.
    ///
    /// For [`Direction::Any`] each edge is reported once, even a self loop.
    fn incident_edges(&self, vertex: &DocumentId, direction: Direction) -> Result<Vec<Edge>>;
}

/// Vertex document lookup.
pub trait VertexResolver {
    /// Resolves a vertex, returning `Ok(None)` when the document is absent.
    ///
    /// Fails with `Error::CollectionNotFound` if the collection is unknown.
    fn resolve_vertex(&self, id: &DocumentId) -> Result<Option<Vertex>>;

    /// Returns true if a vertex or edge collection with this name exists.
    fn has_collection(&self, name: &str) -> bool;

    /// Returns every vertex of a collection in stable collection order.
    fn scan_vertices(&self, collection: &str) -> Result<Vec<Vertex>>;
}

impl<T: AdjacencyProvider + ?Sized> AdjacencyProvider for &T {
    fn incident_edges(&self, vertex: &DocumentId, direction: Direction) -> Result<Vec<Edge>> {
        (**self).incident_edges(vertex, direction)
    }
}

impl<T: VertexResolver + ?Sized> VertexResolver for &T {
    fn resolve_vertex(&self, id: &DocumentId) -> Result<Option<Vertex>> {
        (**self).resolve_vertex(id)
    }

    fn has_collection(&self, name: &str) -> bool {
        (**self).has_collection(name)
    }

    fn scan_vertices(&self, collection: &str) -> Result<Vec<Vertex>> {
        (**self).scan_vertices(collection)
    }
}
