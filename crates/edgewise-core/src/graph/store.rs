//! In-memory graph store (document and edge collections).
//!
//! Provides per-vertex bidirectional edge indexing for traversal. Documents
//! and adjacency lists are kept in `_key` order, which is the stable
//! collection order every traversal observes.

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::collections::{BTreeMap, BTreeSet};

use crate::error::{Error, Result};

use super::provider::{AdjacencyProvider, VertexResolver};
use super::types::{DocumentId, Direction, Edge, Vertex};

#[derive(Debug, Default)]
struct EdgeCollection {
    /// All edges indexed by key.
    edges: BTreeMap<String, Edge>,
    /// Outgoing edges: `_from` -> edge keys.
    outgoing: FxHashMap<DocumentId, BTreeSet<String>>,
    /// Incoming edges: `_to` -> edge keys.
    incoming: FxHashMap<DocumentId, BTreeSet<String>>,
}

impl EdgeCollection {
    fn insert(&mut self, edge: Edge) {
        let key = edge.id().key().to_string();
        self.outgoing
            .entry(edge.from().clone())
            .or_default()
            .insert(key.clone());
        self.incoming
            .entry(edge.to().clone())
            .or_default()
            .insert(key.clone());
        self.edges.insert(key, edge);
    }

    fn remove(&mut self, key: &str) -> Option<Edge> {
        let edge = self.edges.remove(key)?;
        if let Some(keys) = self.outgoing.get_mut(edge.from()) {
            keys.remove(key);
        }
        if let Some(keys) = self.incoming.get_mut(edge.to()) {
            keys.remove(key);
        }
        Some(edge)
    }

    fn incident(&self, vertex: &DocumentId, direction: Direction) -> Vec<Edge> {
        let empty = BTreeSet::new();
        let outgoing = self.outgoing.get(vertex).unwrap_or(&empty);
        let incoming = self.incoming.get(vertex).unwrap_or(&empty);

        let keys: Vec<&String> = match direction {
            Direction::Outbound => outgoing.iter().collect(),
            Direction::Inbound => incoming.iter().collect(),
            // Union keeps key order and reports a self loop once.
            Direction::Any => outgoing.union(incoming).collect(),
        };

        keys.into_iter()
            .filter_map(|key| self.edges.get(key))
            .cloned()
            .collect()
    }
}

#[derive(Debug, Default)]
struct Collections {
    vertices: FxHashMap<String, BTreeMap<String, Vertex>>,
    edges: FxHashMap<String, EdgeCollection>,
}

impl Collections {
    fn exists(&self, name: &str) -> bool {
        self.vertices.contains_key(name) || self.edges.contains_key(name)
    }
}

/// In-memory storage for vertex and edge collections.
///
/// Readers take a shared lock, so any number of traversals can run against
/// the same store concurrently.
///
/// # Example
///
/// ```rust
/// use edgewise_core::graph::{DocumentId, Edge, InMemoryGraph, Vertex};
///
/// let graph = InMemoryGraph::new();
/// graph.create_vertex_collection("persons").unwrap();
/// graph.create_edge_collection("knows").unwrap();
///
/// let alice = DocumentId::new("persons", "alice").unwrap();
/// let bob = DocumentId::new("persons", "bob").unwrap();
/// graph.insert_vertex(Vertex::new(alice.clone())).unwrap();
/// graph.insert_vertex(Vertex::new(bob.clone())).unwrap();
/// graph
///     .insert_edge(Edge::new("knows/ab".parse().unwrap(), alice, bob))
///     .unwrap();
///
/// assert_eq!(graph.edge_count("knows"), 1);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryGraph {
    collections: RwLock<Collections>,
}

impl InMemoryGraph {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ── Collections ───────────────────────────────────────────────────

    /// Creates a vertex (document) collection.
    ///
    /// # Errors
    ///
    /// Returns `Error::CollectionExists` if the name is taken by any collection.
    pub fn create_vertex_collection(&self, name: &str) -> Result<()> {
        let mut collections = self.collections.write();
        if collections.exists(name) {
            return Err(Error::CollectionExists(name.to_string()));
        }
        collections.vertices.insert(name.to_string(), BTreeMap::new());
        Ok(())
    }

    /// Creates an edge collection.
    ///
    /// # Errors
    ///
    /// Returns `Error::CollectionExists` if the name is taken by any collection.
    pub fn create_edge_collection(&self, name: &str) -> Result<()> {
        let mut collections = self.collections.write();
        if collections.exists(name) {
            return Err(Error::CollectionExists(name.to_string()));
        }
        collections
            .edges
            .insert(name.to_string(), EdgeCollection::default());
        Ok(())
    }

    /// Returns true if `name` is an edge collection.
    #[must_use]
    pub fn is_edge_collection(&self, name: &str) -> bool {
        self.collections.read().edges.contains_key(name)
    }

    /// Returns an adjacency view over one edge collection.
    ///
    /// # Errors
    ///
    /// Returns `Error::CollectionNotFound` if no edge collection has this name.
    pub fn edge_collection(&self, name: &str) -> Result<EdgeCollectionRef<'_>> {
        if !self.is_edge_collection(name) {
            return Err(Error::CollectionNotFound(name.to_string()));
        }
        Ok(EdgeCollectionRef {
            graph: self,
            name: name.to_string(),
        })
    }

    // ── Vertex CRUD ───────────────────────────────────────────────────

    /// Inserts a vertex into its collection.
    ///
    /// # Errors
    ///
    /// Returns `Error::CollectionNotFound` if the vertex collection is missing
    /// and `Error::DocumentExists` if the key is taken.
    pub fn insert_vertex(&self, vertex: Vertex) -> Result<()> {
        let mut collections = self.collections.write();
        let collection = collections
            .vertices
            .get_mut(vertex.id().collection())
            .ok_or_else(|| Error::CollectionNotFound(vertex.id().collection().to_string()))?;
        if collection.contains_key(vertex.id().key()) {
            return Err(Error::DocumentExists(vertex.id().to_string()));
        }
        collection.insert(vertex.id().key().to_string(), vertex);
        Ok(())
    }

    /// Gets a vertex by id.
    #[must_use]
    pub fn get_vertex(&self, id: &DocumentId) -> Option<Vertex> {
        self.collections
            .read()
            .vertices
            .get(id.collection())
            .and_then(|c| c.get(id.key()))
            .cloned()
    }

    /// Removes a vertex. Incident edges are kept and become dangling.
    pub fn remove_vertex(&self, id: &DocumentId) -> Option<Vertex> {
        self.collections
            .write()
            .vertices
            .get_mut(id.collection())
            .and_then(|c| c.remove(id.key()))
    }

    /// Returns the number of vertices in a collection (0 if unknown).
    #[must_use]
    pub fn vertex_count(&self, collection: &str) -> usize {
        self.collections
            .read()
            .vertices
            .get(collection)
            .map_or(0, BTreeMap::len)
    }

    // ── Edge CRUD ─────────────────────────────────────────────────────

    /// Inserts an edge into its edge collection.
    ///
    /// Both endpoint collections must exist; the endpoint documents need not.
    ///
    /// # Errors
    ///
    /// Returns `Error::CollectionNotFound` if the edge collection is missing,
    /// `Error::DanglingEdge` if an endpoint collection is missing, and
    /// `Error::DocumentExists` if the key is taken.
    pub fn insert_edge(&self, edge: Edge) -> Result<()> {
        let mut collections = self.collections.write();
        if !collections.exists(edge.from().collection())
            || !collections.exists(edge.to().collection())
        {
            return Err(Error::DanglingEdge(edge.id().to_string()));
        }
        let collection = collections
            .edges
            .get_mut(edge.id().collection())
            .ok_or_else(|| Error::CollectionNotFound(edge.id().collection().to_string()))?;
        if collection.edges.contains_key(edge.id().key()) {
            return Err(Error::DocumentExists(edge.id().to_string()));
        }
        collection.insert(edge);
        Ok(())
    }

    /// Gets an edge by id.
    #[must_use]
    pub fn get_edge(&self, id: &DocumentId) -> Option<Edge> {
        self.collections
            .read()
            .edges
            .get(id.collection())
            .and_then(|c| c.edges.get(id.key()))
            .cloned()
    }

    /// Removes an edge, cleaning up the adjacency indices.
    pub fn remove_edge(&self, id: &DocumentId) -> Option<Edge> {
        self.collections
            .write()
            .edges
            .get_mut(id.collection())
            .and_then(|c| c.remove(id.key()))
    }

    /// Returns the number of edges in a collection (0 if unknown).
    #[must_use]
    pub fn edge_count(&self, collection: &str) -> usize {
        self.collections
            .read()
            .edges
            .get(collection)
            .map_or(0, |c| c.edges.len())
    }
}

impl VertexResolver for InMemoryGraph {
    fn resolve_vertex(&self, id: &DocumentId) -> Result<Option<Vertex>> {
        let collections = self.collections.read();
        match collections.vertices.get(id.collection()) {
            Some(collection) => Ok(collection.get(id.key()).cloned()),
            // Edges can point at edge collections too; those hold no vertices.
            None if collections.edges.contains_key(id.collection()) => Ok(None),
            None => Err(Error::CollectionNotFound(id.collection().to_string())),
        }
    }

    fn has_collection(&self, name: &str) -> bool {
        self.collections.read().exists(name)
    }

    fn scan_vertices(&self, collection: &str) -> Result<Vec<Vertex>> {
        self.collections
            .read()
            .vertices
            .get(collection)
            .map(|c| c.values().cloned().collect())
            .ok_or_else(|| Error::CollectionNotFound(collection.to_string()))
    }
}

/// Adjacency view over one edge collection of an [`InMemoryGraph`].
#[derive(Debug, Clone)]
pub struct EdgeCollectionRef<'g> {
    graph: &'g InMemoryGraph,
    name: String,
}

impl EdgeCollectionRef<'_> {
    /// Returns the edge collection name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl AdjacencyProvider for EdgeCollectionRef<'_> {
    fn incident_edges(&self, vertex: &DocumentId, direction: Direction) -> Result<Vec<Edge>> {
        let collections = self.graph.collections.read();
        if !collections.exists(vertex.collection()) {
            return Err(Error::CollectionNotFound(vertex.collection().to_string()));
        }
        let edges = collections
            .edges
            .get(&self.name)
            .ok_or_else(|| Error::CollectionNotFound(self.name.clone()))?;
        Ok(edges.incident(vertex, direction))
    }
}
