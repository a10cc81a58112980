//! Graph functions exposed to the query layer.
//!
//! [`GraphFunctions`] binds the result shapers (`EDGES`, `NEIGHBORS`,
//! `PATHS`, `TRAVERSAL`, `TRAVERSAL_TREE`) to an [`InMemoryGraph`] and the
//! engine defaults from [`EngineConfig`].
//!
//! # Example
//!
//! ```rust
//! use edgewise_core::functions::GraphFunctions;
//! use edgewise_core::graph::{Direction, Edge, InMemoryGraph, Vertex};
//! use edgewise_core::traversal::TraversalOptions;
//!
//! let graph = InMemoryGraph::new();
//! graph.create_vertex_collection("v").unwrap();
//! graph.create_edge_collection("e").unwrap();
//! for key in ["a", "b"] {
//!     graph.insert_vertex(Vertex::new(format!("v/{key}").parse().unwrap())).unwrap();
//! }
//! graph
//!     .insert_edge(Edge::new(
//!         "e/ab".parse().unwrap(),
//!         "v/a".parse().unwrap(),
//!         "v/b".parse().unwrap(),
//!     ))
//!     .unwrap();
//!
//! let functions = GraphFunctions::with_defaults(&graph);
//! let options: TraversalOptions =
//!     serde_json::from_value(serde_json::json!({ "maxDepth": 1 })).unwrap();
//! let visited = functions
//!     .traversal("v", "e", "a", Direction::Outbound, &options)
//!     .unwrap()
//!     .count();
//! assert_eq!(visited, 2);
//! ```

mod neighbors;
mod paths;
mod tree;

#[cfg(test)]
mod neighbors_tests;

pub use neighbors::Neighbor;
pub use paths::PathsOptions;
pub use tree::TreeNode;

use crate::config::{EngineConfig, TraversalSettings};
use crate::error::{Error, Result};
use crate::graph::{Direction, DocumentId, EdgeCollectionRef, InMemoryGraph, VertexResolver};
use crate::traversal::{PathEnumerator, TraversalConfig, TraversalOptions};

/// The enumerator type returned by [`GraphFunctions::traversal`].
pub type Traversal<'g> = PathEnumerator<EdgeCollectionRef<'g>, &'g InMemoryGraph>;

/// Graph functions bound to one store.
#[derive(Debug, Clone)]
pub struct GraphFunctions<'g> {
    graph: &'g InMemoryGraph,
    settings: TraversalSettings,
}

impl<'g> GraphFunctions<'g> {
    /// Binds the functions to a store with the given engine configuration.
    #[must_use]
    pub fn new(graph: &'g InMemoryGraph, config: &EngineConfig) -> Self {
        Self {
            graph,
            settings: config.traversal.clone(),
        }
    }

    /// Binds the functions to a store with default settings.
    #[must_use]
    pub fn with_defaults(graph: &'g InMemoryGraph) -> Self {
        Self::new(graph, &EngineConfig::default())
    }

    /// Returns the underlying store.
    #[must_use]
    pub fn graph(&self) -> &'g InMemoryGraph {
        self.graph
    }

    /// `TRAVERSAL(vertexCollection, edgeCollection, startVertex, direction, options)`.
    ///
    /// `start` may be a full id or a bare key inside `vertex_collection`.
    /// A missing start vertex yields an empty traversal.
    ///
    /// # Errors
    ///
    /// Returns `Error::ConfigurationInvalid` for bad options (checked first),
    /// and `Error::CollectionNotFound` if a collection does not exist.
    pub fn traversal(
        &self,
        vertex_collection: &str,
        edge_collection: &str,
        start: &str,
        direction: Direction,
        options: &TraversalOptions,
    ) -> Result<Traversal<'g>> {
        let config =
            TraversalConfig::from_options(direction, options, self.settings.default_max_depth)?;
        self.traversal_with_config(vertex_collection, edge_collection, start, config)
    }

    /// Like [`Self::traversal`], with an already built configuration.
    pub fn traversal_with_config(
        &self,
        vertex_collection: &str,
        edge_collection: &str,
        start: &str,
        config: TraversalConfig,
    ) -> Result<Traversal<'g>> {
        config.validate()?;
        let edges = self.bind(vertex_collection, edge_collection)?;
        let start = DocumentId::resolve(start, vertex_collection)?;
        PathEnumerator::start(edges, self.graph, &start, config)
    }

    /// Resolves the edge collection after checking the vertex collection.
    fn bind(&self, vertex_collection: &str, edge_collection: &str) -> Result<EdgeCollectionRef<'g>> {
        if !self.graph.has_collection(vertex_collection) {
            return Err(Error::CollectionNotFound(vertex_collection.to_string()));
        }
        self.graph.edge_collection(edge_collection)
    }
}
