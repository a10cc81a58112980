//! # Edgewise Core
//!
//! Graph layer for a multi-model document database.
//!
//! Vertices and edges are JSON documents stored in named collections. The
//! traversal engine walks them from a start vertex and the graph functions
//! shape the walk into flat lists, paths or trees.
//!
//! ## Features
//!
//! - **Path Enumerator**: lazy depth-first and breadth-first traversal with
//!   preorder/postorder emission and forward/backward edge order
//! - **Uniqueness**: `none`, `path` and `global` vertex uniqueness, `none` and
//!   `path` edge uniqueness
//! - **Filters**: depth windows, vertex examples (prune/exclude), edge
//!   examples, labels and custom predicates
//! - **Graph functions**: `EDGES`, `NEIGHBORS`, `PATHS`, `TRAVERSAL`,
//!   `TRAVERSAL_TREE`
//!
//! ## Quick Start
//!
//! ```rust
//! use edgewise_core::{Direction, Edge, GraphFunctions, InMemoryGraph, TraversalOptions, Vertex};
//! use serde_json::json;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let graph = InMemoryGraph::new();
//!     graph.create_vertex_collection("cities")?;
//!     graph.create_edge_collection("roads")?;
//!     for city in ["berlin", "paris", "rome"] {
//!         graph.insert_vertex(Vertex::new(format!("cities/{city}").parse()?))?;
//!     }
//!     graph.insert_edge(Edge::new("roads/1".parse()?, "cities/berlin".parse()?, "cities/paris".parse()?))?;
//!     graph.insert_edge(Edge::new("roads/2".parse()?, "cities/paris".parse()?, "cities/rome".parse()?))?;
//!
//!     let functions = GraphFunctions::with_defaults(&graph);
//!     let options: TraversalOptions = serde_json::from_value(json!({
//!         "uniqueness": { "vertices": "global" },
//!         "paths": true
//!     }))?;
//!
//!     for item in functions.traversal("cities", "roads", "berlin", Direction::Outbound, &options)? {
//!         let item = item?;
//!         println!("{} at depth {}", item.vertex.id(), item.depth);
//!     }
//!
//!     let tree = functions.traversal_tree("cities", "roads", "berlin", Direction::Outbound, "next", &options)?;
//!     assert_eq!(tree.map(|root| root.size()), Some(3));
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod functions;
pub mod graph;
pub mod logging;
pub mod traversal;

pub use config::{EngineConfig, LoggingConfig, TraversalSettings};
pub use error::{Error, Result};
pub use functions::{GraphFunctions, Neighbor, PathsOptions, Traversal, TreeNode};
pub use graph::{
    AdjacencyProvider, Direction, Document, DocumentId, Edge, EdgeCollectionRef, InMemoryGraph,
    Vertex, VertexResolver,
};
pub use logging::init_tracing;
pub use traversal::{
    EdgeFilter, EdgeUniqueness, FilterDecision, ItemOrder, Order, Path, PathEnumerator,
    PathState, Strategy, TraversalConfig, TraversalItem, TraversalOptions, VertexFilter,
    VertexFilterMethod, VertexUniqueness,
};
