//! Configurable graph traversal.
//!
//! [`PathEnumerator`] walks a graph from a start vertex under a
//! [`TraversalConfig`] and yields one [`TraversalItem`] per visited vertex.
//! It consumes the graph only through the
//! [`AdjacencyProvider`](crate::graph::AdjacencyProvider) and
//! [`VertexResolver`](crate::graph::VertexResolver) traits.

mod config;
mod enumerator;
mod filter;
mod path;


pub use config::{
    EdgeUniqueness, ItemOrder, Order, Strategy, TraversalConfig, TraversalOptions,
    UniquenessOptions, VertexUniqueness,
};
pub use enumerator::{PathEnumerator, TraversalItem};
pub use filter::{
    matches_any, EdgeFilter, EdgePredicate, FilterDecision, VertexFilter, VertexFilterMethod,
    VertexPredicate,
};
pub use path::{Path, PathState};
