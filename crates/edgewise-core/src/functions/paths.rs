//! `PATHS`: every path of bounded length in a vertex collection.

use tracing::debug;

use crate::error::{Error, Result};
use crate::graph::{Direction, VertexResolver};
use crate::traversal::{
    EdgeFilter, EdgeUniqueness, Order, Path, PathEnumerator, Strategy, TraversalConfig,
    VertexUniqueness,
};

use super::GraphFunctions;

/// Options accepted by [`GraphFunctions::paths`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathsOptions {
    /// Shortest path (in edges) to yield.
    pub min_length: usize,
    /// Longest path to yield. `None` uses `traversal.paths_max_length`.
    pub max_length: Option<usize>,
    /// When false, a vertex may appear only once per path.
    pub follow_cycles: bool,
}

impl Default for PathsOptions {
    fn default() -> Self {
        Self {
            min_length: 0,
            max_length: None,
            follow_cycles: true,
        }
    }
}

impl PathsOptions {
    #[must_use]
    pub fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_length = min_length;
        self
    }

    #[must_use]
    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    #[must_use]
    pub fn with_follow_cycles(mut self, follow_cycles: bool) -> Self {
        self.follow_cycles = follow_cycles;
        self
    }
}

impl GraphFunctions<'_> {
    /// `PATHS(vertexCollection, edgeCollection, direction, options)`.
    ///
    /// Enumerates depth-first from every vertex of `vertex_collection` in
    /// `_key` order and returns one [`Path`] per visited vertex whose length
    /// lies in `[min_length, max_length]`. Edges may repeat within a path;
    /// self loops are never followed.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` if `min_length > max_length` and
    /// `Error::CollectionNotFound` if a collection does not exist.
    pub fn paths(
        &self,
        vertex_collection: &str,
        edge_collection: &str,
        direction: Direction,
        options: &PathsOptions,
    ) -> Result<Vec<Path>> {
        let max_length = options
            .max_length
            .unwrap_or(self.settings.paths_max_length);
        if options.min_length > max_length {
            return Err(Error::InvalidArgument(format!(
                "minLength ({}) must not exceed maxLength ({max_length})",
                options.min_length
            )));
        }

        let edges = self.bind(vertex_collection, edge_collection)?;
        let vertices = if options.follow_cycles {
            VertexUniqueness::None
        } else {
            VertexUniqueness::Path
        };
        let config = TraversalConfig::new(direction)
            .with_strategy(Strategy::DepthFirst)
            .with_order(Order::PreOrder)
            .with_min_depth(options.min_length)
            .with_max_depth(max_length)
            .with_uniqueness(vertices, EdgeUniqueness::None)
            .with_edge_filter(EdgeFilter::custom(|edge| edge.from() != edge.to()))
            .with_paths(true);

        let starts = self.graph.scan_vertices(vertex_collection)?;
        debug!(
            collection = vertex_collection,
            starts = starts.len(),
            min_length = options.min_length,
            max_length,
            "enumerating paths"
        );

        let mut paths = Vec::new();
        for start in starts {
            let walk = PathEnumerator::new(edges.clone(), self.graph, start, config.clone())?;
            for item in walk {
                if let Some(path) = item?.path {
                    paths.push(path);
                }
            }
        }
        Ok(paths)
    }
}
