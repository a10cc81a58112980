//! Traversal configuration.
//!
//! [`TraversalConfig`] is the validated, strongly-typed form consumed by the
//! enumerator. [`TraversalOptions`] is the loose document shape accepted by
//! the query-language functions and converted with
//! [`TraversalConfig::from_options`].

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::graph::{Direction, Document, Edge, Vertex};

use super::filter::{EdgeFilter, FilterDecision, VertexFilter, VertexFilterMethod};

/// Lowercases and strips `-`, so `"depth-first"` and `"DepthFirst"` are equal.
fn normalize(value: &str) -> String {
    value
        .chars()
        .filter(|c| *c != '-')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

fn unknown(option: &str, value: &str, allowed: &str) -> Error {
    Error::ConfigurationInvalid(format!(
        "{option} must be one of {allowed} (got '{value}')"
    ))
}

/// Visitation strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Follow one branch to its end before the next.
    #[default]
    DepthFirst,
    /// Visit level by level.
    BreadthFirst,
}

impl FromStr for Strategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match normalize(s).as_str() {
            "depthfirst" => Ok(Self::DepthFirst),
            "breadthfirst" => Ok(Self::BreadthFirst),
            _ => Err(unknown("strategy", s, "depthfirst, breadthfirst")),
        }
    }
}

/// Emission timing relative to a vertex's children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Order {
    /// Emit before children.
    #[default]
    PreOrder,
    /// Emit after children.
    PostOrder,
}

impl FromStr for Order {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match normalize(s).as_str() {
            "preorder" => Ok(Self::PreOrder),
            "postorder" => Ok(Self::PostOrder),
            _ => Err(unknown("order", s, "preorder, postorder")),
        }
    }
}

/// Order in which incident edges are expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemOrder {
    /// Collection order.
    #[default]
    Forward,
    /// Reversed collection order.
    Backward,
}

impl FromStr for ItemOrder {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match normalize(s).as_str() {
            "forward" => Ok(Self::Forward),
            "backward" => Ok(Self::Backward),
            _ => Err(unknown("itemOrder", s, "forward, backward")),
        }
    }
}

/// Vertex revisit policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VertexUniqueness {
    /// Vertices may repeat.
    None,
    /// A vertex appears at most once per path.
    Path,
    /// A vertex is visited at most once per traversal.
    #[default]
    Global,
}

impl FromStr for VertexUniqueness {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match normalize(s).as_str() {
            "none" => Ok(Self::None),
            "path" => Ok(Self::Path),
            "global" => Ok(Self::Global),
            _ => Err(unknown("uniqueness.vertices", s, "none, path, global")),
        }
    }
}

/// Edge revisit policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeUniqueness {
    /// Edges may repeat.
    None,
    /// An edge appears at most once per path.
    #[default]
    Path,
}

impl FromStr for EdgeUniqueness {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match normalize(s).as_str() {
            "none" => Ok(Self::None),
            "path" => Ok(Self::Path),
            _ => Err(unknown("uniqueness.edges", s, "none, path")),
        }
    }
}

/// Raw `uniqueness` sub-object of [`TraversalOptions`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UniquenessOptions {
    /// `"none" | "path" | "global"`.
    pub vertices: Option<String>,
    /// `"none" | "path"`.
    pub edges: Option<String>,
}

/// Traversal options as passed by the query layer.
///
/// ```rust
/// use edgewise_core::traversal::TraversalOptions;
///
/// let options: TraversalOptions = serde_json::from_value(serde_json::json!({
///     "strategy": "depth-first",
///     "maxDepth": 3,
///     "uniqueness": { "vertices": "global" },
///     "paths": true
/// }))
/// .unwrap();
/// assert_eq!(options.max_depth, Some(3));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TraversalOptions {
    pub strategy: Option<String>,
    pub order: Option<String>,
    pub item_order: Option<String>,
    pub min_depth: Option<usize>,
    pub max_depth: Option<usize>,
    pub uniqueness: Option<UniquenessOptions>,
    /// Attach the path to every emitted item.
    pub paths: bool,
    /// Edge examples; only matching edges are followed.
    pub follow_edges: Option<Vec<Document>>,
    /// Vertex examples; see [`VertexFilter::Examples`].
    pub filter_vertices: Option<Vec<Document>>,
    /// `"prune"` and/or `"exclude"`; defaults to both.
    pub vertex_filter_method: Option<Vec<String>>,
}

/// Validated traversal configuration.
///
/// # Example
///
/// ```rust
/// use edgewise_core::graph::Direction;
/// use edgewise_core::traversal::{TraversalConfig, VertexUniqueness};
///
/// let config = TraversalConfig::new(Direction::Outbound)
///     .with_uniqueness(VertexUniqueness::Global, Default::default())
///     .with_min_depth(1);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default)]
pub struct TraversalConfig {
    pub direction: Direction,
    pub strategy: Strategy,
    pub order: Order,
    pub item_order: ItemOrder,
    pub min_depth: usize,
    /// `None` is unbounded.
    pub max_depth: Option<usize>,
    pub vertex_uniqueness: VertexUniqueness,
    pub edge_uniqueness: EdgeUniqueness,
    /// Attach a path snapshot to every emitted item.
    pub materialize_paths: bool,
    /// Combined by OR with the depth bounds.
    pub vertex_filters: Vec<VertexFilter>,
    /// An edge is followed only if every filter accepts it.
    pub edge_filters: Vec<EdgeFilter>,
}

impl TraversalConfig {
    /// Creates a default configuration for a direction.
    #[must_use]
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    #[must_use]
    pub fn with_order(mut self, order: Order) -> Self {
        self.order = order;
        self
    }

    #[must_use]
    pub fn with_item_order(mut self, item_order: ItemOrder) -> Self {
        self.item_order = item_order;
        self
    }

    #[must_use]
    pub fn with_min_depth(mut self, min_depth: usize) -> Self {
        self.min_depth = min_depth;
        self
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    #[must_use]
    pub fn with_uniqueness(mut self, vertices: VertexUniqueness, edges: EdgeUniqueness) -> Self {
        self.vertex_uniqueness = vertices;
        self.edge_uniqueness = edges;
        self
    }

    #[must_use]
    pub fn with_paths(mut self, materialize: bool) -> Self {
        self.materialize_paths = materialize;
        self
    }

    #[must_use]
    pub fn with_vertex_filter(mut self, filter: VertexFilter) -> Self {
        self.vertex_filters.push(filter);
        self
    }

    #[must_use]
    pub fn with_edge_filter(mut self, filter: EdgeFilter) -> Self {
        self.edge_filters.push(filter);
        self
    }

    /// Builds a configuration from query-layer options.
    ///
    /// Enum strings are matched case-insensitively with `-` ignored.
    /// `default_max_depth` applies when the options omit `maxDepth`.
    ///
    /// # Errors
    ///
    /// Returns `Error::ConfigurationInvalid` for unknown enum values, empty
    /// example lists, `vertexFilterMethod` without `filterVertices`, or a
    /// configuration that fails [`Self::validate`].
    pub fn from_options(
        direction: Direction,
        options: &TraversalOptions,
        default_max_depth: Option<usize>,
    ) -> Result<Self> {
        let mut config = Self::new(direction);

        if let Some(strategy) = &options.strategy {
            config.strategy = strategy.parse()?;
        }
        if let Some(order) = &options.order {
            config.order = order.parse()?;
        }
        if let Some(item_order) = &options.item_order {
            config.item_order = item_order.parse()?;
        }
        if let Some(uniqueness) = &options.uniqueness {
            if let Some(vertices) = &uniqueness.vertices {
                config.vertex_uniqueness = vertices.parse()?;
            }
            if let Some(edges) = &uniqueness.edges {
                config.edge_uniqueness = edges.parse()?;
            }
        }
        config.min_depth = options.min_depth.unwrap_or(0);
        config.max_depth = options.max_depth.or(default_max_depth);
        config.materialize_paths = options.paths;

        if let Some(examples) = &options.follow_edges {
            config.edge_filters.push(EdgeFilter::examples(examples.clone())?);
        }
        if options.filter_vertices.is_none() && options.vertex_filter_method.is_some() {
            return Err(Error::ConfigurationInvalid(
                "vertexFilterMethod requires filterVertices".to_string(),
            ));
        }
        if let Some(examples) = &options.filter_vertices {
            let methods = options
                .vertex_filter_method
                .as_deref()
                .unwrap_or_default()
                .iter()
                .map(|m| m.parse::<VertexFilterMethod>())
                .collect::<Result<Vec<_>>>()?;
            config
                .vertex_filters
                .push(VertexFilter::examples(examples.clone(), methods)?);
        }

        config.validate()?;
        Ok(config)
    }

    /// Checks the configuration before any item is produced.
    ///
    /// # Errors
    ///
    /// Returns `Error::ConfigurationInvalid` if `min_depth > max_depth`, or if
    /// the traversal is unbounded with vertex uniqueness `none`.
    pub fn validate(&self) -> Result<()> {
        if let Some(max_depth) = self.max_depth {
            if self.min_depth > max_depth {
                return Err(Error::ConfigurationInvalid(format!(
                    "minDepth ({}) must not exceed maxDepth ({max_depth})",
                    self.min_depth
                )));
            }
        } else if self.vertex_uniqueness == VertexUniqueness::None {
            return Err(Error::ConfigurationInvalid(
                "an unbounded traversal requires vertex uniqueness 'path' or 'global'".to_string(),
            ));
        }
        Ok(())
    }

    /// Evaluates depth bounds and vertex filters for a vertex at `depth`.
    #[must_use]
    pub fn decide(&self, vertex: &Vertex, depth: usize) -> FilterDecision {
        let mut decision = FilterDecision::VISIT;
        if depth < self.min_depth {
            decision = decision.merge(FilterDecision::EXCLUDE);
        }
        if self.max_depth.is_some_and(|max| depth >= max) {
            decision = decision.merge(FilterDecision::PRUNE);
        }
        self.vertex_filters
            .iter()
            .fold(decision, |d, filter| d.merge(filter.evaluate(vertex, depth)))
    }

    /// Returns true if every edge filter accepts the edge.
    #[must_use]
    pub fn follows(&self, edge: &Edge) -> bool {
        self.edge_filters.iter().all(|filter| filter.accepts(edge))
    }
}
