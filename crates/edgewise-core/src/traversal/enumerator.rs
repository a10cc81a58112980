//! The Path Enumerator: a pull-based traversal state machine.
//!
//! Depth-first traversal keeps an explicit frame stack alongside a single
//! [`PathState`] that grows on descent and shrinks on backtrack. Breadth-first
//! traversal keeps a queue of owned paths. Neither recurses, so depth is
//! bounded by memory rather than the call stack, and callers can stop pulling
//! at any point without producing unconsumed items.

use rustc_hash::FxHashSet;
use serde_json::{Map, Value};
use std::collections::VecDeque;
use tracing::{debug, trace, warn};

use crate::error::Result;
use crate::graph::{AdjacencyProvider, DocumentId, Edge, Vertex, VertexResolver};

use super::config::{EdgeUniqueness, ItemOrder, Order, Strategy, TraversalConfig, VertexUniqueness};
use super::path::{Path, PathState};

/// A visited vertex, as produced by the enumerator.
#[derive(Debug, Clone, PartialEq)]
pub struct TraversalItem {
    pub vertex: Vertex,
    /// Number of edges between the start vertex and `vertex`.
    pub depth: usize,
    /// Present when the traversal materializes paths.
    pub path: Option<Path>,
}

impl TraversalItem {
    /// Renders `{vertex, path?}`.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let mut doc = Map::new();
        doc.insert("vertex".to_string(), self.vertex.to_document());
        if let Some(path) = &self.path {
            doc.insert("path".to_string(), path.to_value());
        }
        Value::Object(doc)
    }
}

/// State shared by both strategies: collaborators, config and the
/// per-invocation global visited set.
struct Context<A, R> {
    adjacency: A,
    resolver: R,
    config: TraversalConfig,
    visited: FxHashSet<DocumentId>,
}

impl<A: AdjacencyProvider, R: VertexResolver> Context<A, R> {
    fn item(&self, path: &PathState) -> TraversalItem {
        TraversalItem {
            vertex: path.current().clone(),
            depth: path.depth(),
            path: self.config.materialize_paths.then(|| path.snapshot()),
        }
    }

    /// Incident edges of `vertex` in expansion order.
    fn candidates(&self, vertex: &Vertex) -> Result<VecDeque<Edge>> {
        let mut edges = self
            .adjacency
            .incident_edges(vertex.id(), self.config.direction)?;
        if self.config.item_order == ItemOrder::Backward {
            edges.reverse();
        }
        Ok(edges.into())
    }

    /// Applies edge filters and uniqueness to one candidate edge and resolves
    /// the neighbor it leads to. Under global uniqueness the neighbor is
    /// marked visited here, before it is entered.
    fn admit(&mut self, path: &PathState, edge: &Edge) -> Result<Option<Vertex>> {
        if !self.config.follows(edge) {
            trace!(edge = %edge.id(), "edge rejected by filter");
            return Ok(None);
        }
        if self.config.edge_uniqueness == EdgeUniqueness::Path && path.contains_edge(edge.id()) {
            trace!(edge = %edge.id(), "edge already on path");
            return Ok(None);
        }

        let neighbor = edge.neighbor_of(path.current().id(), self.config.direction);
        let seen = match self.config.vertex_uniqueness {
            VertexUniqueness::None => false,
            VertexUniqueness::Path => path.contains_vertex(neighbor),
            VertexUniqueness::Global => self.visited.contains(neighbor),
        };
        if seen {
            trace!(vertex = %neighbor, uniqueness = ?self.config.vertex_uniqueness, "vertex already visited");
            return Ok(None);
        }

        let Some(vertex) = self.resolver.resolve_vertex(neighbor)? else {
            warn!(edge = %edge.id(), vertex = %neighbor, "skipping edge to missing vertex");
            return Ok(None);
        };
        if self.config.vertex_uniqueness == VertexUniqueness::Global {
            self.visited.insert(neighbor.clone());
        }
        Ok(Some(vertex))
    }
}

/// One entered vertex on the depth-first stack.
struct Frame {
    /// `None` until the vertex has been entered.
    pending: Option<VecDeque<Edge>>,
    emit_after: bool,
}

impl Frame {
    fn new() -> Self {
        Self {
            pending: None,
            emit_after: false,
        }
    }
}

struct DepthFirst {
    path: PathState,
    frames: Vec<Frame>,
}

impl DepthFirst {
    fn new(start: Vertex) -> Self {
        Self {
            path: PathState::new(start),
            frames: vec![Frame::new()],
        }
    }

    fn next<A, R>(&mut self, ctx: &mut Context<A, R>) -> Result<Option<TraversalItem>>
    where
        A: AdjacencyProvider,
        R: VertexResolver,
    {
        loop {
            let Some(frame) = self.frames.last_mut() else {
                return Ok(None);
            };

            if frame.pending.is_none() {
                let decision = ctx.config.decide(self.path.current(), self.path.depth());
                frame.pending = Some(if decision.prune {
                    VecDeque::new()
                } else {
                    ctx.candidates(self.path.current())?
                });
                if !decision.exclude {
                    match ctx.config.order {
                        Order::PreOrder => return Ok(Some(ctx.item(&self.path))),
                        Order::PostOrder => frame.emit_after = true,
                    }
                }
                continue;
            }

            if let Some(edge) = frame.pending.as_mut().and_then(VecDeque::pop_front) {
                if let Some(vertex) = ctx.admit(&self.path, &edge)? {
                    self.path.push(vertex, edge);
                    self.frames.push(Frame::new());
                }
                continue;
            }

            let item = frame.emit_after.then(|| ctx.item(&self.path));
            self.frames.pop();
            self.path.pop();
            if item.is_some() {
                return Ok(item);
            }
        }
    }
}

struct BreadthFirst {
    queue: VecDeque<PathState>,
}

impl BreadthFirst {
    fn new(start: Vertex) -> Self {
        Self {
            queue: VecDeque::from([PathState::new(start)]),
        }
    }

    fn next<A, R>(&mut self, ctx: &mut Context<A, R>) -> Result<Option<TraversalItem>>
    where
        A: AdjacencyProvider,
        R: VertexResolver,
    {
        while let Some(path) = self.queue.pop_front() {
            let decision = ctx.config.decide(path.current(), path.depth());
            if !decision.prune {
                for edge in ctx.candidates(path.current())? {
                    if let Some(vertex) = ctx.admit(&path, &edge)? {
                        let mut next = path.clone();
                        next.push(vertex, edge);
                        self.queue.push_back(next);
                    }
                }
            }
            if !decision.exclude {
                return Ok(Some(ctx.item(&path)));
            }
        }
        Ok(None)
    }

    /// Runs the level-order walk to completion and reorders it deepest level
    /// first, keeping level-order within each level.
    fn drain_postorder<A, R>(&mut self, ctx: &mut Context<A, R>) -> Result<Vec<TraversalItem>>
    where
        A: AdjacencyProvider,
        R: VertexResolver,
    {
        let mut items = Vec::new();
        while let Some(item) = self.next(ctx)? {
            items.push(item);
        }
        items.sort_by(|a, b| b.depth.cmp(&a.depth));
        Ok(items)
    }
}

enum Walk {
    DepthFirst(DepthFirst),
    BreadthFirst(BreadthFirst),
    Buffered(std::vec::IntoIter<TraversalItem>),
    Done,
}

/// Lazy, single-pass sequence of [`TraversalItem`]s.
///
/// The first error ends the sequence.
///
/// # Example
///
/// ```rust
/// use edgewise_core::graph::{Direction, Edge, InMemoryGraph, Vertex};
/// use edgewise_core::traversal::{PathEnumerator, TraversalConfig, VertexUniqueness};
///
/// let graph = InMemoryGraph::new();
/// graph.create_vertex_collection("v").unwrap();
/// graph.create_edge_collection("e").unwrap();
/// for key in ["a", "b"] {
///     graph.insert_vertex(Vertex::new(format!("v/{key}").parse().unwrap())).unwrap();
/// }
/// graph
///     .insert_edge(Edge::new(
///         "e/1".parse().unwrap(),
///         "v/a".parse().unwrap(),
///         "v/b".parse().unwrap(),
///     ))
///     .unwrap();
///
/// let config = TraversalConfig::new(Direction::Outbound)
///     .with_uniqueness(VertexUniqueness::Global, Default::default());
/// let keys: Vec<String> = PathEnumerator::start(
///     graph.edge_collection("e").unwrap(),
///     &graph,
///     &"v/a".parse().unwrap(),
///     config,
/// )
/// .unwrap()
/// .map(|item| item.unwrap().vertex.id().key().to_string())
/// .collect();
/// assert_eq!(keys, vec!["a", "b"]);
/// ```
pub struct PathEnumerator<A, R> {
    ctx: Context<A, R>,
    walk: Walk,
    emitted: usize,
}

impl<A: AdjacencyProvider, R: VertexResolver> PathEnumerator<A, R> {
    /// Creates an enumerator rooted at an already resolved vertex.
    ///
    /// # Errors
    ///
    /// Returns `Error::ConfigurationInvalid` if the configuration does not
    /// validate.
    pub fn new(adjacency: A, resolver: R, start: Vertex, config: TraversalConfig) -> Result<Self> {
        config.validate()?;
        debug!(
            start = %start.id(),
            strategy = ?config.strategy,
            direction = %config.direction,
            min_depth = config.min_depth,
            max_depth = ?config.max_depth,
            "traversal started"
        );

        let mut visited = FxHashSet::default();
        if config.vertex_uniqueness == VertexUniqueness::Global {
            visited.insert(start.id().clone());
        }
        let walk = match config.strategy {
            Strategy::DepthFirst => Walk::DepthFirst(DepthFirst::new(start)),
            Strategy::BreadthFirst => Walk::BreadthFirst(BreadthFirst::new(start)),
        };

        Ok(Self {
            ctx: Context {
                adjacency,
                resolver,
                config,
                visited,
            },
            walk,
            emitted: 0,
        })
    }

    /// Resolves `start` and creates an enumerator rooted at it. A missing
    /// start vertex yields an empty sequence.
    ///
    /// # Errors
    ///
    /// Returns `Error::ConfigurationInvalid` for an invalid configuration and
    /// `Error::CollectionNotFound` if the start vertex's collection is
    /// unknown.
    pub fn start(adjacency: A, resolver: R, start: &DocumentId, config: TraversalConfig) -> Result<Self> {
        config.validate()?;
        match resolver.resolve_vertex(start)? {
            Some(vertex) => Self::new(adjacency, resolver, vertex, config),
            None => {
                debug!(start = %start, "start vertex not found, traversal is empty");
                Ok(Self {
                    ctx: Context {
                        adjacency,
                        resolver,
                        config,
                        visited: FxHashSet::default(),
                    },
                    walk: Walk::Done,
                    emitted: 0,
                })
            }
        }
    }

    /// Returns the active configuration.
    #[must_use]
    pub fn config(&self) -> &TraversalConfig {
        &self.ctx.config
    }
}

impl<A: AdjacencyProvider, R: VertexResolver> Iterator for PathEnumerator<A, R> {
    type Item = Result<TraversalItem>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Walk::BreadthFirst(bfs) = &mut self.walk {
            if self.ctx.config.order == Order::PostOrder {
                match bfs.drain_postorder(&mut self.ctx) {
                    Ok(items) => self.walk = Walk::Buffered(items.into_iter()),
                    Err(err) => {
                        self.walk = Walk::Done;
                        return Some(Err(err));
                    }
                }
            }
        }

        let step = match &mut self.walk {
            Walk::DepthFirst(dfs) => dfs.next(&mut self.ctx),
            Walk::BreadthFirst(bfs) => bfs.next(&mut self.ctx),
            Walk::Buffered(items) => Ok(items.next()),
            Walk::Done => return None,
        };

        match step {
            Ok(Some(item)) => {
                self.emitted += 1;
                Some(Ok(item))
            }
            Ok(None) => {
                debug!(emitted = self.emitted, "traversal exhausted");
                self.walk = Walk::Done;
                None
            }
            Err(err) => {
                self.walk = Walk::Done;
                Some(Err(err))
            }
        }
    }
}
