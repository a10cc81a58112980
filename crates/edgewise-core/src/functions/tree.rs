//! `TRAVERSAL_TREE`: nests a global-uniqueness traversal into a tree.

use rustc_hash::FxHashMap;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::graph::{Direction, DocumentId, Vertex};
use crate::traversal::{
    Order, Strategy, TraversalConfig, TraversalItem, TraversalOptions, VertexUniqueness,
};

use super::GraphFunctions;

/// A vertex and the vertices first reached through it.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    pub vertex: Vertex,
    /// In visit order.
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Renders the vertex document with children under `connect`.
    ///
    /// The attribute is omitted, not empty, on leaves.
    #[must_use]
    pub fn to_value(&self, connect: &str) -> Value {
        let mut doc = self.vertex.to_document();
        if !self.children.is_empty() {
            if let Value::Object(map) = &mut doc {
                let children = self.children.iter().map(|c| c.to_value(connect)).collect();
                map.insert(connect.to_string(), Value::Array(children));
            }
        }
        doc
    }

    /// Number of nodes in this subtree.
    #[must_use]
    pub fn size(&self) -> usize {
        let mut size = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            size += 1;
            stack.extend(node.children.iter());
        }
        size
    }
}

/// Flat node storage; a child always has a higher index than its parent.
#[derive(Default)]
struct TreeBuilder {
    nodes: Vec<(Vertex, Vec<usize>)>,
    index: FxHashMap<DocumentId, usize>,
}

impl TreeBuilder {
    /// Attaches every vertex of the item's path that is not yet in the tree.
    fn add(&mut self, item: &TraversalItem) {
        let Some(path) = &item.path else {
            return;
        };
        let mut parent: Option<usize> = None;
        for vertex in path.vertices() {
            let slot = match self.index.get(vertex.id()) {
                Some(&slot) => slot,
                None => {
                    let slot = self.nodes.len();
                    self.nodes.push((vertex.clone(), Vec::new()));
                    self.index.insert(vertex.id().clone(), slot);
                    if let Some(parent) = parent {
                        self.nodes[parent].1.push(slot);
                    }
                    slot
                }
            };
            parent = Some(slot);
        }
    }

    fn build(self) -> Option<TreeNode> {
        let mut built: Vec<Option<TreeNode>> = Vec::with_capacity(self.nodes.len());
        built.resize_with(self.nodes.len(), || None);
        for (slot, (vertex, children)) in self.nodes.into_iter().enumerate().rev() {
            let children = children
                .into_iter()
                .filter_map(|child| built[child].take())
                .collect();
            built[slot] = Some(TreeNode { vertex, children });
        }
        built.into_iter().next().flatten()
    }
}

impl GraphFunctions<'_> {
    /// `TRAVERSAL_TREE(vertexCollection, edgeCollection, startVertex, direction, connect, options)`.
    ///
    /// Runs a depth-first preorder traversal with paths and nests each
    /// visited vertex under its predecessor on the path. Returns `None` when
    /// the start vertex does not exist or nothing is visited.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` for an empty `connect`,
    /// `Error::TreeUniquenessViolation` unless `uniqueness.vertices` is
    /// `"global"`, and the errors of [`GraphFunctions::traversal`].
    pub fn traversal_tree(
        &self,
        vertex_collection: &str,
        edge_collection: &str,
        start: &str,
        direction: Direction,
        connect: &str,
        options: &TraversalOptions,
    ) -> Result<Option<TreeNode>> {
        if connect.is_empty() {
            return Err(Error::InvalidArgument(
                "connect attribute name must not be empty".to_string(),
            ));
        }
        let vertices = options
            .uniqueness
            .as_ref()
            .and_then(|u| u.vertices.as_deref())
            .map(str::parse::<VertexUniqueness>)
            .transpose()?
            .unwrap_or_default();
        if vertices != VertexUniqueness::Global {
            return Err(Error::TreeUniquenessViolation);
        }

        let config =
            TraversalConfig::from_options(direction, options, self.settings.default_max_depth)?
                .with_strategy(Strategy::DepthFirst)
                .with_order(Order::PreOrder)
                .with_paths(true);

        let mut tree = TreeBuilder::default();
        for item in self.traversal_with_config(vertex_collection, edge_collection, start, config)? {
            tree.add(&item?);
        }
        Ok(tree.build())
    }
}
