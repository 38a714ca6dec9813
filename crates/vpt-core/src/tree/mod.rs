//! Frozen valid policy tree
//!
//! Nodes live in a single arena owned by the tree and refer to each other by
//! [`NodeId`]. The arena is laid out in pre-order, so a parent always sits
//! before its children. Nothing reachable from a `&ValidPolicyTree` can
//! change it, which is what makes concurrent traversal safe.

mod children;
mod node;
pub(crate) mod query;
mod render;

pub use children::{Ancestors, Children, Descendants};
pub use node::PolicyNode;

use crate::builder::TreeBuilder;
use crate::config::BuilderConfig;
use crate::qualifier::PolicyQualifierValue;
use query::NodeArena;
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("Modification not supported: policy tree nodes are read-only")]
    ModificationNotSupported,

    #[error("Unknown node: {0}")]
    UnknownNode(NodeId),

    #[error("Tree already has a root")]
    RootAlreadySet,

    #[error("Tree has no root")]
    MissingRoot,

    #[error("Maximum tree depth exceeded: {0}")]
    DepthLimitExceeded(usize),

    #[error("Maximum node count exceeded: {0}")]
    NodeLimitExceeded(usize),
}

pub type TreeResult<T> = Result<T, TreeError>;

/// Handle of a node within one tree or builder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Per-node state shared by the builder and the frozen tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NodeData {
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) valid_policy: String,
    pub(crate) qualifiers: HashSet<PolicyQualifierValue>,
    pub(crate) critical: bool,
    pub(crate) expected_policies: HashSet<String>,
    pub(crate) generated_by_mapping: bool,
    /// Expected set is still the one given at construction
    pub(crate) original_expected: bool,
}

/// Immutable valid policy tree
///
/// An empty tree is the NULL tree of path validation: every path was pruned
/// and no policy is acceptable.
#[derive(Debug, Clone, Default)]
pub struct ValidPolicyTree {
    nodes: Vec<NodeData>,
}

impl ValidPolicyTree {
    /// Nodes must be in pre-order with the root first
    pub(crate) fn from_nodes(nodes: Vec<NodeData>) -> Self {
        Self { nodes }
    }

    /// The NULL tree
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn root(&self) -> Option<PolicyNode<'_>> {
        self.node(NodeId(0))
    }

    pub fn node(&self, id: NodeId) -> Option<PolicyNode<'_>> {
        (id.0 < self.nodes.len()).then(|| PolicyNode::new(self, id))
    }

    /// All nodes in pre-order
    pub fn nodes(&self) -> impl Iterator<Item = PolicyNode<'_>> + '_ {
        (0..self.nodes.len()).map(move |idx| PolicyNode::new(self, NodeId(idx)))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Depth of the deepest node, `None` for the NULL tree
    pub fn max_depth(&self) -> Option<usize> {
        let mut depths: Vec<usize> = Vec::with_capacity(self.nodes.len());
        for node in &self.nodes {
            let depth = node.parent.map_or(0, |p| depths[p.0] + 1);
            depths.push(depth);
        }
        depths.into_iter().max()
    }

    /// Every node at `depth`
    pub fn nodes_at_depth(&self, depth: usize) -> Vec<PolicyNode<'_>> {
        self.views(query::at_depth(self, depth, |_| true))
    }

    /// Nodes at `depth` whose expected policy set contains `policy`
    ///
    /// With `match_any`, nodes whose expected set contains anyPolicy are
    /// returned instead. Asking for anyPolicy itself returns every node at
    /// `depth`.
    pub fn nodes_expected(
        &self,
        depth: usize,
        policy: &str,
        match_any: bool,
    ) -> Vec<PolicyNode<'_>> {
        self.views(query::at_depth(self, depth, query::expects(policy, match_any)))
    }

    /// Nodes at `depth` whose valid policy is `policy`
    pub fn nodes_valid(&self, depth: usize, policy: &str) -> Vec<PolicyNode<'_>> {
        self.views(query::at_depth(self, depth, query::has_valid_policy(policy)))
    }

    /// Copy into a builder for the next processing pass
    pub fn to_builder(&self, config: BuilderConfig) -> TreeBuilder {
        TreeBuilder::from_nodes(config, self.nodes.clone())
    }

    #[inline]
    pub(crate) fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0]
    }

    fn views(&self, ids: Vec<NodeId>) -> Vec<PolicyNode<'_>> {
        ids.into_iter().map(|id| PolicyNode::new(self, id)).collect()
    }
}

impl NodeArena for ValidPolicyTree {
    fn root_id(&self) -> Option<NodeId> {
        (!self.nodes.is_empty()).then_some(NodeId(0))
    }

    fn get(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(id.0)
    }
}

impl fmt::Display for ValidPolicyTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.root() {
            Some(root) => f.write_str(&render::render_subtree(root)),
            None => Ok(()),
        }
    }
}
