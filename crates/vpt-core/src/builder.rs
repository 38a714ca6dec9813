//! Single-writer construction of valid policy trees
//!
//! Policy processing grows the tree one certificate at a time: nodes at the
//! deepest level gain children, paths that die out are pruned, and the
//! result is frozen into a [`ValidPolicyTree`] before any reader sees it.
//! Processing of the next certificate starts from
//! [`ValidPolicyTree::to_builder`], so a frozen tree is never modified in
//! place.

use crate::config::BuilderConfig;
use crate::oid::ANY_POLICY;
use crate::qualifier::PolicyQualifierValue;
use crate::tree::query::{self, NodeArena};
use crate::tree::{NodeData, NodeId, TreeError, TreeResult, ValidPolicyTree};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

/// Construction arguments for one node
///
/// Absent values normalize to empty: no valid policy becomes `""`, no
/// qualifiers or expected policies become empty sets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSpec {
    pub valid_policy: Option<String>,
    pub qualifiers: Option<HashSet<PolicyQualifierValue>>,
    pub critical: bool,
    pub expected_policies: Option<HashSet<String>>,
    /// Node created by policy mapping rather than by a certificate policy
    pub generated_by_mapping: bool,
}

impl NodeSpec {
    pub fn new(valid_policy: impl Into<String>) -> Self {
        Self {
            valid_policy: Some(valid_policy.into()),
            ..Default::default()
        }
    }

    pub fn any_policy() -> Self {
        Self::new(ANY_POLICY)
    }

    pub fn with_critical(mut self, critical: bool) -> Self {
        self.critical = critical;
        self
    }

    pub fn with_qualifiers(
        mut self,
        qualifiers: impl IntoIterator<Item = PolicyQualifierValue>,
    ) -> Self {
        self.qualifiers = Some(qualifiers.into_iter().collect());
        self
    }

    pub fn with_expected_policies<I, S>(mut self, policies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.expected_policies = Some(policies.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_generated_by_mapping(mut self, generated: bool) -> Self {
        self.generated_by_mapping = generated;
        self
    }

    fn into_data(self, parent: Option<NodeId>) -> NodeData {
        NodeData {
            parent,
            children: Vec::new(),
            valid_policy: self.valid_policy.unwrap_or_default(),
            qualifiers: self.qualifiers.unwrap_or_default(),
            critical: self.critical,
            expected_policies: self.expected_policies.unwrap_or_default(),
            generated_by_mapping: self.generated_by_mapping,
            original_expected: !self.generated_by_mapping,
        }
    }
}

/// Mutable tree under construction
///
/// Removed nodes leave empty slots so ids stay stable while building;
/// [`TreeBuilder::freeze`] compacts the survivors.
#[derive(Debug, Clone)]
pub struct TreeBuilder {
    config: BuilderConfig,
    slots: Vec<Option<NodeData>>,
    /// Depth of each slot, kept so adding a child never walks to the root
    depths: Vec<usize>,
    root: Option<NodeId>,
    live: usize,
}

impl TreeBuilder {
    pub fn new(config: BuilderConfig) -> Self {
        Self {
            config,
            slots: Vec::new(),
            depths: Vec::new(),
            root: None,
            live: 0,
        }
    }

    /// Nodes must be in pre-order with the root first
    pub(crate) fn from_nodes(config: BuilderConfig, nodes: Vec<NodeData>) -> Self {
        let live = nodes.len();
        let mut depths: Vec<usize> = Vec::with_capacity(live);
        for node in &nodes {
            let depth = node.parent.map_or(0, |p| depths[p.0] + 1);
            depths.push(depth);
        }
        Self {
            config,
            root: (live > 0).then_some(NodeId(0)),
            slots: nodes.into_iter().map(Some).collect(),
            depths,
            live,
        }
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Number of live nodes
    #[inline]
    pub fn len(&self) -> usize {
        self.live
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Create the root node
    pub fn set_root(&mut self, spec: NodeSpec) -> TreeResult<NodeId> {
        if self.root.is_some() {
            return Err(TreeError::RootAlreadySet);
        }
        self.check_capacity()?;

        let id = self.push(spec.into_data(None), 0);
        self.root = Some(id);
        Ok(id)
    }

    /// Create a node below `parent`
    pub fn add_child(&mut self, parent: NodeId, spec: NodeSpec) -> TreeResult<NodeId> {
        if !self.contains(parent) {
            return Err(TreeError::UnknownNode(parent));
        }

        let depth = self.depths[parent.0] + 1;
        if depth > self.config.max_depth {
            warn!(depth, max_depth = self.config.max_depth, "policy tree depth limit reached");
            return Err(TreeError::DepthLimitExceeded(self.config.max_depth));
        }
        self.check_capacity()?;

        let id = self.push(spec.into_data(Some(parent)), depth);
        self.node_mut(parent)?.children.push(id);
        Ok(id)
    }

    /// Add a policy to a node's expected set
    ///
    /// The first addition to a node whose expected set is still the one it
    /// was constructed with replaces that set. Nodes generated by policy
    /// mapping accumulate from the start.
    pub fn add_expected_policy(&mut self, id: NodeId, policy: impl Into<String>) -> TreeResult<()> {
        let node = self.node_mut(id)?;
        if node.original_expected {
            node.expected_policies.clear();
            node.original_expected = false;
        }
        node.expected_policies.insert(policy.into());
        Ok(())
    }

    /// Remove every path that does not reach `depth`
    ///
    /// Leaves shallower than `depth` are cut repeatedly until none remain.
    /// If nothing reaches `depth` the root goes too, leaving the NULL tree.
    /// Returns the number of nodes removed.
    pub fn prune(&mut self, depth: usize) -> usize {
        let Some(root) = self.root else {
            return 0;
        };

        let mut removed = self.prune_below(root, depth);
        let root_is_leaf = self.get(root).map_or(false, |n| n.children.is_empty());
        if depth > 0 && root_is_leaf {
            removed += self.remove_subtree(root);
        }

        debug!(depth, removed, remaining = self.live, "pruned valid policy tree");
        removed
    }

    /// Cut shallow leaves below `root`, deepest first, so a parent left
    /// without children is itself considered a leaf
    fn prune_below(&mut self, root: NodeId, depth: usize) -> usize {
        let mut order = Vec::with_capacity(self.live);
        let mut stack = vec![(root, 0)];
        while let Some((id, node_depth)) = stack.pop() {
            if let Some(node) = self.get(id) {
                order.push((id, node_depth));
                stack.extend(node.children.iter().map(|&child| (child, node_depth + 1)));
            }
        }

        let mut removed = 0;
        for &(id, node_depth) in order.iter().rev() {
            let Some(node) = self.get(id) else {
                continue;
            };
            let survivors: Vec<NodeId> =
                node.children.iter().copied().filter(|&child| self.contains(child)).collect();

            if id != root && survivors.is_empty() && node_depth < depth {
                self.slots[id.0] = None;
                removed += 1;
            } else if let Some(node) = self.slots.get_mut(id.0).and_then(Option::as_mut) {
                node.children = survivors;
            }
        }
        self.live -= removed;
        removed
    }

    /// Remove a node and everything below it; returns the number removed
    pub fn delete_subtree(&mut self, id: NodeId) -> TreeResult<usize> {
        if !self.contains(id) {
            return Err(TreeError::UnknownNode(id));
        }
        let removed = self.remove_subtree(id);
        debug!(node = %id, removed, "deleted policy subtree");
        Ok(removed)
    }

    fn remove_subtree(&mut self, id: NodeId) -> usize {
        if let Some(parent) = self.get(id).and_then(|n| n.parent) {
            if let Some(node) = self.slots.get_mut(parent.0).and_then(Option::as_mut) {
                node.children.retain(|child| *child != id);
            }
        }
        if self.root == Some(id) {
            self.root = None;
        }

        let mut removed = 0;
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if let Some(node) = self.slots.get_mut(next.0).and_then(Option::take) {
                stack.extend(node.children);
                removed += 1;
            }
        }
        self.live -= removed;
        removed
    }

    /// Compact the live nodes into an immutable tree
    pub fn freeze(self) -> ValidPolicyTree {
        let Some(root) = self.root else {
            debug!("froze NULL valid policy tree");
            return ValidPolicyTree::empty();
        };

        let mut order = Vec::with_capacity(self.live);
        let mut remap: HashMap<NodeId, NodeId> = HashMap::with_capacity(self.live);
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if let Some(node) = self.get(id) {
                remap.insert(id, NodeId(order.len()));
                order.push(id);
                stack.extend(node.children.iter().rev());
            }
        }

        let mut slots = self.slots;
        let nodes: Vec<NodeData> = order
            .iter()
            .filter_map(|id| slots.get_mut(id.0).and_then(Option::take))
            .map(|mut node| {
                node.parent = node.parent.and_then(|p| remap.get(&p).copied());
                node.children = node.children.iter().filter_map(|c| remap.get(c).copied()).collect();
                node
            })
            .collect();

        debug!(nodes = nodes.len(), "froze valid policy tree");
        ValidPolicyTree::from_nodes(nodes)
    }

    pub fn depth(&self, id: NodeId) -> TreeResult<usize> {
        self.node(id)?;
        Ok(self.depths[id.0])
    }

    pub fn parent(&self, id: NodeId) -> TreeResult<Option<NodeId>> {
        Ok(self.node(id)?.parent)
    }

    pub fn children(&self, id: NodeId) -> TreeResult<&[NodeId]> {
        Ok(&self.node(id)?.children)
    }

    pub fn valid_policy(&self, id: NodeId) -> TreeResult<&str> {
        Ok(&self.node(id)?.valid_policy)
    }

    pub fn expected_policies(&self, id: NodeId) -> TreeResult<&HashSet<String>> {
        Ok(&self.node(id)?.expected_policies)
    }

    /// See [`ValidPolicyTree::nodes_at_depth`]
    pub fn nodes_at_depth(&self, depth: usize) -> Vec<NodeId> {
        query::at_depth(self, depth, |_| true)
    }

    /// See [`ValidPolicyTree::nodes_expected`]
    pub fn nodes_expected(&self, depth: usize, policy: &str, match_any: bool) -> Vec<NodeId> {
        query::at_depth(self, depth, query::expects(policy, match_any))
    }

    /// See [`ValidPolicyTree::nodes_valid`]
    pub fn nodes_valid(&self, depth: usize, policy: &str) -> Vec<NodeId> {
        query::at_depth(self, depth, query::has_valid_policy(policy))
    }

    fn push(&mut self, data: NodeData, depth: usize) -> NodeId {
        let id = NodeId(self.slots.len());
        self.slots.push(Some(data));
        self.depths.push(depth);
        self.live += 1;
        id
    }

    fn check_capacity(&self) -> TreeResult<()> {
        if self.live >= self.config.max_nodes {
            warn!(max_nodes = self.config.max_nodes, "policy tree node limit reached");
            return Err(TreeError::NodeLimitExceeded(self.config.max_nodes));
        }
        Ok(())
    }

    fn node(&self, id: NodeId) -> TreeResult<&NodeData> {
        self.get(id).ok_or(TreeError::UnknownNode(id))
    }

    fn node_mut(&mut self, id: NodeId) -> TreeResult<&mut NodeData> {
        self.slots
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .ok_or(TreeError::UnknownNode(id))
    }
}

impl NodeArena for TreeBuilder {
    fn root_id(&self) -> Option<NodeId> {
        self.root
    }

    fn get(&self, id: NodeId) -> Option<&NodeData> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }
}
