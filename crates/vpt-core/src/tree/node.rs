//! Read-only node view

use super::children::{Ancestors, Children, Descendants};
use super::render::render_subtree;
use super::{NodeData, NodeId, ValidPolicyTree};
use crate::qualifier::PolicyQualifierValue;
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};

/// One node of a [`ValidPolicyTree`]
///
/// A cheap, copyable handle. Everything it hands out borrows from the tree,
/// so the node's state can be inspected but never changed.
#[derive(Clone, Copy)]
pub struct PolicyNode<'a> {
    tree: &'a ValidPolicyTree,
    id: NodeId,
}

impl<'a> PolicyNode<'a> {
    pub(crate) fn new(tree: &'a ValidPolicyTree, id: NodeId) -> Self {
        Self { tree, id }
    }

    #[inline]
    fn data(&self) -> &'a NodeData {
        self.tree.data(self.id)
    }

    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The tree this node belongs to
    pub fn tree(&self) -> &'a ValidPolicyTree {
        self.tree
    }

    /// Number of parent links up to the root; the root is at depth 0
    pub fn depth(&self) -> usize {
        self.ancestors().count()
    }

    /// Policy identifier this node represents, `""` if none was supplied
    pub fn valid_policy(&self) -> &'a str {
        &self.data().valid_policy
    }

    /// Criticality of the certificate policies extension that produced this node
    pub fn is_critical(&self) -> bool {
        self.data().critical
    }

    /// Whether this node was created by policy mapping
    pub fn is_generated_by_mapping(&self) -> bool {
        self.data().generated_by_mapping
    }

    /// The parent, `None` for the root
    pub fn parent(&self) -> Option<PolicyNode<'a>> {
        self.data().parent.map(|parent| PolicyNode::new(self.tree, parent))
    }

    /// Policies that satisfy this node's policy in the next certificate
    pub fn expected_policies(&self) -> &'a HashSet<String> {
        &self.data().expected_policies
    }

    /// Qualifiers of the certificate policy that produced this node
    pub fn policy_qualifiers(&self) -> &'a HashSet<PolicyQualifierValue> {
        &self.data().qualifiers
    }

    /// Read-only sequence over the direct children
    pub fn children(&self) -> Children<'a> {
        Children::new(self.tree, &self.data().children)
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.data().children.is_empty()
    }

    /// Parent, grandparent and so on up to the root
    pub fn ancestors(&self) -> Ancestors<'a> {
        Ancestors::new(self.parent())
    }

    /// Every node below this one, in pre-order
    pub fn descendants(&self) -> Descendants<'a> {
        Descendants::new(self.tree, &self.data().children)
    }
}

impl PartialEq for PolicyNode<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for PolicyNode<'_> {}

impl Hash for PolicyNode<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(self.tree, state);
        self.id.hash(state);
    }
}

impl fmt::Debug for PolicyNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PolicyNode")
            .field("id", &self.id)
            .field("valid_policy", &self.valid_policy())
            .field("critical", &self.is_critical())
            .field("expected_policies", self.expected_policies())
            .field("qualifiers", &self.policy_qualifiers().len())
            .field("children", &self.data().children.len())
            .finish()
    }
}

/// Renders this node and its subtree
impl fmt::Display for PolicyNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_subtree(*self))
    }
}
