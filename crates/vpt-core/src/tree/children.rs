//! Iterators over tree structure
//!
//! All of them borrow the tree. The borrow already rules out structural
//! changes at compile time; [`Children`] additionally keeps the
//! remove/insert entry points of a mutable cursor and rejects them at run
//! time with [`TreeError::ModificationNotSupported`].

use super::{NodeId, PolicyNode, TreeError, TreeResult, ValidPolicyTree};
use crate::builder::NodeSpec;
use std::fmt;
use std::iter::FusedIterator;
use tracing::warn;

/// Read-only sequence over the direct children of a node
///
/// Finite and restartable: every call to [`PolicyNode::children`] starts a
/// fresh traversal, and cloning a partially consumed sequence resumes from
/// the same position.
#[derive(Clone)]
pub struct Children<'a> {
    tree: &'a ValidPolicyTree,
    ids: std::slice::Iter<'a, NodeId>,
}

impl<'a> Children<'a> {
    pub(crate) fn new(tree: &'a ValidPolicyTree, ids: &'a [NodeId]) -> Self {
        Self { tree, ids: ids.iter() }
    }

    /// Whether another child remains; never fails, even on a leaf
    #[inline]
    pub fn has_next(&self) -> bool {
        !self.ids.as_slice().is_empty()
    }

    /// Always rejected; the tree is left intact
    pub fn remove(&mut self) -> TreeResult<()> {
        warn!(remaining = self.ids.len(), "rejected child removal on a frozen policy tree");
        Err(TreeError::ModificationNotSupported)
    }

    /// Always rejected; the tree is left intact
    pub fn insert(&mut self, child: NodeSpec) -> TreeResult<()> {
        warn!(
            valid_policy = child.valid_policy.as_deref().unwrap_or_default(),
            "rejected child insertion on a frozen policy tree"
        );
        Err(TreeError::ModificationNotSupported)
    }
}

impl<'a> Iterator for Children<'a> {
    type Item = PolicyNode<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.ids.next().map(|id| PolicyNode::new(self.tree, *id))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.ids.size_hint()
    }
}

impl DoubleEndedIterator for Children<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.ids.next_back().map(|id| PolicyNode::new(self.tree, *id))
    }
}

impl ExactSizeIterator for Children<'_> {}

impl FusedIterator for Children<'_> {}

impl fmt::Debug for Children<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Children").field("remaining", &self.ids.as_slice()).finish()
    }
}

/// Walks from a node's parent up to the root
#[derive(Debug, Clone)]
pub struct Ancestors<'a> {
    next: Option<PolicyNode<'a>>,
}

impl<'a> Ancestors<'a> {
    pub(crate) fn new(start: Option<PolicyNode<'a>>) -> Self {
        Self { next: start }
    }
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = PolicyNode<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        self.next = node.parent();
        Some(node)
    }
}

impl FusedIterator for Ancestors<'_> {}

/// Pre-order walk over a subtree, excluding its root
#[derive(Debug, Clone)]
pub struct Descendants<'a> {
    tree: &'a ValidPolicyTree,
    stack: Vec<NodeId>,
}

impl<'a> Descendants<'a> {
    pub(crate) fn new(tree: &'a ValidPolicyTree, children: &[NodeId]) -> Self {
        Self { tree, stack: children.iter().rev().copied().collect() }
    }
}

impl<'a> Iterator for Descendants<'a> {
    type Item = PolicyNode<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        self.stack.extend(self.tree.data(id).children.iter().rev());
        Some(PolicyNode::new(self.tree, id))
    }
}

impl FusedIterator for Descendants<'_> {}
