//! Visitor pattern for traversing policy trees

use crate::tree::{PolicyNode, ValidPolicyTree};

/// Visitor trait for tree traversal
///
/// The walk is iterative, so trees of any depth can be visited.
pub trait Visitor<'a> {
    /// Called once per node in pre-order with the node's depth in its tree
    fn visit_node(&mut self, node: PolicyNode<'a>, depth: usize);
}

/// Walk the subtree rooted at `node`, `node` included
pub fn walk_node<'a, V: Visitor<'a> + ?Sized>(visitor: &mut V, node: PolicyNode<'a>) {
    let mut stack = vec![(node, node.depth())];
    while let Some((current, depth)) = stack.pop() {
        visitor.visit_node(current, depth);
        stack.extend(current.children().rev().map(|child| (child, depth + 1)));
    }
}

/// Walk a whole tree starting at its root; the NULL tree visits nothing
pub fn walk_tree<'a, V: Visitor<'a> + ?Sized>(visitor: &mut V, tree: &'a ValidPolicyTree) {
    if let Some(root) = tree.root() {
        walk_node(visitor, root);
    }
}

/// Shape summary of a tree
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeStats {
    pub nodes: usize,
    pub leaves: usize,
    pub critical: usize,
    pub mapped: usize,
    /// Node count per depth, index 0 being the root level
    pub per_depth: Vec<usize>,
}

impl TreeStats {
    pub fn collect(tree: &ValidPolicyTree) -> Self {
        let mut stats = Self::default();
        walk_tree(&mut stats, tree);
        stats
    }
}

impl<'a> Visitor<'a> for TreeStats {
    fn visit_node(&mut self, node: PolicyNode<'a>, depth: usize) {
        self.nodes += 1;
        if node.is_leaf() {
            self.leaves += 1;
        }
        if node.is_critical() {
            self.critical += 1;
        }
        if node.is_generated_by_mapping() {
            self.mapped += 1;
        }

        if self.per_depth.len() <= depth {
            self.per_depth.resize(depth + 1, 0);
        }
        self.per_depth[depth] += 1;
    }
}
