//! Depth-bounded searches shared by the builder and the frozen tree

use super::{NodeData, NodeId};
use crate::oid::ANY_POLICY;

/// Read access to an arena of nodes
pub(crate) trait NodeArena {
    fn root_id(&self) -> Option<NodeId>;

    fn get(&self, id: NodeId) -> Option<&NodeData>;
}

/// Ids of the nodes at `depth` accepted by `keep`, in pre-order
pub(crate) fn at_depth<A, F>(arena: &A, depth: usize, keep: F) -> Vec<NodeId>
where
    A: NodeArena + ?Sized,
    F: Fn(&NodeData) -> bool,
{
    let mut out = Vec::new();
    let mut stack: Vec<(NodeId, usize)> = arena.root_id().into_iter().map(|id| (id, 0)).collect();
    while let Some((id, current)) = stack.pop() {
        let Some(node) = arena.get(id) else {
            continue;
        };
        if current == depth {
            if keep(node) {
                out.push(id);
            }
            continue;
        }
        stack.extend(node.children.iter().rev().map(|&child| (child, current + 1)));
    }
    out
}

/// Filter for nodes expecting `policy` (see `ValidPolicyTree::nodes_expected`)
pub(crate) fn expects(policy: &str, match_any: bool) -> impl Fn(&NodeData) -> bool + '_ {
    move |node: &NodeData| {
        if policy == ANY_POLICY {
            true
        } else if match_any {
            node.expected_policies.contains(ANY_POLICY)
        } else {
            node.expected_policies.contains(policy)
        }
    }
}

pub(crate) fn has_valid_policy(policy: &str) -> impl Fn(&NodeData) -> bool + '_ {
    move |node: &NodeData| node.valid_policy == policy
}
