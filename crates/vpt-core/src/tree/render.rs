//! Text rendering of policy trees
//!
//! ```text
//! anyPolicy  ROOT
//!   1.2.3  CRIT: false  EP: 1.2.3  (1)
//!     anyPolicy  CRIT: true  EP: anyPolicy  (2)
//! ```

use super::PolicyNode;
use crate::oid::policy_to_string;
use crate::visitor::{walk_node, Visitor};

pub(crate) fn render_subtree(node: PolicyNode<'_>) -> String {
    let mut renderer = Renderer::default();
    walk_node(&mut renderer, node);
    renderer.out
}

#[derive(Default)]
struct Renderer {
    out: String,
}

impl<'a> Visitor<'a> for Renderer {
    fn visit_node(&mut self, node: PolicyNode<'a>, depth: usize) {
        if node.parent().is_none() {
            self.out.push_str(policy_to_string(node.valid_policy()));
            self.out.push_str("  ROOT\n");
            return;
        }

        for _ in 0..depth {
            self.out.push_str("  ");
        }
        self.out.push_str(policy_to_string(node.valid_policy()));
        self.out.push_str("  CRIT: ");
        self.out.push_str(if node.is_critical() { "true" } else { "false" });
        self.out.push_str("  EP: ");

        let mut expected: Vec<&str> = node.expected_policies().iter().map(String::as_str).collect();
        expected.sort_unstable();
        for policy in expected {
            self.out.push_str(policy_to_string(policy));
            self.out.push(' ');
        }
        self.out.push_str(" (");
        self.out.push_str(&depth.to_string());
        self.out.push_str(")\n");
    }
}
