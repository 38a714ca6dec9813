//! Test utilities and helper functions for policy tree tests
//!
//! Common fixtures shared by unit tests, integration tests and benchmarks.

use crate::builder::{NodeSpec, TreeBuilder};
use crate::config::BuilderConfig;
use crate::qualifier::PolicyQualifierValue;
use crate::tree::ValidPolicyTree;
use std::collections::HashSet;

/// Policy identifier used where any non-anyPolicy value will do
pub const VALID_POLICY: &str = "ValidPolicy";

/// DER of a `PolicyQualifierInfo` carrying a CPS pointer to
/// `http://www.qq.com/stmt.txt`
///
/// # Examples
/// ```
/// use vpt_core::testing::cps_qualifier_der;
///
/// let der = cps_qualifier_der();
/// assert_eq!(der[0], 0x30);
/// assert_eq!(der.len(), 40);
/// ```
pub fn cps_qualifier_der() -> Vec<u8> {
    let mut der = vec![
        0x30, 0x26, 0x06, 0x08, 0x2b, 0x06, 0x01, 0x05, 0x05, 0x07, 0x02, 0x01, 0x16, 0x1a,
    ];
    der.extend_from_slice(b"http://www.qq.com/stmt.txt");
    der
}

/// Qualifier set holding the single decoded [`cps_qualifier_der`] value
///
/// # Examples
/// ```
/// use vpt_core::testing::cps_qualifier_set;
///
/// assert_eq!(cps_qualifier_set().len(), 1);
/// ```
pub fn cps_qualifier_set() -> HashSet<PolicyQualifierValue> {
    let value = PolicyQualifierValue::from_der(&cps_qualifier_der())
        .expect("fixture qualifier must decode");
    HashSet::from([value])
}

/// Owned string set from literals
pub fn string_set(items: &[&str]) -> HashSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Critical anyPolicy root with a single path below it
///
/// Each node on the path expects its own policy, the way policy processing
/// creates nodes for a certificate policy.
///
/// # Examples
/// ```
/// use vpt_core::testing::chain_tree;
///
/// let tree = chain_tree(&["1.1", "1.1.1"]);
/// assert_eq!(tree.len(), 3);
/// assert_eq!(tree.max_depth(), Some(2));
/// ```
pub fn chain_tree(policies: &[&str]) -> ValidPolicyTree {
    let mut builder = TreeBuilder::new(BuilderConfig::unbounded());
    let mut parent = builder
        .set_root(NodeSpec::any_policy().with_critical(true))
        .expect("empty builder accepts a root");

    for policy in policies {
        parent = builder
            .add_child(parent, NodeSpec::new(*policy).with_expected_policies([*policy]))
            .expect("unbounded builder accepts children");
    }
    builder.freeze()
}

/// Builder holding a single path of `len` nodes below an anyPolicy root
///
/// # Examples
/// ```
/// use vpt_core::testing::deep_chain;
///
/// let builder = deep_chain(4);
/// assert_eq!(builder.len(), 5);
/// assert_eq!(builder.nodes_at_depth(4).len(), 1);
/// ```
pub fn deep_chain(len: usize) -> TreeBuilder {
    let mut builder = TreeBuilder::new(BuilderConfig::unbounded());
    let mut parent = builder
        .set_root(NodeSpec::any_policy())
        .expect("empty builder accepts a root");
    for _ in 0..len {
        parent = builder
            .add_child(parent, NodeSpec::new(VALID_POLICY))
            .expect("unbounded builder accepts children");
    }
    builder
}

/// Complete tree with `fanout` children per node down to `depth`
///
/// # Examples
/// ```
/// use vpt_core::testing::wide_tree;
///
/// let tree = wide_tree(2, 3);
/// assert_eq!(tree.len(), 1 + 3 + 9);
/// ```
pub fn wide_tree(depth: usize, fanout: usize) -> ValidPolicyTree {
    let mut builder = TreeBuilder::new(BuilderConfig::unbounded());
    let root = builder
        .set_root(NodeSpec::any_policy())
        .expect("empty builder accepts a root");

    let mut level = vec![(root, String::from("1"))];
    for _ in 0..depth {
        let mut next = Vec::with_capacity(level.len() * fanout);
        for (parent, prefix) in &level {
            for i in 0..fanout {
                let policy = format!("{}.{}", prefix, i);
                let spec = NodeSpec::new(policy.clone()).with_expected_policies([policy.clone()]);
                let id = builder
                    .add_child(*parent, spec)
                    .expect("unbounded builder accepts children");
                next.push((id, policy));
            }
        }
        level = next;
    }
    builder.freeze()
}
