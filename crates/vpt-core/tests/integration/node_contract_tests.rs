//! Read-only node contract: depth, parent, sets and child sequences

use vpt_core::testing::{cps_qualifier_der, cps_qualifier_set, string_set, VALID_POLICY};
use vpt_core::oid::ANY_POLICY;
use vpt_core::{BuilderConfig, NodeSpec, TreeBuilder, TreeError, ValidPolicyTree};

/// R (critical) -> C1 -> C2 (anyPolicy)
fn three_level_tree() -> ValidPolicyTree {
    let mut builder = TreeBuilder::new(BuilderConfig::default());
    let r = builder
        .set_root(NodeSpec::new(VALID_POLICY).with_critical(true))
        .unwrap();
    let c1 = builder.add_child(r, NodeSpec::new(VALID_POLICY)).unwrap();
    builder.add_child(c1, NodeSpec::new(ANY_POLICY)).unwrap();
    builder.freeze()
}

#[test]
fn test_depth_scenario() {
    let tree = three_level_tree();

    let r = tree.root().unwrap();
    assert_eq!(r.depth(), 0);
    assert!(r.is_critical());

    let c1 = r.children().next().unwrap();
    assert_eq!(c1.depth(), 1);
    assert_eq!(c1.parent().unwrap().depth(), 0);

    let c2 = c1.children().next().unwrap();
    assert_eq!(c2.valid_policy(), "2.5.29.32.0");
    assert_eq!(c2.depth(), 2);
}

#[test]
fn test_depth_is_parent_depth_plus_one() {
    let tree = three_level_tree();
    for node in tree.nodes() {
        match node.parent() {
            Some(parent) => assert_eq!(node.depth(), parent.depth() + 1),
            None => assert_eq!(node.depth(), 0),
        }
    }
}

#[test]
fn test_parent_is_exact_instance() {
    let tree = three_level_tree();
    let r = tree.root().unwrap();
    let c1 = r.children().next().unwrap();
    assert_eq!(c1.parent(), Some(r));
    assert_eq!(c1.parent().unwrap().id(), r.id());
}

#[test]
fn test_root_parent_absent() {
    let mut builder = TreeBuilder::new(BuilderConfig::default());
    builder.set_root(NodeSpec::default()).unwrap();
    let tree = builder.freeze();
    let root = tree.root().unwrap();

    assert!(root.parent().is_none());
    assert_eq!(root.depth(), 0);
    assert_eq!(root.valid_policy(), "");
}

#[test]
fn test_empty_sets_when_none_supplied() {
    let tree = three_level_tree();
    for node in tree.nodes() {
        assert!(node.expected_policies().is_empty());
        assert!(node.policy_qualifiers().is_empty());
    }
}

#[test]
fn test_sets_match_construction() {
    let expected = string_set(&["StringParameter1", "StringParameter2", "StringParameter3"]);
    let qualifiers = cps_qualifier_set();

    let mut builder = TreeBuilder::new(BuilderConfig::default());
    let root = builder.set_root(NodeSpec::any_policy()).unwrap();
    builder
        .add_child(
            root,
            NodeSpec::new(VALID_POLICY)
                .with_expected_policies(expected.clone())
                .with_qualifiers(qualifiers.clone()),
        )
        .unwrap();
    let tree = builder.freeze();
    let node = tree.nodes_valid(1, VALID_POLICY)[0];

    assert_eq!(node.expected_policies(), &expected);
    assert_eq!(node.expected_policies().len(), 3);
    assert_eq!(node.policy_qualifiers(), &qualifiers);
    assert_eq!(node.policy_qualifiers().len(), 1);
}

#[test]
fn test_duplicate_qualifiers_collapse() {
    let der = cps_qualifier_der();
    let value = vpt_core::PolicyQualifierValue::from_der(&der).unwrap();

    let mut builder = TreeBuilder::new(BuilderConfig::default());
    builder
        .set_root(NodeSpec::any_policy().with_qualifiers([value.clone(), value]))
        .unwrap();
    let tree = builder.freeze();
    assert_eq!(tree.root().unwrap().policy_qualifiers().len(), 1);
}

#[test]
fn test_leaf_children_report_nothing() {
    let tree = three_level_tree();
    let leaf = tree.nodes_at_depth(2)[0];
    assert!(leaf.is_leaf());

    let children = leaf.children();
    assert!(!children.has_next());
    assert_eq!(children.count(), 0);
}

#[test]
fn test_remove_fails_on_empty_and_non_empty_sequences() {
    let tree = three_level_tree();

    let mut non_empty = tree.root().unwrap().children();
    assert!(non_empty.has_next());
    assert_eq!(non_empty.remove(), Err(TreeError::ModificationNotSupported));

    let mut empty = tree.nodes_at_depth(2)[0].children();
    assert_eq!(empty.remove(), Err(TreeError::ModificationNotSupported));
    assert_eq!(
        empty.insert(NodeSpec::new("1.2.3")),
        Err(TreeError::ModificationNotSupported)
    );

    assert_eq!(tree.len(), 3);
    assert_eq!(tree.root().unwrap().children().count(), 1);
}

#[test]
fn test_children_restart_each_call() {
    let tree = three_level_tree();
    let root = tree.root().unwrap();

    let mut first = root.children();
    first.next();
    assert!(!first.has_next());

    assert!(root.children().has_next());
}

#[test]
fn test_concurrent_traversal() {
    let tree = three_level_tree();

    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                let root = tree.root().unwrap();
                let visited = root.descendants().count();
                assert_eq!(visited, 2);
            });
        }
    });
}
