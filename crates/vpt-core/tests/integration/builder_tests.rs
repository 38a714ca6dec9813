//! Multi-level construction as done by certificate policy processing

use vpt_core::testing::string_set;
use vpt_core::oid::ANY_POLICY;
use vpt_core::{BuilderConfig, Error, NodeSpec, TreeBuilder, TreeError};

/// Certificate 1 asserts 1.1 and 1.2; certificate 2 asserts only 1.1.1
/// which is expected below 1.1.
#[test]
fn test_two_certificate_pass() {
    let mut builder = TreeBuilder::new(BuilderConfig::default());
    let root = builder
        .set_root(NodeSpec::any_policy().with_expected_policies([ANY_POLICY]))
        .unwrap();

    // certificate 1
    for policy in ["1.1", "1.2"] {
        for parent in builder.nodes_expected(0, policy, true) {
            builder
                .add_child(parent, NodeSpec::new(policy).with_expected_policies([policy]))
                .unwrap();
        }
    }
    let parent = builder.nodes_valid(1, "1.1")[0];
    builder.add_expected_policy(parent, "1.1.1").unwrap();
    builder.prune(1);
    let tree = builder.freeze();
    assert_eq!(tree.nodes_at_depth(1).len(), 2);

    // certificate 2
    let mut builder = tree.to_builder(BuilderConfig::default());
    for parent in builder.nodes_expected(1, "1.1.1", false) {
        builder
            .add_child(parent, NodeSpec::new("1.1.1").with_expected_policies(["1.1.1"]))
            .unwrap();
    }
    assert_eq!(builder.prune(2), 1);
    let tree = builder.freeze();

    assert_eq!(tree.len(), 3);
    assert!(tree.nodes_valid(1, "1.2").is_empty());
    let leaf = tree.nodes_at_depth(2)[0];
    assert_eq!(leaf.valid_policy(), "1.1.1");
    assert_eq!(leaf.parent().unwrap().expected_policies(), &string_set(&["1.1.1"]));
    assert_eq!(tree.root().unwrap().id(), root);
}

#[test]
fn test_null_tree_after_prune() {
    let mut builder = TreeBuilder::new(BuilderConfig::default());
    builder.set_root(NodeSpec::any_policy()).unwrap();
    builder.prune(1);
    let tree = builder.freeze();

    assert!(tree.is_empty());
    assert!(tree.root().is_none());
    assert_eq!(tree.to_string(), "");
}

#[test]
fn test_limits_from_json_config() {
    let config = BuilderConfig::from_json(r#"{ "max_nodes": 2 }"#).unwrap();
    let mut builder = TreeBuilder::new(config);
    let root = builder.set_root(NodeSpec::any_policy()).unwrap();
    builder.add_child(root, NodeSpec::new("1")).unwrap();

    let err: Error = builder.add_child(root, NodeSpec::new("2")).unwrap_err().into();
    assert!(matches!(err, Error::Tree(TreeError::NodeLimitExceeded(2))));
}

#[test]
fn test_invalid_config_rejected() {
    assert!(matches!(
        BuilderConfig::from_json(r#"{ "max_nodes": 0 }"#),
        Err(Error::InvalidConfig(_))
    ));
    assert!(matches!(BuilderConfig::from_json("not json"), Err(Error::ConfigParse(_))));
}

#[test]
fn test_rendering_after_build() {
    let mut builder = TreeBuilder::new(BuilderConfig::default());
    let root = builder.set_root(NodeSpec::any_policy()).unwrap();
    builder
        .add_child(
            root,
            NodeSpec::new("1.2.840.1")
                .with_critical(true)
                .with_expected_policies(["1.2.840.1"]),
        )
        .unwrap();
    let tree = builder.freeze();

    assert_eq!(
        tree.to_string(),
        "anyPolicy  ROOT\n  1.2.840.1  CRIT: true  EP: 1.2.840.1  (1)\n"
    );
}
