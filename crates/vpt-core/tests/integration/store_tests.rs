//! Publishing frozen trees to concurrent readers

use std::sync::Arc;
use std::thread;
use vpt_core::visitor::TreeStats;
use vpt_core::{BuilderConfig, NodeSpec, PolicyTreeStore, TreeBuilder, ValidPolicyTree};

fn level_tree(width: usize) -> ValidPolicyTree {
    let mut builder = TreeBuilder::new(BuilderConfig::default());
    let root = builder.set_root(NodeSpec::any_policy()).unwrap();
    for i in 0..width {
        builder.add_child(root, NodeSpec::new(format!("1.{}", i))).unwrap();
    }
    builder.freeze()
}

#[test]
fn test_readers_see_whole_trees() {
    let store = Arc::new(PolicyTreeStore::new());
    store.publish(level_tree(1));

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for _ in 0..200 {
                    let snap = store.snapshot().unwrap();
                    // every published tree has version-many children
                    let width = snap.tree().root().unwrap().children().count() as u64;
                    assert_eq!(width, snap.version);
                }
            })
        })
        .collect();

    for width in 2..=20 {
        store.publish(level_tree(width));
    }

    for reader in readers {
        reader.join().unwrap();
    }
    assert_eq!(store.version(), 20);
}

#[test]
fn test_publish_pruned_successor() {
    let store = PolicyTreeStore::new();
    store.publish(level_tree(3));

    let current = store.snapshot().unwrap();
    let mut builder = current.tree().to_builder(BuilderConfig::default());
    let keep = builder.nodes_valid(1, "1.0")[0];
    builder.add_child(keep, NodeSpec::new("1.0.0")).unwrap();
    builder.prune(2);
    let version = store.publish(builder.freeze());

    let next = store.snapshot().unwrap();
    assert_eq!(next.version, version);
    assert_eq!(TreeStats::collect(next.tree()).per_depth, vec![1, 1, 1]);
    assert_eq!(TreeStats::collect(current.tree()).per_depth, vec![1, 3]);
}
