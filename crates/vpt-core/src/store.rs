//! Publication point for frozen policy trees
//!
//! Path validation has one writer per chain: it builds a level, prunes, and
//! freezes. Readers (policy constraint checks, reporting, auditing) only
//! ever see whole frozen trees.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │   Readers   │ (multiple, concurrent, lock-free)
//! └──────┬──────┘
//!        │ load_full()
//!        ▼
//! ┌──────────────────────────┐
//! │  PolicyTreeStore         │
//! │  ArcSwapOption<Snapshot> │ ◄─── Atomic swap
//! └──────────────────────────┘
//!        ▲
//!        │ freeze & publish
//! ┌──────┴──────┐
//! │ TreeBuilder │ (single writer)
//! └─────────────┘
//! ```
//!
//! A reader holding a snapshot keeps its tree alive, so publishing a pruned
//! tree never frees nodes that are still being walked.

use crate::tree::{PolicyNode, TreeError, TreeResult, ValidPolicyTree};
use crate::visitor::TreeStats;
use arc_swap::ArcSwapOption;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, Level};

/// A published tree and its version
#[derive(Debug)]
pub struct TreeSnapshot {
    /// Version number (monotonically increasing, starts at 1)
    pub version: u64,

    tree: ValidPolicyTree,
}

impl TreeSnapshot {
    #[inline]
    pub fn tree(&self) -> &ValidPolicyTree {
        &self.tree
    }

    /// Root of the published tree; the NULL tree has none
    pub fn root(&self) -> TreeResult<PolicyNode<'_>> {
        self.tree.root().ok_or(TreeError::MissingRoot)
    }
}

/// Store statistics
#[derive(Debug, Default)]
struct StoreStats {
    reads: AtomicU64,
    publishes: AtomicU64,
    clears: AtomicU64,
}

/// Point-in-time copy of the store counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreStatSnapshot {
    /// Calls to [`PolicyTreeStore::snapshot`]
    pub reads: u64,
    /// Trees published
    pub publishes: u64,
    /// Calls to [`PolicyTreeStore::clear`]
    pub clears: u64,
    /// Version of the most recent publish, 0 if none
    pub current_version: u64,
}

/// Lock-free reader access to the latest frozen tree
#[derive(Debug, Default)]
pub struct PolicyTreeStore {
    current: ArcSwapOption<TreeSnapshot>,

    /// Serializes writers and holds the last issued version
    writer: Mutex<u64>,

    stats: StoreStats,
}

impl PolicyTreeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current tree; returns the new version
    pub fn publish(&self, tree: ValidPolicyTree) -> u64 {
        let mut version = self.writer.lock();
        *version += 1;

        if tracing::enabled!(Level::DEBUG) {
            let stats = TreeStats::collect(&tree);
            debug!(
                version = *version,
                nodes = stats.nodes,
                leaves = stats.leaves,
                depth = stats.per_depth.len(),
                "published valid policy tree"
            );
        }

        self.current.store(Some(Arc::new(TreeSnapshot {
            version: *version,
            tree,
        })));
        self.stats.publishes.fetch_add(1, Ordering::Relaxed);
        *version
    }

    /// Current snapshot, `None` before the first publish or after a clear
    #[inline]
    pub fn snapshot(&self) -> Option<Arc<TreeSnapshot>> {
        self.stats.reads.fetch_add(1, Ordering::Relaxed);
        self.current.load_full()
    }

    /// Drop the current tree; outstanding snapshots stay valid
    pub fn clear(&self) {
        let _writer = self.writer.lock();
        self.current.store(None);
        self.stats.clears.fetch_add(1, Ordering::Relaxed);
        debug!("cleared policy tree store");
    }

    /// Version of the most recent publish, 0 if none
    pub fn version(&self) -> u64 {
        *self.writer.lock()
    }

    pub fn stats(&self) -> StoreStatSnapshot {
        StoreStatSnapshot {
            reads: self.stats.reads.load(Ordering::Relaxed),
            publishes: self.stats.publishes.load(Ordering::Relaxed),
            clears: self.stats.clears.load(Ordering::Relaxed),
            current_version: self.version(),
        }
    }
}
