//! Builder configuration
//!
//! Policy mapping lets every certificate multiply the number of nodes at the
//! next level, so an unbounded tree can be grown to exhaust memory by a
//! crafted chain. The limits here cap both dimensions.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Default maximum depth (chain length)
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Default maximum number of live nodes
pub const DEFAULT_MAX_NODES: usize = 1000;

/// Limits enforced by [`crate::TreeBuilder`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    /// Deepest level a node may be added at (the root is level 0)
    pub max_depth: usize,
    /// Maximum number of live nodes in one builder
    pub max_nodes: usize,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_nodes: DEFAULT_MAX_NODES,
        }
    }
}

impl BuilderConfig {
    /// No limits at all
    pub fn unbounded() -> Self {
        Self {
            max_depth: usize::MAX,
            max_nodes: usize::MAX,
        }
    }

    /// Set the depth limit
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the node limit
    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = max_nodes;
        self
    }

    /// Parse and validate a JSON configuration; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_nodes == 0 {
            return Err(Error::InvalidConfig("max_nodes must be at least 1".to_string()));
        }
        Ok(())
    }
}
