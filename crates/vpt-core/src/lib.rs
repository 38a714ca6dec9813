//! Valid policy tree for X.509 certificate path validation
//!
//! Policy processing builds one level of the tree per certificate in the
//! chain. The [`TreeBuilder`] is the only writer; once frozen, a
//! [`ValidPolicyTree`] is read-only and may be walked from any number of
//! threads through [`PolicyNode`] views.

pub mod builder;
pub mod config;
pub mod oid;
pub mod qualifier;
pub mod store;
pub mod tree;
pub mod visitor;

// Test utilities (available in tests and when the `testing` feature is enabled)
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use builder::{NodeSpec, TreeBuilder};
pub use config::BuilderConfig;
pub use qualifier::PolicyQualifierValue;
pub use store::{PolicyTreeStore, StoreStatSnapshot, TreeSnapshot};
pub use tree::{Children, NodeId, PolicyNode, TreeError, ValidPolicyTree};
pub use vpt_parser::DecodingError;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Tree error: {0}")]
    Tree(#[from] TreeError),

    #[error("Decoding error: {0}")]
    Decoding(#[from] DecodingError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
