//! Integration tests for valid policy tree construction and traversal

mod builder_tests;
mod node_contract_tests;
mod qualifier_tests;
mod store_tests;
