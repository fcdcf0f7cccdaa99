//! Integration tests
//!
//! These go through the public API and use the in-memory collaborators
//! instead of fakes.

pub mod config_tests;
pub mod coordination_tests;
pub mod http_tests;
