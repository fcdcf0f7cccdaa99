//! Core functionality
//!
//! - `coordination` - classification, recovery policy, execution, statistics
//! - `pipeline` - the pipeline collaborators the coordinator consumes

pub mod coordination;
pub mod pipeline;
