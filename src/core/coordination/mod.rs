//! Error Coordination Center
//!
//! Classifies every failure surfacing from a pipeline execution, decides how
//! to recover, carries the decision out, and keeps statistics.
//!
//! - `types` - error taxonomy, execution context, classification
//! - `error` - the pipeline error handed to the coordinator
//! - `classifier` - ordered code and message rule tables
//! - `policy` - strategy selection
//! - `strategy` - the strategy sum type
//! - `executor` - strategy execution, backoff and status mapping
//! - `result` - outcome records and caller-facing error bodies
//! - `stats` - statistics register
//! - `coordinator` - the `handle_error` facade

pub mod classifier;
pub mod coordinator;
pub mod error;
pub mod executor;
pub mod policy;
pub mod result;
pub mod stats;
pub mod strategy;
pub mod types;

#[cfg(test)]
mod tests;

pub use classifier::ErrorClassifier;
pub use coordinator::{ErrorCoordinator, ErrorCoordinatorBuilder};
pub use error::{ErrorCode, PipelineError};
pub use executor::{StrategyExecutor, calculate_backoff_delay, http_status_for};
pub use policy::RecoveryPolicy;
pub use result::{
    ActionTaken, ErrorHandlingResult, ErrorResponse, ErrorResponseDetail, HandlingFailure,
    ReturnedError,
};
pub use stats::{ErrorStats, StatsRegister};
pub use strategy::ErrorHandlingStrategy;
pub use types::{ErrorClassification, ErrorContext, ErrorType};
