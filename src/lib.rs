//! # llm-gateway-recovery
//!
//! Error coordination for a multi-provider LLM gateway. Every failure that
//! surfaces from a pipeline execution is classified, and the coordinator
//! settles on exactly one recovery action: retry after a backoff, switch to a
//! healthy alternate pipeline, retire the failing pipeline, or return a
//! structured error to the caller.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use llm_gateway_recovery::{CoordinatorConfig, ErrorContext, ErrorCoordinator, PipelineError};
//!
//! # async fn run() {
//! let coordinator = ErrorCoordinator::new(CoordinatorConfig::default());
//!
//! let context = ErrorContext::new("req-42").with_pipeline("openai-gpt4");
//! let result = coordinator
//!     .handle_error(&PipelineError::new("ECONNREFUSED"), context)
//!     .await;
//!
//! println!("{} after {:?}ms", result.action_taken, result.retry_after_ms);
//! # }
//! ```
//!
//! ## Admin server
//!
//! ```rust,no_run
//! use llm_gateway_recovery::{AppState, Config, HttpServer};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/gateway.yaml").await?;
//!     HttpServer::new(AppState::with_reference_collaborators(config))
//!         .start()
//!         .await?;
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod core;
pub mod server;
pub mod utils;

// Re-export main types
pub use config::{BackoffStrategy, Config, CoordinatorConfig};
pub use utils::error::{GatewayError, Result};

pub use core::coordination::{
    ActionTaken, ErrorClassification, ErrorCode, ErrorContext, ErrorCoordinator,
    ErrorHandlingResult, ErrorHandlingStrategy, ErrorResponse, ErrorStats, ErrorType,
    PipelineError, ReturnedError,
};
pub use core::pipeline::{
    HealthAwareBalancer, LoadBalancer, PipelineHandle, PipelineHealth, PipelineId,
    PipelineManager, PipelineRegistry,
};
pub use server::{AppState, HttpServer, into_http_response};

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
