//! Logging utilities
//!
//! Subscriber setup plus the sink the coordinator reports handled errors to.

pub mod error_logger;
pub mod subscriber;

pub use error_logger::{ErrorLogger, TracingErrorLogger};
pub use subscriber::init_tracing;
