//! Utility modules
//!
//! - **error**: the gateway's own error type and its HTTP mapping
//! - **logging**: tracing subscriber setup and the coordination log sink

pub mod error;
pub mod logging;
