//! Error handling for the gateway
//!
//! This module defines the error type used by the gateway's own machinery.

#![allow(missing_docs)]

mod helpers;
mod response;
mod types;

pub use response::{ErrorDetail, ErrorResponse};
pub use types::{GatewayError, Result};
