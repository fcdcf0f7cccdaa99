//! Common test utilities
//!
//! ```rust,ignore
//! use crate::common::fixtures::GatewayFixture;
//!
//! let fixture = GatewayFixture::with_pipelines(&["p1", "p2"]);
//! let result = fixture.coordinator.handle_error(&error, context).await;
//! ```

pub mod fixtures;

pub use fixtures::{ErrorFactory, GatewayFixture};
