//! Pipeline collaborators
//!
//! - `traits` - `PipelineManager` and `LoadBalancer`, the boundary the
//!   coordinator consumes
//! - `registry` - in-memory `PipelineManager`
//! - `balancer` - in-memory, health-aware `LoadBalancer`

pub mod balancer;
pub mod registry;
pub mod traits;

pub use balancer::{HealthAwareBalancer, PipelineHealth};
pub use registry::PipelineRegistry;
pub use traits::{LoadBalancer, PipelineHandle, PipelineId, PipelineManager};
