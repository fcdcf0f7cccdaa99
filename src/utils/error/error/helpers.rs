//! Helper functions for creating specific error types

use super::types::GatewayError;

impl GatewayError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn load_balancer<S: Into<String>>(message: S) -> Self {
        Self::LoadBalancer(message.into())
    }

    pub fn pipeline_manager<S: Into<String>>(message: S) -> Self {
        Self::PipelineManager(message.into())
    }

    pub fn pipeline_not_found<S: Into<String>>(pipeline_id: S) -> Self {
        Self::PipelineNotFound(pipeline_id.into())
    }

    pub fn server<S: Into<String>>(message: S) -> Self {
        Self::Server(message.into())
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }
}
