//! Error classification
//!
//! Resolution order, first match wins:
//!
//! 1. classification disabled: `UNKNOWN`, confidence 0, no remediation
//! 2. structured code: looked up in [`CODE_TABLE`], confidence 0.9
//! 3. message: case-insensitive keyword rules in [`MESSAGE_RULES`], top to bottom
//! 4. `UNKNOWN`
//!
//! The remediation flags come from [`remediation`] and depend on the type
//! alone (plus the caller's validation flag for fatality), so a logged error
//! always reclassifies the same way.

use super::error::{ErrorCode, PipelineError};
use super::stats::StatsRegister;
use super::types::{ErrorClassification, ErrorContext, ErrorType};
use std::sync::Arc;
use tracing::debug;

/// Confidence for a structured code match
pub const CODE_CONFIDENCE: f64 = 0.9;

/// Confidence when nothing matched
pub const UNKNOWN_CONFIDENCE: f64 = 0.1;

/// Code to type lookup
pub const CODE_TABLE: &[(ErrorCode, ErrorType)] = &[
    (ErrorCode::NetworkError, ErrorType::Connection),
    (ErrorCode::ConnectionRefused, ErrorType::Connection),
    (ErrorCode::ConnectionReset, ErrorType::Connection),
    (ErrorCode::ConnectionFailed, ErrorType::Connection),
    (ErrorCode::SocketError, ErrorType::Connection),
    (ErrorCode::DnsError, ErrorType::Connection),
    (ErrorCode::Timeout, ErrorType::Timeout),
    (ErrorCode::RequestTimeout, ErrorType::Timeout),
    (ErrorCode::UpstreamTimeout, ErrorType::Timeout),
    (ErrorCode::RateLimitExceeded, ErrorType::RateLimit),
    (ErrorCode::QuotaExceeded, ErrorType::RateLimit),
    (ErrorCode::TooManyRequests, ErrorType::RateLimit),
    (ErrorCode::AuthFailed, ErrorType::Auth),
    (ErrorCode::Unauthorized, ErrorType::Auth),
    (ErrorCode::PermissionDenied, ErrorType::Auth),
    (ErrorCode::InvalidToken, ErrorType::Auth),
    (ErrorCode::TokenExpired, ErrorType::Auth),
    (ErrorCode::ValidationError, ErrorType::Validation),
    (ErrorCode::InvalidFormat, ErrorType::Validation),
    (ErrorCode::InvalidRequest, ErrorType::Validation),
    (ErrorCode::MissingRequiredField, ErrorType::Validation),
    (ErrorCode::ConfigError, ErrorType::Validation),
    (ErrorCode::PipelineError, ErrorType::Pipeline),
    (ErrorCode::PipelineNotFound, ErrorType::Pipeline),
    (ErrorCode::ModuleError, ErrorType::Pipeline),
    (ErrorCode::ModuleInitFailed, ErrorType::Pipeline),
    (ErrorCode::TransformError, ErrorType::Transform),
    (ErrorCode::UnsupportedFormat, ErrorType::Transform),
    (ErrorCode::ProtocolMismatch, ErrorType::Transform),
];

/// Keyword rule over the error message
#[derive(Debug, Clone, Copy)]
pub struct MessageRule {
    /// Identifier reported as the matched pattern
    pub id: &'static str,
    /// Lowercase substrings; any one matching fires the rule
    pub keywords: &'static [&'static str],
    pub error_type: ErrorType,
    pub confidence: f64,
}

impl MessageRule {
    pub fn matches(&self, lowercase_message: &str) -> bool {
        self.keywords.iter().any(|k| lowercase_message.contains(k))
    }
}

/// Message rules in priority order
pub const MESSAGE_RULES: &[MessageRule] = &[
    MessageRule {
        id: "connection",
        keywords: &[
            "network",
            "connection",
            "socket",
            "econnrefused",
            "econnreset",
            "enotfound",
            "dns",
        ],
        error_type: ErrorType::Connection,
        confidence: 0.8,
    },
    MessageRule {
        id: "timeout",
        keywords: &["timeout", "timed out", "etimedout", "deadline exceeded"],
        error_type: ErrorType::Timeout,
        confidence: 0.8,
    },
    MessageRule {
        id: "rate_limit",
        keywords: &["rate limit", "rate-limit", "too many requests", "quota"],
        error_type: ErrorType::RateLimit,
        confidence: 0.8,
    },
    MessageRule {
        id: "auth",
        keywords: &[
            "unauthorized",
            "forbidden",
            "authentication",
            "authorization",
            "auth failed",
            "api key",
            "permission denied",
        ],
        error_type: ErrorType::Auth,
        confidence: 0.7,
    },
    MessageRule {
        id: "validation",
        keywords: &["validation", "invalid", "required"],
        error_type: ErrorType::Validation,
        confidence: 0.5,
    },
];

/// Remediation flags for one error type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Remediation {
    pub retryable: bool,
    pub fatal: bool,
    pub switch_pipeline: bool,
    pub destroy_pipeline: bool,
}

impl Remediation {
    const fn new(retryable: bool, fatal: bool, switch_pipeline: bool, destroy_pipeline: bool) -> Self {
        Self {
            retryable,
            fatal,
            switch_pipeline,
            destroy_pipeline,
        }
    }
}

/// Fixed remediation table
pub const fn remediation(error_type: ErrorType) -> Remediation {
    match error_type {
        ErrorType::Connection => Remediation::new(true, false, true, true),
        ErrorType::Timeout => Remediation::new(true, false, true, false),
        ErrorType::RateLimit => Remediation::new(true, false, true, false),
        ErrorType::Auth => Remediation::new(false, false, false, false),
        ErrorType::Validation => Remediation::new(false, true, false, false),
        ErrorType::Pipeline => Remediation::new(false, false, false, false),
        ErrorType::Transform => Remediation::new(false, false, false, false),
        ErrorType::Unknown => Remediation::new(false, false, false, false),
    }
}

fn base_hints(error_type: ErrorType) -> &'static [&'static str] {
    match error_type {
        ErrorType::Connection => &[
            "Check network connectivity to the upstream provider",
            "Verify the provider endpoint is reachable",
        ],
        ErrorType::Timeout => &[
            "The upstream provider is responding slowly",
            "Consider a longer request timeout",
        ],
        ErrorType::RateLimit => &[
            "The provider rate limit or quota was hit",
            "Spread load across more pipelines or wait before retrying",
        ],
        ErrorType::Auth => &[
            "Verify the provider API key or token",
            "Check the credential has permission for this model",
        ],
        ErrorType::Validation => &[
            "Check the request payload against the API schema",
            "Verify required fields are present",
        ],
        ErrorType::Pipeline => &["Check the pipeline configuration and module chain"],
        ErrorType::Transform => &["The request or response format could not be translated"],
        ErrorType::Unknown => &["Inspect the error chain for details"],
    }
}

/// Rule that resolved a type, before remediation is applied
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub error_type: ErrorType,
    pub confidence: f64,
    pub matched_pattern: String,
}

/// Look up a structured code
pub fn type_for_code(code: ErrorCode) -> Option<ErrorType> {
    CODE_TABLE
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, t)| *t)
}

/// Resolve an error's type without touching any counters
pub fn resolve(error: &PipelineError) -> Resolution {
    if let Some(code) = error.code {
        if let Some(error_type) = type_for_code(code) {
            return Resolution {
                error_type,
                confidence: CODE_CONFIDENCE,
                matched_pattern: format!("code:{}", code),
            };
        }
    }

    let message = error.message.to_lowercase();
    if let Some(rule) = MESSAGE_RULES.iter().find(|rule| rule.matches(&message)) {
        return Resolution {
            error_type: rule.error_type,
            confidence: rule.confidence,
            matched_pattern: format!("message:{}", rule.id),
        };
    }

    Resolution {
        error_type: ErrorType::Unknown,
        confidence: UNKNOWN_CONFIDENCE,
        matched_pattern: "fallback:unknown".to_string(),
    }
}

/// Classifier feeding the statistics register
#[derive(Debug)]
pub struct ErrorClassifier {
    enabled: bool,
    stats: Arc<StatsRegister>,
}

impl ErrorClassifier {
    pub fn new(enabled: bool, stats: Arc<StatsRegister>) -> Self {
        Self { enabled, stats }
    }

    /// Classify one failure and count it
    pub fn classify(&self, error: &PipelineError, context: &ErrorContext) -> ErrorClassification {
        if !self.enabled {
            return ErrorClassification {
                error_type: ErrorType::Unknown,
                confidence: 0.0,
                matched_pattern: "classification_disabled".to_string(),
                context_hints: Vec::new(),
                is_retryable: false,
                is_fatal: false,
                requires_pipeline_switch: false,
                requires_pipeline_destruction: false,
            };
        }

        let resolution = resolve(error);
        self.stats.record_error(resolution.error_type);

        debug!(
            request_id = %context.request_id,
            error_type = %resolution.error_type,
            matched_pattern = %resolution.matched_pattern,
            "Classified pipeline error"
        );

        build_classification(resolution, error, context)
    }
}

fn build_classification(
    resolution: Resolution,
    error: &PipelineError,
    context: &ErrorContext,
) -> ErrorClassification {
    let flags = remediation(resolution.error_type);

    let mut context_hints: Vec<String> = base_hints(resolution.error_type)
        .iter()
        .map(|h| h.to_string())
        .collect();
    if flags.retryable {
        if let Some(provider) = &context.provider {
            context_hints.push(format!("Provider '{}' may be degraded", provider));
        }
    }

    ErrorClassification {
        error_type: resolution.error_type,
        confidence: resolution.confidence,
        matched_pattern: resolution.matched_pattern,
        context_hints,
        is_retryable: flags.retryable,
        is_fatal: flags.fatal || error.validation,
        requires_pipeline_switch: flags.switch_pipeline,
        requires_pipeline_destruction: flags.destroy_pipeline,
    }
}
