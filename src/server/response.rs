//! Translation of recovery results into HTTP responses
//!
//! | action | status | body |
//! |---|---|---|
//! | retry | 429 + `Retry-After` (whole seconds, rounded up) | retry notice |
//! | switched / destroyed | 503 | pipeline notice |
//! | returned | `returnedError.httpStatusCode` (500 if absent) | error response |

use crate::core::coordination::{ActionTaken, ErrorCoordinator, ErrorHandlingResult, PipelineError};
use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use actix_web::http::header::RETRY_AFTER;
use serde_json::json;

/// Build the caller-facing response for a handled error
pub fn into_http_response(result: &ErrorHandlingResult, error: &PipelineError) -> HttpResponse {
    let status =
        StatusCode::from_u16(result.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let request_id = &result.context.request_id;

    match result.action_taken {
        ActionTaken::Retry => {
            let retry_after_ms = result.retry_after_ms.unwrap_or_default();
            HttpResponse::build(status)
                .insert_header((RETRY_AFTER, retry_after_ms.div_ceil(1000).to_string()))
                .json(json!({
                    "error": {
                        "message": error.message,
                        "requestId": request_id,
                        "actionTaken": result.action_taken,
                        "retryAfterMs": retry_after_ms,
                    }
                }))
        }
        ActionTaken::Switched => HttpResponse::build(status).json(json!({
            "error": {
                "message": error.message,
                "requestId": request_id,
                "actionTaken": result.action_taken,
                "pipelineId": result.switched_to_pipeline,
            }
        })),
        ActionTaken::Destroyed => HttpResponse::build(status).json(json!({
            "error": {
                "message": error.message,
                "requestId": request_id,
                "actionTaken": result.action_taken,
                "pipelineId": result.destroyed_pipeline,
            }
        })),
        ActionTaken::Returned | ActionTaken::Ignored => {
            let message = result
                .returned_error
                .as_ref()
                .map(|details| details.message.as_str())
                .unwrap_or(error.message.as_str());
            let mut body = ErrorCoordinator::format_error_response(
                error,
                &result.context,
                Some(status.as_u16()),
            );
            body.error.message = message.to_string();
            HttpResponse::build(status).json(body)
        }
    }
}
