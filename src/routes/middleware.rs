// ============================================================================
// Request Pipeline Middleware
// ============================================================================
//
// Fixed stage order: failure_containment -> admission_gate -> route handler.
// The containment wrapper runs outermost so a fault inside the gate is
// converted to a uniform 500 instead of crashing the request.
//
// ============================================================================

use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use futures::FutureExt;
use serde_json::json;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;

use crate::abf::{Decision, RequestAttributes};
use crate::context::AppContext;
use crate::error::AppError;

/// Request logging middleware
pub async fn request_logging(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    tracing::debug!(
        method = %method,
        path = %path,
        "Incoming request"
    );

    let response = next.run(req).await;

    tracing::info!(
        method = %method,
        path = %path,
        status = %response.status().as_u16(),
        duration_ms = start.elapsed().as_millis(),
        "Request completed"
    );

    response
}

/// Failure containment wrapper.
///
/// Outermost pipeline stage. Error-typed faults from inner stages are already
/// logged and mapped to 500 by `AppError`'s response conversion; panics are
/// caught here, logged at error severity, and mapped to the same uniform 500.
/// Every request that reaches the pipeline terminates with exactly one status
/// code, and the process stays alive to serve the next request.
pub async fn failure_containment(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    match AssertUnwindSafe(next.run(req)).catch_unwind().await {
        Ok(response) => response,
        Err(panic) => {
            tracing::error!(
                method = %method,
                path = %path,
                panic = %panic_message(&panic),
                error_code = "UNHANDLED_FAULT",
                "Unhandled fault in request pipeline"
            );

            let body = json!({
                "error": "Internal server error",
                "error_code": "UNHANDLED_FAULT",
                "status": StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(body)).into_response()
        }
    }
}

/// Admission gate.
///
/// Consults the injected anti-brute-force decision client before every
/// request. On deny the pipeline short-circuits with 502 Bad Gateway and the
/// downstream handler is never invoked; on allow the downstream result passes
/// through unchanged. A failing decision call is a fault, not a denial: it
/// propagates for the containment boundary to convert, with no local retry.
pub async fn admission_gate(
    State(ctx): State<Arc<AppContext>>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let attrs = RequestAttributes {
        method: req.method().to_string(),
        path: req.uri().path().to_string(),
        client_ip: extract_client_ip(req.headers()),
    };

    match ctx.decision_client.evaluate(&attrs).await? {
        Decision::Deny => {
            tracing::debug!(
                method = %attrs.method,
                path = %attrs.path,
                "Request didn't pass through antibruteforce"
            );
            Ok(StatusCode::BAD_GATEWAY.into_response())
        }
        Decision::Allow => {
            tracing::debug!(
                method = %attrs.method,
                path = %attrs.path,
                "Request passed through antibruteforce"
            );
            Ok(next.run(req).await)
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(msg) = panic.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        msg.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

/// Extract the client IP from proxy headers, if present.
fn extract_client_ip(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
