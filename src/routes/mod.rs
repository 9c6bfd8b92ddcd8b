// ============================================================================
// Axum Routes Module
// ============================================================================
//
// Structure:
// - mod.rs: router assembly and middleware ordering
// - resource.rs: resource and echo endpoints
// - health.rs: health check endpoint
// - middleware.rs: failure containment, admission gate, request logging
//
// ============================================================================

mod health;
pub mod middleware;
mod resource;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::context::AppContext;

/// Create the application router with all routes.
///
/// Middleware ordering is load-bearing: the failure containment wrapper must
/// be outermost so that a fault raised anywhere below it, including inside the
/// admission gate, is converted to a uniform 500 instead of escaping to the
/// transport layer. Layers added later wrap all layers added before them.
pub fn create_router(app_context: Arc<AppContext>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/resource", get(resource::get_resource))
        .route("/echo/:value", get(resource::echo))
        // Admission gate (innermost interceptor, directly above the handlers)
        .layer(axum::middleware::from_fn_with_state(
            app_context.clone(),
            middleware::admission_gate,
        ))
        .layer(
            ServiceBuilder::new()
                // Failure containment (outermost - wraps everything below)
                .layer(axum::middleware::from_fn(middleware::failure_containment))
                .layer(TraceLayer::new_for_http())
                .layer(axum::middleware::from_fn(middleware::request_logging))
                .into_inner(),
        )
        .with_state(app_context)
}
