//! HTTP routes.
//!
//! One named route (the health probe) plus a fallback that hands every
//! other path to the content dispatcher. The fallback matches all methods
//! on purpose: the dispatcher answers non-GET requests itself with the
//! historical 404 rather than letting the router emit a 405.

pub mod content;
pub mod health;

use axum::{middleware, routing::get, Router};

use crate::middleware::request_id_layer;
use crate::state::AppState;

/// Creates the Axum router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .fallback(content::serve)
        .with_state(state)
        // Request ID middleware - creates root span for log correlation
        .layer(middleware::from_fn(request_id_layer))
}
