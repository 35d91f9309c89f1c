pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod rate_limit;
pub mod state;
pub mod upstream;

use axum::{
    Router,
    routing::{any, get},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::handlers::{diagnose_handler, health_handler, metrics_handler};
use crate::state::AppState;

//creating the router with routes
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        // method gate lives in the handler so every verb gets the same 405
        .route("/api/diagnose", any(diagnose_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
