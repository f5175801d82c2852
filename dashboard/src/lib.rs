use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod pages;
pub mod services;
pub mod state;
pub mod utils;

use state::AppState;

/// Routes of the dashboard with the request-id, trace and error-logging
/// layers applied, outermost first.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::status::show_status))
        .route("/status", post(handlers::status::change_status))
        .route("/health", get(handlers::health))
        .fallback(handlers::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(axum_middleware::from_fn(middleware::request_id))
                .layer(TraceLayer::new_for_http().make_span_with(middleware::request_span))
                .layer(axum_middleware::from_fn(middleware::log_error_responses)),
        )
        .with_state(state)
}
