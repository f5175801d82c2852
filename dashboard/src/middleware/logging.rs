use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;

use crate::middleware::request_id::RequestId;

/// Records a diagnostic event whenever a handler answers with a 4xx or 5xx
/// status. Page renders always succeed, so in practice this catches bad form
/// posts and unknown routes.
pub async fn log_error_responses(req: Request, next: Next) -> Response {
    let method = req.method().to_string();
    let uri = req.uri().to_string();
    let request_id = req
        .extensions()
        .get::<RequestId>()
        .map(|id| id.0.clone())
        .unwrap_or_else(|| "-".to_string());
    let start = Instant::now();

    let response = next.run(req).await;

    let status = response.status();
    if status.is_client_error() || status.is_server_error() {
        let latency_ms = start.elapsed().as_millis() as u64;
        log_error_event(status.as_u16(), &method, &uri, &request_id, latency_ms);
    }

    response
}

fn log_error_event(status: u16, method: &str, uri: &str, request_id: &str, latency_ms: u64) {
    if status >= 500 {
        tracing::error!(
            status,
            method,
            uri,
            request_id,
            latency_ms,
            "Request completed with error status"
        );
    } else {
        tracing::warn!(
            status,
            method,
            uri,
            request_id,
            latency_ms,
            "Request completed with error status"
        );
    }
}
