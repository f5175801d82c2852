pub mod status;

use axum::http::Uri;

use crate::error::AppError;

pub async fn health() -> &'static str {
    "ok"
}

pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}
