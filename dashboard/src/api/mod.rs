pub mod client;

pub use client::ManagerApiClient;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("manager API request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("manager API responded with {0}")]
    Status(reqwest::StatusCode),
    #[error("manager API returned a malformed roster: {0}")]
    Decode(#[source] serde_json::Error),
}
