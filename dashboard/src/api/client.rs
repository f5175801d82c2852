use reqwest::{Client, StatusCode};
use serde_json::Value;

use crate::{
    api::ApiError,
    models::manager::{roster_from_values, ManagerRecord, StatusAction},
};

const USER_AGENT: &str = concat!("shift-desk/", env!("CARGO_PKG_VERSION"));

/// Client for the manager API. Both calls post a form to the same base URL
/// and differ only in the `action` field.
#[derive(Clone)]
pub struct ManagerApiClient {
    client: Client,
    base_url: String,
}

impl ManagerApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub async fn try_fetch_managers(&self) -> Result<Vec<ManagerRecord>, ApiError> {
        let response = self
            .client
            .post(&self.base_url)
            .form(&[("action", "get_managers")])
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ApiError::Status(status));
        }

        let body = response.text().await?;
        let entries: Vec<Value> = serde_json::from_str(&body).map_err(ApiError::Decode)?;
        Ok(roster_from_values(entries))
    }

    /// Fetches the roster, collapsing every failure into `None`.
    pub async fn fetch_managers(&self) -> Option<Vec<ManagerRecord>> {
        match self.try_fetch_managers().await {
            Ok(roster) => {
                tracing::debug!(count = roster.len(), "Fetched manager roster");
                Some(roster)
            }
            Err(err) => {
                tracing::warn!(error = %err, "Failed to fetch manager roster");
                None
            }
        }
    }

    pub async fn try_set_status(
        &self,
        manager_id: &str,
        action: StatusAction,
    ) -> Result<(), ApiError> {
        let response = self
            .client
            .post(&self.base_url)
            .form(&[("manager_id", manager_id), ("action", action.as_str())])
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => Ok(()),
            status => Err(ApiError::Status(status)),
        }
    }

    /// Sends a status change; `true` only when the API answered 200.
    pub async fn set_status(&self, manager_id: &str, action: StatusAction) -> bool {
        match self.try_set_status(manager_id, action).await {
            Ok(()) => {
                tracing::info!(manager_id, action = %action, "Manager status changed");
                true
            }
            Err(err) => {
                tracing::warn!(
                    manager_id,
                    action = %action,
                    error = %err,
                    "Failed to change manager status"
                );
                false
            }
        }
    }
}
