use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::{
    api::{ApiError, ManagerApiClient},
    config::Config,
    services::clock::{Clock, SystemClock},
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub api: ManagerApiClient,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn new(config: Config, api: ManagerApiClient, clock: Arc<dyn Clock>) -> Self {
        Self {
            config: Arc::new(config),
            api,
            clock,
        }
    }

    /// Builds the production state: API client on the configured base URL and
    /// the system clock.
    pub fn from_config(config: Config) -> Result<Self, ApiError> {
        let api = ManagerApiClient::new(config.api_base_url.clone())?;
        Ok(Self::new(config, api, Arc::new(SystemClock)))
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }
}
