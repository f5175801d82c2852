use anyhow::{anyhow, ensure};
use chrono::NaiveTime;
use chrono_tz::Tz;
use std::{env, net::SocketAddr};

use crate::utils::time::WorkingHours;

pub const DEFAULT_TIME_ZONE: &str = "Europe/Moscow";
pub const DEFAULT_TIME_ZONE_LABEL: &str = "МСК";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

#[derive(Debug, Clone)]
pub struct Config {
    /// Manager API endpoint. Left empty when unset; requests then fail and
    /// the page reports the manager as unknown.
    pub api_base_url: String,
    pub bind_addr: SocketAddr,
    pub time_zone: Tz,
    /// Short zone name shown to managers, e.g. in the "come back at" hint.
    pub time_zone_label: String,
    pub working_hours: WorkingHours,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = lookup("API_FETCH_URL").unwrap_or_default();

        let bind_addr_value =
            lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr: SocketAddr = bind_addr_value
            .parse()
            .map_err(|_| anyhow!("Invalid BIND_ADDR value: {}", bind_addr_value))?;

        let time_zone_name =
            lookup("APP_TIMEZONE").unwrap_or_else(|| DEFAULT_TIME_ZONE.to_string());
        let time_zone: Tz = time_zone_name
            .parse()
            .map_err(|_| anyhow!("Invalid APP_TIMEZONE value: {}", time_zone_name))?;

        let time_zone_label =
            lookup("TIME_ZONE_LABEL").unwrap_or_else(|| DEFAULT_TIME_ZONE_LABEL.to_string());

        let defaults = WorkingHours::default();
        let start = parse_hour_minute("WORKING_HOURS_START", lookup("WORKING_HOURS_START"))?
            .unwrap_or(defaults.start);
        let end = parse_hour_minute("WORKING_HOURS_END", lookup("WORKING_HOURS_END"))?
            .unwrap_or(defaults.end);
        ensure!(
            start < end,
            "WORKING_HOURS_START ({}) must be earlier than WORKING_HOURS_END ({})",
            start.format("%H:%M"),
            end.format("%H:%M")
        );

        Ok(Config {
            api_base_url,
            bind_addr,
            time_zone,
            time_zone_label,
            working_hours: WorkingHours::new(start, end),
        })
    }
}

fn parse_hour_minute(key: &str, value: Option<String>) -> anyhow::Result<Option<NaiveTime>> {
    match value {
        None => Ok(None),
        Some(raw) => NaiveTime::parse_from_str(raw.trim(), "%H:%M")
            .map(Some)
            .map_err(|_| anyhow!("Invalid {} value: {} (expected HH:MM)", key, raw)),
    }
}
