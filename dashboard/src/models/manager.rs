use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// A manager as reported by the manager API. The record is owned by the
/// remote system; the dashboard only reads one snapshot per page load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagerRecord {
    #[serde(deserialize_with = "deserialize_manager_id")]
    pub manager_id: String,
    #[serde(default, deserialize_with = "deserialize_name")]
    pub manager_name: String,
    #[serde(default, deserialize_with = "deserialize_status")]
    pub working_status: Option<WorkingStatus>,
    #[serde(default, deserialize_with = "deserialize_start_at")]
    pub start_at: Option<String>,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub is_started_today: bool,
}

impl ManagerRecord {
    /// Ids are compared as trimmed, lowercased text so that `12`, `"12"` and
    /// `" 12 "` all refer to the same manager.
    pub fn matches_id(&self, requested: &str) -> bool {
        normalize_id(&self.manager_id) == normalize_id(requested)
    }

    pub fn shift_state(&self) -> ShiftState {
        ShiftState::of(self)
    }
}

/// Decodes each roster entry on its own so that one malformed record only
/// drops itself.
pub fn roster_from_values(entries: Vec<Value>) -> Vec<ManagerRecord> {
    entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match ManagerRecord::deserialize(entry) {
            Ok(record) => Some(record),
            Err(err) => {
                tracing::warn!(index, error = %err, "Skipping malformed manager record");
                None
            }
        })
        .collect()
}

fn normalize_id(value: &str) -> String {
    value.trim().to_lowercase()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum WorkingStatus {
    StartDay,
    StartBreak,
    EndBreak,
    EndDay,
    Unknown(String),
}

impl WorkingStatus {
    pub fn as_str(&self) -> &str {
        match self {
            WorkingStatus::StartDay => "start_day",
            WorkingStatus::StartBreak => "start_break",
            WorkingStatus::EndBreak => "end_break",
            WorkingStatus::EndDay => "end_day",
            WorkingStatus::Unknown(raw) => raw,
        }
    }
}

impl From<String> for WorkingStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "start_day" => WorkingStatus::StartDay,
            "start_break" => WorkingStatus::StartBreak,
            "end_break" => WorkingStatus::EndBreak,
            "end_day" => WorkingStatus::EndDay,
            _ => WorkingStatus::Unknown(value),
        }
    }
}

impl From<WorkingStatus> for String {
    fn from(status: WorkingStatus) -> Self {
        match status {
            WorkingStatus::Unknown(raw) => raw,
            other => other.as_str().to_string(),
        }
    }
}

/// Commands accepted by the manager API's `action` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusAction {
    StartDay,
    EndDay,
    StartBreak,
    EndBreak,
}

impl StatusAction {
    pub fn as_str(self) -> &'static str {
        match self {
            StatusAction::StartDay => "start_day",
            StatusAction::EndDay => "end_day",
            StatusAction::StartBreak => "start_break",
            StatusAction::EndBreak => "end_break",
        }
    }
}

impl fmt::Display for StatusAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which elapsed-time metric a state shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElapsedMetric {
    WorkTime,
    BreakTime,
}

impl ElapsedMetric {
    pub fn label(self) -> &'static str {
        match self {
            ElapsedMetric::WorkTime => "Время работы",
            ElapsedMetric::BreakTime => "Время перерыва",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftState {
    /// No status yet, day started, or back from a break.
    OnShift,
    OnBreak,
    /// Day ended after a full shift today; no new shift allowed.
    DayCompleted,
    DayNotStarted,
    /// The API sent a status this dashboard does not know.
    Unrecognized,
}

impl ShiftState {
    pub fn of(record: &ManagerRecord) -> Self {
        match &record.working_status {
            None | Some(WorkingStatus::StartDay) | Some(WorkingStatus::EndBreak) => {
                ShiftState::OnShift
            }
            Some(WorkingStatus::StartBreak) => ShiftState::OnBreak,
            Some(WorkingStatus::EndDay) if record.is_started_today => ShiftState::DayCompleted,
            Some(WorkingStatus::EndDay) => ShiftState::DayNotStarted,
            Some(WorkingStatus::Unknown(_)) => ShiftState::Unrecognized,
        }
    }

    pub fn metric(self) -> Option<ElapsedMetric> {
        match self {
            ShiftState::OnShift => Some(ElapsedMetric::WorkTime),
            ShiftState::OnBreak => Some(ElapsedMetric::BreakTime),
            ShiftState::DayCompleted | ShiftState::DayNotStarted | ShiftState::Unrecognized => {
                None
            }
        }
    }

    pub fn actions(self) -> &'static [StatusAction] {
        match self {
            ShiftState::OnShift => &[StatusAction::EndDay, StatusAction::StartBreak],
            ShiftState::OnBreak => &[StatusAction::EndBreak],
            ShiftState::DayNotStarted => &[StatusAction::StartDay],
            ShiftState::DayCompleted | ShiftState::Unrecognized => &[],
        }
    }
}

fn deserialize_manager_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(id) => Ok(id),
        Value::Number(id) => Ok(id.to_string()),
        other => Err(de::Error::custom(format!(
            "manager_id must be a string or number, got {}",
            other
        ))),
    }
}

fn deserialize_name<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(String::new()),
        Value::String(name) => Ok(name),
        other => Ok(other.to_string()),
    }
}

fn deserialize_status<'de, D>(deserializer: D) -> Result<Option<WorkingStatus>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(status) => Ok(Some(WorkingStatus::from(status))),
        other => Ok(Some(WorkingStatus::Unknown(other.to_string()))),
    }
}

fn deserialize_start_at<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(start_at) => Ok(Some(start_at)),
        _ => Ok(None),
    }
}

fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(false),
        Value::Bool(flag) => Ok(flag),
        Value::Number(n) => Ok(n.as_f64().map(|v| v != 0.0).unwrap_or(false)),
        Value::String(s) => Ok(matches!(s.trim(), "1" | "true" | "True")),
        other => Err(de::Error::custom(format!(
            "is_started_today must be a boolean, got {}",
            other
        ))),
    }
}
