use chrono::{DateTime, Datelike, Duration, NaiveDateTime, NaiveTime, TimeZone, Utc, Weekday};
use chrono_tz::Tz;
use thiserror::Error;

/// Layout of `start_at` values sent by the manager API.
pub const START_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TimeError {
    #[error("invalid status timestamp {value:?}, expected YYYY-MM-DD HH:MM:SS")]
    InvalidTimestamp { value: String },
    #[error("status timestamp {value:?} does not exist in time zone {tz}")]
    NonexistentLocalTime { value: String, tz: Tz },
}

/// Daily window in which managers may change their status.
///
/// Both boundaries belong to the *outside* region: exactly `start` and
/// exactly `end` are treated as outside working hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkingHours {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl WorkingHours {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    pub fn is_outside(&self, time: NaiveTime) -> bool {
        time >= self.end || time <= self.start
    }
}

impl Default for WorkingHours {
    fn default() -> Self {
        Self {
            start: NaiveTime::from_hms_opt(10, 0, 0).unwrap_or_default(),
            end: NaiveTime::from_hms_opt(20, 0, 0).unwrap_or_default(),
        }
    }
}

/// Returns the current time in the configured timezone.
pub fn now_in_timezone(tz: &Tz) -> DateTime<Tz> {
    Utc::now().with_timezone(tz)
}

/// Parses a naive `start_at` value and attaches `tz` to it.
pub fn parse_status_start(value: &str, tz: &Tz) -> Result<DateTime<Tz>, TimeError> {
    let naive = NaiveDateTime::parse_from_str(value, START_AT_FORMAT).map_err(|_| {
        TimeError::InvalidTimestamp {
            value: value.to_string(),
        }
    })?;

    // Ambiguous wall-clock times (DST fall-back) resolve to the first instant.
    tz.from_local_datetime(&naive)
        .earliest()
        .ok_or_else(|| TimeError::NonexistentLocalTime {
            value: value.to_string(),
            tz: *tz,
        })
}

/// Time passed since `start_at` up to the current moment.
pub fn elapsed(start_at: &str, tz: &Tz) -> Result<Duration, TimeError> {
    elapsed_at(start_at, tz, Utc::now())
}

pub fn elapsed_at(start_at: &str, tz: &Tz, now: DateTime<Utc>) -> Result<Duration, TimeError> {
    let start = parse_status_start(start_at, tz)?;
    Ok(now.with_timezone(tz) - start)
}

/// Renders a duration as `"<H> час(ов) <MM> минут"`. Seconds are dropped and
/// negative values (clock skew against the API) show as zero.
pub fn format_duration(elapsed: Duration) -> String {
    let seconds = elapsed.num_seconds().max(0);
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    format!("{} час(ов) {:02} минут", hours, minutes)
}

pub fn is_outside_working_hours(now: DateTime<Utc>, tz: &Tz, hours: &WorkingHours) -> bool {
    hours.is_outside(now.with_timezone(tz).time())
}

/// Current date as `dd.mm.yyyy (weekday)` with the Russian weekday name.
pub fn format_today(now: DateTime<Utc>, tz: &Tz) -> String {
    let local = now.with_timezone(tz);
    format!(
        "{} ({})",
        local.format("%d.%m.%Y"),
        weekday_name_ru(local.weekday())
    )
}

pub fn weekday_name_ru(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "понедельник",
        Weekday::Tue => "вторник",
        Weekday::Wed => "среда",
        Weekday::Thu => "четверг",
        Weekday::Fri => "пятница",
        Weekday::Sat => "суббота",
        Weekday::Sun => "воскресенье",
    }
}
