use chrono::{Duration, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use shift_desk::utils::time::{
    elapsed, format_duration, is_outside_working_hours, now_in_timezone, WorkingHours,
    START_AT_FORMAT,
};

fn moscow() -> Tz {
    "Europe/Moscow".parse().unwrap()
}

fn at(hour: u32, minute: u32, second: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, second).unwrap()
}

#[test]
fn time_elapsed_tracks_offsets_from_now() {
    let tz = moscow();
    for seconds in [0i64, 59, 3661, 90000] {
        let start = (now_in_timezone(&tz) - Duration::seconds(seconds))
            .format(START_AT_FORMAT)
            .to_string();
        let result = elapsed(&start, &tz).unwrap();
        let drift = (result - Duration::seconds(seconds)).num_milliseconds();
        // Formatting drops sub-second precision, so the result may run ahead
        // by up to a second plus test runtime.
        assert!(
            (0..3000).contains(&drift),
            "offset {}s produced {:?}",
            seconds,
            result
        );
    }
}

#[test]
fn time_elapsed_rejects_unexpected_layout() {
    let tz = moscow();
    assert!(elapsed("2024-01-15T10:00:00", &tz).is_err());
    assert!(elapsed("not a timestamp", &tz).is_err());
}

#[test]
fn time_format_duration_examples() {
    assert_eq!(format_duration(Duration::seconds(0)), "0 час(ов) 00 минут");
    assert_eq!(format_duration(Duration::seconds(3661)), "1 час(ов) 01 минут");
    assert_eq!(format_duration(Duration::seconds(7199)), "1 час(ов) 59 минут");
}

#[test]
fn time_outside_working_hours_includes_both_boundaries() {
    let hours = WorkingHours::default();
    for time in [at(10, 0, 0), at(20, 0, 0), at(23, 59, 59), at(0, 0, 1)] {
        assert!(hours.is_outside(time), "{} should be outside", time);
    }
    for time in [at(10, 0, 1), at(19, 59, 59), at(15, 0, 0)] {
        assert!(!hours.is_outside(time), "{} should be inside", time);
    }
}

#[test]
fn time_outside_working_hours_uses_local_zone() {
    let tz = moscow();
    let hours = WorkingHours::default();

    // 07:00 UTC is exactly 10:00 in Moscow.
    let opening = Utc.with_ymd_and_hms(2024, 1, 15, 7, 0, 0).unwrap();
    assert!(is_outside_working_hours(opening, &tz, &hours));

    // 16:30 UTC is 19:30 in Moscow.
    let afternoon = Utc.with_ymd_and_hms(2024, 1, 15, 16, 30, 0).unwrap();
    assert!(!is_outside_working_hours(afternoon, &tz, &hours));

    // 17:00 UTC is 20:00 in Moscow.
    let closing = Utc.with_ymd_and_hms(2024, 1, 15, 17, 0, 0).unwrap();
    assert!(is_outside_working_hours(closing, &tz, &hours));
    assert!(!is_outside_working_hours(closing, &chrono_tz::UTC, &hours));
}
