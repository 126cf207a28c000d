//! Display formatters.
//!
//! Pure string conversions for counts, relative times, and chart axis
//! labels. No state, no I/O.

use chrono::{DateTime, NaiveDateTime, Utc};

/// Abbreviate a count for display.
///
/// Values under 1000 render unabbreviated; 1000 renders as "1.0K" and
/// 1,000,000 as "1.0M".
pub fn format_count(n: u64) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}

/// Render an elapsed time relative to `now`.
///
/// Under one minute renders "just now"; exactly 60 minutes renders "1h ago".
/// Timestamps in the future clamp to "just now".
pub fn format_time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - then).num_seconds().max(0);
    if secs < 60 {
        return "just now".to_string();
    }
    let mins = secs / 60;
    if mins < 60 {
        return format!("{mins}m ago");
    }
    let hours = mins / 60;
    if hours < 24 {
        return format!("{hours}h ago");
    }
    format!("{}d ago", hours / 24)
}

/// Short time label for an hour bucket, e.g. "10:00".
pub fn hour_label(hour: NaiveDateTime) -> String {
    hour.format("%H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    #[test]
    fn test_count_boundaries() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1_000), "1.0K");
        assert_eq!(format_count(1_500), "1.5K");
        assert_eq!(format_count(999_999), "1000.0K");
        assert_eq!(format_count(1_000_000), "1.0M");
        assert_eq!(format_count(2_300_000), "2.3M");
    }

    #[test]
    fn test_time_ago_boundaries() {
        let now = Utc::now();
        assert_eq!(format_time_ago(now - Duration::seconds(5), now), "just now");
        assert_eq!(format_time_ago(now - Duration::seconds(59), now), "just now");
        assert_eq!(format_time_ago(now - Duration::seconds(60), now), "1m ago");
        assert_eq!(format_time_ago(now - Duration::minutes(59), now), "59m ago");
        assert_eq!(format_time_ago(now - Duration::minutes(60), now), "1h ago");
        assert_eq!(format_time_ago(now - Duration::hours(23), now), "23h ago");
        assert_eq!(format_time_ago(now - Duration::hours(48), now), "2d ago");
    }

    #[test]
    fn test_future_timestamp_clamps() {
        let now = Utc::now();
        assert_eq!(format_time_ago(now + Duration::minutes(5), now), "just now");
    }

    #[test]
    fn test_hour_label() {
        let hour = NaiveDate::from_ymd_opt(2026, 8, 20)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        assert_eq!(hour_label(hour), "10:00");
    }
}
