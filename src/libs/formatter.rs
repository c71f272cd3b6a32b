//! Display formatting for durations, percentages and periods.
//!
//! Used by the table view. The CSV export writes raw numbers instead.
//!
//! - Durations are `HH:MM`, hours unbounded, negatives shown as `00:00`
//! - Percentages keep two decimals, matching the report's rounding
//! - Periods are a single day, or `first .. last` for longer buckets
//!
//! ```rust
//! use fixtrack::libs::formatter::{format_minutes, format_percentage};
//!
//! assert_eq!(format_minutes(90.0), "01:30");
//! assert_eq!(format_percentage(97.916), "97.92%");
//! ```

use chrono::{Duration, NaiveDateTime};

/// Formats a duration as `HH:MM`.
pub fn format_duration(duration: &Duration) -> String {
    let hours = duration.num_hours();
    let mins = duration.num_minutes() % 60;

    format!("{:02}:{:02}", hours.max(0), mins.max(0))
}

/// Formats a (possibly fractional) minute count as `HH:MM`, rounding to the
/// nearest minute. Counts beyond what a [`Duration`] can hold saturate.
pub fn format_minutes(minutes: f64) -> String {
    let minutes = minutes.round() as i64;
    let duration = Duration::try_minutes(minutes).unwrap_or(if minutes < 0 { Duration::MIN } else { Duration::MAX });
    format_duration(&duration)
}

pub fn format_percentage(pct: f64) -> String {
    format!("{:.2}%", pct)
}

pub fn format_period(start: &NaiveDateTime, end: &NaiveDateTime) -> String {
    let (first, last) = (start.date(), end.date());
    if first == last {
        first.format("%Y-%m-%d").to_string()
    } else {
        format!("{} .. {}", first.format("%Y-%m-%d"), last.format("%Y-%m-%d"))
    }
}
