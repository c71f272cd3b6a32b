//! Analysis window resolution.
//!
//! Maps a named preset (`last_7_days`, `this_quarter`, ...) or an explicit pair
//! of bounds to a concrete inclusive window. Windows always cover whole days:
//! the start is normalized to `00:00:00.000` of its first day and the end to
//! `23:59:59.999` of its last day.
//!
//! ## Preset Semantics
//!
//! Presets are computed relative to a caller-supplied "now" so the result is
//! reproducible. [`DateRangeResolver::resolve_now`] is the only place that
//! reads the system clock.
//!
//! | Preset         | First day                    | Last day                    |
//! |----------------|------------------------------|-----------------------------|
//! | `today`        | today                        | today                       |
//! | `yesterday`    | today - 1                    | today - 1                   |
//! | `last_7_days`  | today - 6                    | today                       |
//! | `last_30_days` | today - 29                   | today                       |
//! | `this_week`    | first day of current week    | today                       |
//! | `last_week`    | first day of previous week   | last day of previous week   |
//! | `this_month`   | 1st of current month         | today                       |
//! | `last_month`   | 1st of previous month        | last day of previous month  |
//! | `this_quarter` | 1st of current quarter       | today                       |
//! | `this_year`    | January 1st                  | today                       |
//! | `custom`       | explicit `startDate`         | explicit `endDate`          |
//!
//! An unrecognized or missing preset without explicit bounds falls back to
//! `last_30_days`.
//!
//! ## Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use fixtrack::libs::date_range::{DateRangeResolver, RangeQuery};
//!
//! let now = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap().and_hms_opt(12, 0, 0).unwrap();
//! let range = DateRangeResolver::default()
//!     .resolve(&RangeQuery::preset("last_7_days"), now)
//!     .unwrap();
//! assert_eq!(range.first_day(), NaiveDate::from_ymd_opt(2024, 3, 9).unwrap());
//! ```

use crate::libs::error::{AnalyticsError, AnalyticsResult};
use chrono::{DateTime, Datelike, Days, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

pub const MINUTES_PER_DAY: i64 = 1440;
pub const MILLIS_PER_DAY: i64 = 86_400_000;

/// Named shorthand for a date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Preset {
    #[serde(rename = "today")]
    Today,
    #[serde(rename = "yesterday")]
    Yesterday,
    #[serde(rename = "last_7_days")]
    Last7Days,
    #[serde(rename = "last_30_days")]
    Last30Days,
    #[serde(rename = "this_week")]
    ThisWeek,
    #[serde(rename = "last_week")]
    LastWeek,
    #[serde(rename = "this_month")]
    ThisMonth,
    #[serde(rename = "last_month")]
    LastMonth,
    #[serde(rename = "this_quarter")]
    ThisQuarter,
    #[serde(rename = "this_year")]
    ThisYear,
    #[serde(rename = "custom")]
    Custom,
}

impl Preset {
    pub const ALL: [Preset; 11] = [
        Preset::Today,
        Preset::Yesterday,
        Preset::Last7Days,
        Preset::Last30Days,
        Preset::ThisWeek,
        Preset::LastWeek,
        Preset::ThisMonth,
        Preset::LastMonth,
        Preset::ThisQuarter,
        Preset::ThisYear,
        Preset::Custom,
    ];

    /// Parses a preset token. Unknown tokens yield `None` rather than an
    /// error because the resolver falls back to a default window for them.
    pub fn parse(token: &str) -> Option<Preset> {
        Self::ALL.into_iter().find(|preset| preset.as_str() == token.trim())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::Today => "today",
            Preset::Yesterday => "yesterday",
            Preset::Last7Days => "last_7_days",
            Preset::Last30Days => "last_30_days",
            Preset::ThisWeek => "this_week",
            Preset::LastWeek => "last_week",
            Preset::ThisMonth => "this_month",
            Preset::LastMonth => "last_month",
            Preset::ThisQuarter => "this_quarter",
            Preset::ThisYear => "this_year",
            Preset::Custom => "custom",
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// First day of a calendar week, used by week presets and week buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Monday,
    Sunday,
}

impl fmt::Display for WeekStart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeekStart::Monday => f.write_str("monday"),
            WeekStart::Sunday => f.write_str("sunday"),
        }
    }
}

/// Request-level description of the wanted window, as it arrives from the
/// request layer (`preset`, or `startDate` + `endDate`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeQuery {
    pub preset: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl RangeQuery {
    pub fn preset(token: &str) -> Self {
        Self {
            preset: Some(token.to_string()),
            ..Default::default()
        }
    }

    pub fn explicit(start_date: &str, end_date: &str) -> Self {
        Self {
            preset: None,
            start_date: Some(start_date.to_string()),
            end_date: Some(end_date.to_string()),
        }
    }
}

/// Inclusive analysis window covering whole days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    #[serde(with = "wire_datetime")]
    start_date: NaiveDateTime,
    #[serde(with = "wire_datetime")]
    end_date: NaiveDateTime,
}

impl DateRange {
    /// Builds a window from arbitrary bounds, widening them to whole days.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> AnalyticsResult<Self> {
        Self::from_days(start.date(), end.date())
    }

    /// Builds a window spanning `first..=last`.
    pub fn from_days(first: NaiveDate, last: NaiveDate) -> AnalyticsResult<Self> {
        if first > last {
            return Err(AnalyticsError::InvertedRange {
                start: first.to_string(),
                end: last.to_string(),
            });
        }
        Ok(Self::spanning(first, last))
    }

    /// Caller guarantees `first <= last`.
    fn spanning(first: NaiveDate, last: NaiveDate) -> Self {
        Self {
            start_date: day_start(first),
            end_date: day_end(last),
        }
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start_date
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end_date
    }

    pub fn first_day(&self) -> NaiveDate {
        self.start_date.date()
    }

    pub fn last_day(&self) -> NaiveDate {
        self.end_date.date()
    }

    /// Inclusive day count: `floor((end - start) / 1 day) + 1`.
    pub fn total_days(&self) -> i64 {
        let elapsed = self.end_date.signed_duration_since(self.start_date).num_milliseconds();
        elapsed.div_euclid(MILLIS_PER_DAY) + 1
    }

    pub fn contains_day(&self, day: NaiveDate) -> bool {
        day >= self.first_day() && day <= self.last_day()
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} .. {}", self.first_day(), self.last_day())
    }
}

/// Resolves presets and explicit bounds into a [`DateRange`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DateRangeResolver {
    week_start: WeekStart,
}

impl DateRangeResolver {
    pub fn new(week_start: WeekStart) -> Self {
        Self { week_start }
    }

    pub fn week_start(&self) -> WeekStart {
        self.week_start
    }

    /// Resolves against the local wall clock.
    pub fn resolve_now(&self, query: &RangeQuery) -> AnalyticsResult<DateRange> {
        self.resolve(query, Local::now().naive_local())
    }

    /// Resolves `query` relative to `now`.
    ///
    /// # Errors
    ///
    /// Returns a validation error when explicit bounds are unparseable,
    /// inverted, only half present, or missing for the `custom` preset, and
    /// when a preset window falls off the start of the calendar.
    pub fn resolve(&self, query: &RangeQuery, now: NaiveDateTime) -> AnalyticsResult<DateRange> {
        let token = query.preset.as_deref().map(str::trim).filter(|token| !token.is_empty());
        let today = now.date();

        let range = match token.and_then(Preset::parse) {
            Some(Preset::Custom) => self.explicit_bounds(query)?.ok_or(AnalyticsError::MissingCustomBounds)?,
            Some(preset) => match self.preset_range(preset, today)? {
                Some(range) => range,
                None => self.fallback(today)?,
            },
            None => match self.explicit_bounds(query)? {
                Some(range) => range,
                None => {
                    if let Some(token) = token {
                        debug!(preset = token, "unrecognized preset, falling back to last_30_days");
                    }
                    self.fallback(today)?
                }
            },
        };

        debug!(start = %range.start(), end = %range.end(), "resolved analysis window");
        Ok(range)
    }

    /// Concrete window for a non-custom preset; `None` for [`Preset::Custom`].
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::DateOutOfRange`] when the window would start
    /// before the first representable day.
    pub fn preset_range(&self, preset: Preset, today: NaiveDate) -> AnalyticsResult<Option<DateRange>> {
        let calendar = |day: Option<NaiveDate>| day.ok_or_else(|| out_of_range(today));

        let (first, last) = match preset {
            Preset::Today => (today, today),
            Preset::Yesterday => {
                let yesterday = days_before(today, 1)?;
                (yesterday, yesterday)
            }
            Preset::Last7Days => (days_before(today, 6)?, today),
            Preset::Last30Days => (days_before(today, 29)?, today),
            Preset::ThisWeek => (calendar(week_start_of(today, self.week_start))?, today),
            Preset::LastWeek => {
                let this_week = calendar(week_start_of(today, self.week_start))?;
                (days_before(this_week, 7)?, days_before(this_week, 1)?)
            }
            Preset::ThisMonth => (calendar(month_start(today))?, today),
            Preset::LastMonth => {
                let last = days_before(calendar(month_start(today))?, 1)?;
                (calendar(month_start(last))?, last)
            }
            Preset::ThisQuarter => (calendar(quarter_start(today))?, today),
            Preset::ThisYear => (calendar(year_start(today))?, today),
            Preset::Custom => return Ok(None),
        };
        Ok(Some(DateRange::spanning(first, last)))
    }

    fn fallback(&self, today: NaiveDate) -> AnalyticsResult<DateRange> {
        Ok(DateRange::spanning(days_before(today, 29)?, today))
    }

    fn explicit_bounds(&self, query: &RangeQuery) -> AnalyticsResult<Option<DateRange>> {
        let start = query.start_date.as_deref().map(str::trim).filter(|s| !s.is_empty());
        let end = query.end_date.as_deref().map(str::trim).filter(|s| !s.is_empty());

        match (start, end) {
            (Some(start), Some(end)) => {
                let range = DateRange::from_days(parse_calendar_day(start)?, parse_calendar_day(end)?)?;
                Ok(Some(range))
            }
            (None, None) => Ok(None),
            _ => Err(AnalyticsError::IncompleteBounds),
        }
    }
}

/// Parses `YYYY-MM-DD` or an ISO 8601 / RFC 3339 date-time and keeps only
/// the calendar day as written.
pub fn parse_calendar_day(value: &str) -> AnalyticsResult<NaiveDate> {
    let value = value.trim();

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(date_time) = DateTime::parse_from_rfc3339(value) {
        return Ok(date_time.naive_local().date());
    }
    if let Ok(date_time) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(date_time.date());
    }
    if let Ok(date_time) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return Ok(date_time.date());
    }

    Err(AnalyticsError::InvalidDate(value.to_string()))
}

pub fn day_start(day: NaiveDate) -> NaiveDateTime {
    day.and_time(NaiveTime::MIN)
}

/// `23:59:59.999` of `day`.
pub fn day_end(day: NaiveDate) -> NaiveDateTime {
    // NaiveTime arithmetic wraps instead of overflowing
    day.and_time(NaiveTime::MIN + Duration::milliseconds(MILLIS_PER_DAY - 1))
}

fn days_into_week(day: NaiveDate, week_start: WeekStart) -> u64 {
    let offset = match week_start {
        WeekStart::Monday => day.weekday().num_days_from_monday(),
        WeekStart::Sunday => day.weekday().num_days_from_sunday(),
    };
    u64::from(offset)
}

/// First day of the week containing `day`; `None` before the calendar start.
pub fn week_start_of(day: NaiveDate, week_start: WeekStart) -> Option<NaiveDate> {
    day.checked_sub_days(Days::new(days_into_week(day, week_start)))
}

/// First day of the week after `day`'s week; `None` past the calendar end.
pub fn next_week_start(day: NaiveDate, week_start: WeekStart) -> Option<NaiveDate> {
    day.checked_add_days(Days::new(7 - days_into_week(day, week_start)))
}

pub fn month_start(day: NaiveDate) -> Option<NaiveDate> {
    day.with_day(1)
}

/// 1st of the month following `day`'s month; `None` past the calendar end.
pub fn next_month_start(day: NaiveDate) -> Option<NaiveDate> {
    match day.month() {
        12 => NaiveDate::from_ymd_opt(day.year().checked_add(1)?, 1, 1),
        month => NaiveDate::from_ymd_opt(day.year(), month + 1, 1),
    }
}

pub fn quarter_start(day: NaiveDate) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(day.year(), day.month0() / 3 * 3 + 1, 1)
}

pub fn next_quarter_start(day: NaiveDate) -> Option<NaiveDate> {
    let start = quarter_start(day)?;
    next_month_start(start).and_then(next_month_start).and_then(next_month_start)
}

pub fn year_start(day: NaiveDate) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(day.year(), 1, 1)
}

pub fn next_year_start(day: NaiveDate) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(day.year().checked_add(1)?, 1, 1)
}

/// `day` moved back by `days`, or [`AnalyticsError::DateOutOfRange`].
fn days_before(day: NaiveDate, days: u64) -> AnalyticsResult<NaiveDate> {
    day.checked_sub_days(Days::new(days)).ok_or_else(|| out_of_range(day))
}

fn out_of_range(day: NaiveDate) -> AnalyticsError {
    AnalyticsError::DateOutOfRange(day.to_string())
}

/// Serde adapter for the `YYYY-MM-DDTHH:MM:SS.mmm` wire format.
pub mod wire_datetime {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(raw.trim_end_matches('Z'), "%Y-%m-%dT%H:%M:%S%.f").map_err(serde::de::Error::custom)
    }
}
