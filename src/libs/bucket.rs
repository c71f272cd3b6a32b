//! Reporting periods and incident assignment.
//!
//! The analysis window is partitioned into an ordered, gapless run of
//! buckets at the requested [`Granularity`]. Buckets follow calendar
//! boundaries (weeks start on the configured [`WeekStart`]), so the first and
//! last bucket are clipped to the window: a `month` series over
//! `2024-01-15..2024-03-10` has a 17-day first bucket and a 10-day last one.
//!
//! Incidents are assigned with a single merge scan over both sorted
//! sequences, so the cost is linear in `incidents + buckets`.

use crate::libs::date_range::{
    day_end, day_start, next_month_start, next_quarter_start, next_week_start, next_year_start, wire_datetime, DateRange,
    WeekStart, MINUTES_PER_DAY,
};
use crate::libs::error::AnalyticsError;
use crate::libs::incident::{DowntimeType, NormalizedIncident};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    #[default]
    Day,
    Week,
    Month,
    Quarter,
    Year,
}

impl Granularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Day => "day",
            Granularity::Week => "week",
            Granularity::Month => "month",
            Granularity::Quarter => "quarter",
            Granularity::Year => "year",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = AnalyticsError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(Granularity::Day),
            "week" => Ok(Granularity::Week),
            "month" => Ok(Granularity::Month),
            "quarter" => Ok(Granularity::Quarter),
            "year" => Ok(Granularity::Year),
            _ => Err(AnalyticsError::UnknownGranularity(value.to_string())),
        }
    }
}

/// One reporting period of the series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bucket {
    #[serde(with = "wire_datetime")]
    pub period_start: NaiveDateTime,
    #[serde(with = "wire_datetime")]
    pub period_end: NaiveDateTime,
    pub total_minutes_in_period: i64,
    /// Downtime after saturation to the period length.
    pub downtime_minutes: f64,
    pub planned_minutes: f64,
    pub unplanned_minutes: f64,
    pub incident_count: usize,
    pub availability_pct: f64,
    /// Unclamped sum of incident durations.
    #[serde(skip)]
    pub raw_downtime_minutes: f64,
}

impl Bucket {
    /// Empty bucket spanning `first..=last`.
    pub fn spanning(first: NaiveDate, last: NaiveDate) -> Self {
        let days = (last - first).num_days() + 1;
        Self {
            period_start: day_start(first),
            period_end: day_end(last),
            total_minutes_in_period: days * MINUTES_PER_DAY,
            downtime_minutes: 0.0,
            planned_minutes: 0.0,
            unplanned_minutes: 0.0,
            incident_count: 0,
            availability_pct: 100.0,
            raw_downtime_minutes: 0.0,
        }
    }

    pub fn first_day(&self) -> NaiveDate {
        self.period_start.date()
    }

    pub fn last_day(&self) -> NaiveDate {
        self.period_end.date()
    }

    pub fn record(&mut self, incident: &NormalizedIncident) {
        self.incident_count += 1;
        self.downtime_minutes += incident.duration_minutes;
        self.raw_downtime_minutes += incident.duration_minutes;
        match incident.downtime_type {
            DowntimeType::Planned => self.planned_minutes += incident.duration_minutes,
            DowntimeType::Unplanned => self.unplanned_minutes += incident.duration_minutes,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PeriodBucketer {
    granularity: Granularity,
    week_start: WeekStart,
}

impl PeriodBucketer {
    pub fn new(granularity: Granularity, week_start: WeekStart) -> Self {
        Self { granularity, week_start }
    }

    /// Splits the window into empty buckets. A single-day window yields
    /// exactly one bucket.
    ///
    /// A period with no representable successor runs to the window end.
    pub fn periods(&self, range: &DateRange) -> Vec<Bucket> {
        let mut buckets = Vec::new();
        let mut cursor = Some(range.first_day());

        while let Some(first) = cursor.filter(|day| *day <= range.last_day()) {
            let last = self
                .next_period_start(first)
                .and_then(|next| next.pred_opt())
                .map_or(range.last_day(), |day| day.min(range.last_day()));
            buckets.push(Bucket::spanning(first, last));
            cursor = last.succ_opt();
        }

        buckets
    }

    /// Merge-scans sorted `incidents` into sorted `buckets`.
    pub fn assign(&self, buckets: &mut [Bucket], incidents: &[NormalizedIncident]) {
        let mut cursor = 0;

        for incident in incidents {
            while cursor < buckets.len() && buckets[cursor].last_day() < incident.date {
                cursor += 1;
            }
            let Some(bucket) = buckets.get_mut(cursor) else {
                break;
            };
            if incident.date >= bucket.first_day() {
                bucket.record(incident);
            }
        }
    }

    pub fn bucket(&self, range: &DateRange, incidents: &[NormalizedIncident]) -> Vec<Bucket> {
        let mut buckets = self.periods(range);
        self.assign(&mut buckets, incidents);
        buckets
    }

    /// First day of the period after the one containing `day`.
    fn next_period_start(&self, day: NaiveDate) -> Option<NaiveDate> {
        match self.granularity {
            Granularity::Day => day.succ_opt(),
            Granularity::Week => next_week_start(day, self.week_start),
            Granularity::Month => next_month_start(day),
            Granularity::Quarter => next_quarter_start(day),
            Granularity::Year => next_year_start(day),
        }
    }
}
