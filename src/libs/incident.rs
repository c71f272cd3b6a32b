//! Incident ingestion and normalization.
//!
//! Operator-entered downtime logs arrive as loosely-typed documents: a
//! calendar day, optional `HH:MM` clock values, an optional minute count and
//! an optional planned/unplanned flag. This module parses each document once
//! into an [`ActivityRecord`] whose duration source is an explicit variant,
//! then resolves every record into a uniform [`NormalizedIncident`].
//!
//! ## Duration Resolution
//!
//! 1. A reported `downtime > 0` is used as-is.
//! 2. Otherwise both clock values are required: `end - start`, plus one day
//!    when the interval crosses midnight (`22:00 -> 02:00` is 240 minutes).
//! 3. Records where neither path gives a positive duration are dropped and
//!    counted, never treated as errors.
//!
//! Malformed clock values are only fatal when the record actually depends on
//! them for its duration.

use crate::libs::date_range::{parse_calendar_day, DateRange, MINUTES_PER_DAY};
use crate::libs::error::{AnalyticsError, AnalyticsResult};
use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// One operator-logged incident as delivered by the storage layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawActivityRecord {
    #[serde(default, alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub asset_id: String,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub downtime: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub downtime_type: Option<String>,
}

impl RawActivityRecord {
    /// Storage-side eligibility filter: a positive reported downtime, or
    /// both clock values present.
    pub fn is_downtime_candidate(&self) -> bool {
        let reported = self.downtime.is_some_and(|minutes| minutes > 0.0);
        reported || (present(&self.start_time).is_some() && present(&self.end_time).is_some())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DowntimeType {
    Planned,
    #[default]
    Unplanned,
}

impl DowntimeType {
    /// Absent, blank and unrecognized values all resolve to `Unplanned`.
    pub fn from_raw(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            Some("planned") => DowntimeType::Planned,
            Some("unplanned") | Some("") | None => DowntimeType::Unplanned,
            Some(other) => {
                debug!(downtime_type = other, "unknown downtime type, treating as unplanned");
                DowntimeType::Unplanned
            }
        }
    }
}

impl fmt::Display for DowntimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DowntimeType::Planned => f.write_str("planned"),
            DowntimeType::Unplanned => f.write_str("unplanned"),
        }
    }
}

/// Wall-clock value parsed from `HH:MM` (or `H:MM`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ClockTime(NaiveTime);

impl ClockTime {
    pub fn parse(value: &str) -> Option<Self> {
        NaiveTime::parse_from_str(value.trim(), "%H:%M").ok().map(ClockTime)
    }

    pub fn minutes_since_midnight(&self) -> u32 {
        self.0.hour() * 60 + self.0.minute()
    }
}

/// Where a record's duration comes from, decided once at ingestion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DurationSource {
    Reported(f64),
    ClockSpan { start: ClockTime, end: ClockTime },
    Unresolvable,
}

impl DurationSource {
    /// Resolved minutes, or `None` when nothing positive can be derived.
    pub fn minutes(&self) -> Option<f64> {
        match *self {
            DurationSource::Reported(minutes) => Some(minutes),
            DurationSource::ClockSpan { start, end } => {
                let mut span = end.minutes_since_midnight() as i64 - start.minutes_since_midnight() as i64;
                if span < 0 {
                    span += MINUTES_PER_DAY;
                }
                (span > 0).then_some(span as f64)
            }
            DurationSource::Unresolvable => None,
        }
    }
}

/// A raw record after validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityRecord {
    pub source_id: String,
    pub asset_id: String,
    pub date: NaiveDate,
    pub start_time: Option<ClockTime>,
    pub source: DurationSource,
    pub downtime_type: DowntimeType,
}

impl ActivityRecord {
    /// Validates `raw`; `index` is its input position, used for the
    /// fallback source id.
    ///
    /// # Errors
    ///
    /// Fails when the date is not a calendar day, or when the record relies
    /// on its clock values and either one is not `HH:MM`.
    pub fn parse(raw: &RawActivityRecord, index: usize) -> AnalyticsResult<Self> {
        let source_id = present(&raw.id).map(str::to_string).unwrap_or_else(|| format!("record-{}", index));
        let date = parse_calendar_day(&raw.date)?;
        let start_raw = present(&raw.start_time);
        let end_raw = present(&raw.end_time);

        let reported = raw.downtime.filter(|minutes| minutes.is_finite() && *minutes > 0.0);
        let (source, start_time) = match (reported, start_raw, end_raw) {
            (Some(minutes), start, _) => (DurationSource::Reported(minutes), start.and_then(ClockTime::parse)),
            (None, Some(start), Some(end)) => {
                let start = strict_clock(&source_id, start)?;
                let end = strict_clock(&source_id, end)?;
                (DurationSource::ClockSpan { start, end }, Some(start))
            }
            (None, start, _) => (DurationSource::Unresolvable, start.and_then(ClockTime::parse)),
        };

        Ok(Self {
            source_id,
            asset_id: raw.asset_id.clone(),
            date,
            start_time,
            source,
            downtime_type: DowntimeType::from_raw(raw.downtime_type.as_deref()),
        })
    }
}

/// Uniform `(date, durationMinutes, type)` incident.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedIncident {
    pub date: NaiveDate,
    pub duration_minutes: f64,
    #[serde(rename = "type")]
    pub downtime_type: DowntimeType,
    pub source_id: String,
    /// Minutes after midnight the incident started; `0` when no start time
    /// was logged.
    #[serde(skip)]
    pub start_minute: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    NoDuration,
    OutsideWindow,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Normalized {
    /// Sorted ascending by `(date, start_minute)`.
    pub incidents: Vec<NormalizedIncident>,
    pub dropped: usize,
}

/// Turns raw records into sorted incidents within one window.
#[derive(Debug, Clone, Copy)]
pub struct IncidentNormalizer {
    range: DateRange,
}

impl IncidentNormalizer {
    pub fn new(range: DateRange) -> Self {
        Self { range }
    }

    pub fn normalize(&self, records: &[RawActivityRecord]) -> AnalyticsResult<Normalized> {
        let mut normalized = Normalized::default();

        for (index, raw) in records.iter().enumerate() {
            let record = ActivityRecord::parse(raw, index)?;
            match self.resolve(&record) {
                Ok(incident) => normalized.incidents.push(incident),
                Err(reason) => {
                    debug!(source_id = %record.source_id, date = %record.date, ?reason, "dropping record");
                    normalized.dropped += 1;
                }
            }
        }

        // stable: ties keep input order
        normalized.incidents.sort_by_key(|incident| (incident.date, incident.start_minute));
        Ok(normalized)
    }

    fn resolve(&self, record: &ActivityRecord) -> Result<NormalizedIncident, DropReason> {
        if !self.range.contains_day(record.date) {
            return Err(DropReason::OutsideWindow);
        }
        let minutes = record.source.minutes().ok_or(DropReason::NoDuration)?;

        Ok(NormalizedIncident {
            date: record.date,
            duration_minutes: minutes,
            downtime_type: record.downtime_type,
            source_id: record.source_id.clone(),
            start_minute: record.start_time.map(|t| t.minutes_since_midnight()).unwrap_or(0),
        })
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn strict_clock(source_id: &str, value: &str) -> AnalyticsResult<ClockTime> {
    ClockTime::parse(value).ok_or_else(|| AnalyticsError::InvalidClockTime {
        source_id: source_id.to_string(),
        value: value.to_string(),
    })
}
