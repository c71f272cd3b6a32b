//! Data-quality diagnostics attached to every report.
//!
//! The headline totals sum incident durations naively. When operators log
//! the same outage twice, or log overlapping incidents, that sum overstates
//! downtime. This module reports how much, without changing the totals:
//!
//! - `clampedBuckets` / `clampedMinutes`: downtime saturated to a period length
//! - `unionDowntimeMinutes`: length of the union of incident intervals
//! - `overlapMinutes`: logged minutes covered by more than one incident
//!
//! Incidents without a logged start time are placed at `00:00` of their day.

use crate::libs::availability::ClampTally;
use crate::libs::date_range::{DateRange, MINUTES_PER_DAY};
use crate::libs::incident::NormalizedIncident;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostics {
    pub clamped_buckets: usize,
    pub clamped_minutes: f64,
    pub union_downtime_minutes: f64,
    pub overlap_minutes: f64,
}

impl Diagnostics {
    pub fn collect(range: &DateRange, incidents: &[NormalizedIncident], tally: ClampTally) -> Self {
        let union = IntervalUnion::over(range, incidents);
        Self {
            clamped_buckets: tally.buckets,
            clamped_minutes: tally.minutes,
            union_downtime_minutes: union.covered,
            overlap_minutes: (union.logged - union.covered).max(0.0),
        }
    }
}

/// Minute-offset intervals measured from the window start.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct IntervalUnion {
    /// Sum of interval lengths after clipping to the window.
    pub logged: f64,
    /// Length of their union.
    pub covered: f64,
}

impl IntervalUnion {
    /// `incidents` must be sorted by `(date, start_minute)`, which the
    /// normalizer guarantees.
    pub fn over(range: &DateRange, incidents: &[NormalizedIncident]) -> Self {
        let horizon = (range.total_days() * MINUTES_PER_DAY) as f64;
        let mut union = Self::default();
        let mut current: Option<(f64, f64)> = None;

        for incident in incidents {
            let offset_days = (incident.date - range.first_day()).num_days();
            let begin = (offset_days * MINUTES_PER_DAY + incident.start_minute as i64) as f64;
            let begin = begin.clamp(0.0, horizon);
            let end = (begin + incident.duration_minutes).min(horizon);
            if end <= begin {
                continue;
            }
            union.logged += end - begin;

            current = match current {
                Some((open, close)) if begin <= close => Some((open, close.max(end))),
                Some((open, close)) => {
                    union.covered += close - open;
                    Some((begin, end))
                }
                None => Some((begin, end)),
            };
        }

        if let Some((open, close)) = current {
            union.covered += close - open;
        }
        union
    }
}
