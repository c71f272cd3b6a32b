//! Availability calculation with saturation and divide-by-zero guards.
//!
//! ## Availability Formula
//!
//! ```text
//! clamped      = min(downtime, period_minutes)
//! availability = round(((period_minutes - clamped) / period_minutes) * 100, 2)
//! ```
//!
//! A zero-length period is vacuously 100% available. Downtime that exceeds
//! the period (overlapping or duplicate logs) is saturated rather than
//! rejected; the unclamped total stays in the summary so double logging is
//! still visible.
//!
//! The window-level figure is one ratio over summed minutes. Per-bucket
//! percentages are never averaged, since clipped first and last buckets are
//! shorter than the rest.

use crate::libs::bucket::Bucket;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Window-level statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub overall_availability: f64,
    pub total_downtime_minutes: f64,
    pub raw_total_downtime_minutes: f64,
    pub total_incidents: usize,
    pub planned_downtime_minutes: f64,
    pub unplanned_downtime_minutes: f64,
    pub dropped_records: usize,
}

/// How much downtime had to be saturated across a series.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ClampTally {
    pub buckets: usize,
    pub minutes: f64,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AvailabilityCalculator;

impl AvailabilityCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Clamps each bucket's downtime and fills in its availability.
    /// Re-applying is a no-op.
    pub fn apply(&self, buckets: &mut [Bucket]) -> ClampTally {
        let mut tally = ClampTally::default();

        for bucket in buckets.iter_mut() {
            let capacity = bucket.total_minutes_in_period.max(0) as f64;
            let clamped = bucket.raw_downtime_minutes.min(capacity);

            if clamped < bucket.raw_downtime_minutes {
                warn!(
                    period_start = %bucket.period_start,
                    raw = bucket.raw_downtime_minutes,
                    capacity,
                    "downtime exceeds period length, clamping"
                );
                tally.buckets += 1;
                tally.minutes += bucket.raw_downtime_minutes - clamped;
            }

            bucket.downtime_minutes = clamped;
            bucket.availability_pct = availability_pct(bucket.total_minutes_in_period, clamped);
        }

        tally
    }

    /// Sums minutes across `buckets` first, then takes a single ratio.
    pub fn summarize(&self, buckets: &[Bucket], dropped_records: usize) -> Summary {
        let total_minutes: i64 = buckets.iter().map(|b| b.total_minutes_in_period).sum();
        let downtime: f64 = buckets.iter().map(|b| b.downtime_minutes).sum();

        Summary {
            overall_availability: availability_pct(total_minutes, downtime),
            total_downtime_minutes: downtime,
            raw_total_downtime_minutes: buckets.iter().map(|b| b.raw_downtime_minutes).sum(),
            total_incidents: buckets.iter().map(|b| b.incident_count).sum(),
            planned_downtime_minutes: buckets.iter().map(|b| b.planned_minutes).sum(),
            unplanned_downtime_minutes: buckets.iter().map(|b| b.unplanned_minutes).sum(),
            dropped_records,
        }
    }
}

/// Availability of a period of `total_minutes` with `downtime` logged,
/// rounded to two decimals and bounded to `[0, 100]`.
pub fn availability_pct(total_minutes: i64, downtime: f64) -> f64 {
    if total_minutes <= 0 {
        return 100.0;
    }
    let total = total_minutes as f64;
    let clamped = downtime.clamp(0.0, total);
    round2(((total - clamped) / total) * 100.0)
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
