//! Asset availability report assembly.
//!
//! Composes the normalizer, bucketer and calculator into one pure call:
//!
//! ```text
//! RawActivityRecord[] ──▶ IncidentNormalizer ──▶ PeriodBucketer ──▶ AvailabilityCalculator
//!                                 │                                         │
//!                                 └───────────────▶ AnalysisReport ◀────────┘
//! ```
//!
//! Nothing here reads the clock or performs I/O, so identical inputs always
//! produce identical reports. The only failure is a validation error; bad
//! individual records are dropped and counted instead.
//!
//! ## Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use fixtrack::libs::analytics::compute_asset_analytics;
//! use fixtrack::libs::bucket::Granularity;
//! use fixtrack::libs::incident::RawActivityRecord;
//!
//! let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
//! let records = vec![RawActivityRecord {
//!     asset_id: "pump-7".into(),
//!     date: "2024-03-01".into(),
//!     downtime: Some(30.0),
//!     ..Default::default()
//! }];
//!
//! let report = compute_asset_analytics(
//!     "pump-7", "Feed pump", "Utilities", &records,
//!     day.and_hms_opt(0, 0, 0).unwrap(), day.and_hms_opt(0, 0, 0).unwrap(),
//!     Some(Granularity::Day),
//! ).unwrap();
//! assert_eq!(report.summary.overall_availability, 97.92);
//! ```

use crate::libs::availability::{AvailabilityCalculator, Summary};
use crate::libs::bucket::{Bucket, Granularity, PeriodBucketer};
use crate::libs::date_range::{wire_datetime, DateRange, WeekStart};
use crate::libs::diagnostics::Diagnostics;
use crate::libs::error::{AnalyticsError, AnalyticsResult};
use crate::libs::incident::{IncidentNormalizer, RawActivityRecord};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Identity of the analyzed asset, resolved by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetInfo {
    pub asset_id: String,
    pub asset_name: String,
    pub department: String,
}

impl AssetInfo {
    pub fn new(asset_id: &str, asset_name: &str, department: &str) -> Self {
        Self {
            asset_id: asset_id.to_string(),
            asset_name: asset_name.to_string(),
            department: department.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisPeriod {
    #[serde(with = "wire_datetime")]
    pub start_date: NaiveDateTime,
    #[serde(with = "wire_datetime")]
    pub end_date: NaiveDateTime,
    pub total_days: i64,
}

impl From<&DateRange> for AnalysisPeriod {
    fn from(range: &DateRange) -> Self {
        Self {
            start_date: range.start(),
            end_date: range.end(),
            total_days: range.total_days(),
        }
    }
}

/// Report consumed by dashboards and exports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub asset_id: String,
    pub asset_name: String,
    pub department: String,
    pub analysis_period: AnalysisPeriod,
    pub summary: Summary,
    pub series: Vec<Bucket>,
    pub diagnostics: Diagnostics,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyticsAssembler {
    week_start: WeekStart,
}

impl AnalyticsAssembler {
    pub fn new(week_start: WeekStart) -> Self {
        Self { week_start }
    }

    pub fn assemble(
        &self,
        asset: &AssetInfo,
        records: &[RawActivityRecord],
        range: &DateRange,
        granularity: Granularity,
    ) -> AnalyticsResult<AnalysisReport> {
        if asset.asset_id.trim().is_empty() {
            return Err(AnalyticsError::EmptyAssetId);
        }

        let normalized = IncidentNormalizer::new(*range).normalize(records)?;

        let bucketer = PeriodBucketer::new(granularity, self.week_start);
        let mut series = bucketer.bucket(range, &normalized.incidents);

        let calculator = AvailabilityCalculator::new();
        let tally = calculator.apply(&mut series);
        let summary = calculator.summarize(&series, normalized.dropped);

        Ok(AnalysisReport {
            asset_id: asset.asset_id.clone(),
            asset_name: asset.asset_name.clone(),
            department: asset.department.clone(),
            analysis_period: AnalysisPeriod::from(range),
            summary,
            series,
            diagnostics: Diagnostics::collect(range, &normalized.incidents, tally),
        })
    }
}

/// Computes the availability report for one asset over `start..=end`,
/// bucketed by `granularity` (daily when `None`). Weeks start on Monday.
///
/// # Errors
///
/// Returns a validation error when the asset id is empty, `start` is after
/// `end`, or a record has an unparseable date or a malformed clock value it
/// depends on.
pub fn compute_asset_analytics(
    asset_id: &str,
    asset_name: &str,
    department: &str,
    records: &[RawActivityRecord],
    start: NaiveDateTime,
    end: NaiveDateTime,
    granularity: Option<Granularity>,
) -> AnalyticsResult<AnalysisReport> {
    let range = DateRange::new(start, end)?;
    let asset = AssetInfo::new(asset_id, asset_name, department);
    AnalyticsAssembler::default().assemble(&asset, records, &range, granularity.unwrap_or_default())
}
