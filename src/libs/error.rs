//! Error types for the availability analytics engine.
//!
//! The engine has exactly one fatal failure category: validation. Every
//! variant below is a validation failure with its own context so callers can
//! report what was wrong, while [`AnalyticsError::is_validation`] lets the
//! request layer map all of them to the same response class.
//!
//! Non-fatal conditions (records without a resolvable duration, over-reported
//! downtime) never surface here. They are tallied in the report instead.

use thiserror::Error;

/// Result alias used across the engine modules.
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalyticsError {
    /// A date string could not be parsed as a calendar date.
    #[error("invalid date '{0}': expected YYYY-MM-DD or an ISO 8601 date-time")]
    InvalidDate(String),

    /// The resolved window starts after it ends.
    #[error("start date {start} is after end date {end}")]
    InvertedRange { start: String, end: String },

    /// A clock value needed for duration resolution is not `HH:MM`.
    #[error("invalid clock time '{value}' on record {source_id}: expected HH:MM")]
    InvalidClockTime { source_id: String, value: String },

    /// The `custom` preset was requested without both bounds.
    #[error("preset 'custom' requires both startDate and endDate")]
    MissingCustomBounds,

    /// Only one of startDate / endDate was supplied.
    #[error("both startDate and endDate must be provided together")]
    IncompleteBounds,

    /// A preset window would fall outside the representable calendar.
    #[error("date range around {0} is outside the supported calendar")]
    DateOutOfRange(String),

    #[error("unknown granularity '{0}': expected day, week, month, quarter or year")]
    UnknownGranularity(String),

    #[error("asset id must not be empty")]
    EmptyAssetId,
}

impl AnalyticsError {
    /// Every engine error is a deterministic validation failure; none are
    /// transient, so none are worth retrying.
    pub fn is_validation(&self) -> bool {
        true
    }
}
