//! Core library modules for fixtrack.
//!
//! ## Features
//!
//! - **Analytics Engine**: window resolution, incident normalization, period
//!   bucketing, availability math and report assembly
//! - **Diagnostics**: clamping tallies and overlap detection for double-logged downtime
//! - **Input**: loading operator incident logs from JSON
//! - **User Interface**: table rendering, CSV/JSON export, formatting, messages
//! - **Configuration**: persisted CLI defaults
//!
//! ## Usage
//!
//! ```rust
//! use fixtrack::libs::analytics::{AnalyticsAssembler, AssetInfo};
//! use fixtrack::libs::bucket::Granularity;
//! use fixtrack::libs::date_range::DateRange;
//! use chrono::NaiveDate;
//!
//! let range = DateRange::from_days(
//!     NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
//!     NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
//! ).unwrap();
//! let report = AnalyticsAssembler::default()
//!     .assemble(&AssetInfo::new("boiler-2", "Boiler 2", "Utilities"), &[], &range, Granularity::Week)
//!     .unwrap();
//! assert_eq!(report.summary.overall_availability, 100.0);
//! ```

pub mod analytics;
pub mod availability;
pub mod bucket;
pub mod config;
pub mod data_storage;
pub mod date_range;
pub mod diagnostics;
pub mod error;
pub mod export;
pub mod formatter;
pub mod incident;
pub mod messages;
pub mod records;
pub mod view;
