//! # Fixtrack - Asset downtime and availability analytics
//!
//! Turns operator-logged downtime incidents for a facility asset into
//! availability reports.
//!
//! ## Features
//!
//! - **Date Ranges**: named presets (`last_7_days`, `this_quarter`, ...) or explicit bounds
//! - **Normalization**: reported minutes or `HH:MM` clock spans, including overnight incidents
//! - **Bucketing**: day, week, month, quarter and year series clipped to the window
//! - **Availability**: saturated downtime, divide-by-zero guards, window-level ratio
//! - **Diagnostics**: dropped records, clamped periods and overlapping incidents
//! - **Export**: table, JSON and CSV output
//!
//! ## Usage
//!
//! ```rust,no_run
//! use fixtrack::commands::Cli;
//!
//! fn main() -> anyhow::Result<()> {
//!     Cli::menu()
//! }
//! ```

pub mod commands;
pub mod libs;
