//! Report export to CSV and JSON files.
//!
//! - **CSV**: the bucket series as a table, followed by a summary section.
//!   Minutes are written as plain numbers so spreadsheets can sum them.
//! - **JSON**: the full report in its wire shape, pretty-printed.
//!
//! When no output path is given the file is named
//! `fixtrack_export_<YYYYmmdd_HHMMSS>.<ext>` in the working directory.

use crate::libs::analytics::AnalysisReport;
use crate::libs::date_range::wire_datetime;
use anyhow::Result;
use chrono::Local;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

const SERIES_COLUMNS: [&str; 8] = [
    "Period Start",
    "Period End",
    "Total Minutes",
    "Downtime Minutes",
    "Planned Minutes",
    "Unplanned Minutes",
    "Incidents",
    "Availability %",
];

pub struct Exporter {
    format: ExportFormat,
    output_path: PathBuf,
}

impl Exporter {
    pub fn new(format: ExportFormat, output_path: Option<PathBuf>) -> Self {
        let default_name = format!("fixtrack_export_{}", Local::now().format("%Y%m%d_%H%M%S"));
        let output_path = output_path.unwrap_or_else(|| PathBuf::from(format!("{}.{}", default_name, format.extension())));

        Self { format, output_path }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Writes `report` and returns the path written to.
    pub fn export(&self, report: &AnalysisReport) -> Result<PathBuf> {
        match self.format {
            ExportFormat::Csv => self.export_csv(report)?,
            ExportFormat::Json => self.export_json(report)?,
        }
        Ok(self.output_path.clone())
    }

    fn export_csv(&self, report: &AnalysisReport) -> Result<()> {
        let mut wtr = csv::Writer::from_path(&self.output_path)?;

        wtr.write_record(SERIES_COLUMNS)?;
        for bucket in &report.series {
            wtr.write_record(&[
                bucket.period_start.format(wire_datetime::FORMAT).to_string(),
                bucket.period_end.format(wire_datetime::FORMAT).to_string(),
                bucket.total_minutes_in_period.to_string(),
                bucket.downtime_minutes.to_string(),
                bucket.planned_minutes.to_string(),
                bucket.unplanned_minutes.to_string(),
                bucket.incident_count.to_string(),
                format!("{:.2}", bucket.availability_pct),
            ])?;
        }

        let summary = &report.summary;
        let rows = [
            ("Asset", report.asset_id.clone()),
            ("Asset Name", report.asset_name.clone()),
            ("Department", report.department.clone()),
            ("Total Days", report.analysis_period.total_days.to_string()),
            ("Overall Availability %", format!("{:.2}", summary.overall_availability)),
            ("Total Downtime Minutes", summary.total_downtime_minutes.to_string()),
            ("Raw Total Downtime Minutes", summary.raw_total_downtime_minutes.to_string()),
            ("Planned Downtime Minutes", summary.planned_downtime_minutes.to_string()),
            ("Unplanned Downtime Minutes", summary.unplanned_downtime_minutes.to_string()),
            ("Total Incidents", summary.total_incidents.to_string()),
            ("Dropped Records", summary.dropped_records.to_string()),
        ];

        wtr.write_record(padded("", ""))?;
        wtr.write_record(padded("SUMMARY", ""))?;
        for (label, value) in rows {
            wtr.write_record(padded(label, &value))?;
        }

        wtr.flush()?;
        Ok(())
    }

    fn export_json(&self, report: &AnalysisReport) -> Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        let mut file = File::create(&self.output_path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }
}

/// Label/value row widened to the series column count.
fn padded(label: &str, value: &str) -> Vec<String> {
    let mut row = vec![String::new(); SERIES_COLUMNS.len()];
    row[0] = label.to_string();
    row[1] = value.to_string();
    row
}
