use super::analytics::AnalysisReport;
use super::formatter::{format_minutes, format_percentage, format_period};
use super::messages::Message;
use crate::{msg_print, msg_warning};
use anyhow::Result;
use prettytable::{row, Table};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Table,
    Json,
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportFormat::Table => f.write_str("table"),
            ReportFormat::Json => f.write_str("json"),
        }
    }
}

pub struct View {}

impl View {
    pub fn report(report: &AnalysisReport, format: ReportFormat, granularity: &str, diagnostics: bool) -> Result<()> {
        match format {
            ReportFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
            ReportFormat::Table => {
                msg_print!(
                    Message::ReportHeader {
                        asset_id: report.asset_id.clone(),
                        asset_name: report.asset_name.clone(),
                        start: report.analysis_period.start_date.date().to_string(),
                        end: report.analysis_period.end_date.date().to_string(),
                    },
                    true
                );
                msg_print!(Message::ReportSummaryHeader);
                Self::summary_table(report).printstd();
                msg_print!(Message::ReportSeriesHeader(granularity.to_string()), true);
                Self::series_table(report).printstd();
                if diagnostics {
                    msg_print!(Message::ReportDiagnosticsHeader, true);
                    Self::diagnostics_table(report).printstd();
                }
                Self::warnings(report);
            }
        }

        Ok(())
    }

    pub fn summary_table(report: &AnalysisReport) -> Table {
        let summary = &report.summary;
        let mut table = Table::new();

        table.add_row(row!["AVAILABILITY", "DOWNTIME", "RAW DOWNTIME", "PLANNED", "UNPLANNED", "INCIDENTS", "DAYS"]);
        table.add_row(row![
            format_percentage(summary.overall_availability),
            format_minutes(summary.total_downtime_minutes),
            format_minutes(summary.raw_total_downtime_minutes),
            format_minutes(summary.planned_downtime_minutes),
            format_minutes(summary.unplanned_downtime_minutes),
            summary.total_incidents,
            report.analysis_period.total_days
        ]);
        table
    }

    pub fn series_table(report: &AnalysisReport) -> Table {
        let mut table = Table::new();

        table.add_row(row!["PERIOD", "AVAILABILITY", "DOWNTIME", "PLANNED", "UNPLANNED", "INCIDENTS"]);
        for bucket in &report.series {
            table.add_row(row![
                format_period(&bucket.period_start, &bucket.period_end),
                format_percentage(bucket.availability_pct),
                format_minutes(bucket.downtime_minutes),
                format_minutes(bucket.planned_minutes),
                format_minutes(bucket.unplanned_minutes),
                bucket.incident_count
            ]);
        }
        table
    }

    pub fn diagnostics_table(report: &AnalysisReport) -> Table {
        let diagnostics = &report.diagnostics;
        let mut table = Table::new();

        table.add_row(row!["CLAMPED PERIODS", "CLAMPED", "UNION DOWNTIME", "OVERLAP", "DROPPED RECORDS"]);
        table.add_row(row![
            diagnostics.clamped_buckets,
            format_minutes(diagnostics.clamped_minutes),
            format_minutes(diagnostics.union_downtime_minutes),
            format_minutes(diagnostics.overlap_minutes),
            report.summary.dropped_records
        ]);
        table
    }

    fn warnings(report: &AnalysisReport) {
        if report.summary.dropped_records > 0 {
            msg_warning!(Message::RecordsDropped(report.summary.dropped_records));
        }
        if report.diagnostics.clamped_buckets > 0 {
            msg_warning!(Message::DowntimeClamped(
                report.diagnostics.clamped_buckets,
                format_minutes(report.diagnostics.clamped_minutes)
            ));
        }
        if report.diagnostics.overlap_minutes > 0.0 {
            msg_warning!(Message::OverlapDetected(format_minutes(report.diagnostics.overlap_minutes)));
        }
    }
}
