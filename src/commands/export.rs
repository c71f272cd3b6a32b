//! Report export command.
//!
//! Computes the same report as `analyze` and writes it to a file:
//! the series as CSV, or the full report as JSON.

use super::analyze::{build_report, ReportArgs};
use crate::{
    libs::{
        config::Config,
        export::{ExportFormat, Exporter},
        messages::Message,
    },
    msg_error_anyhow, msg_info, msg_success,
};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ExportArgs {
    #[command(flatten)]
    report: ReportArgs,

    /// Output file format
    #[arg(short, long, value_enum, default_value = "csv")]
    format: ExportFormat,

    /// Output path; defaults to fixtrack_export_<timestamp>.<ext>
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub fn cmd(args: ExportArgs) -> Result<()> {
    let config = Config::read()?.analytics_or_default();
    let (report, _) = build_report(&args.report, &config)?;

    msg_info!(Message::ExportingReport(report.asset_id.clone(), args.format.extension().to_string()));
    let path = Exporter::new(args.format, args.output)
        .export(&report)
        .map_err(|e| msg_error_anyhow!(Message::ExportFailed(e.to_string())))?;
    msg_success!(Message::ExportCompleted(path.display().to_string()));
    Ok(())
}
