//! Availability analysis command.
//!
//! Loads an incident log, selects one asset's eligible records, resolves the
//! window and prints the availability report.
//!
//! ```bash
//! # Daily availability for the last 30 days
//! fixtrack analyze incidents.json --asset-id pump-7
//!
//! # Monthly trend for this year, as JSON
//! fixtrack analyze incidents.json --asset-id pump-7 --preset this_year --period month --format json
//!
//! # Explicit window with diagnostics
//! fixtrack analyze incidents.json --asset-id pump-7 --start-date 2024-03-01 --end-date 2024-03-31 --diagnostics
//! ```

use super::range::RangeArgs;
use crate::{
    libs::{
        analytics::{AnalysisReport, AnalyticsAssembler, AssetInfo},
        bucket::Granularity,
        config::{AnalyticsConfig, Config},
        date_range::DateRangeResolver,
        messages::Message,
        records::RecordSet,
        view::{ReportFormat, View},
    },
    msg_debug, msg_error_anyhow,
};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

/// Input and window flags shared by `analyze` and `export`.
#[derive(Debug, Clone, Args)]
pub struct ReportArgs {
    /// JSON file holding an array of incident records
    pub records: PathBuf,

    /// Asset whose incidents are analyzed
    #[arg(long)]
    pub asset_id: String,

    /// Display name of the asset
    #[arg(long, default_value = "")]
    pub asset_name: String,

    /// Department that owns the asset
    #[arg(long, default_value = "")]
    pub department: String,

    #[command(flatten)]
    pub range: RangeArgs,

    /// Reporting period for the series
    #[arg(long, value_enum)]
    pub period: Option<Granularity>,
}

#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    report: ReportArgs,

    /// Output format; defaults to the configured one
    #[arg(short, long, value_enum)]
    format: Option<ReportFormat>,

    /// Show clamping and overlap diagnostics in table output
    #[arg(long)]
    diagnostics: bool,
}

pub fn cmd(args: AnalyzeArgs) -> Result<()> {
    let config = Config::read()?.analytics_or_default();
    let (report, granularity) = build_report(&args.report, &config)?;

    View::report(&report, args.format.unwrap_or(config.output), granularity.as_str(), args.diagnostics)?;
    Ok(())
}

/// Loads, filters and analyzes the records named by `args`.
pub fn build_report(args: &ReportArgs, config: &AnalyticsConfig) -> Result<(AnalysisReport, Granularity)> {
    let selected = RecordSet::load(&args.records)?.for_asset(&args.asset_id);
    msg_debug!(Message::RecordsLoaded {
        path: args.records.display().to_string(),
        fetched: selected.fetched,
        matching: selected.records.len(),
    });

    let range = DateRangeResolver::new(config.week_start).resolve_now(&args.range.query(config))?;
    let granularity = args.period.unwrap_or(config.default_granularity);
    let asset = AssetInfo::new(&args.asset_id, &args.asset_name, &args.department);

    let report = AnalyticsAssembler::new(config.week_start)
        .assemble(&asset, &selected.records, &range, granularity)
        .map_err(|e| msg_error_anyhow!(Message::AnalysisFailed(e.to_string())))?;
    Ok((report, granularity))
}
