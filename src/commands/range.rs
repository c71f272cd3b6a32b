//! Window selection flags and the `range` command.

use crate::{
    libs::{
        config::{AnalyticsConfig, Config},
        date_range::{DateRangeResolver, RangeQuery},
        messages::Message,
    },
    msg_print,
};
use anyhow::Result;
use clap::Args;

/// Window selection shared by every command that resolves a date range.
#[derive(Debug, Clone, Default, Args)]
pub struct RangeArgs {
    /// Named range: today, yesterday, last_7_days, last_30_days, this_week,
    /// last_week, this_month, last_month, this_quarter, this_year or custom
    #[arg(long)]
    pub preset: Option<String>,

    /// First day of the window (YYYY-MM-DD), used with --end-date
    #[arg(long)]
    pub start_date: Option<String>,

    /// Last day of the window (YYYY-MM-DD), used with --start-date
    #[arg(long)]
    pub end_date: Option<String>,
}

impl RangeArgs {
    /// Builds the resolver query, substituting the configured default preset
    /// when no window flag was given.
    pub fn query(&self, config: &AnalyticsConfig) -> RangeQuery {
        let preset = match (&self.preset, &self.start_date, &self.end_date) {
            (None, None, None) => Some(config.default_preset.clone()),
            _ => self.preset.clone(),
        };

        RangeQuery {
            preset,
            start_date: self.start_date.clone(),
            end_date: self.end_date.clone(),
        }
    }
}

pub fn cmd(args: RangeArgs) -> Result<()> {
    let config = Config::read()?.analytics_or_default();
    let range = DateRangeResolver::new(config.week_start).resolve_now(&args.query(&config))?;

    msg_print!(Message::ResolvedRange(
        range.start().format("%Y-%m-%d %H:%M:%S%.3f").to_string(),
        range.end().format("%Y-%m-%d %H:%M:%S%.3f").to_string(),
        range.total_days()
    ));
    Ok(())
}
