//! Configuration management for the fixtrack command-line tool.
//!
//! The engine itself is configuration-free: every call receives its window,
//! granularity and week convention explicitly. This module only supplies the
//! defaults the CLI uses when a flag is omitted.
//!
//! ## Storage
//!
//! - Configuration is a pretty-printed JSON file named [`CONFIG_FILE_NAME`]
//! - It lives in the platform data directory resolved by [`DataStorage`]
//! - A missing file is not an error; defaults apply
//!
//! ## Usage Examples
//!
//! ```rust,no_run
//! use fixtrack::libs::config::Config;
//!
//! let config = Config::read()?;
//! let analytics = config.analytics_or_default();
//! println!("Default preset: {}", analytics.default_preset);
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use crate::libs::bucket::Granularity;
use crate::libs::date_range::{Preset, WeekStart};
use crate::libs::messages::Message;
use crate::libs::view::ReportFormat;
use crate::msg_print;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Select};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};

pub const CONFIG_FILE_NAME: &str = "config.json";

/// Defaults applied by `analyze`, `export` and `range` when flags are omitted.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AnalyticsConfig {
    /// Preset token used when neither `--preset` nor explicit dates are given.
    ///
    /// Stored as a raw token so a hand-edited file with an unknown value
    /// still loads; the resolver falls back to `last_30_days` for it.
    pub default_preset: String,

    /// Bucket size used when `--period` is omitted.
    pub default_granularity: Granularity,

    /// First day of the week for `this_week` / `last_week` presets and for
    /// weekly buckets.
    pub week_start: WeekStart,

    /// Rendering used by `analyze` when `--format` is omitted.
    pub output: ReportFormat,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        AnalyticsConfig {
            default_preset: Preset::Last30Days.to_string(),
            default_granularity: Granularity::Day,
            week_start: WeekStart::Monday,
            output: ReportFormat::Table,
        }
    }
}

/// Root configuration document.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analytics: Option<AnalyticsConfig>,
}

impl Config {
    /// Loads the configuration file, returning defaults when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(config_file_path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Removes the configuration file if present.
    pub fn delete() -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        if config_file_path.exists() {
            fs::remove_file(config_file_path)?;
        }
        Ok(())
    }

    pub fn analytics_or_default(&self) -> AnalyticsConfig {
        self.analytics.clone().unwrap_or_default()
    }

    /// Runs the interactive setup wizard, pre-selecting current values.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal input cannot be collected.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();
        let current = config.analytics_or_default();
        let theme = ColorfulTheme::default();

        msg_print!(Message::ConfigModuleAnalytics);

        let presets: Vec<Preset> = Preset::ALL.into_iter().filter(|p| *p != Preset::Custom).collect();
        let preset_index = presets
            .iter()
            .position(|p| p.as_str() == current.default_preset)
            .unwrap_or(0);
        let preset = Select::with_theme(&theme)
            .with_prompt(Message::PromptDefaultPreset.to_string())
            .items(&presets.iter().map(Preset::as_str).collect::<Vec<_>>())
            .default(preset_index)
            .interact()?;

        let granularities = [
            Granularity::Day,
            Granularity::Week,
            Granularity::Month,
            Granularity::Quarter,
            Granularity::Year,
        ];
        let granularity = Select::with_theme(&theme)
            .with_prompt(Message::PromptDefaultGranularity.to_string())
            .items(&granularities.iter().map(Granularity::as_str).collect::<Vec<_>>())
            .default(granularities.iter().position(|g| *g == current.default_granularity).unwrap_or(0))
            .interact()?;

        let week_starts = [WeekStart::Monday, WeekStart::Sunday];
        let week_start = Select::with_theme(&theme)
            .with_prompt(Message::PromptWeekStart.to_string())
            .items(&week_starts.iter().map(|w| w.to_string()).collect::<Vec<_>>())
            .default(week_starts.iter().position(|w| *w == current.week_start).unwrap_or(0))
            .interact()?;

        let outputs = [ReportFormat::Table, ReportFormat::Json];
        let output = Select::with_theme(&theme)
            .with_prompt(Message::PromptOutputFormat.to_string())
            .items(&outputs.iter().map(|o| o.to_string()).collect::<Vec<_>>())
            .default(outputs.iter().position(|o| *o == current.output).unwrap_or(0))
            .interact()?;

        config.analytics = Some(AnalyticsConfig {
            default_preset: presets[preset].to_string(),
            default_granularity: granularities[granularity],
            week_start: week_starts[week_start],
            output: outputs[output],
        });

        Ok(config)
    }
}
