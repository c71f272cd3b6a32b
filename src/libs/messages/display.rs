//! Display implementation for fixtrack messages.
//!
//! All user-facing text is defined here, in one match, so wording stays
//! consistent between the table view, the export command and error output.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigDeleted => "Configuration removed, defaults will be used".to_string(),
            Message::ConfigModuleAnalytics => "Analytics defaults".to_string(),
            Message::PromptDefaultPreset => "Default date range preset".to_string(),
            Message::PromptDefaultGranularity => "Default reporting period".to_string(),
            Message::PromptWeekStart => "First day of the week".to_string(),
            Message::PromptOutputFormat => "Default output format".to_string(),

            // === INPUT MESSAGES ===
            Message::RecordsLoaded { path, fetched, matching } => {
                format!("Loaded {} record(s) from {}, {} eligible for this asset", fetched, path, matching)
            }
            Message::RecordsFileReadFailed(path, error) => format!("Failed to read records file {}: {}", path, error),
            Message::RecordsFileParseFailed(path, error) => format!("Failed to parse records file {}: {}", path, error),

            // === RANGE MESSAGES ===
            Message::ResolvedRange(start, end, days) => format!("{} .. {} ({} day(s))", start, end, days),

            // === REPORT MESSAGES ===
            Message::ReportHeader {
                asset_id,
                asset_name,
                start,
                end,
            } => {
                if asset_name.is_empty() {
                    format!("Availability for {} from {} to {}", asset_id, start, end)
                } else {
                    format!("Availability for {} ({}) from {} to {}", asset_name, asset_id, start, end)
                }
            }
            Message::ReportSummaryHeader => "Summary".to_string(),
            Message::ReportSeriesHeader(granularity) => format!("Series by {}", granularity),
            Message::ReportDiagnosticsHeader => "Diagnostics".to_string(),
            Message::RecordsDropped(count) => format!("{} record(s) had no resolvable duration or fell outside the window and were skipped", count),
            Message::DowntimeClamped(count, minutes) => {
                format!("Downtime exceeded the period length in {} period(s); {} clamped", count, minutes)
            }
            Message::OverlapDetected(minutes) => format!("Overlapping incidents account for {} of logged downtime", minutes),
            Message::AnalysisFailed(error) => format!("Analysis failed: {}", error),

            // === EXPORT MESSAGES ===
            Message::ExportingReport(asset_id, format) => format!("Exporting report for {} as {}...", asset_id, format),
            Message::ExportCompleted(path) => format!("Report exported to: {}", path),
            Message::ExportFailed(error) => format!("Export failed: {}", error),
        };
        write!(f, "{}", text)
    }
}
