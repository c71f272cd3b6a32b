/// Every user-facing message the CLI prints.
///
/// Text lives in `display.rs`; variants carry only the values to interpolate.
#[derive(Debug, Clone)]
pub enum Message {
    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigDeleted,
    ConfigModuleAnalytics,
    PromptDefaultPreset,
    PromptDefaultGranularity,
    PromptWeekStart,
    PromptOutputFormat,

    // === INPUT MESSAGES ===
    RecordsLoaded {
        path: String,
        fetched: usize,
        matching: usize,
    },
    RecordsFileReadFailed(String, String), // path, error
    RecordsFileParseFailed(String, String), // path, error

    // === RANGE MESSAGES ===
    ResolvedRange(String, String, i64), // start, end, total days

    // === REPORT MESSAGES ===
    ReportHeader {
        asset_id: String,
        asset_name: String,
        start: String,
        end: String,
    },
    ReportSummaryHeader,
    ReportSeriesHeader(String), // granularity
    ReportDiagnosticsHeader,
    RecordsDropped(usize),
    DowntimeClamped(usize, String), // bucket count, minutes
    OverlapDetected(String),        // minutes
    AnalysisFailed(String),

    // === EXPORT MESSAGES ===
    ExportingReport(String, String), // asset id, format
    ExportCompleted(String),         // path
    ExportFailed(String),
}
