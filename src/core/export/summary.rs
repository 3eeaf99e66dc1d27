//! Export summary and reporting

use crate::core::export::oplog::{LogLevel, OperationLog};
use crate::domain::HarvestError;
use std::fmt;
use std::time::Duration;
use uuid::Uuid;

/// Something that went wrong without stopping the export
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportWarning {
    /// The retrieval matched no data values
    NoData,
    /// Combo names could not be fetched; columns fall back to bare element names
    DegradedCategoryOptionCombos(String),
}

impl fmt::Display for ExportWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportWarning::NoData => write!(f, "No data values found for selected criteria"),
            ExportWarning::DegradedCategoryOptionCombos(reason) => {
                write!(f, "Category option combo names unavailable: {reason}")
            }
        }
    }
}

/// Summary of an export run
#[derive(Debug, Clone)]
pub struct ExportSummary {
    pub run_id: Uuid,

    /// Query form of the period, e.g. `period=202401`
    pub period: String,

    /// Data values returned by the server
    pub tuple_count: usize,

    /// Data elements requested
    pub data_element_count: usize,

    /// Organisation units requested
    pub org_unit_count: usize,

    /// Data rows in the CSV, header excluded
    pub row_count: usize,

    pub column_count: usize,

    pub warnings: Vec<ExportWarning>,

    /// Wide-format CSV; `None` when no data was found
    pub csv: Option<String>,

    /// Suggested file name, `<prefix>-YYYY-MM-DD.csv`
    pub file_name: String,

    pub duration: Duration,

    pub log: OperationLog,
}

impl ExportSummary {
    pub fn new(run_id: Uuid, period: String, file_name: String) -> Self {
        Self {
            run_id,
            period,
            tuple_count: 0,
            data_element_count: 0,
            org_unit_count: 0,
            row_count: 0,
            column_count: 0,
            warnings: Vec::new(),
            csv: None,
            file_name,
            duration: Duration::from_secs(0),
            log: OperationLog::new(),
        }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn add_warning(&mut self, warning: ExportWarning) {
        self.warnings.push(warning);
    }

    pub fn has_data(&self) -> bool {
        self.csv.is_some()
    }

    /// Data was exported, but with reduced column naming
    pub fn is_degraded(&self) -> bool {
        self.warnings
            .iter()
            .any(|w| matches!(w, ExportWarning::DegradedCategoryOptionCombos(_)))
    }

    pub fn log_summary(&self) {
        tracing::info!(
            run_id = %self.run_id,
            period = %self.period,
            tuples = self.tuple_count,
            data_elements = self.data_element_count,
            org_units = self.org_unit_count,
            rows = self.row_count,
            columns = self.column_count,
            duration_ms = self.duration.as_millis() as u64,
            "Export summary"
        );

        for warning in &self.warnings {
            tracing::warn!(run_id = %self.run_id, %warning, "Export warning");
        }
    }
}

/// A run that stopped early, with everything it logged up to that point
///
/// The last log entry is always the error itself.
#[derive(Debug)]
pub struct ExportFailure {
    pub error: HarvestError,
    pub log: OperationLog,
}

impl ExportFailure {
    pub fn new(error: HarvestError, mut log: OperationLog) -> Self {
        log.error(format!("ERROR: {error}"));
        Self { error, log }
    }

    /// Messages logged at error level
    pub fn errors(&self) -> impl Iterator<Item = &str> {
        self.log
            .entries()
            .iter()
            .filter(|entry| entry.level == LogLevel::Error)
            .map(|entry| entry.message.as_str())
    }
}

impl fmt::Display for ExportFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.error, f)
    }
}

impl std::error::Error for ExportFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

impl From<ExportFailure> for HarvestError {
    fn from(failure: ExportFailure) -> Self {
        failure.error
    }
}
