//! Export coordinator - main orchestrator for the export process
//!
//! A run goes through fixed stages, strictly in order:
//!
//! 1. Validate the selection and period (no network)
//! 2. Resolve data element names from the cached datasets
//! 3. Resolve org unit names and ancestry from the cached org units
//! 4. Retrieve data values for elements × org units × period
//! 5. Retrieve category option combo names (best effort)
//! 6. Reshape into a wide table and serialize
//!
//! Failures in stages 1-4 and 6 abort the run; the operation log collected so
//! far is returned with the error. A failure in stage 5 is recorded as a
//! warning and the run continues with an empty combo map. A run that
//! retrieves no data stops after stage 4 and reports it.

use crate::adapters::dhis2::Dhis2Api;
use crate::config::ExportConfig;
use crate::core::export::oplog::OperationLog;
use crate::core::export::summary::{ExportFailure, ExportSummary, ExportWarning};
use crate::core::hierarchy::ancestry_map;
use crate::core::resolution::{combo_names, data_element_names, org_unit_names, ResolutionMaps};
use crate::core::session::Catalog;
use crate::core::transform::reshape;
use crate::domain::{HarvestError, PeriodSpec, Result};
use crate::{log_export_complete, log_export_start};
use chrono::Utc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::Instrument;
use uuid::Uuid;

/// Explanations offered when a retrieval comes back empty
pub const NO_DATA_REASONS: [&str; 3] = [
    "No data entered for this period",
    "Selected org units have no data",
    "Data elements are not used in this period",
];

/// Export coordinator
pub struct ExportCoordinator {
    api: Arc<dyn Dhis2Api>,
    export: ExportConfig,
    in_flight: AtomicBool,
}

/// Clears the in-flight flag when a run ends, however it ends
struct RunGuard<'a>(&'a AtomicBool);

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl ExportCoordinator {
    pub fn new(api: Arc<dyn Dhis2Api>) -> Self {
        Self {
            api,
            export: ExportConfig::default(),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Use `export` for output naming
    pub fn with_export_config(mut self, export: ExportConfig) -> Self {
        self.export = export;
        self
    }

    /// Whether a run is in progress
    pub fn is_running(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Execute one export run
    ///
    /// On failure the operation log written so far comes back with the
    /// error, ending in an error entry.
    ///
    /// # Errors
    ///
    /// - `HarvestError::ExportInProgress` if another run has not finished
    /// - `HarvestError::Validation` naming the missing input
    /// - `HarvestError::Dhis2` if the data value retrieval fails
    /// - `HarvestError::CyclicHierarchy` if org unit parent links loop
    pub async fn run(
        &self,
        catalog: &Catalog,
        data_elements: &[String],
        org_units: &[String],
        period: Option<&PeriodSpec>,
    ) -> std::result::Result<ExportSummary, ExportFailure> {
        let mut log = OperationLog::new();
        if self.in_flight.swap(true, Ordering::AcqRel) {
            return Err(ExportFailure::new(HarvestError::ExportInProgress, log));
        }
        let _guard = RunGuard(&self.in_flight);

        let run_id = Uuid::new_v4();
        let span = tracing::info_span!("export", run_id = %run_id);

        async move {
            match self
                .execute(run_id, catalog, data_elements, org_units, period, &mut log)
                .await
            {
                Ok(mut summary) => {
                    summary.log = log;
                    Ok(summary)
                }
                Err(error) => Err(ExportFailure::new(error, log)),
            }
        }
        .instrument(span)
        .await
    }

    async fn execute(
        &self,
        run_id: Uuid,
        catalog: &Catalog,
        data_elements: &[String],
        org_units: &[String],
        period: Option<&PeriodSpec>,
        log: &mut OperationLog,
    ) -> Result<ExportSummary> {
        let start_time = Instant::now();

        // Stage 1
        let period = validate(data_elements, org_units, period)?;
        let period_query = period.query_fragment();

        let mut summary = ExportSummary::new(
            run_id,
            period_query.clone(),
            self.export.file_name(Utc::now().date_naive()),
        );
        summary.data_element_count = data_elements.len();
        summary.org_unit_count = org_units.len();

        log_export_start!(data_elements.len(), org_units.len(), period_query);

        // Stage 2
        log.info(format!(
            "Processing {} selected data elements...",
            data_elements.len()
        ));
        let element_names = data_element_names(&catalog.datasets, Some(data_elements));
        log.success(format!(
            "Prepared {} data elements for export",
            element_names.len()
        ));

        // Stage 3
        log.info("Building organisation unit hierarchy...");
        let unit_names = org_unit_names(&catalog.org_units);
        let ancestry = ancestry_map(&catalog.org_units);

        // Stage 4
        log.info("Fetching data values...");
        log.info(format!("  Data Elements: {}", data_elements.len()));
        log.info(format!("  Org Units: {}", org_units.len()));
        log.info(format!("  Period: {period_query}"));

        let tuples = self
            .api
            .data_values(data_elements, org_units, period)
            .await?;
        summary.tuple_count = tuples.len();
        log.success(format!("Retrieved {} data values", tuples.len()));

        if tuples.is_empty() {
            summary.add_warning(ExportWarning::NoData);
            log.info("No data found. This could mean:");
            for reason in NO_DATA_REASONS {
                log.info(format!("  - {reason}"));
            }
            let summary = summary.with_duration(start_time.elapsed());
            summary.log_summary();
            return Ok(summary);
        }

        // Stage 5
        log.info("Fetching category option combos...");
        let combos = match self.api.category_option_combos().await {
            Ok(combos) => {
                let names = combo_names(&combos);
                log.info(format!("  Found {} category combos", names.len()));
                names
            }
            Err(e) => {
                log.warning(format!("Could not fetch category option combos: {e}"));
                summary.add_warning(ExportWarning::DegradedCategoryOptionCombos(e.to_string()));
                Default::default()
            }
        };

        // Stage 6
        log.info("Converting to wide format CSV...");
        let maps = ResolutionMaps {
            data_element_names: element_names,
            org_unit_names: unit_names,
            category_option_combo_names: combos,
            org_unit_ancestry: ancestry,
        };
        let table = reshape(&tuples, &maps)?;

        summary.row_count = table.row_count();
        summary.column_count = table.column_count();
        summary.csv = Some(table.to_csv());

        log.success("DOWNLOAD COMPLETE!");
        log.success(format!("  {} data values exported", summary.tuple_count));
        log.success(format!("  {} data elements", summary.data_element_count));
        log.success(format!("  {} organisation units", summary.org_unit_count));

        let summary = summary.with_duration(start_time.elapsed());
        log_export_complete!(summary.tuple_count, summary.row_count, summary.duration);
        summary.log_summary();

        Ok(summary)
    }
}

/// Check that every required input is present, in the order a user fills
/// them in
fn validate<'a>(
    data_elements: &[String],
    org_units: &[String],
    period: Option<&'a PeriodSpec>,
) -> Result<&'a PeriodSpec> {
    if data_elements.is_empty() {
        return Err(HarvestError::Validation(
            "Please select at least one data element".to_string(),
        ));
    }
    if org_units.is_empty() {
        return Err(HarvestError::Validation(
            "Please select at least one organisation unit".to_string(),
        ));
    }
    period.ok_or_else(|| HarvestError::Validation("Please select a period".to_string()))
}
