//! Export command implementation
//!
//! This module implements the `export` command: select data elements, org
//! units and a period, run the export and write the CSV file.

use crate::cli::commands::{open_session, split_ids};
use crate::cli::{exit_code, exit_code_for};
use crate::core::selection::SelectionKind;
use crate::domain::PeriodSpec;
use chrono::Utc;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Data element ids to export (comma-separated)
    #[arg(long, value_name = "IDS", conflicts_with = "all_data_elements")]
    pub data_elements: Option<String>,

    /// Export every data element of every dataset
    #[arg(long)]
    pub all_data_elements: bool,

    /// Organisation unit ids to export (comma-separated)
    #[arg(long, value_name = "IDS", conflicts_with = "all_org_units")]
    pub org_units: Option<String>,

    /// Export every organisation unit
    #[arg(long)]
    pub all_org_units: bool,

    /// Period: 2024-01, 202401, 2024Q1, 2024, 2020..2024 or
    /// 2024-01-01..2024-03-31
    #[arg(short, long)]
    pub period: Option<String>,

    /// Output file; defaults to `<output_dir>/<file_prefix>-<date>.csv`
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl ExportArgs {
    /// Execute the export command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting export command");

        // Parse the period before going to the network
        let period = match self.period.as_deref().map(str::parse::<PeriodSpec>).transpose() {
            Ok(p) => p,
            Err(e) => {
                eprintln!("❌ {e}");
                return Ok(exit_code_for(&e));
            }
        };

        let (config, mut session) = match open_session(config_path).await {
            Ok(s) => s,
            Err(code) => return Ok(code),
        };
        println!("✅ Welcome, {}!", session.welcome_name());

        if self.all_data_elements {
            session
                .selection
                .select_all(SelectionKind::DataElements, &session.catalog);
        } else if let Some(ids) = &self.data_elements {
            for id in split_ids(ids) {
                session.selection.select(SelectionKind::DataElements, id);
            }
        }

        if self.all_org_units {
            session
                .selection
                .select_all(SelectionKind::OrgUnits, &session.catalog);
        } else if let Some(ids) = &self.org_units {
            for id in split_ids(ids) {
                session.selection.select(SelectionKind::OrgUnits, id);
            }
        }

        // Confirmation prompt (unless --yes)
        if !self.yes {
            println!();
            println!("Export Configuration:");
            println!(
                "  Data elements: {}",
                session.selection.selected_count(SelectionKind::DataElements)
            );
            println!(
                "  Organisation units: {}",
                session.selection.selected_count(SelectionKind::OrgUnits)
            );
            println!(
                "  Period: {}",
                period.map_or_else(|| "(none)".to_string(), |p| p.to_string())
            );
            println!();
            print!("Proceed with export? [y/N]: ");
            use std::io::{self, Write};
            io::stdout().flush()?;

            let mut input = String::new();
            io::stdin().read_line(&mut input)?;

            if !input.trim().eq_ignore_ascii_case("y") {
                println!("Export cancelled.");
                return Ok(exit_code::SUCCESS);
            }
        }

        println!("🚀 Starting export...");
        println!();

        let summary = match session.export(period.as_ref()).await {
            Ok(s) => s,
            Err(failure) => {
                eprintln!("{}", failure.log.render());
                eprintln!();
                eprintln!("❌ Export failed: {}", failure.error);
                return Ok(exit_code_for(&failure.error));
            }
        };

        println!("{}", summary.log.render());
        println!();

        let Some(csv) = &summary.csv else {
            println!("ℹ️  No data values found for selected criteria");
            return Ok(exit_code::PARTIAL);
        };

        let path = self
            .output
            .clone()
            .unwrap_or_else(|| config.export.output_path(Utc::now().date_naive()));

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, csv)?;
        tracing::info!(path = %path.display(), bytes = csv.len(), "CSV written");

        println!("📊 Export Summary:");
        println!("  Run: {}", summary.run_id);
        println!("  Data values: {}", summary.tuple_count);
        println!("  Data elements: {}", summary.data_element_count);
        println!("  Organisation units: {}", summary.org_unit_count);
        println!("  Rows: {}", summary.row_count);
        println!("  Columns: {}", summary.column_count);
        println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
        println!("  File: {}", path.display());
        println!();

        for warning in &summary.warnings {
            println!("⚠️  {warning}");
        }

        println!("✅ Dataset data downloaded successfully!");
        Ok(exit_code::SUCCESS)
    }
}
