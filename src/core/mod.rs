//! Core business logic for Harvest.
//!
//! # Modules
//!
//! - [`session`] - Login, the metadata catalog and the user's selection
//! - [`selection`] - Selection and expand state, filtered views
//! - [`hierarchy`] - Org unit forest and ancestor chains
//! - [`resolution`] - Id → name maps built for each export run
//! - [`transform`] - Long → wide reshaping and CSV serialization
//! - [`export`] - Export orchestration, operation log and summary
//!
//! # Export Workflow
//!
//! 1. **Login**: Check credentials and load datasets and org units
//! 2. **Select**: Pick data elements, org units and a period
//! 3. **Retrieve**: Fetch data values for the selection
//! 4. **Resolve**: Map ids to names, fetch category option combo names
//! 5. **Reshape**: One row per org unit and period, one column per element
//! 6. **Report**: CSV text plus an export summary
//!
//! # Example
//!
//! ```rust,no_run
//! use harvest::adapters::dhis2::Dhis2Client;
//! use harvest::config::load_config;
//! use harvest::core::selection::SelectionKind;
//! use harvest::core::session::Session;
//! use harvest::domain::PeriodSpec;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("harvest.toml")?;
//! let client = Dhis2Client::new(&config.dhis2)?;
//!
//! let mut session = Session::open(Arc::new(client)).await?;
//! session.selection.select(SelectionKind::DataElements, "fbfJHSPpUQD");
//! session.selection.select(SelectionKind::OrgUnits, "DiszpKrYNg8");
//!
//! let period: PeriodSpec = "2024Q1".parse()?;
//! let summary = session.export(Some(&period)).await?;
//!
//! println!("Rows: {}", summary.row_count);
//! # Ok(())
//! # }
//! ```

pub mod export;
pub mod hierarchy;
pub mod resolution;
pub mod selection;
pub mod session;
pub mod transform;
