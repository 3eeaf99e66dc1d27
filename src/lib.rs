// Harvest - DHIS2 data values to wide-format CSV
// Copyright (c) 2025 Harvest Contributors
// Licensed under the MIT License

//! # Harvest - DHIS2 wide-format data export
//!
//! Harvest logs into a DHIS2 instance, lets you pick data elements,
//! organisation units and a period, and exports the matching data values as a
//! wide CSV table: one row per organisation unit and period, one column per
//! data element (or data element and category option combo).
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Browsing** datasets and the organisation unit tree with search and
//!   expand/collapse state
//! - **Retrieving** data values and metadata through the DHIS2 Web API
//! - **Reshaping** sparse data values into a dense table with the org unit
//!   hierarchy spread over `Level 1 … Level N` columns
//! - **Serializing** the table as CSV with minimal quoting
//!
//! ## Architecture
//!
//! Harvest follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (session, selection, hierarchy, export, transform)
//! - [`adapters`] - External integrations (DHIS2 Web API)
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use harvest::adapters::dhis2::Dhis2Client;
//! use harvest::config::load_config;
//! use harvest::core::selection::SelectionKind;
//! use harvest::core::session::Session;
//! use harvest::domain::PeriodSpec;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("harvest.toml")?;
//!     let client = Dhis2Client::new(&config.dhis2)?;
//!
//!     let mut session = Session::open(Arc::new(client)).await?;
//!     println!("Welcome, {}!", session.welcome_name());
//!
//!     session.selection.select_all(SelectionKind::DataElements, &session.catalog);
//!     session.selection.select(SelectionKind::OrgUnits, "ImspTQPwCqd");
//!
//!     let period: PeriodSpec = "2024-01".parse()?;
//!     let summary = session.export(Some(&period)).await?;
//!
//!     if let Some(csv) = &summary.csv {
//!         std::fs::write(&summary.file_name, csv)?;
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Reshaping
//!
//! The reshaper is a pure function over the retrieved tuples and the id → name
//! maps built for the run:
//!
//! ```rust
//! use harvest::core::resolution::ResolutionMaps;
//! use harvest::core::transform::reshape;
//! use harvest::domain::{CategoryOptionCombo, DataElementRef, Dataset, ObservationTuple, OrgUnit};
//!
//! # fn example() -> harvest::domain::Result<()> {
//! let datasets = vec![Dataset {
//!     id: "ds1".to_string(),
//!     display_name: "Immunisation".to_string(),
//!     period_type: Some("Monthly".to_string()),
//!     elements: vec![DataElementRef::new("DE1", "Measles doses")],
//! }];
//! let org_units = vec![
//!     OrgUnit::new("D1", "District 1", 1, None),
//!     OrgUnit::new("OU1", "Clinic A", 2, Some("D1")),
//! ];
//! let combos = vec![CategoryOptionCombo {
//!     id: "COC1".to_string(),
//!     display_name: "Fixed".to_string(),
//! }];
//! let maps = ResolutionMaps::build(&datasets, &org_units, &combos);
//!
//! let tuples = vec![ObservationTuple::new("OU1", "202401", "DE1", Some("COC1"), "10")];
//! let table = reshape(&tuples, &maps)?;
//!
//! assert_eq!(table.headers, vec!["Level 1", "Level 2", "Period", "Measles doses (Fixed)"]);
//! assert_eq!(table.rows[0], vec!["District 1", "Clinic A", "202401", "10"]);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Error Handling
//!
//! Harvest uses the [`domain::HarvestError`] type for all errors:
//!
//! ```rust,no_run
//! use harvest::domain::HarvestError;
//!
//! fn example() -> Result<(), HarvestError> {
//!     // Errors are automatically converted using the ? operator
//!     let config = harvest::config::load_config("harvest.toml")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Logging
//!
//! Harvest uses structured logging with the `tracing` crate; each export run
//! also keeps an operation log that is returned with its summary.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
