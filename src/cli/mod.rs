//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Harvest using clap.

pub mod commands;

use crate::domain::{Dhis2Error, HarvestError};
use clap::{Parser, Subcommand};

/// Harvest - DHIS2 wide-format data export
#[derive(Parser, Debug)]
#[command(name = "harvest")]
#[command(version, about, long_about = None)]
#[command(author = "Harvest Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "harvest.toml", env = "HARVEST_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "HARVEST_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check credentials against the DHIS2 instance
    Login(commands::login::LoginArgs),

    /// List datasets and their data elements
    Datasets(commands::datasets::DatasetsArgs),

    /// Show the organisation unit tree
    OrgUnits(commands::org_units::OrgUnitsArgs),

    /// Export data values as wide-format CSV
    Export(commands::export::ExportArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

/// Process exit codes
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    /// No data found, or the export did not complete fully
    pub const PARTIAL: i32 = 1;
    pub const CONFIGURATION: i32 = 2;
    pub const AUTHENTICATION: i32 = 3;
    pub const CONNECTION: i32 = 4;
    pub const FATAL: i32 = 5;
}

/// Exit code for a failed operation
pub fn exit_code_for(error: &HarvestError) -> i32 {
    match error {
        HarvestError::Configuration(_) | HarvestError::Validation(_) => exit_code::CONFIGURATION,
        HarvestError::Dhis2(Dhis2Error::Unauthorized(_) | Dhis2Error::Forbidden(_)) => {
            exit_code::AUTHENTICATION
        }
        HarvestError::Dhis2(_) => exit_code::CONNECTION,
        HarvestError::CyclicHierarchy(_)
        | HarvestError::ExportInProgress
        | HarvestError::Serialization(_)
        | HarvestError::Io(_) => exit_code::FATAL,
    }
}
