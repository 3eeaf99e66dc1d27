//! CLI command implementations
//!
//! This module contains all CLI command implementations.

pub mod datasets;
pub mod export;
pub mod init;
pub mod login;
pub mod org_units;
pub mod validate;

use crate::adapters::dhis2::Dhis2Client;
use crate::cli::exit_code_for;
use crate::config::{load_config, HarvestConfig};
use crate::core::session::Session;
use crate::log_error_with_context;
use std::sync::Arc;

/// Load the configuration and log in
///
/// On failure the error is reported and the exit code returned.
pub(crate) async fn open_session(config_path: &str) -> Result<(HarvestConfig, Session), i32> {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            log_error_with_context!(&e, "Failed to load configuration");
            eprintln!("❌ Failed to load configuration file");
            eprintln!("   Error: {e}");
            return Err(exit_code_for(&e));
        }
    };

    let client = match Dhis2Client::new(&config.dhis2) {
        Ok(c) => c,
        Err(e) => {
            log_error_with_context!(&e, "Failed to create DHIS2 client");
            eprintln!("❌ Failed to initialize DHIS2 client: {e}");
            return Err(exit_code_for(&e));
        }
    };

    println!("🔐 Connecting to {}...", config.dhis2.instance_url());

    match Session::open(Arc::new(client)).await {
        Ok(session) => {
            let session = session.with_export_config(config.export.clone());
            Ok((config, session))
        }
        Err(e) => {
            log_error_with_context!(&e, "Login failed");
            eprintln!("❌ Login failed: {e}");
            Err(exit_code_for(&e))
        }
    }
}

/// Split a comma-separated id list, dropping blanks
pub(crate) fn split_ids(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
