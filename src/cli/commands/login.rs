//! Login command implementation
//!
//! Checks the configured credentials and reports what the account can see.

use crate::cli::commands::open_session;
use crate::cli::exit_code;
use clap::Args;

/// Arguments for the login command
#[derive(Args, Debug)]
pub struct LoginArgs {}

impl LoginArgs {
    /// Execute the login command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Checking DHIS2 credentials");

        let (_, session) = match open_session(config_path).await {
            Ok(s) => s,
            Err(code) => return Ok(code),
        };

        println!("✅ Welcome, {}!", session.welcome_name());
        println!();
        println!("Instance: {}", session.instance_url());
        println!("  Datasets: {}", session.catalog.datasets.len());
        println!(
            "  Data elements: {}",
            session.catalog.distinct_element_count()
        );
        println!("  Organisation units: {}", session.catalog.org_units.len());
        println!();

        Ok(exit_code::SUCCESS)
    }
}
