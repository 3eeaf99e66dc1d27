//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the Harvest configuration file.

use crate::cli::exit_code;
use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates before returning
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(exit_code::CONFIGURATION);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  DHIS2 Instance: {}", config.dhis2.instance_url());
        println!("  Username: {}", config.dhis2.username);
        println!("  Timeout: {}s", config.dhis2.timeout_seconds);
        println!("  TLS Verify: {}", config.dhis2.tls_verify);
        println!(
            "  Proxy: {}",
            config.dhis2.proxy_url.as_deref().unwrap_or("(none)")
        );
        println!("  Output Directory: {}", config.export.output_dir);
        println!("  File Prefix: {}", config.export.file_prefix);
        println!(
            "  File Logging: {}",
            if config.logging.local_enabled {
                format!("{} ({})", config.logging.local_path, config.logging.local_rotation)
            } else {
                "disabled".to_string()
            }
        );
        println!();

        Ok(exit_code::SUCCESS)
    }
}
