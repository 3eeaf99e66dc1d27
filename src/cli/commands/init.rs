//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use crate::cli::exit_code;
use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "harvest.toml")]
    pub output: String,

    /// Include example values and comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing Harvest configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(exit_code::CONFIGURATION);
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your DHIS2 instance URL", self.output);
                println!("  2. Create a .env file with your credentials:");
                println!("     - Set HARVEST_DHIS2_USERNAME and HARVEST_DHIS2_PASSWORD");
                println!("  3. Validate configuration: harvest validate-config");
                println!("  4. Check the login: harvest login");
                println!("  5. Run export: harvest export --data-elements <ids> --org-units <ids> --period 2024-01");
                println!();
                Ok(exit_code::SUCCESS)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(exit_code::FATAL)
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# Harvest Configuration File
# DHIS2 data values to wide-format CSV

[application]
log_level = "info"

[dhis2]
base_url = "https://play.dhis2.org/40"
username = "${HARVEST_DHIS2_USERNAME}"
password = "${HARVEST_DHIS2_PASSWORD}"
timeout_seconds = 60
tls_verify = true

[export]
output_dir = "."
file_prefix = "dataset-export"

[logging]
local_enabled = false
local_path = "./logs"
local_rotation = "daily"
"#
        .to_string()
    }

    /// Generate configuration with examples and comments
    fn generate_config_with_examples() -> String {
        r#"# Harvest Configuration File
# DHIS2 data values to wide-format CSV
#
# This file contains all configuration options with examples and explanations.
# Any value can reference an environment variable as ${NAME}, and every key
# can be overridden with HARVEST_<SECTION>_<KEY>, e.g. HARVEST_DHIS2_BASE_URL.

# ============================================================================
# Application Settings
# ============================================================================
[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

# ============================================================================
# DHIS2 Instance
# ============================================================================
[dhis2]
# Instance URL, without /api (a trailing slash is ignored)
base_url = "https://play.dhis2.org/40"

# Basic authentication credentials (use environment variables)
username = "${HARVEST_DHIS2_USERNAME}"
password = "${HARVEST_DHIS2_PASSWORD}"

# Request timeout in seconds (1-600)
timeout_seconds = 60

# TLS certificate verification
# Only disable against test instances with self-signed certificates
tls_verify = true

# Optional: route every request through an HTTP(S) proxy
# proxy_url = "http://proxy.example.org:3128"

# ============================================================================
# Export Output
# ============================================================================
[export]
# Directory the CSV is written to when --output is not given
output_dir = "./exports"

# File name prefix; files are named <prefix>-<YYYY-MM-DD>.csv
file_prefix = "dataset-export"

# ============================================================================
# Logging Configuration
# ============================================================================
[logging]
# Enable JSON file logging in addition to the console
local_enabled = false

# Directory for harvest.log
local_path = "./logs"

# Log rotation: daily, hourly or never
local_rotation = "daily"
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HarvestConfig;

    #[test]
    fn test_init_args_defaults() {
        let args = InitArgs {
            output: "harvest.toml".to_string(),
            with_examples: false,
            force: false,
        };

        assert_eq!(args.output, "harvest.toml");
        assert!(!args.with_examples);
        assert!(!args.force);
    }

    #[test]
    fn test_generate_minimal_config() {
        let config = InitArgs::generate_minimal_config();
        assert!(config.contains("[application]"));
        assert!(config.contains("[dhis2]"));
        assert!(config.contains("[export]"));
    }

    #[test]
    fn test_generated_configs_parse() {
        for content in [
            InitArgs::generate_minimal_config(),
            InitArgs::generate_config_with_examples(),
        ] {
            let config: HarvestConfig = toml::from_str(&content).unwrap();
            assert_eq!(config.export.file_prefix, "dataset-export");
        }
    }

    #[tokio::test]
    async fn test_init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("harvest.toml");
        fs::write(&path, "existing").unwrap();

        let args = InitArgs {
            output: path.to_string_lossy().into_owned(),
            with_examples: false,
            force: false,
        };

        assert_eq!(args.execute().await.unwrap(), exit_code::CONFIGURATION);
        assert_eq!(fs::read_to_string(&path).unwrap(), "existing");
    }

    #[tokio::test]
    async fn test_init_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("harvest.toml");

        let args = InitArgs {
            output: path.to_string_lossy().into_owned(),
            with_examples: true,
            force: false,
        };

        assert_eq!(args.execute().await.unwrap(), exit_code::SUCCESS);
        assert!(fs::read_to_string(&path).unwrap().contains("[dhis2]"));
    }
}
