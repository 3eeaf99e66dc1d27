//! Configuration management for Harvest.
//!
//! Harvest reads a TOML file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `HARVEST_<SECTION>_<KEY>` environment overrides
//! - Default values for optional settings
//! - Validation on load
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [dhis2]
//! base_url = "https://play.dhis2.org/40"
//! username = "admin"
//! password = "${HARVEST_DHIS2_PASSWORD}"
//!
//! [export]
//! output_dir = "exports"
//! file_prefix = "dataset-export"
//! ```
//!
//! # Loading
//!
//! ```rust,no_run
//! use harvest::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("harvest.toml")?;
//! println!("DHIS2 instance: {}", config.dhis2.instance_url());
//! # Ok(())
//! # }
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::load_config;
pub use schema::{ApplicationConfig, Dhis2Config, ExportConfig, HarvestConfig, LoggingConfig};
pub use secret::{secret_string, SecretString, SecretValue};
