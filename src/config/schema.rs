//! Configuration schema types

use crate::config::SecretString;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main Harvest configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarvestConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// DHIS2 connection settings
    pub dhis2: Dhis2Config,

    /// Export output settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl HarvestConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.dhis2.validate()?;
        self.export.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

/// DHIS2 instance configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dhis2Config {
    /// Instance URL, e.g. `https://play.dhis2.org/40`
    pub base_url: String,

    /// Username for Basic authentication
    pub username: String,

    /// Password for Basic authentication
    /// Stored securely in memory and automatically zeroized on drop
    pub password: SecretString,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// TLS certificate verification enabled
    ///
    /// Only disable this against test instances with self-signed certificates.
    #[serde(default = "default_true")]
    pub tls_verify: bool,

    /// Optional HTTP(S) proxy every request is routed through
    #[serde(default)]
    pub proxy_url: Option<String>,
}

impl Dhis2Config {
    /// Base URL without a trailing slash
    pub fn instance_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    fn validate(&self) -> Result<(), String> {
        use secrecy::ExposeSecret;

        if self.base_url.trim().is_empty() {
            return Err("dhis2.base_url cannot be empty".to_string());
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err("dhis2.base_url must start with http:// or https://".to_string());
        }

        if self.username.trim().is_empty() {
            return Err("dhis2.username cannot be empty".to_string());
        }

        if self.password.expose_secret().is_empty() {
            return Err("dhis2.password cannot be empty".to_string());
        }

        if self.timeout_seconds == 0 || self.timeout_seconds > 600 {
            return Err(format!(
                "dhis2.timeout_seconds must be between 1 and 600, got {}",
                self.timeout_seconds
            ));
        }

        if let Some(proxy) = &self.proxy_url {
            if url::Url::parse(proxy).is_err() {
                return Err(format!("dhis2.proxy_url '{proxy}' is not a valid URL"));
            }
        }

        Ok(())
    }
}

/// Export output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory the CSV file is written to
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// File name prefix; the export date and `.csv` are appended
    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            file_prefix: default_file_prefix(),
        }
    }
}

impl ExportConfig {
    /// `<prefix>-<YYYY-MM-DD>.csv`
    pub fn file_name(&self, date: NaiveDate) -> String {
        format!("{}-{}.csv", self.file_prefix, date.format("%Y-%m-%d"))
    }

    /// Full output path for an export made on `date`
    pub fn output_path(&self, date: NaiveDate) -> PathBuf {
        PathBuf::from(&self.output_dir).join(self.file_name(date))
    }

    fn validate(&self) -> Result<(), String> {
        if self.file_prefix.trim().is_empty() {
            return Err("export.file_prefix cannot be empty".to_string());
        }

        if self.file_prefix.contains(['/', '\\']) {
            return Err(format!(
                "export.file_prefix '{}' must not contain path separators",
                self.file_prefix
            ));
        }

        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local JSON file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local logging is enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_timeout_seconds() -> u64 {
    60
}

fn default_true() -> bool {
    true
}

fn default_output_dir() -> String {
    ".".to_string()
}

fn default_file_prefix() -> String {
    "dataset-export".to_string()
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;

    fn dhis2_config() -> Dhis2Config {
        Dhis2Config {
            base_url: "https://play.dhis2.org/40/".to_string(),
            username: "admin".to_string(),
            password: secret_string("district".to_string()),
            timeout_seconds: 60,
            tls_verify: true,
            proxy_url: None,
        }
    }

    fn config() -> HarvestConfig {
        HarvestConfig {
            application: ApplicationConfig::default(),
            dhis2: dhis2_config(),
            export: ExportConfig::default(),
            logging: LoggingConfig::default(),
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(config().validate().is_ok());
    }

    #[test]
    fn test_instance_url_strips_trailing_slash() {
        assert_eq!(dhis2_config().instance_url(), "https://play.dhis2.org/40");
    }

    #[test]
    fn test_base_url_scheme_required() {
        let mut config = config();
        config.dhis2.base_url = "play.dhis2.org".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.contains("http:// or https://"));
    }

    #[test]
    fn test_empty_password_rejected() {
        let mut config = config();
        config.dhis2.password = secret_string(String::new());
        assert!(config.validate().unwrap_err().contains("password"));
    }

    #[test]
    fn test_invalid_proxy_rejected() {
        let mut config = config();
        config.dhis2.proxy_url = Some("not a url".to_string());
        assert!(config.validate().unwrap_err().contains("proxy_url"));
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let mut config = config();
        config.application.log_level = "verbose".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_file_name_convention() {
        let export = ExportConfig::default();
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(export.file_name(date), "dataset-export-2024-03-09.csv");
        assert_eq!(
            export.output_path(date),
            PathBuf::from(".").join("dataset-export-2024-03-09.csv")
        );
    }

    #[test]
    fn test_file_prefix_with_separator_rejected() {
        let mut config = config();
        config.export.file_prefix = "out/export".to_string();
        assert!(config.validate().is_err());
    }
}
