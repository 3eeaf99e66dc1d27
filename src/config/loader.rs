//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::HarvestConfig;
use super::secret::secret_string;
use crate::domain::errors::HarvestError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into HarvestConfig
/// 4. Applies environment variable overrides (HARVEST_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns `HarvestError::Configuration` if the file is missing or unreadable,
/// a referenced environment variable is unset, parsing fails, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use harvest::config::loader::load_config;
///
/// let config = load_config("harvest.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<HarvestConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(HarvestError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        HarvestError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: HarvestConfig = toml::from_str(&contents)
        .map_err(|e| HarvestError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        HarvestError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied through untouched.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| HarvestError::Configuration(e.to_string()))?;
    let mut result = String::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    processed_line = processed_line.replace(&format!("${{{var_name}}}"), &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(HarvestError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the HARVEST_* prefix
///
/// Variables follow the pattern `HARVEST_<SECTION>_<KEY>`, for example
/// `HARVEST_DHIS2_BASE_URL` or `HARVEST_EXPORT_OUTPUT_DIR`.
fn apply_env_overrides(config: &mut HarvestConfig) {
    if let Ok(val) = std::env::var("HARVEST_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    if let Ok(val) = std::env::var("HARVEST_DHIS2_BASE_URL") {
        config.dhis2.base_url = val;
    }
    if let Ok(val) = std::env::var("HARVEST_DHIS2_USERNAME") {
        config.dhis2.username = val;
    }
    if let Ok(val) = std::env::var("HARVEST_DHIS2_PASSWORD") {
        config.dhis2.password = secret_string(val);
    }
    if let Ok(val) = std::env::var("HARVEST_DHIS2_TIMEOUT_SECONDS") {
        if let Ok(timeout) = val.parse() {
            config.dhis2.timeout_seconds = timeout;
        }
    }
    if let Ok(val) = std::env::var("HARVEST_DHIS2_TLS_VERIFY") {
        config.dhis2.tls_verify = val.parse().unwrap_or(true);
    }
    if let Ok(val) = std::env::var("HARVEST_DHIS2_PROXY_URL") {
        config.dhis2.proxy_url = Some(val);
    }

    if let Ok(val) = std::env::var("HARVEST_EXPORT_OUTPUT_DIR") {
        config.export.output_dir = val;
    }
    if let Ok(val) = std::env::var("HARVEST_EXPORT_FILE_PREFIX") {
        config.export.file_prefix = val;
    }

    if let Ok(val) = std::env::var("HARVEST_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("HARVEST_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
}
