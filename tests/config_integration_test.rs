//! Integration tests for configuration loading and validation
//!
//! Tests that touch environment variables hold `ENV_MUTEX` so they do not
//! interfere with each other.

use harvest::config::load_config;
use harvest::domain::HarvestError;
use secrecy::ExposeSecret;
use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Helper function to clean up environment variables
fn cleanup_env_vars() {
    for var in [
        "HARVEST_APPLICATION_LOG_LEVEL",
        "HARVEST_DHIS2_BASE_URL",
        "HARVEST_DHIS2_USERNAME",
        "HARVEST_DHIS2_PASSWORD",
        "HARVEST_DHIS2_TIMEOUT_SECONDS",
        "HARVEST_DHIS2_TLS_VERIFY",
        "HARVEST_DHIS2_PROXY_URL",
        "HARVEST_EXPORT_OUTPUT_DIR",
        "HARVEST_EXPORT_FILE_PREFIX",
        "HARVEST_LOGGING_LOCAL_ENABLED",
        "HARVEST_LOGGING_LOCAL_PATH",
        "TEST_DHIS2_PASSWORD",
    ] {
        std::env::remove_var(var);
    }
}

fn write_config(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(content.as_bytes()).unwrap();
    temp_file.flush().unwrap();
    temp_file
}

#[test]
fn test_load_complete_config() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let temp_file = write_config(
        r#"
[application]
log_level = "debug"

[dhis2]
base_url = "https://play.dhis2.org/40/"
username = "admin"
password = "district"
timeout_seconds = 120
tls_verify = false
proxy_url = "http://proxy.internal:3128"

[export]
output_dir = "/data/exports"
file_prefix = "immunisation"

[logging]
local_enabled = true
local_path = "/var/log/harvest"
local_rotation = "hourly"
"#,
    );

    let config = load_config(temp_file.path()).expect("Failed to load config");

    assert_eq!(config.application.log_level, "debug");
    assert_eq!(config.dhis2.instance_url(), "https://play.dhis2.org/40");
    assert_eq!(config.dhis2.username, "admin");
    assert_eq!(config.dhis2.password.expose_secret(), "district");
    assert_eq!(config.dhis2.timeout_seconds, 120);
    assert!(!config.dhis2.tls_verify);
    assert_eq!(
        config.dhis2.proxy_url.as_deref(),
        Some("http://proxy.internal:3128")
    );
    assert_eq!(config.export.output_dir, "/data/exports");
    assert_eq!(config.export.file_prefix, "immunisation");
    assert!(config.logging.local_enabled);
    assert_eq!(config.logging.local_rotation, "hourly");
}

#[test]
fn test_load_minimal_config_uses_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let temp_file = write_config(
        r#"
[dhis2]
base_url = "https://play.dhis2.org/40"
username = "admin"
password = "district"
"#,
    );

    let config = load_config(temp_file.path()).expect("Failed to load config");

    assert_eq!(config.application.log_level, "info");
    assert_eq!(config.dhis2.timeout_seconds, 60);
    assert!(config.dhis2.tls_verify);
    assert!(config.dhis2.proxy_url.is_none());
    assert_eq!(config.export.output_dir, ".");
    assert_eq!(config.export.file_prefix, "dataset-export");
    assert!(!config.logging.local_enabled);
}

#[test]
fn test_env_var_substitution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("TEST_DHIS2_PASSWORD", "s3cret");

    let temp_file = write_config(
        r#"
# password = "${NOT_SUBSTITUTED_IN_COMMENTS}"
[dhis2]
base_url = "https://play.dhis2.org/40"
username = "admin"
password = "${TEST_DHIS2_PASSWORD}"
"#,
    );

    let config = load_config(temp_file.path()).expect("Failed to load config");
    assert_eq!(config.dhis2.password.expose_secret(), "s3cret");

    cleanup_env_vars();
}

#[test]
fn test_missing_env_var_is_reported() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let temp_file = write_config(
        r#"
[dhis2]
base_url = "https://play.dhis2.org/40"
username = "admin"
password = "${TEST_DHIS2_PASSWORD}"
"#,
    );

    let err = load_config(temp_file.path()).unwrap_err();
    assert!(matches!(err, HarvestError::Configuration(_)));
    assert!(err.to_string().contains("TEST_DHIS2_PASSWORD"));
}

#[test]
fn test_env_var_overrides() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("HARVEST_APPLICATION_LOG_LEVEL", "trace");
    std::env::set_var("HARVEST_DHIS2_BASE_URL", "https://dhis2.example.org");
    std::env::set_var("HARVEST_DHIS2_PASSWORD", "from-env");
    std::env::set_var("HARVEST_DHIS2_TIMEOUT_SECONDS", "30");
    std::env::set_var("HARVEST_EXPORT_FILE_PREFIX", "nightly");

    let temp_file = write_config(
        r#"
[application]
log_level = "info"

[dhis2]
base_url = "https://play.dhis2.org/40"
username = "admin"
password = "district"
"#,
    );

    let config = load_config(temp_file.path()).expect("Failed to load config");

    assert_eq!(config.application.log_level, "trace");
    assert_eq!(config.dhis2.instance_url(), "https://dhis2.example.org");
    assert_eq!(config.dhis2.password.expose_secret(), "from-env");
    assert_eq!(config.dhis2.timeout_seconds, 30);
    assert_eq!(config.export.file_prefix, "nightly");

    cleanup_env_vars();
}

#[test]
fn test_invalid_config_validation() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let cases = [
        (
            r#"
[dhis2]
base_url = "play.dhis2.org"
username = "admin"
password = "district"
"#,
            "base_url",
        ),
        (
            r#"
[dhis2]
base_url = "https://play.dhis2.org/40"
username = ""
password = "district"
"#,
            "username",
        ),
        (
            r#"
[dhis2]
base_url = "https://play.dhis2.org/40"
username = "admin"
password = "district"
timeout_seconds = 0
"#,
            "timeout_seconds",
        ),
        (
            r#"
[dhis2]
base_url = "https://play.dhis2.org/40"
username = "admin"
password = "district"

[logging]
local_rotation = "weekly"
"#,
            "local_rotation",
        ),
    ];

    for (content, field) in cases {
        let temp_file = write_config(content);
        let err = load_config(temp_file.path()).unwrap_err();
        assert!(
            err.to_string().contains(field),
            "expected error mentioning {field}, got: {err}"
        );
    }
}

#[test]
fn test_missing_file() {
    let err = load_config("/nonexistent/harvest.toml").unwrap_err();
    assert!(matches!(err, HarvestError::Configuration(_)));
}
