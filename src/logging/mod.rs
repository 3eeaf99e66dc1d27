//! Logging and observability
//!
//! Structured logging through `tracing`, with:
//! - Console output (stderr)
//! - Optional JSON file logging with rotation
//!
//! # Example
//!
//! ```no_run
//! use harvest::logging::init_logging;
//! use harvest::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log the start of an export run
///
/// # Example
///
/// ```no_run
/// use harvest::log_export_start;
///
/// log_export_start!(12, 3, "period=2024Q1");
/// ```
#[macro_export]
macro_rules! log_export_start {
    ($elements:expr, $org_units:expr, $period:expr) => {
        tracing::info!(
            data_elements = $elements,
            org_units = $org_units,
            period = %$period,
            "Starting export"
        );
    };
}

/// Log the completion of an export run
///
/// # Example
///
/// ```no_run
/// use harvest::log_export_complete;
/// use std::time::Duration;
///
/// log_export_complete!(42, 7, Duration::from_millis(350));
/// ```
#[macro_export]
macro_rules! log_export_complete {
    ($tuples:expr, $rows:expr, $duration:expr) => {
        tracing::info!(
            tuples = $tuples,
            rows = $rows,
            duration_ms = $duration.as_millis() as u64,
            "Export completed"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use harvest::log_error_with_context;
/// use harvest::domain::HarvestError;
///
/// let error = HarvestError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
