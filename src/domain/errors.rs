//! Domain error types
//!
//! This module defines the error hierarchy for Harvest.
//! All errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main Harvest error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum HarvestError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Missing selection or period; user-correctable, never retried
    #[error("Validation error: {0}")]
    Validation(String),

    /// DHIS2-related errors
    #[error("DHIS2 error: {0}")]
    Dhis2(#[from] Dhis2Error),

    /// An organisation unit appears twice in its own ancestor chain
    #[error("Cyclic organisation unit hierarchy detected at '{0}'")]
    CyclicHierarchy(String),

    /// A second export run was started while one is still in flight
    #[error("An export run is already in progress")]
    ExportInProgress,

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

impl HarvestError {
    /// Whether this error ends the session (401/403 from the server)
    pub fn is_auth(&self) -> bool {
        matches!(
            self,
            HarvestError::Dhis2(Dhis2Error::Unauthorized(_))
                | HarvestError::Dhis2(Dhis2Error::Forbidden(_))
        )
    }
}

/// DHIS2-specific errors
///
/// Errors that occur when talking to a DHIS2 instance.
/// These errors don't expose third-party HTTP client types.
#[derive(Debug, Error)]
pub enum Dhis2Error {
    /// Failed to reach the server at all
    #[error("Failed to connect to DHIS2 server: {0}")]
    ConnectionFailed(String),

    /// 401 from the server
    #[error("Invalid username or password: {0}")]
    Unauthorized(String),

    /// 403 from the server
    #[error("Access forbidden: {0}")]
    Forbidden(String),

    /// Any other non-success status on a required call
    #[error("Request to {resource} failed with status {status}")]
    RequestFailed { resource: String, status: u16 },

    /// Body could not be decoded into the expected shape
    #[error("Invalid response from server: {0}")]
    InvalidResponse(String),
}

impl Dhis2Error {
    /// Map a non-success HTTP status onto the error taxonomy
    pub fn from_status(status: u16, resource: impl Into<String>) -> Self {
        let resource = resource.into();
        match status {
            401 => Dhis2Error::Unauthorized(resource),
            403 => Dhis2Error::Forbidden(resource),
            _ => Dhis2Error::RequestFailed { resource, status },
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for HarvestError {
    fn from(err: std::io::Error) -> Self {
        HarvestError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for HarvestError {
    fn from(err: serde_json::Error) -> Self {
        HarvestError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for HarvestError {
    fn from(err: toml::de::Error) -> Self {
        HarvestError::Configuration(format!("TOML parse error: {err}"))
    }
}
