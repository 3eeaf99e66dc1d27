//! Domain models and types for Harvest.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Metadata models** ([`OrgUnit`], [`Dataset`], [`DataElementRef`], [`CategoryOptionCombo`])
//! - **Observations** ([`ObservationTuple`])
//! - **Period grammar** ([`PeriodSpec`])
//! - **Error types** ([`HarvestError`], [`Dhis2Error`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, HarvestError>`]:
//!
//! ```rust
//! use harvest::domain::{PeriodSpec, Result};
//!
//! fn quarter() -> Result<PeriodSpec> {
//!     let period = "2024Q1".parse::<PeriodSpec>()?;
//!     Ok(period)
//! }
//! # assert!(quarter().is_ok());
//! ```

pub mod errors;
pub mod models;
pub mod period;
pub mod result;

// Re-export commonly used types for convenience
pub use errors::{Dhis2Error, HarvestError};
pub use models::{
    CategoryOptionCombo, CurrentUser, DataElementRef, Dataset, ObservationTuple, OrgUnit,
};
pub use period::PeriodSpec;
pub use result::Result;
