//! External system integrations for Harvest.
//!
//! - [`dhis2`] - DHIS2 Web API retrieval
//!
//! Adapters isolate third-party types (reqwest, wire JSON) from the core so
//! the export pipeline can be exercised with in-memory implementations.
//!
//! ```rust,no_run
//! use harvest::adapters::dhis2::{Dhis2Api, Dhis2Client};
//! use harvest::config::{secret_string, Dhis2Config};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Dhis2Config {
//!     base_url: "https://play.dhis2.org/40".to_string(),
//!     username: "admin".to_string(),
//!     password: secret_string("district".to_string()),
//!     timeout_seconds: 60,
//!     tls_verify: true,
//!     proxy_url: None,
//! };
//!
//! let client = Dhis2Client::new(&config)?;
//! let data_sets = client.data_sets().await?;
//! # Ok(())
//! # }
//! ```

pub mod dhis2;
