//! DHIS2 adapter implementation
//!
//! This module provides the integration with DHIS2 instances: the
//! [`Dhis2Api`] retrieval trait, the reqwest-backed [`Dhis2Client`] and the
//! JSON wire models.

pub mod api;
pub mod client;
pub mod models;

pub use api::Dhis2Api;
pub use client::Dhis2Client;
