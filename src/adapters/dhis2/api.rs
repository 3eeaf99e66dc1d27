//! DHIS2 retrieval trait
//!
//! `Dhis2Api` is the seam between the exporter and the remote instance. The
//! production implementation is [`super::Dhis2Client`]; tests supply in-memory
//! implementations.

use crate::domain::{
    CategoryOptionCombo, CurrentUser, Dataset, ObservationTuple, OrgUnit, PeriodSpec, Result,
};
use async_trait::async_trait;

/// Read-only access to the DHIS2 Web API
///
/// Every call is a single authenticated GET. Implementations must map
/// 401/403 to `Dhis2Error::Unauthorized`/`Dhis2Error::Forbidden` and any other
/// non-success status to `Dhis2Error::RequestFailed`. They must not retry.
#[async_trait]
pub trait Dhis2Api: Send + Sync {
    /// Identity check (`/api/me`)
    async fn current_user(&self) -> Result<CurrentUser>;

    /// All datasets with their data elements
    async fn data_sets(&self) -> Result<Vec<Dataset>>;

    /// The full, flat organisation unit list
    async fn organisation_units(&self) -> Result<Vec<OrgUnit>>;

    /// Observations for the cross product of elements, units and period.
    /// An empty result is not an error.
    async fn data_values(
        &self,
        data_elements: &[String],
        org_units: &[String],
        period: &PeriodSpec,
    ) -> Result<Vec<ObservationTuple>>;

    /// All category option combos, used to name disaggregated columns
    async fn category_option_combos(&self) -> Result<Vec<CategoryOptionCombo>>;

    /// Instance URL this implementation talks to
    fn base_url(&self) -> &str;
}
