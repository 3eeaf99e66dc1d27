//! Authenticated session
//!
//! Opening a session checks the credentials against `/api/me`, then loads the
//! dataset and org-unit metadata once. The catalog stays fixed for the life of
//! the session; the selection model is the only mutable state. Dropping the
//! session is logging out.

use crate::adapters::dhis2::Dhis2Api;
use crate::config::ExportConfig;
use crate::core::export::{ExportCoordinator, ExportFailure, ExportSummary};
use crate::core::hierarchy::{build_forest, OrgUnitNode};
use crate::core::selection::{SelectionKind, SelectionModel};
use crate::domain::{CurrentUser, Dataset, OrgUnit, PeriodSpec, Result};
use std::sync::Arc;

/// Metadata loaded at login
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    pub datasets: Vec<Dataset>,
    pub org_units: Vec<OrgUnit>,
    pub forest: Vec<OrgUnitNode>,
}

impl Catalog {
    pub fn new(datasets: Vec<Dataset>, org_units: Vec<OrgUnit>) -> Self {
        let forest = build_forest(&org_units);
        Self {
            datasets,
            org_units,
            forest,
        }
    }

    /// Number of distinct data element ids across all datasets
    pub fn distinct_element_count(&self) -> usize {
        self.datasets
            .iter()
            .flat_map(|ds| ds.elements.iter().map(|de| de.id.as_str()))
            .collect::<std::collections::HashSet<_>>()
            .len()
    }
}

pub struct Session {
    api: Arc<dyn Dhis2Api>,
    user: CurrentUser,
    pub catalog: Catalog,
    pub selection: SelectionModel,
    coordinator: ExportCoordinator,
}

impl Session {
    /// Log in and load metadata
    ///
    /// # Errors
    ///
    /// Fails with `Dhis2Error::Unauthorized`/`Forbidden` on rejected
    /// credentials, or with the retrieval error of either metadata call.
    pub async fn open(api: Arc<dyn Dhis2Api>) -> Result<Self> {
        tracing::info!(instance = %api.base_url(), "Connecting to DHIS2");

        let user = api.current_user().await?;
        tracing::info!(user = %user.full_name(), "Authenticated");

        let datasets = api.data_sets().await?;
        tracing::info!(count = datasets.len(), "Loaded datasets");

        let org_units = api.organisation_units().await?;
        tracing::info!(count = org_units.len(), "Loaded organisation units");

        Ok(Self {
            coordinator: ExportCoordinator::new(Arc::clone(&api)),
            api,
            user,
            catalog: Catalog::new(datasets, org_units),
            selection: SelectionModel::new(),
        })
    }

    /// Name output files after `export`
    pub fn with_export_config(mut self, export: ExportConfig) -> Self {
        self.coordinator = ExportCoordinator::new(Arc::clone(&self.api)).with_export_config(export);
        self
    }

    pub fn user(&self) -> &CurrentUser {
        &self.user
    }

    /// Name shown in the greeting
    pub fn welcome_name(&self) -> String {
        self.user.full_name()
    }

    pub fn instance_url(&self) -> &str {
        self.api.base_url()
    }

    /// Export the current selection
    ///
    /// # Errors
    ///
    /// See [`ExportCoordinator::run`].
    pub async fn export(
        &self,
        period: Option<&PeriodSpec>,
    ) -> std::result::Result<ExportSummary, ExportFailure> {
        let data_elements = self.selection.selected(SelectionKind::DataElements);
        let org_units = self.selection.selected(SelectionKind::OrgUnits);

        self.coordinator
            .run(&self.catalog, &data_elements, &org_units, period)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CategoryOptionCombo, DataElementRef, Dhis2Error, ObservationTuple};
    use async_trait::async_trait;

    struct FakeApi {
        authorized: bool,
    }

    #[async_trait]
    impl Dhis2Api for FakeApi {
        async fn current_user(&self) -> Result<CurrentUser> {
            if self.authorized {
                Ok(CurrentUser {
                    first_name: Some("Ada".to_string()),
                    surname: Some("Okafor".to_string()),
                })
            } else {
                Err(Dhis2Error::Unauthorized("Invalid username or password".to_string()).into())
            }
        }

        async fn data_sets(&self) -> Result<Vec<Dataset>> {
            Ok(vec![Dataset {
                id: "ds1".to_string(),
                display_name: "Child Health".to_string(),
                period_type: Some("Monthly".to_string()),
                elements: vec![
                    DataElementRef::new("DE1", "Measles doses"),
                    DataElementRef::new("DE2", "BCG doses"),
                ],
            }])
        }

        async fn organisation_units(&self) -> Result<Vec<OrgUnit>> {
            Ok(vec![
                OrgUnit::new("OU1", "Clinic A", 2, Some("D1")),
                OrgUnit::new("D1", "District 1", 1, None),
            ])
        }

        async fn data_values(
            &self,
            _data_elements: &[String],
            _org_units: &[String],
            _period: &PeriodSpec,
        ) -> Result<Vec<ObservationTuple>> {
            Ok(vec![ObservationTuple::new("OU1", "202401", "DE1", None, "10")])
        }

        async fn category_option_combos(&self) -> Result<Vec<CategoryOptionCombo>> {
            Ok(Vec::new())
        }

        fn base_url(&self) -> &str {
            "https://play.dhis2.org/demo"
        }
    }

    #[tokio::test]
    async fn test_open_loads_catalog() {
        let session = Session::open(Arc::new(FakeApi { authorized: true }))
            .await
            .unwrap();

        assert_eq!(session.welcome_name(), "Ada Okafor");
        assert_eq!(session.catalog.datasets.len(), 1);
        assert_eq!(session.catalog.distinct_element_count(), 2);
        assert_eq!(session.catalog.forest.len(), 1);
        assert_eq!(session.catalog.forest[0].unit.id, "D1");
        assert_eq!(session.selection.selected_count(SelectionKind::DataElements), 0);
        assert_eq!(session.instance_url(), "https://play.dhis2.org/demo");
    }

    #[tokio::test]
    async fn test_open_rejects_bad_credentials() {
        let result = Session::open(Arc::new(FakeApi { authorized: false })).await;
        let err = result.err().unwrap();
        assert!(err.is_auth());
    }

    #[tokio::test]
    async fn test_export_uses_selection() {
        let mut session = Session::open(Arc::new(FakeApi { authorized: true }))
            .await
            .unwrap();
        session.selection.select(SelectionKind::DataElements, "DE1");
        session.selection.select(SelectionKind::OrgUnits, "OU1");

        let period = PeriodSpec::Monthly {
            year: 2024,
            month: 1,
        };
        let summary = session.export(Some(&period)).await.unwrap();

        assert_eq!(summary.tuple_count, 1);
        assert_eq!(
            summary.csv.as_deref(),
            Some("Level 1,Level 2,Period,Measles doses\nDistrict 1,Clinic A,202401,10\n")
        );
    }

    #[tokio::test]
    async fn test_export_without_selection_fails_validation() {
        let session = Session::open(Arc::new(FakeApi { authorized: true }))
            .await
            .unwrap();
        let period = PeriodSpec::Yearly { year: 2024 };

        let failure = session.export(Some(&period)).await.unwrap_err();
        assert!(matches!(
            failure.error,
            crate::domain::HarvestError::Validation(_)
        ));
        assert!(failure
            .errors()
            .any(|m| m.contains("Please select at least one data element")));
    }
}
