//! DHIS2 Web API wire models
//!
//! Only the fields the exporter reads are modelled. Everything is optional or
//! defaulted where the server is known to omit it, and each type converts
//! into its domain counterpart.

use crate::domain::{
    CategoryOptionCombo, CurrentUser, DataElementRef, Dataset, ObservationTuple, OrgUnit,
};
use serde::Deserialize;
use serde_json::Value;

/// `displayName`, then `name`, then the id, skipping blanks
fn display_name_or(display_name: Option<String>, name: Option<String>, id: &str) -> String {
    display_name
        .filter(|s| !s.is_empty())
        .or_else(|| name.filter(|s| !s.is_empty()))
        .unwrap_or_else(|| id.to_string())
}

/// Reference to another object by id
#[derive(Debug, Clone, Deserialize)]
pub struct IdRef {
    pub id: String,
}

/// Response of `/api/me`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub surname: Option<String>,
}

impl From<MeResponse> for CurrentUser {
    fn from(me: MeResponse) -> Self {
        CurrentUser {
            first_name: me.first_name,
            surname: me.surname,
        }
    }
}

/// Response of `/api/dataSets.json`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSetsResponse {
    #[serde(default)]
    pub data_sets: Option<Vec<WireDataSet>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireDataSet {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub period_type: Option<String>,
    #[serde(default)]
    pub data_set_elements: Vec<WireDataSetElement>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireDataSetElement {
    #[serde(default)]
    pub data_element: Option<WireDataElement>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireDataElement {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl From<WireDataElement> for DataElementRef {
    fn from(element: WireDataElement) -> Self {
        let display_name = display_name_or(element.display_name, element.name, &element.id);
        DataElementRef {
            id: element.id,
            display_name,
        }
    }
}

impl From<WireDataSet> for Dataset {
    fn from(dataset: WireDataSet) -> Self {
        let display_name = display_name_or(dataset.display_name, dataset.name, &dataset.id);
        let elements = dataset
            .data_set_elements
            .into_iter()
            .filter_map(|dse| dse.data_element)
            .map(DataElementRef::from)
            .collect();

        Dataset {
            id: dataset.id,
            display_name,
            period_type: dataset.period_type.filter(|p| !p.is_empty()),
            elements,
        }
    }
}

/// Response of `/api/organisationUnits.json`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganisationUnitsResponse {
    #[serde(default)]
    pub organisation_units: Vec<WireOrgUnit>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireOrgUnit {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub level: u32,
    #[serde(default)]
    pub parent: Option<IdRef>,
    /// Informational only; the forest is rebuilt from parent links
    #[serde(default)]
    pub children: Vec<IdRef>,
}

impl From<WireOrgUnit> for OrgUnit {
    fn from(unit: WireOrgUnit) -> Self {
        let display_name = display_name_or(unit.display_name, None, &unit.id);
        OrgUnit {
            id: unit.id,
            display_name,
            level: unit.level,
            parent_id: unit.parent.map(|p| p.id),
        }
    }
}

/// Response of `/api/dataValueSets.json`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataValueSetResponse {
    #[serde(default)]
    pub data_values: Vec<WireDataValue>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireDataValue {
    pub data_element: String,
    pub period: String,
    pub org_unit: String,
    #[serde(default)]
    pub category_option_combo: Option<String>,
    #[serde(default)]
    pub value: Value,
}

impl From<WireDataValue> for ObservationTuple {
    fn from(dv: WireDataValue) -> Self {
        let value = match dv.value {
            Value::String(s) => s,
            Value::Null => String::new(),
            other => other.to_string(),
        };

        ObservationTuple {
            org_unit: dv.org_unit,
            period: dv.period,
            data_element: dv.data_element,
            category_option_combo: dv.category_option_combo.filter(|c| !c.is_empty()),
            value,
        }
    }
}

/// Response of `/api/categoryOptionCombos.json`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryOptionCombosResponse {
    #[serde(default)]
    pub category_option_combos: Vec<WireCategoryOptionCombo>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireCategoryOptionCombo {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl From<WireCategoryOptionCombo> for CategoryOptionCombo {
    fn from(coc: WireCategoryOptionCombo) -> Self {
        let display_name = display_name_or(coc.display_name, coc.name, &coc.id);
        CategoryOptionCombo {
            id: coc.id,
            display_name,
        }
    }
}
