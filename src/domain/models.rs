//! Metadata and observation models
//!
//! These are the in-memory shapes the core works on. They are decoupled from
//! the DHIS2 wire format; see `adapters::dhis2::models` for the JSON side.

use serde::{Deserialize, Serialize};

/// A node of the administrative hierarchy as retrieved (flat, parent-linked)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrgUnit {
    pub id: String,
    pub display_name: String,
    /// 1 for roots of a complete hierarchy
    pub level: u32,
    pub parent_id: Option<String>,
}

impl OrgUnit {
    /// Creates an organisation unit
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        level: u32,
        parent_id: Option<&str>,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            level,
            parent_id: parent_id.map(str::to_string),
        }
    }
}

/// A data element as listed under a dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataElementRef {
    pub id: String,
    pub display_name: String,
}

impl DataElementRef {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
        }
    }
}

/// A named group of data elements collected on a schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    pub id: String,
    pub display_name: String,
    pub period_type: Option<String>,
    pub elements: Vec<DataElementRef>,
}

impl Dataset {
    /// Display name followed by the period type, e.g. `Immunisation (Monthly)`
    pub fn label(&self) -> String {
        match &self.period_type {
            Some(period_type) if !period_type.is_empty() => {
                format!("{} ({})", self.display_name, period_type)
            }
            _ => self.display_name.clone(),
        }
    }
}

/// One sparse observation as returned by the data value retrieval
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservationTuple {
    pub org_unit: String,
    pub period: String,
    pub data_element: String,
    pub category_option_combo: Option<String>,
    pub value: String,
}

impl ObservationTuple {
    /// Creates an observation tuple
    pub fn new(
        org_unit: impl Into<String>,
        period: impl Into<String>,
        data_element: impl Into<String>,
        category_option_combo: Option<&str>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            org_unit: org_unit.into(),
            period: period.into(),
            data_element: data_element.into(),
            category_option_combo: category_option_combo.map(str::to_string),
            value: value.into(),
        }
    }
}

/// A disaggregation key attached to a value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryOptionCombo {
    pub id: String,
    pub display_name: String,
}

/// The authenticated account, as reported by the identity check
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub first_name: Option<String>,
    pub surname: Option<String>,
}

impl CurrentUser {
    /// `"<first> <surname>"`, or `User` when both are blank
    pub fn full_name(&self) -> String {
        let full = format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or_default(),
            self.surname.as_deref().unwrap_or_default()
        );
        let full = full.trim();
        if full.is_empty() {
            "User".to_string()
        } else {
            full.to_string()
        }
    }
}
