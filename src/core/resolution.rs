//! Id → name resolution maps
//!
//! Built fresh for each export run from the session catalog and the category
//! option combos fetched for that run. Nothing here outlives the run.

use crate::core::hierarchy::{ancestry_map, AncestryMap};
use crate::domain::{CategoryOptionCombo, Dataset, OrgUnit};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Default)]
pub struct ResolutionMaps {
    pub data_element_names: HashMap<String, String>,
    pub org_unit_names: HashMap<String, String>,
    pub category_option_combo_names: HashMap<String, String>,
    pub org_unit_ancestry: AncestryMap,
}

impl ResolutionMaps {
    /// Build every map in one go
    ///
    /// Data element names come from the dataset rows; when an element sits in
    /// several datasets the last row seen wins.
    pub fn build(
        datasets: &[Dataset],
        org_units: &[OrgUnit],
        category_option_combos: &[CategoryOptionCombo],
    ) -> Self {
        Self {
            data_element_names: data_element_names(datasets, None),
            org_unit_names: org_unit_names(org_units),
            category_option_combo_names: combo_names(category_option_combos),
            org_unit_ancestry: ancestry_map(org_units),
        }
    }

    /// Data element name, or the raw id when unknown
    pub fn data_element_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.data_element_names
            .get(id)
            .map(String::as_str)
            .unwrap_or(id)
    }

    pub fn org_unit_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.org_unit_names.get(id).map(String::as_str).unwrap_or(id)
    }
}

/// Element names from the dataset rows, optionally limited to `only`
pub fn data_element_names(datasets: &[Dataset], only: Option<&[String]>) -> HashMap<String, String> {
    let wanted: Option<HashSet<&str>> = only.map(|ids| ids.iter().map(String::as_str).collect());

    datasets
        .iter()
        .flat_map(|ds| ds.elements.iter())
        .filter(|de| {
            wanted
                .as_ref()
                .map_or(true, |ids| ids.contains(de.id.as_str()))
        })
        .map(|de| (de.id.clone(), de.display_name.clone()))
        .collect()
}

/// First name wins for a repeated id
pub fn org_unit_names(org_units: &[OrgUnit]) -> HashMap<String, String> {
    let mut names = HashMap::with_capacity(org_units.len());
    for ou in org_units {
        names
            .entry(ou.id.clone())
            .or_insert_with(|| ou.display_name.clone());
    }
    names
}

pub fn combo_names(combos: &[CategoryOptionCombo]) -> HashMap<String, String> {
    combos
        .iter()
        .map(|coc| (coc.id.clone(), coc.display_name.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DataElementRef, ObservationTuple};

    fn dataset(id: &str, elements: &[(&str, &str)]) -> Dataset {
        Dataset {
            id: id.to_string(),
            display_name: id.to_string(),
            period_type: Some("Monthly".to_string()),
            elements: elements
                .iter()
                .map(|&(id, name)| DataElementRef::new(id, name))
                .collect(),
        }
    }

    #[test]
    fn test_build_maps() {
        let datasets = vec![
            dataset("ds1", &[("DE1", "Measles doses"), ("DE2", "BCG doses")]),
            dataset("ds2", &[("DE1", "Measles doses (renamed)")]),
        ];
        let org_units = vec![
            OrgUnit::new("D1", "District 1", 1, None),
            OrgUnit::new("OU1", "Clinic A", 2, Some("D1")),
        ];
        let combos = vec![CategoryOptionCombo {
            id: "COC1".to_string(),
            display_name: "Fixed".to_string(),
        }];

        let maps = ResolutionMaps::build(&datasets, &org_units, &combos);

        assert_eq!(maps.data_element_name("DE1"), "Measles doses (renamed)");
        assert_eq!(maps.data_element_name("DE2"), "BCG doses");
        assert_eq!(maps.org_unit_name("OU1"), "Clinic A");
        assert_eq!(maps.category_option_combo_names["COC1"], "Fixed");
        assert_eq!(maps.org_unit_ancestry["OU1"].parent_id.as_deref(), Some("D1"));
    }

    #[test]
    fn test_element_names_limited_to_selection() {
        let datasets = vec![dataset("ds1", &[("DE1", "Measles doses"), ("DE2", "BCG doses")])];
        let selected = vec!["DE2".to_string()];

        let names = data_element_names(&datasets, Some(&selected));

        assert_eq!(names.len(), 1);
        assert_eq!(names["DE2"], "BCG doses");
    }

    #[test]
    fn test_duplicate_org_unit_keeps_first_name() {
        let org_units = vec![
            OrgUnit::new("C", "Country", 1, None),
            OrgUnit::new("C", "Country again", 1, None),
        ];
        let maps = ResolutionMaps::build(&[], &org_units, &[]);

        assert_eq!(maps.org_unit_name("C"), "Country");
        assert_eq!(maps.org_unit_ancestry["C"].name, "Country");

        let tuples = vec![ObservationTuple::new("C", "202401", "DE1", None, "1")];
        let csv = crate::core::transform::to_wide_csv(&tuples, &maps).unwrap();
        assert_eq!(csv, "Level 1,Period,DE1\nCountry,202401,1\n");
    }

    #[test]
    fn test_unknown_ids_fall_back_to_id() {
        let maps = ResolutionMaps::default();
        assert_eq!(maps.data_element_name("DEx"), "DEx");
        assert_eq!(maps.org_unit_name("OUx"), "OUx");
    }
}
