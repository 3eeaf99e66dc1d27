//! Selection and expand state over the session catalog
//!
//! Holds two independent id sets (chosen data elements, chosen org units)
//! and two expand-state sets (dataset groups, org-unit tree nodes). An id is
//! either available or chosen, never both: the view builders below leave
//! chosen elements out of the available list.
//!
//! Views are rebuilt on every call. Counts depend on the current selection
//! and are never cached.

use crate::core::hierarchy::OrgUnitNode;
use crate::core::session::Catalog;
use crate::domain::{DataElementRef, Dataset, OrgUnit};
use std::collections::HashSet;

/// Which selection set an operation applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectionKind {
    DataElements,
    OrgUnits,
}

/// Which expandable tree an operation applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tree {
    Datasets,
    OrgUnits,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionModel {
    data_elements: HashSet<String>,
    org_units: HashSet<String>,
    expanded_datasets: HashSet<String>,
    expanded_org_units: HashSet<String>,
}

/// Case-insensitive substring match; an empty term matches everything
pub fn matches_term(name: &str, term: &str) -> bool {
    term.is_empty() || name.to_lowercase().contains(&term.to_lowercase())
}

impl SelectionModel {
    pub fn new() -> Self {
        Self::default()
    }

    fn set(&self, kind: SelectionKind) -> &HashSet<String> {
        match kind {
            SelectionKind::DataElements => &self.data_elements,
            SelectionKind::OrgUnits => &self.org_units,
        }
    }

    fn set_mut(&mut self, kind: SelectionKind) -> &mut HashSet<String> {
        match kind {
            SelectionKind::DataElements => &mut self.data_elements,
            SelectionKind::OrgUnits => &mut self.org_units,
        }
    }

    fn expanded(&self, tree: Tree) -> &HashSet<String> {
        match tree {
            Tree::Datasets => &self.expanded_datasets,
            Tree::OrgUnits => &self.expanded_org_units,
        }
    }

    fn expanded_mut(&mut self, tree: Tree) -> &mut HashSet<String> {
        match tree {
            Tree::Datasets => &mut self.expanded_datasets,
            Tree::OrgUnits => &mut self.expanded_org_units,
        }
    }

    pub fn select(&mut self, kind: SelectionKind, id: impl Into<String>) {
        self.set_mut(kind).insert(id.into());
    }

    pub fn deselect(&mut self, kind: SelectionKind, id: &str) {
        self.set_mut(kind).remove(id);
    }

    pub fn is_selected(&self, kind: SelectionKind, id: &str) -> bool {
        self.set(kind).contains(id)
    }

    pub fn selected_count(&self, kind: SelectionKind) -> usize {
        self.set(kind).len()
    }

    /// Chosen ids, sorted
    pub fn selected(&self, kind: SelectionKind) -> Vec<String> {
        let mut ids: Vec<String> = self.set(kind).iter().cloned().collect();
        ids.sort();
        ids
    }

    /// Replace the set with every id of that kind in the catalog
    pub fn select_all(&mut self, kind: SelectionKind, catalog: &Catalog) {
        let all: HashSet<String> = match kind {
            SelectionKind::DataElements => catalog
                .datasets
                .iter()
                .flat_map(|ds| ds.elements.iter())
                .map(|de| de.id.clone())
                .collect(),
            SelectionKind::OrgUnits => catalog.org_units.iter().map(|ou| ou.id.clone()).collect(),
        };
        *self.set_mut(kind) = all;
    }

    pub fn clear_all(&mut self, kind: SelectionKind) {
        self.set_mut(kind).clear();
    }

    /// Flip a node's expand state and return the new state
    pub fn toggle_expand(&mut self, tree: Tree, id: &str) -> bool {
        let expanded = self.expanded_mut(tree);
        if expanded.remove(id) {
            false
        } else {
            expanded.insert(id.to_string());
            true
        }
    }

    pub fn is_expanded(&self, tree: Tree, id: &str) -> bool {
        self.expanded(tree).contains(id)
    }

    /// Expand every node that has something to show
    pub fn expand_all(&mut self, tree: Tree, catalog: &Catalog) {
        let all: HashSet<String> = match tree {
            Tree::Datasets => catalog
                .datasets
                .iter()
                .filter(|ds| !ds.elements.is_empty())
                .map(|ds| ds.id.clone())
                .collect(),
            Tree::OrgUnits => {
                let mut ids = HashSet::new();
                for root in &catalog.forest {
                    root.walk(&mut |node, _| {
                        if node.has_children() {
                            ids.insert(node.unit.id.clone());
                        }
                    });
                }
                ids
            }
        };
        *self.expanded_mut(tree) = all;
    }

    pub fn collapse_all(&mut self, tree: Tree) {
        self.expanded_mut(tree).clear();
    }

    /// Items of `kind` still available for selection
    ///
    /// Data elements are counted per dataset row, so an element listed under
    /// two datasets counts twice.
    pub fn visible_available_count(&self, kind: SelectionKind, catalog: &Catalog) -> usize {
        match kind {
            SelectionKind::DataElements => catalog
                .datasets
                .iter()
                .flat_map(|ds| ds.elements.iter())
                .filter(|de| !self.data_elements.contains(&de.id))
                .count(),
            SelectionKind::OrgUnits => catalog
                .org_units
                .iter()
                .filter(|ou| !self.org_units.contains(&ou.id))
                .count(),
        }
    }

    /// Datasets that still have unselected elements, filtered by `term`
    pub fn available_datasets<'a>(&self, catalog: &'a Catalog, term: &str) -> Vec<DatasetView<'a>> {
        let mut views = Vec::new();

        for dataset in &catalog.datasets {
            let available: Vec<&DataElementRef> = dataset
                .elements
                .iter()
                .filter(|de| !self.data_elements.contains(&de.id))
                .collect();
            if available.is_empty() {
                continue;
            }

            let label = format!("{} - {} elements", dataset.label(), available.len());
            let elements: Vec<&DataElementRef> = available
                .into_iter()
                .filter(|de| matches_term(&de.display_name, term))
                .collect();

            if !matches_term(&label, term) && elements.is_empty() {
                continue;
            }

            let expanded = self.is_expanded(Tree::Datasets, &dataset.id)
                || (!term.is_empty() && !elements.is_empty());

            views.push(DatasetView {
                dataset,
                label,
                expanded,
                elements,
            });
        }

        views
    }

    /// Chosen data elements with the dataset each row came from
    pub fn selected_items<'a>(&self, catalog: &'a Catalog, term: &str) -> Vec<SelectedItem<'a>> {
        catalog
            .datasets
            .iter()
            .flat_map(|ds| ds.elements.iter().map(move |de| (ds, de)))
            .filter(|(_, de)| self.data_elements.contains(&de.id))
            .filter(|(_, de)| matches_term(&de.display_name, term))
            .map(|(ds, de)| SelectedItem {
                id: &de.id,
                name: &de.display_name,
                dataset_name: &ds.display_name,
            })
            .collect()
    }

    /// The org-unit forest pruned to branches matching `term`
    ///
    /// A node whose own name matches keeps its whole subtree. Otherwise it is
    /// kept only for a matching descendant, and then shows as expanded.
    pub fn org_unit_view<'a>(&self, catalog: &'a Catalog, term: &str) -> Vec<OrgUnitView<'a>> {
        catalog
            .forest
            .iter()
            .filter_map(|root| self.view_node(root, term))
            .collect()
    }

    fn view_node<'a>(&self, node: &'a OrgUnitNode, term: &str) -> Option<OrgUnitView<'a>> {
        let own_match = matches_term(&node.unit.display_name, term);
        let child_term = if own_match { "" } else { term };

        let children: Vec<OrgUnitView<'a>> = node
            .children
            .iter()
            .filter_map(|child| self.view_node(child, child_term))
            .collect();

        if !own_match && children.is_empty() {
            return None;
        }

        let expanded = self.is_expanded(Tree::OrgUnits, &node.unit.id)
            || (!term.is_empty() && !own_match);

        Some(OrgUnitView {
            unit: &node.unit,
            selected: self.org_units.contains(&node.unit.id),
            expanded,
            has_children: node.has_children(),
            children,
        })
    }
}

/// A dataset group in the available list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetView<'a> {
    pub dataset: &'a Dataset,
    /// `<name> (<period type>) - <n> elements`, `n` counting all available
    pub label: String,
    pub expanded: bool,
    /// Available elements matching the search term
    pub elements: Vec<&'a DataElementRef>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedItem<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub dataset_name: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrgUnitView<'a> {
    pub unit: &'a OrgUnit,
    pub selected: bool,
    pub expanded: bool,
    pub has_children: bool,
    pub children: Vec<OrgUnitView<'a>>,
}
