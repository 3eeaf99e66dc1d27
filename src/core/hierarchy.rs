//! Organisation unit hierarchy resolution
//!
//! Two views of the same flat list:
//!
//! - a **forest** of owned [`OrgUnitNode`]s rebuilt from parent links, used
//!   for tree display and selection;
//! - an **ancestry map** (id → name, level, parent) walked by
//!   [`ancestor_chain`] to produce the `Level 1 … Level N` columns of an export.
//!
//! Units whose parent id is unknown become roots. Cyclic parent links are
//! tolerated when building the forest (the cycle is cut where it is first
//! re-entered) but make [`ancestor_chain`] fail with
//! [`HarvestError::CyclicHierarchy`].

use crate::domain::{HarvestError, OrgUnit, Result};
use std::collections::{HashMap, HashSet};

/// An organisation unit with its owned children, in input order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrgUnitNode {
    pub unit: OrgUnit,
    pub children: Vec<OrgUnitNode>,
}

impl OrgUnitNode {
    pub fn id(&self) -> &str {
        &self.unit.id
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Pre-order walk over this node and its descendants with their depth
    /// (0 for `self`)
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a OrgUnitNode, usize)) {
        self.walk_at(0, visit);
    }

    fn walk_at<'a>(&'a self, depth: usize, visit: &mut impl FnMut(&'a OrgUnitNode, usize)) {
        visit(self, depth);
        for child in &self.children {
            child.walk_at(depth + 1, visit);
        }
    }

    /// Number of nodes in this subtree, including `self`
    pub fn size(&self) -> usize {
        let mut count = 0;
        self.walk(&mut |_, _| count += 1);
        count
    }
}

/// Build the parent→children forest from a flat list
///
/// Children keep input order. A unit whose parent id is absent from the
/// list is a root. Duplicate ids keep their first occurrence.
pub fn build_forest(org_units: &[OrgUnit]) -> Vec<OrgUnitNode> {
    let mut index_by_id: HashMap<&str, usize> = HashMap::with_capacity(org_units.len());
    for (idx, unit) in org_units.iter().enumerate() {
        if index_by_id.contains_key(unit.id.as_str()) {
            tracing::warn!(org_unit = %unit.id, "Duplicate organisation unit id ignored");
            continue;
        }
        index_by_id.insert(unit.id.as_str(), idx);
    }

    let mut children_of: HashMap<usize, Vec<usize>> = HashMap::new();
    let mut roots = Vec::new();

    for (idx, unit) in org_units.iter().enumerate() {
        if index_by_id.get(unit.id.as_str()) != Some(&idx) {
            continue;
        }
        match unit
            .parent_id
            .as_deref()
            .and_then(|parent| index_by_id.get(parent))
        {
            Some(&parent_idx) => children_of.entry(parent_idx).or_default().push(idx),
            None => roots.push(idx),
        }
    }

    let mut placed = HashSet::with_capacity(org_units.len());
    let mut forest: Vec<OrgUnitNode> = roots
        .into_iter()
        .map(|idx| build_node(idx, org_units, &children_of, &mut placed))
        .collect();

    // Anything not reachable from a root sits on a parent cycle
    for (idx, unit) in org_units.iter().enumerate() {
        if index_by_id.get(unit.id.as_str()) == Some(&idx) && !placed.contains(&idx) {
            tracing::warn!(org_unit = %unit.id, "Organisation unit on a parent cycle promoted to root");
            forest.push(build_node(idx, org_units, &children_of, &mut placed));
        }
    }

    forest
}

fn build_node(
    idx: usize,
    org_units: &[OrgUnit],
    children_of: &HashMap<usize, Vec<usize>>,
    placed: &mut HashSet<usize>,
) -> OrgUnitNode {
    placed.insert(idx);
    let mut children = Vec::new();
    for &kid in children_of.get(&idx).map(Vec::as_slice).unwrap_or_default() {
        // Already placed means the parent links loop back here
        if !placed.contains(&kid) {
            children.push(build_node(kid, org_units, children_of, placed));
        }
    }

    OrgUnitNode {
        unit: org_units[idx].clone(),
        children,
    }
}

/// What the export needs to know about any unit to lay out its ancestors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AncestryEntry {
    pub name: String,
    pub level: u32,
    pub parent_id: Option<String>,
}

/// id → ancestry entry, covering every known unit
pub type AncestryMap = HashMap<String, AncestryEntry>;

/// Build the ancestry map from the full (not just selected) unit list
///
/// A repeated id keeps its first entry, as `build_forest` does.
pub fn ancestry_map(org_units: &[OrgUnit]) -> AncestryMap {
    let mut map = AncestryMap::with_capacity(org_units.len());
    for unit in org_units {
        map.entry(unit.id.clone()).or_insert_with(|| AncestryEntry {
            name: unit.display_name.clone(),
            level: unit.level,
            parent_id: unit.parent_id.clone(),
        });
    }
    map
}

/// Deepest level present anywhere in the map, 0 when empty
pub fn max_level(ancestry: &AncestryMap) -> u32 {
    ancestry.values().map(|entry| entry.level).max().unwrap_or(0)
}

/// Walks parent links from a unit up to its root
///
/// Yields the unit itself first. Stops at a missing parent or an unknown
/// id; yields a single `CyclicHierarchy` error if an id repeats. Create a
/// new one with [`ancestors`] to walk again.
pub struct Ancestors<'a> {
    ancestry: &'a AncestryMap,
    next: Option<&'a str>,
    seen: HashSet<&'a str>,
}

/// Iterate over `id` and its ancestors, nearest first
pub fn ancestors<'a>(id: &'a str, ancestry: &'a AncestryMap) -> Ancestors<'a> {
    Ancestors {
        ancestry,
        next: Some(id),
        seen: HashSet::new(),
    }
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = Result<&'a AncestryEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next.take()?;
        let (key, entry) = self.ancestry.get_key_value(id)?;

        if !self.seen.insert(key.as_str()) {
            return Some(Err(HarvestError::CyclicHierarchy(key.clone())));
        }

        self.next = entry.parent_id.as_deref();
        Some(Ok(entry))
    }
}

/// Display names from the farthest ancestor down to `id` itself
///
/// Empty when `id` is unknown.
///
/// # Errors
///
/// Returns `HarvestError::CyclicHierarchy` if the parent links loop.
pub fn ancestor_chain<'a>(id: &'a str, ancestry: &'a AncestryMap) -> Result<Vec<&'a str>> {
    let mut names = ancestors(id, ancestry)
        .map(|entry| entry.map(|e| e.name.as_str()))
        .collect::<Result<Vec<_>>>()?;
    names.reverse();
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_units() -> Vec<OrgUnit> {
        vec![
            OrgUnit::new("OU1", "Clinic A", 3, Some("D1")),
            OrgUnit::new("C", "Country", 1, None),
            OrgUnit::new("D1", "District 1", 2, Some("C")),
            OrgUnit::new("D2", "District 2", 2, Some("C")),
            OrgUnit::new("OU2", "Clinic B", 3, Some("D1")),
        ]
    }

    fn collect_ids(forest: &[OrgUnitNode]) -> Vec<String> {
        let mut ids = Vec::new();
        for root in forest {
            root.walk(&mut |node, _| ids.push(node.id().to_string()));
        }
        ids
    }

    #[test]
    fn test_build_forest_structure() {
        let forest = build_forest(&sample_units());

        assert_eq!(forest.len(), 1);
        let country = &forest[0];
        assert_eq!(country.id(), "C");
        let districts: Vec<&str> = country.children.iter().map(|n| n.id()).collect();
        assert_eq!(districts, vec!["D1", "D2"]);
        let clinics: Vec<&str> = country.children[0].children.iter().map(|n| n.id()).collect();
        assert_eq!(clinics, vec!["OU1", "OU2"]);
        assert!(!country.children[1].has_children());
    }

    #[test]
    fn test_every_node_appears_once() {
        let units = sample_units();
        let forest = build_forest(&units);

        let mut ids = collect_ids(&forest);
        ids.sort();
        let mut expected: Vec<String> = units.iter().map(|u| u.id.clone()).collect();
        expected.sort();
        assert_eq!(ids, expected);
        assert_eq!(forest.iter().map(OrgUnitNode::size).sum::<usize>(), units.len());
    }

    #[test]
    fn test_missing_parent_becomes_root() {
        let units = vec![
            OrgUnit::new("OU1", "Clinic A", 3, Some("UNKNOWN")),
            OrgUnit::new("C", "Country", 1, None),
        ];
        let forest = build_forest(&units);

        let roots: Vec<&str> = forest.iter().map(|n| n.id()).collect();
        assert_eq!(roots, vec!["OU1", "C"]);
    }

    #[test]
    fn test_duplicate_ids_keep_first() {
        let units = vec![
            OrgUnit::new("C", "Country", 1, None),
            OrgUnit::new("C", "Country again", 1, None),
        ];
        let forest = build_forest(&units);

        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].unit.display_name, "Country");
    }

    #[test]
    fn test_duplicate_ids_tree_and_ancestry_agree() {
        let units = vec![
            OrgUnit::new("C", "Country", 1, None),
            OrgUnit::new("OU1", "Clinic A", 2, Some("C")),
            OrgUnit::new("C", "Country again", 1, None),
        ];
        let forest = build_forest(&units);
        let ancestry = ancestry_map(&units);

        assert_eq!(forest[0].unit.display_name, "Country");
        assert_eq!(ancestry["C"].name, forest[0].unit.display_name);
        assert_eq!(
            ancestor_chain("OU1", &ancestry).unwrap(),
            vec!["Country", "Clinic A"]
        );
    }

    #[test]
    fn test_cycle_in_forest_terminates_and_keeps_all_nodes() {
        let units = vec![
            OrgUnit::new("A", "A", 1, Some("B")),
            OrgUnit::new("B", "B", 2, Some("A")),
            OrgUnit::new("R", "Root", 1, None),
        ];
        let forest = build_forest(&units);

        let mut ids = collect_ids(&forest);
        ids.sort();
        assert_eq!(ids, vec!["A", "B", "R"]);
    }

    #[test]
    fn test_walk_depths() {
        let forest = build_forest(&sample_units());
        let mut depths = Vec::new();
        forest[0].walk(&mut |node, depth| depths.push((node.id().to_string(), depth)));

        assert_eq!(
            depths,
            vec![
                ("C".to_string(), 0),
                ("D1".to_string(), 1),
                ("OU1".to_string(), 2),
                ("OU2".to_string(), 2),
                ("D2".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_ancestor_chain_root_first() {
        let ancestry = ancestry_map(&sample_units());
        let chain = ancestor_chain("OU2", &ancestry).unwrap();
        assert_eq!(chain, vec!["Country", "District 1", "Clinic B"]);
    }

    #[test]
    fn test_chain_length_matches_contiguous_levels() {
        let units = sample_units();
        let ancestry = ancestry_map(&units);
        for unit in &units {
            let chain = ancestor_chain(&unit.id, &ancestry).unwrap();
            assert_eq!(chain.len() as u32, unit.level);
        }
    }

    #[test]
    fn test_ancestor_chain_unknown_id() {
        let ancestry = ancestry_map(&sample_units());
        assert!(ancestor_chain("nope", &ancestry).unwrap().is_empty());
    }

    #[test]
    fn test_ancestor_chain_stops_at_missing_parent() {
        let units = vec![OrgUnit::new("OU1", "Clinic A", 3, Some("GONE"))];
        let ancestry = ancestry_map(&units);
        assert_eq!(ancestor_chain("OU1", &ancestry).unwrap(), vec!["Clinic A"]);
    }

    #[test]
    fn test_ancestor_chain_cycle_fails_fast() {
        let units = vec![
            OrgUnit::new("A", "A", 2, Some("B")),
            OrgUnit::new("B", "B", 1, Some("A")),
        ];
        let ancestry = ancestry_map(&units);

        let err = ancestor_chain("A", &ancestry).unwrap_err();
        assert!(matches!(err, HarvestError::CyclicHierarchy(ref id) if id == "A"));
    }

    #[test]
    fn test_ancestors_is_restartable() {
        let ancestry = ancestry_map(&sample_units());
        let first: Vec<_> = ancestors("OU1", &ancestry).collect::<Result<_>>().unwrap();
        let second: Vec<_> = ancestors("OU1", &ancestry).collect::<Result<_>>().unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
    }

    #[test]
    fn test_max_level() {
        let ancestry = ancestry_map(&sample_units());
        assert_eq!(max_level(&ancestry), 3);
        assert_eq!(max_level(&AncestryMap::new()), 0);
    }
}
