//! Long → wide reshaping
//!
//! Groups sparse observation tuples by `(org unit, period)` and spreads the
//! values over one column per data element (or element/combo pair). The org
//! unit's ancestry is laid out as `Level 1 … Level N` columns ahead of the
//! period, with `N` taken from the deepest unit known to the session so that
//! separate exports from the same hierarchy line up.

use crate::core::hierarchy::{ancestors, max_level, AncestryMap};
use crate::core::resolution::ResolutionMaps;
use crate::domain::{ObservationTuple, Result};
use std::collections::{BTreeSet, HashMap};

pub const PERIOD_HEADER: &str = "Period";

/// Name DHIS2 gives the implicit, non-disaggregated combo
pub const DEFAULT_COMBO: &str = "default";

/// A dense table ready for serialization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WideTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub level_count: usize,
}

impl WideTable {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Data columns only, after the hierarchy and period columns
    pub fn data_columns(&self) -> &[String] {
        &self.headers[self.level_count + 1..]
    }
}

/// Column header for one observation
///
/// The combo suffix is dropped when the combo is absent, resolves to
/// `default`, or cannot be resolved at all.
pub fn column_name(
    data_element_name: &str,
    combo_id: Option<&str>,
    combo_names: &HashMap<String, String>,
) -> String {
    let combo_name = match combo_id {
        Some(id) => combo_names.get(id).map(String::as_str).unwrap_or(id),
        None => DEFAULT_COMBO,
    };

    if combo_name == DEFAULT_COMBO || Some(combo_name) == combo_id {
        data_element_name.to_string()
    } else {
        format!("{data_element_name} ({combo_name})")
    }
}

struct RowGroup<'a> {
    org_unit: &'a str,
    period: &'a str,
    cells: HashMap<String, &'a str>,
}

/// Reshape tuples into a wide table
///
/// Rows follow the order in which each `(org unit, period)` pair first
/// appears. A later tuple landing on the same cell overwrites the earlier one.
///
/// # Errors
///
/// Returns `HarvestError::CyclicHierarchy` if an org unit's parent links loop.
pub fn reshape(tuples: &[ObservationTuple], maps: &ResolutionMaps) -> Result<WideTable> {
    let mut groups: Vec<RowGroup<'_>> = Vec::new();
    let mut group_index: HashMap<(&str, &str), usize> = HashMap::new();
    let mut columns: BTreeSet<String> = BTreeSet::new();

    for tuple in tuples {
        let key = (tuple.org_unit.as_str(), tuple.period.as_str());
        let idx = *group_index.entry(key).or_insert_with(|| {
            groups.push(RowGroup {
                org_unit: key.0,
                period: key.1,
                cells: HashMap::new(),
            });
            groups.len() - 1
        });

        let column = column_name(
            maps.data_element_name(&tuple.data_element),
            tuple.category_option_combo.as_deref(),
            &maps.category_option_combo_names,
        );
        columns.insert(column.clone());
        groups[idx].cells.insert(column, tuple.value.as_str());
    }

    let level_count = max_level(&maps.org_unit_ancestry) as usize;

    let mut headers: Vec<String> = (1..=level_count).map(|n| format!("Level {n}")).collect();
    headers.push(PERIOD_HEADER.to_string());
    headers.extend(columns.iter().cloned());

    let mut hierarchy_cache: HashMap<&str, Vec<String>> = HashMap::new();
    let mut rows = Vec::with_capacity(groups.len());

    for group in &groups {
        let hierarchy = match hierarchy_cache.get(group.org_unit) {
            Some(cells) => cells.clone(),
            None => {
                let cells = hierarchy_cells(group.org_unit, &maps.org_unit_ancestry, level_count)?;
                hierarchy_cache.insert(group.org_unit, cells.clone());
                cells
            }
        };

        let mut row = hierarchy;
        row.push(group.period.to_string());
        row.extend(columns.iter().map(|column| {
            group
                .cells
                .get(column.as_str())
                .map(|value| value.to_string())
                .unwrap_or_default()
        }));
        rows.push(row);
    }

    Ok(WideTable {
        headers,
        rows,
        level_count,
    })
}

/// Ancestor names spread over `width` level columns
///
/// Each name sits in the column of its own level, leaving a gap where a
/// branch skips a level. If the chain's levels are missing, out of range or
/// not strictly increasing, names are packed from the left instead.
fn hierarchy_cells(org_unit: &str, ancestry: &AncestryMap, width: usize) -> Result<Vec<String>> {
    let mut chain = ancestors(org_unit, ancestry).collect::<Result<Vec<_>>>()?;
    chain.reverse();

    let mut cells = vec![String::new(); width];

    let by_level = chain.windows(2).all(|pair| pair[0].level < pair[1].level)
        && chain
            .iter()
            .all(|entry| entry.level >= 1 && entry.level as usize <= width);

    if by_level {
        for entry in &chain {
            cells[entry.level as usize - 1] = entry.name.clone();
        }
    } else {
        for (cell, entry) in cells.iter_mut().zip(&chain) {
            *cell = entry.name.clone();
        }
    }

    Ok(cells)
}
