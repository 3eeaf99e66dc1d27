//! Data transformation logic
//!
//! Turns the flat observation list returned by DHIS2 into the wide table the
//! export writes out:
//!
//! - [`wide`]: grouping by `(org unit, period)`, column naming, hierarchy columns
//! - [`csv`]: cell escaping and row serialization

pub mod csv;
pub mod wide;

pub use csv::escape_cell;
pub use wide::{column_name, reshape, WideTable};

use crate::core::resolution::ResolutionMaps;
use crate::domain::{ObservationTuple, Result};

/// Reshape and serialize in one step
///
/// # Examples
///
/// ```
/// use harvest::core::resolution::ResolutionMaps;
/// use harvest::core::transform::to_wide_csv;
/// use harvest::domain::{Dataset, DataElementRef, ObservationTuple, OrgUnit};
///
/// # fn example() -> harvest::domain::Result<()> {
/// let datasets = vec![Dataset {
///     id: "ds1".to_string(),
///     display_name: "Child Health".to_string(),
///     period_type: Some("Monthly".to_string()),
///     elements: vec![DataElementRef::new("DE1", "Measles doses")],
/// }];
/// let org_units = vec![OrgUnit::new("OU1", "Clinic A", 1, None)];
/// let maps = ResolutionMaps::build(&datasets, &org_units, &[]);
///
/// let tuples = vec![ObservationTuple::new("OU1", "202401", "DE1", None, "10")];
/// let text = to_wide_csv(&tuples, &maps)?;
/// assert_eq!(text, "Level 1,Period,Measles doses\nClinic A,202401,10\n");
/// # Ok(())
/// # }
/// # example().unwrap();
/// ```
pub fn to_wide_csv(tuples: &[ObservationTuple], maps: &ResolutionMaps) -> Result<String> {
    Ok(reshape(tuples, maps)?.to_csv())
}
