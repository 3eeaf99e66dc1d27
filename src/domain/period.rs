//! Reporting period selection
//!
//! A [`PeriodSpec`] is what the operator picks; [`PeriodSpec::query_fragment`]
//! renders it as the query string fragment the data value endpoint expects:
//!
//! | Variant      | Fragment                                        |
//! |--------------|-------------------------------------------------|
//! | `Monthly`    | `period=YYYYMM`                                 |
//! | `Quarterly`  | `period=YYYYQn`                                 |
//! | `Yearly`     | `period=YYYY`                                   |
//! | `YearRange`  | `startDate=YYYY-01-01&endDate=YYYY-12-31`       |
//! | `DateRange`  | `startDate=YYYY-MM-DD&endDate=YYYY-MM-DD`       |

use super::errors::HarvestError;
use chrono::NaiveDate;
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// A calendar-aligned reporting interval
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodSpec {
    Monthly { year: i32, month: u32 },
    Quarterly { year: i32, quarter: u8 },
    Yearly { year: i32 },
    /// Whole calendar years, January 1 of `start` to December 31 of `end`
    YearRange { start: i32, end: i32 },
    DateRange { start: NaiveDate, end: NaiveDate },
}

impl PeriodSpec {
    /// Renders the query fragment for the data value retrieval
    pub fn query_fragment(&self) -> String {
        match self {
            PeriodSpec::Monthly { year, month } => format!("period={year:04}{month:02}"),
            PeriodSpec::Quarterly { year, quarter } => format!("period={year:04}Q{quarter}"),
            PeriodSpec::Yearly { year } => format!("period={year:04}"),
            PeriodSpec::YearRange { start, end } => {
                format!("startDate={start:04}-01-01&endDate={end:04}-12-31")
            }
            PeriodSpec::DateRange { start, end } => format!(
                "startDate={}&endDate={}",
                start.format("%Y-%m-%d"),
                end.format("%Y-%m-%d")
            ),
        }
    }

    /// The `(key, value)` pairs of [`Self::query_fragment`]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        match self {
            PeriodSpec::YearRange { start, end } => vec![
                ("startDate", format!("{start:04}-01-01")),
                ("endDate", format!("{end:04}-12-31")),
            ],
            PeriodSpec::DateRange { start, end } => vec![
                ("startDate", start.format("%Y-%m-%d").to_string()),
                ("endDate", end.format("%Y-%m-%d").to_string()),
            ],
            other => {
                let fragment = other.query_fragment();
                let value = fragment.trim_start_matches("period=").to_string();
                vec![("period", value)]
            }
        }
    }
}

impl fmt::Display for PeriodSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.query_fragment())
    }
}

fn quarter_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d{4})Q([1-4])$").expect("valid quarter pattern"))
}

fn month_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d{4})-?(\d{2})$").expect("valid month pattern"))
}

fn year_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{4}$").expect("valid year pattern"))
}

fn invalid(input: &str) -> HarvestError {
    HarvestError::Validation(format!(
        "Unrecognised period '{input}'. Use YYYY-MM, YYYYQn, YYYY, YYYY..YYYY or YYYY-MM-DD..YYYY-MM-DD"
    ))
}

fn parse_year(input: &str) -> Result<i32, HarvestError> {
    if !year_pattern().is_match(input) {
        return Err(invalid(input));
    }
    input.parse().map_err(|_| invalid(input))
}

fn parse_range(input: &str, start: &str, end: &str) -> Result<PeriodSpec, HarvestError> {
    let (start, end) = (start.trim(), end.trim());

    if year_pattern().is_match(start) && year_pattern().is_match(end) {
        let (start, end) = (parse_year(start)?, parse_year(end)?);
        if end < start {
            return Err(HarvestError::Validation(format!(
                "End year {end} is before start year {start}"
            )));
        }
        return Ok(PeriodSpec::YearRange { start, end });
    }

    let start = NaiveDate::parse_from_str(start, "%Y-%m-%d").map_err(|_| invalid(input))?;
    let end = NaiveDate::parse_from_str(end, "%Y-%m-%d").map_err(|_| invalid(input))?;
    if end < start {
        return Err(HarvestError::Validation(format!(
            "End date {end} is before start date {start}"
        )));
    }
    Ok(PeriodSpec::DateRange { start, end })
}

impl FromStr for PeriodSpec {
    type Err = HarvestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        if input.is_empty() {
            return Err(HarvestError::Validation(
                "Please select a period".to_string(),
            ));
        }

        if let Some((start, end)) = input.split_once("..") {
            return parse_range(input, start, end);
        }

        if let Some(caps) = quarter_pattern().captures(input) {
            let year = parse_year(&caps[1])?;
            let quarter = caps[2].parse().map_err(|_| invalid(input))?;
            return Ok(PeriodSpec::Quarterly { year, quarter });
        }

        if let Some(caps) = month_pattern().captures(input) {
            let year = parse_year(&caps[1])?;
            let month: u32 = caps[2].parse().map_err(|_| invalid(input))?;
            if !(1..=12).contains(&month) {
                return Err(invalid(input));
            }
            return Ok(PeriodSpec::Monthly { year, month });
        }

        if year_pattern().is_match(input) {
            return Ok(PeriodSpec::Yearly {
                year: parse_year(input)?,
            });
        }

        Err(invalid(input))
    }
}
