//! Result type alias for Harvest

use super::errors::HarvestError;

/// Result type alias for Harvest operations
///
/// # Examples
///
/// ```
/// use harvest::domain::result::Result;
/// use harvest::domain::errors::HarvestError;
///
/// fn require_period(period: &str) -> Result<&str> {
///     if period.is_empty() {
///         return Err(HarvestError::Validation("Please select a period".to_string()));
///     }
///     Ok(period)
/// }
///
/// assert!(require_period("period=2024Q1").is_ok());
/// assert!(require_period("").is_err());
/// ```
pub type Result<T> = std::result::Result<T, HarvestError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::Dhis2Error;

    #[test]
    fn test_result_err() {
        let result: Result<i32> = Err(HarvestError::Validation("test error".to_string()));
        assert!(result.is_err());
    }

    #[test]
    fn test_result_with_question_mark() -> Result<()> {
        fn inner() -> std::result::Result<i32, Dhis2Error> {
            Ok(42)
        }

        let value = inner()?;
        assert_eq!(value, 42);
        Ok(())
    }
}
