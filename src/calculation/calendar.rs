//! Calendar checks for the reference month.

use crate::config::YearRange;
use crate::error::{EngineError, EngineResult};

/// Returns true for Gregorian leap years.
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::is_leap_year;
///
/// assert!(is_leap_year(2024));
/// assert!(is_leap_year(2000));
/// assert!(!is_leap_year(1900));
/// assert!(!is_leap_year(2023));
/// ```
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Returns the number of days in `month` of `year`.
///
/// # Errors
///
/// Returns `InvalidInput` with field `month` when `month` is not in 1..=12.
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::days_in_month;
///
/// assert_eq!(days_in_month(2024, 2).unwrap(), 29);
/// assert_eq!(days_in_month(2023, 2).unwrap(), 28);
/// assert!(days_in_month(2024, 13).is_err());
/// ```
pub fn days_in_month(year: i32, month: u32) -> EngineResult<u32> {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => Ok(31),
        4 | 6 | 9 | 11 => Ok(30),
        2 if is_leap_year(year) => Ok(29),
        2 => Ok(28),
        _ => Err(EngineError::invalid_input(
            "month",
            format!("must be between 1 and 12, got {}", month),
        )),
    }
}

/// Checks that `days` fits in the given month and returns it unchanged.
///
/// Zero is accepted.
pub fn validate_worked_days(year: i32, month: u32, days: u32) -> EngineResult<u32> {
    let max = days_in_month(year, month)?;
    if days > max {
        return Err(EngineError::invalid_input(
            "worked_days",
            format!(
                "must be between 0 and {} for {}-{:02}, got {}",
                max, year, month, days
            ),
        ));
    }
    Ok(days)
}

/// Checks that `year` is inside the accepted range.
pub fn validate_reference_year(year: i32, range: YearRange) -> EngineResult<i32> {
    if !range.contains(year) {
        return Err(EngineError::invalid_input(
            "year",
            format!(
                "must be between {} and {}, got {}",
                range.min, range.max, year
            ),
        ));
    }
    Ok(year)
}
