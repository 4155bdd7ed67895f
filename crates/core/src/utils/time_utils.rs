use chrono::{Datelike, NaiveDate};

use crate::errors::{Result, ValidationError};

/// Returns the inclusive `[first day, last day]` window of a calendar month.
///
/// The last day is calendar-correct (28/29/30/31, including the Gregorian
/// leap-year rule for February).
pub fn month_period(month: u32, year: i32) -> Result<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
        ValidationError::InvalidInput(format!("invalid month/year: {}/{}", month, year))
    })?;
    let (next_month, next_year) = if month == 12 {
        (1, year + 1)
    } else {
        (month + 1, year)
    };
    let end = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .ok_or_else(|| {
            ValidationError::InvalidInput(format!("invalid month/year: {}/{}", month, year))
        })?;
    Ok((start, end))
}

/// Number of days in the given calendar month.
pub fn days_in_month(month: u32, year: i32) -> Result<u32> {
    let (_, end) = month_period(month, year)?;
    Ok(end.day())
}
