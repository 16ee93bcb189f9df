//! Years of service.

use chrono::{Datelike, NaiveDate};

/// Returns the number of full years between `hire_date` and `as_of`.
///
/// A year only counts once its hire-date anniversary has been reached.
/// Hire dates after `as_of` give zero. A 29 February hire date reaches its
/// anniversary on 1 March in non-leap years.
///
/// # Examples
///
/// ```
/// use hr_cost_engine::calculation::years_of_service;
/// use chrono::NaiveDate;
///
/// let hired = NaiveDate::from_ymd_opt(2020, 6, 15).unwrap();
/// assert_eq!(years_of_service(hired, NaiveDate::from_ymd_opt(2025, 6, 14).unwrap()), 4);
/// assert_eq!(years_of_service(hired, NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()), 5);
/// ```
pub fn years_of_service(hire_date: NaiveDate, as_of: NaiveDate) -> u32 {
    if hire_date >= as_of {
        return 0;
    }

    let mut years = as_of.year() - hire_date.year();
    if (as_of.month(), as_of.day()) < (hire_date.month(), hire_date.day()) {
        years -= 1;
    }

    u32::try_from(years).unwrap_or(0)
}
