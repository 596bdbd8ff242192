//! Calendar arithmetic helpers.
//!
//! All helpers work on [`NaiveDate`], which carries no time zone, so stepping
//! across a daylight-saving transition cannot skip or repeat a day. Inputs are
//! taken by value and never modified.

pub mod range;

pub use range::DateRange;

use chrono::{Datelike, NaiveDate};

/// Returns every calendar day from `start` to `end`, both included, ascending.
///
/// Returns an empty vector when `end` is before `start`.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use fetch_utils::all_dates_between_inclusive;
///
/// let start = NaiveDate::from_ymd_opt(2017, 1, 1).unwrap();
/// let end = NaiveDate::from_ymd_opt(2017, 1, 3).unwrap();
/// let dates = all_dates_between_inclusive(start, end);
/// assert_eq!(dates.len(), 3);
/// assert_eq!(dates[2], end);
/// ```
pub fn all_dates_between_inclusive(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    DateRange::inclusive(start, end).collect()
}

/// Returns day 1 of `date`'s month.
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    // Day 1 exists in every month
    date.with_day(1).unwrap_or(date)
}

/// Returns day 1 of the month before `date`'s month.
///
/// January maps to December of the prior year. For the earliest month
/// representable by [`NaiveDate`] the first of that month is returned, since
/// no earlier month exists.
pub fn first_of_previous_month(date: NaiveDate) -> NaiveDate {
    first_of_month(last_of_previous_month(date))
}

/// Returns the last day of the month before `date`'s month.
///
/// This is the day before the first of `date`'s month, which resolves 28, 29,
/// 30 and 31 day months (leap-year February included) without a lookup table.
pub fn last_of_previous_month(date: NaiveDate) -> NaiveDate {
    let first = first_of_month(date);
    first.pred_opt().unwrap_or(first)
}
