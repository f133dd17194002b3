use chrono::{Datelike, NaiveDate};

/// Years a new vehicle may circulate before its first inspection.
pub(crate) const FIRST_INSPECTION_AFTER_YEARS: i32 = 4;
/// Age from which inspections become yearly.
pub(crate) const YEARLY_INSPECTION_FROM_AGE: i32 = 10;
/// Model year assumed when a vehicle record has none.
pub(crate) const FALLBACK_MODEL_YEAR: i32 = 2000;

/// January 1st of the year the first inspection falls due; `None` past chrono's range.
pub(crate) fn first_due_date(model_year: i32) -> Option<NaiveDate> {
    model_year
        .checked_add(FIRST_INSPECTION_AFTER_YEARS)
        .and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1))
}

/// Recurrence for a vehicle of the given age, `None` while it is still exempt.
pub(crate) fn inspection_interval_years(age: i32) -> Option<i32> {
    if age >= YEARLY_INSPECTION_FROM_AGE {
        Some(1)
    } else if age >= FIRST_INSPECTION_AFTER_YEARS {
        Some(2)
    } else {
        None
    }
}

/// Same calendar day `years` later; Feb 29 moves to Mar 1 outside leap years.
pub(crate) fn add_years(date: NaiveDate, years: i32) -> NaiveDate {
    let year = date.year() + years;
    date.with_year(year)
        .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))
        .unwrap_or(date)
}

/// Whole days from `today` until `due`; negative once the date has passed.
pub fn days_until(due: NaiveDate, today: NaiveDate) -> i64 {
    due.signed_duration_since(today).num_days()
}
