use chrono::{Months, NaiveDate, NaiveDateTime};

/// Calendar-day difference `to - from`, ignoring time-of-day
///
/// Positive when `to` lies after `from`. Both sides are already
/// date-only, so no truncation is needed here; use [`date_only`] first
/// when starting from a timestamp.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// Truncate a timestamp to its calendar date
pub fn date_only(moment: NaiveDateTime) -> NaiveDate {
    moment.date()
}

/// Last calendar day of the given month
pub fn last_day_of_month(year: i32, month: u32) -> NaiveDate {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    // First of the following month minus one day is always valid
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .unwrap_or(NaiveDate::MIN)
}

/// Build a date from year/month/day, clamping the day to the month length
///
/// Day 31 in a 30-day month yields the 30th; day 29 in a non-leap
/// February yields the 28th.
pub fn clamp_day_of_month(year: i32, month: u32, day: u32) -> NaiveDate {
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(date) => date,
        None => last_day_of_month(year, month),
    }
}

/// Step a date forward by whole months
pub fn add_months(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    date.checked_add_months(Months::new(months))
}
