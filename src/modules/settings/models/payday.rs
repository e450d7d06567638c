use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::core::dates::{clamp_day_of_month, last_day_of_month};

/// User's payday configuration
///
/// The next income event bounds the affordability window. A one-off
/// override date takes precedence over the recurring day-of-month; with
/// neither configured, payday defaults to the last calendar day of the
/// current month.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaydaySettings {
    /// Recurring payday (1-31, clamped to month length)
    pub payday_day_of_month: Option<u32>,
    /// One-off override for the next payday
    pub payday_override: Option<NaiveDate>,
}

impl PaydaySettings {
    /// Resolve the next payday as of `today`
    ///
    /// A stale override (already in the past) is ignored rather than
    /// producing an empty affordability window.
    pub fn next_payday(&self, today: NaiveDate) -> NaiveDate {
        if let Some(override_date) = self.payday_override {
            if override_date >= today {
                return override_date;
            }
        }

        if let Some(day) = self.payday_day_of_month {
            let this_month = clamp_day_of_month(today.year(), today.month(), day);
            if this_month >= today {
                return this_month;
            }
            let (year, month) = if today.month() == 12 {
                (today.year() + 1, 1)
            } else {
                (today.year(), today.month() + 1)
            };
            return clamp_day_of_month(year, month, day);
        }

        last_day_of_month(today.year(), today.month())
    }
}
