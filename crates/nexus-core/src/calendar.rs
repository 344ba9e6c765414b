//! Calendar boundary derivation for the reset engine.
//!
//! The engine branches on four dates: today, yesterday, the start of the
//! current week (Monday-anchored), and the start of the current month.
//! All four are derived here from a single local date, making this module
//! the one temporal source of truth -- the reset engine never does its own
//! date arithmetic.
//!
//! The calendar source is trusted as provided: the caller supplies "today"
//! in the user's local time zone and no clock-skew correction is attempted.

use chrono::{Datelike, Days, NaiveDate};

/// The four calendar boundaries a reset pass evaluates against.
///
/// All fields are date-only values in the user's local time zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayBoundaries {
    /// The current local day.
    pub today: NaiveDate,
    /// The day before `today`.
    pub yesterday: NaiveDate,
    /// The Monday of the week containing `today`.
    pub week_start: NaiveDate,
    /// The first day of the month containing `today`.
    pub month_start: NaiveDate,
}

impl DayBoundaries {
    /// Derive all boundaries from the given local day.
    ///
    /// The subtractions can only fail at the floor of chrono's date range;
    /// there they fall back to `today`, which degrades to a no-op reset
    /// pass rather than a panic.
    pub fn from_today(today: NaiveDate) -> Self {
        let yesterday = today.checked_sub_days(Days::new(1)).unwrap_or(today);
        let weekday_offset = u64::from(today.weekday().num_days_from_monday());
        let week_start = today
            .checked_sub_days(Days::new(weekday_offset))
            .unwrap_or(today);
        let month_start = today.with_day(1).unwrap_or(today);
        Self {
            today,
            yesterday,
            week_start,
            month_start,
        }
    }
}
