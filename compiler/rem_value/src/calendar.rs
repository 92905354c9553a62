//! Day-count calendar.
//!
//! Dates are stored as the number of days since 1 January of [`BASE_YEAR`].
//! Day 0 falls on a Monday. Gregorian leap-year rules apply throughout.

use crate::errors::EvalError;

/// First year representable by a literal date.
pub const BASE_YEAR: i32 = 1990;

/// Number of years after [`BASE_YEAR`] accepted by literal dates.
pub const YEAR_RANGE: i32 = 88;

pub const MINUTES_PER_DAY: i32 = 1440;

const DAYS_PER_400_YEARS: i64 = 146_097;

/// Cumulative day offsets of each month, indexed by `[leap][month - 1]`.
const MONTH_INDEX: [[i64; 12]; 2] = [
    [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334],
    [0, 31, 60, 91, 121, 152, 182, 213, 244, 274, 305, 335],
];

const MONTH_DAYS: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Day names, Monday first (day 0 is a Monday).
pub const DAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// A broken-down calendar date. `month` is 1-based.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CivilDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

pub fn is_leap_year(year: i64) -> bool {
    year % 4 == 0 && !(year % 100 == 0 && year % 400 != 0)
}

/// Number of days in `month` (1-based) of `year`.
///
/// Months outside `1..=12` have zero days.
pub fn days_in_month(month: u32, year: i64) -> u32 {
    match month {
        2 if is_leap_year(year) => 29,
        1..=12 => MONTH_DAYS[(month - 1) as usize],
        _ => 0,
    }
}

fn days_in_year(year: i64) -> i64 {
    if is_leap_year(year) {
        366
    } else {
        365
    }
}

/// Whether `year-month-day` is a valid date inside the literal-date range.
pub fn date_ok(year: i64, month: u32, day: u32) -> bool {
    (i64::from(BASE_YEAR)..=i64::from(BASE_YEAR + YEAR_RANGE)).contains(&year)
        && (1..=12).contains(&month)
        && day >= 1
        && day <= days_in_month(month, year)
}

/// Day count of a calendar date. The caller validates the date.
pub fn days_from_ymd(year: i64, month: u32, day: u32) -> i64 {
    let y1 = i64::from(BASE_YEAR) - 1;
    let y2 = year - 1;
    let y4 = y2.div_euclid(4) - y1.div_euclid(4);
    let y100 = y2.div_euclid(100) - y1.div_euclid(100);
    let y400 = y2.div_euclid(400) - y1.div_euclid(400);
    let leap = usize::from(is_leap_year(year));
    let month_offset = MONTH_INDEX[leap][(month.clamp(1, 12) - 1) as usize];
    365 * (year - i64::from(BASE_YEAR)) + y4 - y100 + y400 + month_offset + i64::from(day) - 1
}

/// Validates a date and returns its day count.
pub fn date_from_ymd(year: i64, month: u32, day: u32) -> Result<i32, EvalError> {
    if !date_ok(year, month, day) {
        return Err(EvalError::BadDate);
    }
    i32::try_from(days_from_ymd(year, month, day)).map_err(|_| EvalError::BadDate)
}

/// Breaks a day count into year, month and day.
pub fn ymd_from_days(days: i32) -> CivilDate {
    let mut days = i64::from(days);
    let cycles = days.div_euclid(DAYS_PER_400_YEARS);
    days -= cycles * DAYS_PER_400_YEARS;
    let mut year = i64::from(BASE_YEAR) + cycles * 400;

    loop {
        let len = days_in_year(year);
        if days < len {
            break;
        }
        days -= len;
        year += 1;
    }

    let mut month = 1;
    loop {
        let len = i64::from(days_in_month(month, year));
        if days < len {
            break;
        }
        days -= len;
        month += 1;
    }

    CivilDate {
        year: i32::try_from(year).unwrap_or(i32::MAX),
        month,
        day: u32::try_from(days + 1).unwrap_or(1),
    }
}

/// Weekday with Sunday as 0.
pub fn weekday_sunday_first(days: i32) -> i64 {
    (i64::from(days) + 1).rem_euclid(7)
}

/// Weekday with Monday as 0.
pub fn weekday_monday_first(days: i32) -> usize {
    usize::try_from(i64::from(days).rem_euclid(7)).unwrap_or(0)
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "tests use unwrap for brevity")]
mod tests;
