//! Date and time built-ins.

use rem_value::calendar::{
    date_from_ymd, days_in_month, is_leap_year, weekday_monday_first, weekday_sunday_first,
    ymd_from_days, CivilDate, BASE_YEAR, DAY_NAMES, MINUTES_PER_DAY, MONTH_NAMES, YEAR_RANGE,
};
use rem_value::{EvalError, EvalResult, Value};

use super::{int_arg, Args};
use crate::interpreter::Interpreter;

/// The date part of a `Date` or `DateTime` argument.
fn date_part(value: &Value) -> Result<i32, EvalError> {
    match value {
        Value::Date(d) => Ok(*d),
        Value::DateTime(dt) => i32::try_from(dt.div_euclid(i64::from(MINUTES_PER_DAY)))
            .map_err(|_| EvalError::DateOverflow),
        _ => Err(EvalError::BadType),
    }
}

/// The time part of a `Time` or `DateTime` argument.
fn time_part(value: &Value) -> Result<i64, EvalError> {
    match value {
        Value::Time(t) => Ok(i64::from(*t)),
        Value::DateTime(dt) => Ok(dt.rem_euclid(i64::from(MINUTES_PER_DAY))),
        _ => Err(EvalError::BadType),
    }
}

fn civil(value: &Value) -> Result<CivilDate, EvalError> {
    date_part(value).map(ymd_from_days)
}

/// Integer argument narrowed to a month or day number; anything out of
/// range is a bad date.
fn small(args: &Args, index: usize) -> Result<u32, EvalError> {
    u32::try_from(int_arg(args, index)?).map_err(|_| EvalError::BadDate)
}

fn time_of_day(hour: i64, minute: i64) -> Result<i32, EvalError> {
    if hour < 0 || minute < 0 {
        return Err(EvalError::TooLow);
    }
    if hour > 23 || minute > 59 {
        return Err(EvalError::TooHigh);
    }
    i32::try_from(hour * 60 + minute).map_err(|_| EvalError::TooHigh)
}

fn join(date: i32, time: i32) -> Value {
    Value::DateTime(i64::from(date) * i64::from(MINUTES_PER_DAY) + i64::from(time))
}

pub(super) fn baseyr(_: &mut Interpreter<'_>, _: Args) -> EvalResult {
    Ok(Value::Int(i64::from(BASE_YEAR)))
}

/// `date(year, month, day)`
pub(super) fn date(_: &mut Interpreter<'_>, args: Args) -> EvalResult {
    let year = int_arg(&args, 0)?;
    let month = small(&args, 1)?;
    let day = small(&args, 2)?;
    date_from_ymd(year, month, day).map(Value::Date)
}

/// `time(hour, minute)`
pub(super) fn time(_: &mut Interpreter<'_>, args: Args) -> EvalResult {
    time_of_day(int_arg(&args, 0)?, int_arg(&args, 1)?).map(Value::Time)
}

/// `datetime(date, time)`, `datetime(date, hour, minute)`,
/// `datetime(year, month, day, time)` or
/// `datetime(year, month, day, hour, minute)`.
pub(super) fn datetime(_: &mut Interpreter<'_>, args: Args) -> EvalResult {
    let (date, rest) = match &args[0] {
        Value::Date(d) => (*d, 1),
        Value::Int(year) if args.len() >= 4 => (date_from_ymd(*year, small(&args, 1)?, small(&args, 2)?)?, 3),
        _ => return Err(EvalError::BadType),
    };
    let time = match &args[rest..] {
        [Value::Time(t)] => *t,
        [Value::Int(hour), Value::Int(minute)] => time_of_day(*hour, *minute)?,
        [_] | [_, _] => return Err(EvalError::BadType),
        [] => return Err(EvalError::TooFewArgs),
        _ => return Err(EvalError::TooManyArgs),
    };
    Ok(join(date, time))
}

pub(super) fn day(_: &mut Interpreter<'_>, args: Args) -> EvalResult {
    Ok(Value::Int(i64::from(civil(&args[0])?.day)))
}

pub(super) fn monnum(_: &mut Interpreter<'_>, args: Args) -> EvalResult {
    Ok(Value::Int(i64::from(civil(&args[0])?.month)))
}

pub(super) fn year(_: &mut Interpreter<'_>, args: Args) -> EvalResult {
    Ok(Value::Int(i64::from(civil(&args[0])?.year)))
}

/// Day of the week, Sunday = 0.
pub(super) fn wkdaynum(_: &mut Interpreter<'_>, args: Args) -> EvalResult {
    Ok(Value::Int(weekday_sunday_first(date_part(&args[0])?)))
}

/// Weekday name of a date, or of a Sunday-first day number `0..=6`.
pub(super) fn wkday(_: &mut Interpreter<'_>, args: Args) -> EvalResult {
    let index = match &args[0] {
        Value::Int(n) if *n < 0 => return Err(EvalError::TooLow),
        Value::Int(n) if *n > 6 => return Err(EvalError::TooHigh),
        // DAY_NAMES starts on Monday
        Value::Int(n) => usize::try_from((n + 6) % 7).unwrap_or(0),
        other => weekday_monday_first(date_part(other)?),
    };
    Ok(Value::string(DAY_NAMES[index]))
}

/// Month name of a date, or of a month number `1..=12`.
pub(super) fn mon(_: &mut Interpreter<'_>, args: Args) -> EvalResult {
    let month = match &args[0] {
        Value::Int(n) if *n < 1 => return Err(EvalError::TooLow),
        Value::Int(n) if *n > 12 => return Err(EvalError::TooHigh),
        Value::Int(n) => usize::try_from(*n).unwrap_or(1),
        other => usize::try_from(civil(other)?.month).unwrap_or(1),
    };
    Ok(Value::string(MONTH_NAMES[month - 1]))
}

pub(super) fn hour(_: &mut Interpreter<'_>, args: Args) -> EvalResult {
    Ok(Value::Int(time_part(&args[0])? / 60))
}

pub(super) fn minute(_: &mut Interpreter<'_>, args: Args) -> EvalResult {
    Ok(Value::Int(time_part(&args[0])? % 60))
}

/// `daysinmon(month, year)`
pub(super) fn daysinmon(_: &mut Interpreter<'_>, args: Args) -> EvalResult {
    let month = int_arg(&args, 0)?;
    let year = int_arg(&args, 1)?;
    let base = i64::from(BASE_YEAR);
    if !(1..=12).contains(&month) || year < base || year > base + i64::from(YEAR_RANGE) {
        return Err(EvalError::DomainError);
    }
    let month = u32::try_from(month).map_err(|_| EvalError::DomainError)?;
    Ok(Value::Int(i64::from(days_in_month(month, year))))
}

/// `isleap(year)` or `isleap(date)`
pub(super) fn isleap(_: &mut Interpreter<'_>, args: Args) -> EvalResult {
    let year = match &args[0] {
        Value::Int(year) => *year,
        other => i64::from(civil(other)?.year),
    };
    Ok(Value::from_bool(is_leap_year(year)))
}

/// Gregorian Easter Sunday of `year`, as (month, day).
fn easter(year: i64) -> (u32, u32) {
    let golden = year % 19 + 1;
    let century = year / 100 + 1;
    let skipped_leaps = 3 * century / 4 - 12;
    let moon_sync = (8 * century + 5) / 25 - 5;
    let sunday = 5 * year / 4 - skipped_leaps - 10;
    let mut epact = (11 * golden + 20 + moon_sync - skipped_leaps).rem_euclid(30);
    if epact == 24 || (epact == 25 && golden > 11) {
        epact += 1;
    }
    let mut full_moon = 44 - epact;
    if full_moon < 21 {
        full_moon += 30;
    }
    let day = full_moon + 7 - (sunday + full_moon) % 7;
    let (month, day) = if day <= 31 { (3, day) } else { (4, day - 31) };
    (month, u32::try_from(day).unwrap_or(1))
}

/// `easterdate(year)`, or the first Easter on or after a date.
pub(super) fn easterdate(_: &mut Interpreter<'_>, args: Args) -> EvalResult {
    let base = i64::from(BASE_YEAR);
    let (mut year, not_before) = match &args[0] {
        Value::Int(y) if *y < base => return Err(EvalError::TooLow),
        Value::Int(y) if *y > base + i64::from(YEAR_RANGE) => return Err(EvalError::TooHigh),
        Value::Int(y) => (*y, None),
        other => {
            let date = date_part(other)?;
            (i64::from(ymd_from_days(date).year), Some(date))
        }
    };
    loop {
        let (month, day) = easter(year);
        let found = date_from_ymd(year, month, day)?;
        if not_before.map_or(true, |limit| found >= limit) {
            return Ok(Value::Date(found));
        }
        year += 1;
    }
}
