//! Directed coercion between value kinds.
//!
//! The matrix is partial: only the conversions listed in
//! [`coerce`] exist, every other pair is `CantCoerce`.

use crate::calendar::{ymd_from_days, MINUTES_PER_DAY};
use crate::errors::{EvalError, EvalResult};
use crate::literal::{parse_literal_date, parse_time_of_day, Separators};
use crate::value::{Value, ValueKind};

/// Converts `value` to `kind`. A value already of that kind is returned as is.
pub fn coerce(value: Value, kind: ValueKind, seps: Separators) -> EvalResult {
    if value.kind() == kind {
        return Ok(value);
    }
    match kind {
        ValueKind::Str => Ok(Value::Str(format_value(&value, seps))),
        ValueKind::Int => to_int(&value),
        ValueKind::Date => to_date(&value, seps),
        ValueKind::Time => to_time(&value, seps),
        ValueKind::DateTime => to_datetime(&value, seps),
    }
}

/// String rendering of any value, using the host separators.
///
/// * `Int`: decimal
/// * `Time`: `HH<tsep>MM`
/// * `Date`: `YYYY<dsep>MM<dsep>DD`
/// * `DateTime`: `YYYY<dsep>MM<dsep>DD@HH<tsep>MM`
pub fn format_value(value: &Value, seps: Separators) -> String {
    match value {
        Value::Int(n) => n.to_string(),
        Value::Str(s) => s.clone(),
        Value::Time(t) => format_time(*t, seps),
        Value::Date(d) => format_date(*d, seps),
        Value::DateTime(dt) => {
            let minutes_per_day = i64::from(MINUTES_PER_DAY);
            let date = i32::try_from(dt.div_euclid(minutes_per_day)).unwrap_or(i32::MAX);
            let time = i32::try_from(dt.rem_euclid(minutes_per_day)).unwrap_or(0);
            format!("{}@{}", format_date(date, seps), format_time(time, seps))
        }
    }
}

fn format_time(minutes: i32, seps: Separators) -> String {
    format!("{:02}{}{:02}", minutes / 60, seps.time, minutes % 60)
}

fn format_date(days: i32, seps: Separators) -> String {
    let civil = ymd_from_days(days);
    format!(
        "{:04}{sep}{:02}{sep}{:02}",
        civil.year,
        civil.month,
        civil.day,
        sep = seps.date
    )
}

fn to_int(value: &Value) -> EvalResult {
    match value {
        Value::Str(s) => parse_int(s).map(Value::Int).ok_or(EvalError::CantCoerce),
        Value::Date(_) | Value::Time(_) | Value::DateTime(_) => {
            Ok(Value::Int(value.raw_number().unwrap_or_default()))
        }
        Value::Int(_) => Ok(value.clone()),
    }
}

/// Optional `-` followed by digits. An empty digit run reads as zero.
fn parse_int(s: &str) -> Option<i64> {
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    };
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let magnitude = digits.bytes().try_fold(0i128, |acc, b| {
        acc.checked_mul(10)?.checked_add(i128::from(b - b'0'))
    })?;
    let signed = if negative { -magnitude } else { magnitude };
    i64::try_from(signed).ok()
}

fn to_date(value: &Value, seps: Separators) -> EvalResult {
    match value {
        Value::Int(n) => {
            if *n < 0 {
                Err(EvalError::TooLow)
            } else {
                i32::try_from(*n).map(Value::Date).map_err(|_| EvalError::TooHigh)
            }
        }
        Value::Str(s) => match parse_literal_date(s, seps) {
            Ok((lit, "")) => Ok(Value::Date(lit.date)),
            _ => Err(EvalError::CantCoerce),
        },
        Value::DateTime(dt) => i32::try_from(dt.div_euclid(i64::from(MINUTES_PER_DAY)))
            .map(Value::Date)
            .map_err(|_| EvalError::DateOverflow),
        Value::Time(_) | Value::Date(_) => Err(EvalError::CantCoerce),
    }
}

fn to_time(value: &Value, seps: Separators) -> EvalResult {
    match value {
        Value::Int(n) | Value::DateTime(n) => Ok(Value::time_wrapping(*n)),
        Value::Str(s) => parse_time_of_day(s, seps)
            .map(Value::Time)
            .ok_or(EvalError::CantCoerce),
        Value::Date(_) | Value::Time(_) => Err(EvalError::CantCoerce),
    }
}

fn to_datetime(value: &Value, seps: Separators) -> EvalResult {
    match value {
        Value::Int(n) => Ok(Value::DateTime(*n)),
        Value::Date(d) => Ok(Value::DateTime(i64::from(*d) * i64::from(MINUTES_PER_DAY))),
        Value::Str(s) => match parse_literal_date(s, seps) {
            Ok((lit, "")) if lit.time.is_some() => Ok(lit.into_value()),
            _ => Err(EvalError::CantCoerce),
        },
        Value::Time(_) | Value::DateTime(_) => Err(EvalError::CantCoerce),
    }
}
