//! The tagged value produced by every expression fragment.

use std::fmt;

use crate::calendar::MINUTES_PER_DAY;
use crate::coerce::format_value;
use crate::errors::EvalError;
use crate::literal::Separators;

/// Strings longer than this are elided in [`Value::print_form`].
pub const MAX_PRINT_LEN: usize = 40;

/// A runtime value.
///
/// Strings are owned; moving a `Value` transfers the string and the compiler
/// rejects any later use of the source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    Int(i64),
    Str(String),
    /// Days since 1 January of the base year.
    Date(i32),
    /// Minutes past midnight, always in `0..1440`.
    Time(i32),
    /// `date * 1440 + time`.
    DateTime(i64),
}

/// The tag of a [`Value`], used to request coercions.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Int,
    Str,
    Date,
    Time,
    DateTime,
}

impl ValueKind {
    /// Upper-case type name as reported by `typeof()`.
    pub fn name(self) -> &'static str {
        match self {
            ValueKind::Int => "INT",
            ValueKind::Str => "STRING",
            ValueKind::Date => "DATE",
            ValueKind::Time => "TIME",
            ValueKind::DateTime => "DATETIME",
        }
    }

    /// Case-insensitive lookup of a coercion target name.
    pub fn from_name(name: &str) -> Option<ValueKind> {
        const NAMES: [(&str, ValueKind); 5] = [
            ("int", ValueKind::Int),
            ("string", ValueKind::Str),
            ("date", ValueKind::Date),
            ("time", ValueKind::Time),
            ("datetime", ValueKind::DateTime),
        ];
        NAMES
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|&(_, kind)| kind)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Int(_) => ValueKind::Int,
            Value::Str(_) => ValueKind::Str,
            Value::Date(_) => ValueKind::Date,
            Value::Time(_) => ValueKind::Time,
            Value::DateTime(_) => ValueKind::DateTime,
        }
    }

    pub fn string(s: impl Into<String>) -> Value {
        Value::Str(s.into())
    }

    /// A boolean as the integers `1` and `0`.
    pub fn from_bool(b: bool) -> Value {
        Value::Int(i64::from(b))
    }

    /// Builds a time value, wrapping into `0..1440`.
    pub fn time_wrapping(minutes: i64) -> Value {
        let wrapped = minutes.rem_euclid(i64::from(MINUTES_PER_DAY));
        // rem_euclid keeps the value in 0..1440
        Value::Time(i32::try_from(wrapped).unwrap_or(0))
    }

    /// The numeric encoding of a non-string value.
    pub fn raw_number(&self) -> Option<i64> {
        match self {
            Value::Int(n) | Value::DateTime(n) => Some(*n),
            Value::Date(n) | Value::Time(n) => Some(i64::from(*n)),
            Value::Str(_) => None,
        }
    }

    pub fn as_int(&self) -> Result<i64, EvalError> {
        match self {
            Value::Int(n) => Ok(*n),
            _ => Err(EvalError::BadType),
        }
    }

    pub fn as_str(&self) -> Result<&str, EvalError> {
        match self {
            Value::Str(s) => Ok(s),
            _ => Err(EvalError::BadType),
        }
    }

    pub fn as_date(&self) -> Result<i32, EvalError> {
        match self {
            Value::Date(d) => Ok(*d),
            _ => Err(EvalError::BadType),
        }
    }

    pub fn as_time(&self) -> Result<i32, EvalError> {
        match self {
            Value::Time(t) => Ok(*t),
            _ => Err(EvalError::BadType),
        }
    }

    /// Consumes the value and returns its string, or `BadType`.
    pub fn into_string(self) -> Result<String, EvalError> {
        match self {
            Value::Str(s) => Ok(s),
            _ => Err(EvalError::BadType),
        }
    }

    /// Rendering used in traces and variable dumps: strings are quoted and
    /// elided past [`MAX_PRINT_LEN`] characters.
    pub fn print_form(&self, seps: Separators) -> String {
        match self {
            Value::Str(s) => {
                let mut out = String::with_capacity(s.len().min(MAX_PRINT_LEN) + 5);
                out.push('"');
                out.extend(s.chars().take(MAX_PRINT_LEN));
                out.push('"');
                if s.chars().nth(MAX_PRINT_LEN).is_some() {
                    out.push_str("...");
                }
                out
            }
            other => format_value(other, seps),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => f.write_str(s),
            other => f.write_str(&format_value(other, Separators::default())),
        }
    }
}
