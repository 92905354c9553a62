//! Literal-date and time-of-day grammar.
//!
//! ```text
//! date     = digits sep digits sep digits [ (' ' | '@') digits tsep digits ]
//! sep      = '/' | '-' | <date separator>
//! tsep     = ':' | '.' | <time separator>
//! ```
//!
//! The same grammar backs quoted date literals, string-to-date coercion and
//! the `$DateSep` / `$TimeSep` formatting rules.

use crate::calendar::{date_from_ymd, MINUTES_PER_DAY};
use crate::errors::EvalError;
use crate::value::Value;

/// Host-configurable separators used when parsing and formatting dates.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Separators {
    pub date: char,
    pub time: char,
}

impl Default for Separators {
    fn default() -> Self {
        Separators {
            date: '/',
            time: ':',
        }
    }
}

impl Separators {
    pub fn is_date_sep(self, c: char) -> bool {
        c == '/' || c == '-' || c == self.date
    }

    pub fn is_time_sep(self, c: char) -> bool {
        c == ':' || c == '.' || c == self.time
    }
}

/// A parsed date literal, with an optional time of day in minutes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LiteralDate {
    pub date: i32,
    pub time: Option<i32>,
}

impl LiteralDate {
    /// `Date` when no time part was given, `DateTime` otherwise.
    pub fn into_value(self) -> Value {
        match self.time {
            None => Value::Date(self.date),
            Some(time) => Value::DateTime(
                i64::from(self.date) * i64::from(MINUTES_PER_DAY) + i64::from(time),
            ),
        }
    }
}

/// Character scanner over the remaining text.
struct Scan<'a> {
    rest: &'a str,
}

impl<'a> Scan<'a> {
    fn peek(&self) -> Option<char> {
        self.rest.chars().next()
    }

    fn bump(&mut self) {
        let mut chars = self.rest.chars();
        chars.next();
        self.rest = chars.as_str();
    }

    fn eat(&mut self, pred: impl FnOnce(char) -> bool) -> bool {
        match self.peek() {
            Some(c) if pred(c) => {
                self.bump();
                true
            }
            _ => false,
        }
    }

    /// Consumes a (possibly empty) digit run. Saturates instead of overflowing;
    /// every caller range-checks the result.
    fn digits(&mut self) -> (i64, usize) {
        let mut value: i64 = 0;
        let mut count = 0;
        while let Some(d) = self.peek().and_then(|c| c.to_digit(10)) {
            value = value.saturating_mul(10).saturating_add(i64::from(d));
            count += 1;
            self.bump();
        }
        (value, count)
    }

    /// A digit run that must contain at least one digit.
    fn required_digits(&mut self, err: EvalError) -> Result<i64, EvalError> {
        match self.digits() {
            (_, 0) => Err(err),
            (value, _) => Ok(value),
        }
    }

    fn remainder(&self) -> &'a str {
        self.rest
    }
}

fn month_or_day(value: i64) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

/// Parses a literal date at the start of `text`.
///
/// Returns the date and the unparsed remainder. Callers decide whether
/// trailing text is acceptable.
pub fn parse_literal_date(
    text: &str,
    seps: Separators,
) -> Result<(LiteralDate, &str), EvalError> {
    let mut scan = Scan { rest: text };

    let year = scan.required_digits(EvalError::BadDate)?;
    if !scan.eat(|c| seps.is_date_sep(c)) {
        return Err(EvalError::BadDate);
    }
    let month = scan.required_digits(EvalError::BadDate)?;
    if !scan.eat(|c| seps.is_date_sep(c)) {
        return Err(EvalError::BadDate);
    }
    let day = scan.required_digits(EvalError::BadDate)?;
    let date = date_from_ymd(year, month_or_day(month), month_or_day(day))?;

    let mut time = None;
    if scan.eat(|c| c == ' ' || c == '@') {
        let hour = scan.required_digits(EvalError::BadTime)?;
        if !scan.eat(|c| seps.is_time_sep(c)) {
            return Err(EvalError::BadTime);
        }
        let minute = scan.required_digits(EvalError::BadTime)?;
        time = Some(clock_minutes(hour, minute).ok_or(EvalError::BadTime)?);
    }

    Ok((LiteralDate { date, time }, scan.remainder()))
}

/// Parses the whole of `text` as `H<tsep>M` and returns minutes past
/// midnight. Both digit runs are required; nothing may follow.
pub fn parse_time_of_day(text: &str, seps: Separators) -> Option<i32> {
    let mut scan = Scan { rest: text };
    let hour = scan.required_digits(EvalError::BadTime).ok()?;
    if !scan.eat(|c| seps.is_time_sep(c)) {
        return None;
    }
    let minute = scan.required_digits(EvalError::BadTime).ok()?;
    if !scan.remainder().is_empty() {
        return None;
    }
    clock_minutes(hour, minute)
}

fn clock_minutes(hour: i64, minute: i64) -> Option<i32> {
    if (0..=23).contains(&hour) && (0..=59).contains(&minute) {
        i32::try_from(hour * 60 + minute).ok()
    } else {
        None
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "tests use unwrap for brevity")]
mod tests;
