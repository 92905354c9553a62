//! String built-ins. Positions are 1-based and counted in characters.

use rem_value::{EvalError, EvalResult, Value};

use super::{int_arg, str_arg, take, Args};
use crate::interpreter::Interpreter;

pub(super) fn strlen(_: &mut Interpreter<'_>, args: Args) -> EvalResult {
    let len = str_arg(&args, 0)?.chars().count();
    Ok(Value::Int(i64::try_from(len).unwrap_or(i64::MAX)))
}

/// Code of the first character, 0 for the empty string.
pub(super) fn asc(_: &mut Interpreter<'_>, args: Args) -> EvalResult {
    let first = str_arg(&args, 0)?.chars().next().map_or(0, u32::from);
    Ok(Value::Int(i64::from(first)))
}

/// Validated character code. Negative codes name the upper half of the
/// byte range, as signed chars do.
fn char_from_code(code: i64) -> Result<char, EvalError> {
    if code < -128 {
        return Err(EvalError::TooLow);
    }
    if code > 255 {
        return Err(EvalError::TooHigh);
    }
    let byte = u8::try_from(code.rem_euclid(256)).map_err(|_| EvalError::TooHigh)?;
    Ok(char::from(byte))
}

/// `char(n, ...)`: builds a string from character codes. A lone `0` yields
/// the empty string; within a longer list `0` is too low.
pub(super) fn chr(_: &mut Interpreter<'_>, args: Args) -> EvalResult {
    if let [only] = args.as_slice() {
        let code = only.as_int()?;
        let c = char_from_code(code)?;
        return Ok(Value::Str(if code == 0 { String::new() } else { c.to_string() }));
    }
    let mut out = String::with_capacity(args.len());
    for arg in &args {
        let code = arg.as_int()?;
        if code == 0 {
            return Err(EvalError::TooLow);
        }
        out.push(char_from_code(code)?);
    }
    Ok(Value::Str(out))
}

pub(super) fn upper(_: &mut Interpreter<'_>, args: Args) -> EvalResult {
    Ok(Value::Str(take(args, 0).into_string()?.to_uppercase()))
}

pub(super) fn lower(_: &mut Interpreter<'_>, args: Args) -> EvalResult {
    Ok(Value::Str(take(args, 0).into_string()?.to_lowercase()))
}

/// Byte offset of the 1-based character position `pos`, clamped to the
/// string.
fn offset_of(s: &str, pos: i64) -> usize {
    let skip = usize::try_from(pos.saturating_sub(1)).unwrap_or(0);
    s.char_indices().nth(skip).map_or(s.len(), |(offset, _)| offset)
}

/// `substr(s, start[, end])`: characters `start..=end`, clamped.
pub(super) fn substr(_: &mut Interpreter<'_>, args: Args) -> EvalResult {
    let s = str_arg(&args, 0)?;
    let start = int_arg(&args, 1)?;
    let end = if args.len() == 3 { Some(int_arg(&args, 2)?) } else { None };
    let from = offset_of(s, start);
    let to = match end {
        Some(end) => offset_of(s, end.saturating_add(1)).max(from),
        None => s.len(),
    };
    Ok(Value::string(&s[from..to]))
}

/// `index(haystack, needle[, start])`: 1-based character position of the
/// first match at or after `start`, 0 when absent.
pub(super) fn index(_: &mut Interpreter<'_>, args: Args) -> EvalResult {
    let haystack = str_arg(&args, 0)?;
    let needle = str_arg(&args, 1)?;
    let from = if args.len() == 3 { offset_of(haystack, int_arg(&args, 2)?) } else { 0 };
    let position = haystack[from..]
        .find(needle)
        .map_or(0, |found| haystack[..from + found].chars().count() + 1);
    Ok(Value::Int(i64::try_from(position).unwrap_or(i64::MAX)))
}

/// `ord(n)`: `1st`, `2nd`, `3rd`, `4th`, `11th`, `21st`, ...
pub(super) fn ord(_: &mut Interpreter<'_>, args: Args) -> EvalResult {
    let n = int_arg(&args, 0)?;
    let tens = (n % 100).abs();
    let suffix = match (tens % 10, tens) {
        (1, t) if t != 11 => "st",
        (2, t) if t != 12 => "nd",
        (3, t) if t != 13 => "rd",
        _ => "th",
    };
    Ok(Value::Str(format!("{n}{suffix}")))
}

/// `plural(n)`, `plural(n, word)`, `plural(n, one, many)`.
pub(super) fn plural(_: &mut Interpreter<'_>, mut args: Args) -> EvalResult {
    let singular = int_arg(&args, 0)? == 1;
    match args.len() {
        1 => Ok(Value::string(if singular { "" } else { "s" })),
        2 => {
            let mut word = args.swap_remove(1).into_string()?;
            if !singular {
                word.push('s');
            }
            Ok(Value::Str(word))
        }
        _ => {
            str_arg(&args, 1)?;
            str_arg(&args, 2)?;
            Ok(take(args, if singular { 1 } else { 2 }))
        }
    }
}
