use std::cmp::Ordering;

use rem_value::errors::integer_overflow;
use rem_value::{coerce as coerce_value, EvalError, EvalResult, Value, ValueKind};

use super::{int_arg, str_arg, take, Args};
use crate::interpreter::Interpreter;

pub(super) fn abs(_: &mut Interpreter<'_>, args: Args) -> EvalResult {
    int_arg(&args, 0)?
        .checked_abs()
        .map(Value::Int)
        .ok_or_else(|| integer_overflow("abs"))
}

pub(super) fn sgn(_: &mut Interpreter<'_>, args: Args) -> EvalResult {
    Ok(Value::Int(int_arg(&args, 0)?.signum()))
}

/// `choose(n, v1, v2, ...)`: the n-th value, with `n` clamped to the list.
pub(super) fn choose(_: &mut Interpreter<'_>, args: Args) -> EvalResult {
    let n = int_arg(&args, 0)?;
    let last = args.len() - 1;
    let pick = usize::try_from(n).unwrap_or(0).clamp(1, last);
    Ok(take(args, pick))
}

/// Truth of an `iif` condition: a non-zero integer or a non-empty string.
fn truthy(value: &Value) -> Result<bool, EvalError> {
    match value {
        Value::Int(n) => Ok(*n != 0),
        Value::Str(s) => Ok(!s.is_empty()),
        _ => Err(EvalError::BadType),
    }
}

/// `iif(c1, v1, c2, v2, ..., otherwise)`
pub(super) fn iif(_: &mut Interpreter<'_>, args: Args) -> EvalResult {
    if args.len() % 2 == 0 {
        return Err(EvalError::IifOdd);
    }
    let mut pick = args.len() - 1;
    for (index, pair) in args.chunks_exact(2).enumerate() {
        if truthy(&pair[0])? {
            pick = index * 2 + 1;
            break;
        }
    }
    Ok(take(args, pick))
}

/// Index of the extreme argument; all arguments must share one type.
fn extreme(args: &Args, wanted: Ordering) -> Result<usize, EvalError> {
    let kind = args[0].kind();
    let mut best = 0;
    for (index, arg) in args.iter().enumerate().skip(1) {
        if arg.kind() != kind {
            return Err(EvalError::BadType);
        }
        let ordering = match (arg, &args[best]) {
            (Value::Str(a), Value::Str(b)) => a.as_bytes().cmp(b.as_bytes()),
            (a, b) => a.raw_number().cmp(&b.raw_number()),
        };
        if ordering == wanted {
            best = index;
        }
    }
    Ok(best)
}

pub(super) fn max(_: &mut Interpreter<'_>, args: Args) -> EvalResult {
    let pick = extreme(&args, Ordering::Greater)?;
    Ok(take(args, pick))
}

pub(super) fn min(_: &mut Interpreter<'_>, args: Args) -> EvalResult {
    let pick = extreme(&args, Ordering::Less)?;
    Ok(take(args, pick))
}

/// `coerce(type_name, value)`
pub(super) fn coerce(interp: &mut Interpreter<'_>, args: Args) -> EvalResult {
    let kind = ValueKind::from_name(str_arg(&args, 0)?).ok_or(EvalError::CantCoerce)?;
    let separators = interp.env().host.separators;
    coerce_value(take(args, 1), kind, separators)
}

pub(super) fn type_of(_: &mut Interpreter<'_>, args: Args) -> EvalResult {
    Ok(Value::string(args[0].kind().name()))
}

pub(super) fn version(_: &mut Interpreter<'_>, _: Args) -> EvalResult {
    Ok(Value::string(env!("CARGO_PKG_VERSION")))
}

pub(super) fn ostype(_: &mut Interpreter<'_>, _: Args) -> EvalResult {
    Ok(Value::string(if cfg!(windows) { "WINDOWS" } else { "UNIX" }))
}

pub(super) fn language(_: &mut Interpreter<'_>, _: Args) -> EvalResult {
    Ok(Value::string("English"))
}
