//! Built-ins that read host state. None of them are constant.

use rem_value::calendar::{ymd_from_days, MINUTES_PER_DAY, MONTH_NAMES};
use rem_value::errors::no_such_variable;
use rem_value::{EvalError, EvalResult, Value};

use super::{int_arg, str_arg, take, Args};
use crate::interpreter::Interpreter;

pub(super) fn today(interp: &mut Interpreter<'_>, _: Args) -> EvalResult {
    Ok(Value::Date(interp.env().host.today))
}

pub(super) fn realtoday(interp: &mut Interpreter<'_>, _: Args) -> EvalResult {
    Ok(Value::Date(interp.env().host.real_today))
}

pub(super) fn now(interp: &mut Interpreter<'_>, _: Args) -> EvalResult {
    Ok(Value::Time(interp.env().host.now))
}

pub(super) fn realnow(interp: &mut Interpreter<'_>, _: Args) -> EvalResult {
    Ok(Value::Time(interp.env().host.real_now))
}

pub(super) fn trigdate(interp: &mut Interpreter<'_>, _: Args) -> EvalResult {
    Ok(Value::Date(interp.env().host.trigger.date))
}

pub(super) fn trigtime(interp: &mut Interpreter<'_>, _: Args) -> EvalResult {
    Ok(Value::Time(interp.env().host.trigger.time))
}

pub(super) fn trigvalid(interp: &mut Interpreter<'_>, _: Args) -> EvalResult {
    Ok(Value::from_bool(interp.env().host.trigger.valid))
}

pub(super) fn filename(interp: &mut Interpreter<'_>, _: Args) -> EvalResult {
    Ok(Value::string(interp.env().host.file_name.as_str()))
}

/// Directory part of the current file name, `.` when there is none.
pub(super) fn filedir(interp: &mut Interpreter<'_>, _: Args) -> EvalResult {
    let name = &interp.env().host.file_name;
    let dir = name.rfind('/').map_or(".", |slash| &name[..slash]);
    Ok(Value::string(dir))
}

/// Environment variable, or the empty string when unset.
pub(super) fn getenv(_: &mut Interpreter<'_>, args: Args) -> EvalResult {
    let name = str_arg(&args, 0)?;
    Ok(Value::Str(std::env::var(name).unwrap_or_default()))
}

/// Whether a global variable exists.
pub(super) fn defined(interp: &mut Interpreter<'_>, args: Args) -> EvalResult {
    let name = str_arg(&args, 0)?;
    Ok(Value::from_bool(interp.env().variables.contains(name)))
}

/// `value(name[, default])`: a global variable by name. Locals are not
/// consulted.
pub(super) fn value(interp: &mut Interpreter<'_>, args: Args) -> EvalResult {
    let name = str_arg(&args, 0)?;
    if let Some(found) = interp.env().variables.get(name) {
        return Ok(found.clone());
    }
    if args.len() == 2 {
        return Ok(take(args, 1));
    }
    Err(no_such_variable(name))
}

/// Parameter count of a user function, or -1 if it is not defined.
pub(super) fn args(interp: &mut Interpreter<'_>, args: Args) -> EvalResult {
    let name = str_arg(&args, 0)?;
    let arity = interp
        .user_functions()
        .arity(name)
        .map_or(-1, |n| i64::try_from(n).unwrap_or(i64::MAX));
    Ok(Value::Int(arity))
}

/// `trigger(date[, time[, utc]])`: a date in the form a REM line accepts,
/// such as `5 March 2024 AT 09:30`. When `utc` is non-zero the date and time
/// are shifted by `$MinsFromUTC` first.
pub(super) fn trigger(interp: &mut Interpreter<'_>, args: Args) -> EvalResult {
    let mut date = args[0].as_date()?;
    let mut time = if args.len() > 1 { Some(args[1].as_time()?) } else { None };

    if args.len() == 3 && int_arg(&args, 2)? != 0 {
        let offset = interp.env().sysvar("MinsFromUTC")?.as_int()?;
        let per_day = i64::from(MINUTES_PER_DAY);
        let local = i64::from(date) * per_day + i64::from(time.unwrap_or(0)) + offset;
        date = i32::try_from(local.div_euclid(per_day)).map_err(|_| EvalError::DateOverflow)?;
        time = Some(i32::try_from(local.rem_euclid(per_day)).map_err(|_| EvalError::DateOverflow)?);
    }

    let civil = ymd_from_days(date);
    let month = MONTH_NAMES[usize::try_from(civil.month).unwrap_or(1) - 1];
    let text = match time {
        Some(t) => format!("{} {} {} AT {:02}:{:02}", civil.day, month, civil.year, t / 60, t % 60),
        None => format!("{} {} {}", civil.day, month, civil.year),
    };
    Ok(Value::Str(text))
}
