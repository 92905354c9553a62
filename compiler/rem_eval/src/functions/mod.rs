//! Built-in functions.
//!
//! Every built-in receives its arguments already evaluated, in call order,
//! and owns them. Arity is checked by the dispatcher against the table before
//! the function runs, so implementations may index `args` freely within
//! their declared bounds.

// Built-ins share one signature; most only read their arguments.
#![allow(
    clippy::needless_pass_by_value,
    reason = "built-ins share the fn(&mut Interpreter, Args) signature"
)]

mod calendar;
mod host;
mod misc;
mod strings;

use smallvec::SmallVec;

use rem_value::{EvalError, EvalResult, Value};

use crate::interpreter::Interpreter;
use crate::table::{lookup, Named};

/// Arguments of one call, in order.
pub type Args = SmallVec<[Value; 4]>;

pub type BuiltinFn = fn(&mut Interpreter<'_>, Args) -> EvalResult;

pub struct BuiltinFunction {
    pub name: &'static str,
    pub min_args: usize,
    /// `None` accepts any number of arguments.
    pub max_args: Option<usize>,
    /// `false` when the result depends on host state, so the expression
    /// must not be cached.
    pub constant: bool,
    pub func: BuiltinFn,
}

impl Named for BuiltinFunction {
    fn name(&self) -> &str {
        self.name
    }
}

impl std::fmt::Debug for BuiltinFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuiltinFunction")
            .field("name", &self.name)
            .field("min_args", &self.min_args)
            .field("max_args", &self.max_args)
            .finish_non_exhaustive()
    }
}

impl BuiltinFunction {
    pub fn check_arity(&self, argc: usize) -> Result<(), EvalError> {
        if argc < self.min_args {
            return Err(EvalError::TooFewArgs);
        }
        if self.max_args.is_some_and(|max| argc > max) {
            return Err(EvalError::TooManyArgs);
        }
        Ok(())
    }
}

const fn pure(name: &'static str, min_args: usize, max_args: Option<usize>, func: BuiltinFn) -> BuiltinFunction {
    BuiltinFunction { name, min_args, max_args, constant: true, func }
}

const fn stateful(name: &'static str, min_args: usize, max_args: Option<usize>, func: BuiltinFn) -> BuiltinFunction {
    BuiltinFunction { name, min_args, max_args, constant: false, func }
}

/// Built-in functions, sorted by name.
pub static BUILTINS: &[BuiltinFunction] = &[
    pure("abs", 1, Some(1), misc::abs),
    stateful("args", 1, Some(1), host::args),
    pure("asc", 1, Some(1), strings::asc),
    pure("baseyr", 0, Some(0), calendar::baseyr),
    pure("char", 1, None, strings::chr),
    pure("choose", 2, None, misc::choose),
    pure("coerce", 2, Some(2), misc::coerce),
    pure("date", 3, Some(3), calendar::date),
    pure("datetime", 2, Some(5), calendar::datetime),
    pure("day", 1, Some(1), calendar::day),
    pure("daysinmon", 2, Some(2), calendar::daysinmon),
    stateful("defined", 1, Some(1), host::defined),
    pure("easterdate", 1, Some(1), calendar::easterdate),
    stateful("filedir", 0, Some(0), host::filedir),
    stateful("filename", 0, Some(0), host::filename),
    stateful("getenv", 1, Some(1), host::getenv),
    pure("hour", 1, Some(1), calendar::hour),
    pure("iif", 1, None, misc::iif),
    pure("index", 2, Some(3), strings::index),
    pure("isleap", 1, Some(1), calendar::isleap),
    pure("language", 0, Some(0), misc::language),
    pure("lower", 1, Some(1), strings::lower),
    pure("max", 1, None, misc::max),
    pure("min", 1, None, misc::min),
    pure("minute", 1, Some(1), calendar::minute),
    pure("mon", 1, Some(1), calendar::mon),
    pure("monnum", 1, Some(1), calendar::monnum),
    stateful("now", 0, Some(0), host::now),
    pure("ord", 1, Some(1), strings::ord),
    pure("ostype", 0, Some(0), misc::ostype),
    pure("plural", 1, Some(3), strings::plural),
    stateful("realnow", 0, Some(0), host::realnow),
    stateful("realtoday", 0, Some(0), host::realtoday),
    pure("sgn", 1, Some(1), misc::sgn),
    pure("strlen", 1, Some(1), strings::strlen),
    pure("substr", 2, Some(3), strings::substr),
    pure("time", 2, Some(2), calendar::time),
    stateful("today", 0, Some(0), host::today),
    stateful("trigdate", 0, Some(0), host::trigdate),
    stateful("trigger", 1, Some(3), host::trigger),
    stateful("trigtime", 0, Some(0), host::trigtime),
    stateful("trigvalid", 0, Some(0), host::trigvalid),
    pure("typeof", 1, Some(1), misc::type_of),
    pure("upper", 1, Some(1), strings::upper),
    stateful("value", 1, Some(2), host::value),
    pure("version", 0, Some(0), misc::version),
    pure("wkday", 1, Some(1), calendar::wkday),
    pure("wkdaynum", 1, Some(1), calendar::wkdaynum),
    pure("year", 1, Some(1), calendar::year),
];

pub fn find_builtin(name: &str) -> Option<&'static BuiltinFunction> {
    lookup(BUILTINS, name)
}

/// The integer argument at `index`, or `BadType`.
fn int_arg(args: &Args, index: usize) -> Result<i64, EvalError> {
    args[index].as_int()
}

fn str_arg(args: &Args, index: usize) -> Result<&str, EvalError> {
    args[index].as_str()
}

/// Moves the argument at `index` out of `args`.
fn take(mut args: Args, index: usize) -> Value {
    args.swap_remove(index)
}
