//! User-defined functions.
//!
//! The evaluator only knows the [`UserFunctions`] trait; hosts may resolve
//! names however they like. [`UserFunctionTable`] is the standard registry:
//! a function is a parameter list and an expression body, evaluated with the
//! caller's interpreter and the parameters bound as locals.

use std::cell::Cell;

use rustc_hash::FxHashMap;

use rem_lexer::StrSource;
use rem_value::errors::undefined_function;
use rem_value::{EvalError, EvalResult};

use crate::functions::Args;
use crate::interpreter::Interpreter;
use crate::variables::{is_valid_name, normalized, same_name, significant, Locals};

/// Resolver for functions that are not built-ins.
pub trait UserFunctions {
    /// Parameter count of `name`, or `None` if it is not defined.
    fn arity(&self, name: &str) -> Option<usize>;

    /// Calls `name`. Implementations check `args.len()` against
    /// [`arity`](Self::arity) themselves, after refusing recursion.
    fn invoke(&self, name: &str, args: Args, interp: &mut Interpreter<'_>) -> EvalResult;
}

/// A registry with no functions.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoUserFunctions;

impl UserFunctions for NoUserFunctions {
    fn arity(&self, _: &str) -> Option<usize> {
        None
    }

    fn invoke(&self, name: &str, _: Args, _: &mut Interpreter<'_>) -> EvalResult {
        Err(undefined_function(name))
    }
}

#[derive(Debug)]
pub struct UserFunction {
    name: String,
    params: Vec<String>,
    body: String,
    /// Set while the body is being evaluated.
    active: Cell<bool>,
}

impl UserFunction {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &[String] {
        &self.params
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

/// Clears a function's active flag on drop, even if evaluation unwinds.
struct ActiveGuard<'f> {
    active: &'f Cell<bool>,
}

impl<'f> ActiveGuard<'f> {
    fn enter(active: &'f Cell<bool>) -> Self {
        active.set(true);
        ActiveGuard { active }
    }
}

impl Drop for ActiveGuard<'_> {
    fn drop(&mut self) {
        self.active.set(false);
    }
}

/// Functions keyed by their case-insensitive, length-bounded name.
#[derive(Debug, Default)]
pub struct UserFunctionTable {
    functions: FxHashMap<String, UserFunction>,
}

impl UserFunctionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defines `name(params) = body`, replacing any previous definition.
    pub fn define<S: AsRef<str>>(&mut self, name: &str, params: &[S], body: &str) -> Result<(), EvalError> {
        if !is_valid_name(name) {
            return Err(EvalError::BadIdentifier);
        }
        let mut bound: Vec<String> = Vec::with_capacity(params.len());
        for param in params {
            let param = param.as_ref();
            if !is_valid_name(param) || bound.iter().any(|prev| same_name(prev, param)) {
                return Err(EvalError::BadIdentifier);
            }
            bound.push(significant(param).to_string());
        }
        let replaced = self
            .functions
            .insert(
                normalized(name),
                UserFunction {
                    name: significant(name).to_string(),
                    params: bound,
                    body: body.to_string(),
                    active: Cell::new(false),
                },
            )
            .is_some();
        tracing::debug!(name, replaced, "defined user function");
        Ok(())
    }

    /// Removes a definition. Returns whether it existed.
    pub fn undefine(&mut self, name: &str) -> bool {
        self.functions.remove(&normalized(name)).is_some()
    }

    pub fn get(&self, name: &str) -> Option<&UserFunction> {
        self.functions.get(&normalized(name))
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

impl UserFunctions for UserFunctionTable {
    fn arity(&self, name: &str) -> Option<usize> {
        self.get(name).map(|func| func.params.len())
    }

    #[tracing::instrument(level = "debug", skip(self, args, interp))]
    fn invoke(&self, name: &str, args: Args, interp: &mut Interpreter<'_>) -> EvalResult {
        let func = self.get(name).ok_or_else(|| undefined_function(name))?;
        if func.active.get() {
            return Err(EvalError::RecursiveCall(func.name.clone()));
        }
        if args.len() < func.params.len() {
            return Err(EvalError::TooFewArgs);
        }
        if args.len() > func.params.len() {
            return Err(EvalError::TooManyArgs);
        }

        let mut locals = Locals::new();
        for (param, value) in func.params.iter().zip(args) {
            locals.bind(param, value);
        }

        let _active = ActiveGuard::enter(&func.active);
        let body = func.body.trim_start();
        let body = body.strip_prefix('[').unwrap_or(body);
        interp
            .evaluate_with_locals(&mut StrSource::new(body), Some(&locals))
            .map(|evaluation| evaluation.value)
    }
}
