//! Rem Eval - the expression evaluator of the reminder engine.
//!
//! Reminder files embed expressions such as `trigger(today() + 7)` or
//! `iif($Uw == 0, "Sunday", "weekday")`. This crate evaluates them.
//!
//! # Architecture
//!
//! - [`Interpreter`]: the two-stack operator-precedence evaluator
//! - [`Environment`]: global variables, system variables and [`HostState`]
//! - `evaluate_binary` / `evaluate_unary`: type-directed operator semantics
//! - [`BUILTINS`]: the sorted built-in function table
//! - [`UserFunctions`]: the resolver for user-defined functions, with
//!   [`UserFunctionTable`] as the standard registry
//!
//! # Example
//!
//! ```
//! use rem_eval::{Environment, Interpreter};
//! use rem_value::Value;
//!
//! let mut env = Environment::default();
//! let mut interp = Interpreter::builder(&mut env).build();
//! assert_eq!(interp.eval_str("3 + 4 * 2"), Ok(Value::Int(11)));
//! ```

mod config;
mod environment;
mod functions;
mod host;
pub mod interpreter;
mod operators;
mod stack;
mod sysvars;
mod table;
mod unary_operators;
mod user_functions;
mod variables;

pub use config::{EvalConfig, DEFAULT_STACK_DEPTH};
pub use environment::Environment;
pub use functions::{find_builtin, Args, BuiltinFn, BuiltinFunction, BUILTINS};
pub use host::{HostState, TriggerInfo, DEFAULT_MAX_STRING_LEN};
pub use interpreter::{Evaluation, Interpreter, InterpreterBuilder};
pub use operators::{evaluate_binary, find_binary, ArithContext, BinaryOp, BinaryOperator, BINARY_OPERATORS};
pub use stack::with_nesting_headroom;
pub use sysvars::{find_sysvar, Access, Special, SysVarSpec, SystemVariables, SYSTEM_VARIABLES};
pub use unary_operators::{evaluate_unary, find_unary, UnaryOp, UnaryOperator, UNARY_OPERATORS};
pub use user_functions::{NoUserFunctions, UserFunction, UserFunctionTable, UserFunctions};
pub use variables::{is_valid_name, same_name, Locals, Variable, Variables, VAR_NAME_LEN};

// Re-export the value model and lexer surface hosts need
pub use rem_lexer::{CharSource, StrSource, TokenKind};
pub use rem_value::{EvalError, EvalResult, Value, ValueKind};
