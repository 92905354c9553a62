//! Rem Value - the value model of the reminder expression engine.
//!
//! This crate owns everything about values that does not need an
//! interpreter:
//! - [`Value`] and [`ValueKind`]: the five-way tagged value
//! - [`EvalError`]: the error taxonomy and its stable codes
//! - [`calendar`]: day counts relative to the base year
//! - [`literal`]: the literal-date grammar and host separators
//! - [`coerce`]: the directed coercion matrix

pub mod calendar;
pub mod coerce;
pub mod errors;
pub mod literal;
mod value;

pub use coerce::{coerce, format_value};
pub use errors::{EvalError, EvalResult};
pub use literal::{parse_literal_date, parse_time_of_day, LiteralDate, Separators};
pub use value::{Value, ValueKind, MAX_PRINT_LEN};
