//! Binary operators: the sorted operator table and type-directed evaluation.
//!
//! Arithmetic does not coerce, except that `+` turns both operands into
//! strings when either one is a string. Comparisons between different kinds
//! never fail for `==` / `!=` and always fail for ordering operators.

use std::cmp::Ordering;

use rem_value::calendar::MINUTES_PER_DAY;
use rem_value::errors::integer_overflow;
use rem_value::{format_value, EvalError, EvalResult, Separators, Value};

use crate::table::{lookup, Named};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    And,
    Or,
}

/// An entry of the binary operator table.
#[derive(Debug)]
pub struct BinaryOperator {
    pub name: &'static str,
    pub precedence: u8,
    pub op: BinaryOp,
}

impl Named for BinaryOperator {
    fn name(&self) -> &str {
        self.name
    }
}

/// Binary operators, sorted by name.
pub static BINARY_OPERATORS: &[BinaryOperator] = &[
    BinaryOperator { name: "!=", precedence: 15, op: BinaryOp::NotEq },
    BinaryOperator { name: "%", precedence: 20, op: BinaryOp::Mod },
    BinaryOperator { name: "&&", precedence: 14, op: BinaryOp::And },
    BinaryOperator { name: "*", precedence: 20, op: BinaryOp::Mul },
    BinaryOperator { name: "+", precedence: 18, op: BinaryOp::Add },
    BinaryOperator { name: "-", precedence: 18, op: BinaryOp::Sub },
    BinaryOperator { name: "/", precedence: 20, op: BinaryOp::Div },
    BinaryOperator { name: "<", precedence: 16, op: BinaryOp::Lt },
    BinaryOperator { name: "<=", precedence: 16, op: BinaryOp::LtEq },
    BinaryOperator { name: "==", precedence: 15, op: BinaryOp::Eq },
    BinaryOperator { name: ">", precedence: 16, op: BinaryOp::Gt },
    BinaryOperator { name: ">=", precedence: 16, op: BinaryOp::GtEq },
    BinaryOperator { name: "||", precedence: 12, op: BinaryOp::Or },
];

pub fn find_binary(name: &str) -> Option<&'static BinaryOperator> {
    lookup(BINARY_OPERATORS, name)
}

/// Host settings that influence binary arithmetic.
#[derive(Copy, Clone, Debug)]
pub struct ArithContext {
    pub separators: Separators,
    /// Longest string `+` may build, in bytes. `None` is unlimited.
    pub max_string_len: Option<usize>,
}

impl Default for ArithContext {
    fn default() -> Self {
        ArithContext {
            separators: Separators::default(),
            max_string_len: None,
        }
    }
}

/// Evaluate a binary operation on two owned operands.
pub fn evaluate_binary(left: Value, right: Value, op: BinaryOp, ctx: &ArithContext) -> EvalResult {
    match op {
        BinaryOp::Add => eval_add(left, right, ctx),
        BinaryOp::Sub => eval_sub(&left, &right),
        BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod => match (&left, &right) {
            (Value::Int(a), Value::Int(b)) => eval_int_arith(*a, *b, op),
            _ => Err(EvalError::BadType),
        },
        BinaryOp::And | BinaryOp::Or => match (&left, &right) {
            (Value::Int(a), Value::Int(b)) => Ok(Value::from_bool(if op == BinaryOp::And {
                *a != 0 && *b != 0
            } else {
                *a != 0 || *b != 0
            })),
            _ => Err(EvalError::BadType),
        },
        BinaryOp::Eq | BinaryOp::NotEq | BinaryOp::Lt | BinaryOp::LtEq | BinaryOp::Gt | BinaryOp::GtEq => {
            eval_compare(&left, &right, op)
        }
    }
}

fn eval_int_arith(a: i64, b: i64, op: BinaryOp) -> EvalResult {
    let result = match op {
        BinaryOp::Add => a.checked_add(b).ok_or_else(|| integer_overflow("addition")),
        BinaryOp::Sub => a.checked_sub(b).ok_or_else(|| integer_overflow("subtraction")),
        BinaryOp::Mul => a.checked_mul(b).ok_or_else(|| integer_overflow("multiplication")),
        BinaryOp::Div if b == 0 => Err(EvalError::DivisionByZero),
        BinaryOp::Div => a.checked_div(b).ok_or_else(|| integer_overflow("division")),
        BinaryOp::Mod if b == 0 => Err(EvalError::DivisionByZero),
        BinaryOp::Mod => a.checked_rem(b).ok_or_else(|| integer_overflow("remainder")),
        _ => Err(EvalError::BadType),
    };
    result.map(Value::Int)
}

/// Offsets a date by `delta` days. The result may not fall before day 0.
fn shift_date(date: i32, delta: i64) -> EvalResult {
    let shifted = i64::from(date)
        .checked_add(delta)
        .ok_or(EvalError::DateOverflow)?;
    if shifted < 0 {
        return Err(EvalError::DateOverflow);
    }
    i32::try_from(shifted)
        .map(Value::Date)
        .map_err(|_| EvalError::DateOverflow)
}

fn shift_datetime(datetime: i64, delta: i64) -> EvalResult {
    match datetime.checked_add(delta) {
        Some(shifted) if shifted >= 0 => Ok(Value::DateTime(shifted)),
        _ => Err(EvalError::DateOverflow),
    }
}

fn shift_time(time: i32, delta: i64) -> Value {
    Value::time_wrapping(i64::from(time) + delta.rem_euclid(i64::from(MINUTES_PER_DAY)))
}

fn eval_add(left: Value, right: Value, ctx: &ArithContext) -> EvalResult {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => eval_int_arith(a, b, BinaryOp::Add),
        (Value::Date(d), Value::Int(n)) | (Value::Int(n), Value::Date(d)) => shift_date(d, n),
        (Value::DateTime(dt), Value::Int(n)) | (Value::Int(n), Value::DateTime(dt)) => {
            shift_datetime(dt, n)
        }
        (Value::Time(t), Value::Int(n)) | (Value::Int(n), Value::Time(t)) => Ok(shift_time(t, n)),
        (left @ Value::Str(_), right) | (left, right @ Value::Str(_)) => {
            concat(left, right, ctx)
        }
        _ => Err(EvalError::BadType),
    }
}

/// String concatenation with the length guard.
fn concat(left: Value, right: Value, ctx: &ArithContext) -> EvalResult {
    let mut joined = into_text(left, ctx.separators);
    let tail = into_text(right, ctx.separators);
    if let Some(max) = ctx.max_string_len {
        if joined.len() + tail.len() > max {
            return Err(EvalError::StringTooLong);
        }
    }
    joined.push_str(&tail);
    Ok(Value::Str(joined))
}

fn into_text(value: Value, seps: Separators) -> String {
    match value {
        Value::Str(s) => s,
        other => format_value(&other, seps),
    }
}

fn eval_sub(left: &Value, right: &Value) -> EvalResult {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => eval_int_arith(*a, *b, BinaryOp::Sub),
        (Value::Date(d), Value::Int(n)) => {
            shift_date(*d, n.checked_neg().ok_or(EvalError::DateOverflow)?)
        }
        (Value::DateTime(dt), Value::Int(n)) => {
            shift_datetime(*dt, n.checked_neg().ok_or(EvalError::DateOverflow)?)
        }
        (Value::Time(t), Value::Int(n)) => {
            Ok(shift_time(*t, -n.rem_euclid(i64::from(MINUTES_PER_DAY))))
        }
        (Value::Date(a), Value::Date(b)) | (Value::Time(a), Value::Time(b)) => {
            Ok(Value::Int(i64::from(*a) - i64::from(*b)))
        }
        (Value::DateTime(a), Value::DateTime(b)) => a
            .checked_sub(*b)
            .map(Value::Int)
            .ok_or_else(|| integer_overflow("subtraction")),
        _ => Err(EvalError::BadType),
    }
}

fn eval_compare(left: &Value, right: &Value, op: BinaryOp) -> EvalResult {
    if left.kind() != right.kind() {
        return match op {
            BinaryOp::Eq => Ok(Value::Int(0)),
            BinaryOp::NotEq => Ok(Value::Int(1)),
            _ => Err(EvalError::BadType),
        };
    }
    let ordering = match (left, right) {
        (Value::Str(a), Value::Str(b)) => a.as_bytes().cmp(b.as_bytes()),
        _ => left.raw_number().cmp(&right.raw_number()),
    };
    let result = match op {
        BinaryOp::Eq => ordering == Ordering::Equal,
        BinaryOp::NotEq => ordering != Ordering::Equal,
        BinaryOp::Lt => ordering == Ordering::Less,
        BinaryOp::LtEq => ordering != Ordering::Greater,
        BinaryOp::Gt => ordering == Ordering::Greater,
        BinaryOp::GtEq => ordering != Ordering::Less,
        _ => return Err(EvalError::BadType),
    };
    Ok(Value::from_bool(result))
}

#[cfg(test)]
mod tests;
