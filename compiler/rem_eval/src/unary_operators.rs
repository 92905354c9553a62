//! Unary operators: logical not and negation, integers only.

use rem_value::errors::integer_overflow;
use rem_value::{EvalError, EvalResult, Value};

use crate::table::{lookup, Named};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum UnaryOp {
    Not,
    Neg,
}

#[derive(Debug)]
pub struct UnaryOperator {
    pub name: &'static str,
    pub precedence: u8,
    pub op: UnaryOp,
}

impl Named for UnaryOperator {
    fn name(&self) -> &str {
        self.name
    }
}

/// Unary operators, sorted by name. Unary `+` is dropped by the evaluator
/// and has no entry.
pub static UNARY_OPERATORS: &[UnaryOperator] = &[
    UnaryOperator { name: "!", precedence: 22, op: UnaryOp::Not },
    UnaryOperator { name: "-", precedence: 22, op: UnaryOp::Neg },
];

pub fn find_unary(name: &str) -> Option<&'static UnaryOperator> {
    lookup(UNARY_OPERATORS, name)
}

pub fn evaluate_unary(value: &Value, op: UnaryOp) -> EvalResult {
    let Value::Int(n) = value else {
        return Err(EvalError::BadType);
    };
    match op {
        UnaryOp::Not => Ok(Value::from_bool(*n == 0)),
        UnaryOp::Neg => n
            .checked_neg()
            .map(Value::Int)
            .ok_or_else(|| integer_overflow("negation")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    mod negation {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn negates_integers() {
            assert_eq!(evaluate_unary(&Value::Int(5), UnaryOp::Neg), Ok(Value::Int(-5)));
            assert_eq!(evaluate_unary(&Value::Int(-5), UnaryOp::Neg), Ok(Value::Int(5)));
        }

        #[test]
        fn overflow_is_reported() {
            assert_eq!(
                evaluate_unary(&Value::Int(i64::MIN), UnaryOp::Neg),
                Err(EvalError::IntegerOverflow("negation"))
            );
        }

        #[test]
        fn rejects_non_integers() {
            assert_eq!(evaluate_unary(&Value::Date(1), UnaryOp::Neg), Err(EvalError::BadType));
        }
    }

    mod logical_not {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn zero_is_false() {
            assert_eq!(evaluate_unary(&Value::Int(0), UnaryOp::Not), Ok(Value::Int(1)));
            assert_eq!(evaluate_unary(&Value::Int(5), UnaryOp::Not), Ok(Value::Int(0)));
        }

        #[test]
        fn rejects_strings() {
            assert_eq!(
                evaluate_unary(&Value::string("0"), UnaryOp::Not),
                Err(EvalError::BadType)
            );
        }
    }

    #[test]
    fn table_is_sorted() {
        assert!(crate::table::is_sorted(UNARY_OPERATORS));
        assert_eq!(find_unary("-").map(|o| o.op), Some(UnaryOp::Neg));
        assert!(find_unary("+").is_none());
    }
}
