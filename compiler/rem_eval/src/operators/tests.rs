use pretty_assertions::assert_eq;

use super::*;

fn eval(left: Value, op: BinaryOp, right: Value) -> EvalResult {
    evaluate_binary(left, right, op, &ArithContext::default())
}

#[test]
fn table_is_sorted() {
    assert!(crate::table::is_sorted(BINARY_OPERATORS));
}

#[test]
fn lookup_by_spelling() {
    assert_eq!(find_binary("<=").map(|o| o.op), Some(BinaryOp::LtEq));
    assert_eq!(find_binary("||").map(|o| o.precedence), Some(12));
    assert!(find_binary("=").is_none());
    assert!(find_binary("&").is_none());
}

#[test]
fn precedence_ladder() {
    let prec = |name| find_binary(name).map(|o| o.precedence);
    assert!(prec("*") > prec("+"));
    assert!(prec("+") > prec("<"));
    assert!(prec("<") > prec("=="));
    assert!(prec("==") > prec("&&"));
    assert!(prec("&&") > prec("||"));
}

// === Integers ===

mod integers {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn arithmetic() {
        assert_eq!(eval(Value::Int(7), BinaryOp::Add, Value::Int(5)), Ok(Value::Int(12)));
        assert_eq!(eval(Value::Int(7), BinaryOp::Sub, Value::Int(5)), Ok(Value::Int(2)));
        assert_eq!(eval(Value::Int(7), BinaryOp::Mul, Value::Int(5)), Ok(Value::Int(35)));
    }

    #[test]
    fn division_truncates_toward_zero() {
        assert_eq!(eval(Value::Int(-7), BinaryOp::Div, Value::Int(2)), Ok(Value::Int(-3)));
        assert_eq!(eval(Value::Int(-7), BinaryOp::Mod, Value::Int(2)), Ok(Value::Int(-1)));
    }

    #[test]
    fn division_by_zero() {
        assert_eq!(eval(Value::Int(1), BinaryOp::Div, Value::Int(0)), Err(EvalError::DivisionByZero));
        assert_eq!(eval(Value::Int(1), BinaryOp::Mod, Value::Int(0)), Err(EvalError::DivisionByZero));
    }

    #[test]
    fn overflow_is_an_error() {
        assert_eq!(
            eval(Value::Int(i64::MAX), BinaryOp::Add, Value::Int(1)),
            Err(EvalError::IntegerOverflow("addition"))
        );
        assert_eq!(
            eval(Value::Int(i64::MIN), BinaryOp::Div, Value::Int(-1)),
            Err(EvalError::IntegerOverflow("division"))
        );
    }

    #[test]
    fn logic_does_not_accept_strings() {
        assert_eq!(eval(Value::Int(2), BinaryOp::And, Value::Int(3)), Ok(Value::Int(1)));
        assert_eq!(eval(Value::Int(0), BinaryOp::Or, Value::Int(0)), Ok(Value::Int(0)));
        assert_eq!(eval(Value::string("x"), BinaryOp::And, Value::Int(1)), Err(EvalError::BadType));
    }
}

// === Dates and times ===

mod dates {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn date_plus_days_either_order() {
        assert_eq!(eval(Value::Date(10), BinaryOp::Add, Value::Int(5)), Ok(Value::Date(15)));
        assert_eq!(eval(Value::Int(5), BinaryOp::Add, Value::Date(10)), Ok(Value::Date(15)));
    }

    #[test]
    fn date_minus_days() {
        assert_eq!(eval(Value::Date(10), BinaryOp::Sub, Value::Int(3)), Ok(Value::Date(7)));
        assert_eq!(eval(Value::Date(2), BinaryOp::Sub, Value::Int(3)), Err(EvalError::DateOverflow));
        assert_eq!(eval(Value::Int(3), BinaryOp::Sub, Value::Date(2)), Err(EvalError::BadType));
    }

    #[test]
    fn differences_are_integers() {
        assert_eq!(eval(Value::Date(10), BinaryOp::Sub, Value::Date(4)), Ok(Value::Int(6)));
        assert_eq!(eval(Value::Time(60), BinaryOp::Sub, Value::Time(90)), Ok(Value::Int(-30)));
        assert_eq!(
            eval(Value::DateTime(2000), BinaryOp::Sub, Value::DateTime(1000)),
            Ok(Value::Int(1000))
        );
    }

    #[test]
    fn times_wrap_around_midnight() {
        assert_eq!(eval(Value::Time(1430), BinaryOp::Add, Value::Int(20)), Ok(Value::Time(10)));
        assert_eq!(eval(Value::Time(10), BinaryOp::Sub, Value::Int(20)), Ok(Value::Time(1430)));
        assert_eq!(eval(Value::Time(0), BinaryOp::Sub, Value::Int(i64::MIN)), Ok(Value::Time(1088)));
    }

    #[test]
    fn datetime_shift() {
        assert_eq!(
            eval(Value::DateTime(1440), BinaryOp::Add, Value::Int(61)),
            Ok(Value::DateTime(1501))
        );
        assert_eq!(eval(Value::DateTime(5), BinaryOp::Sub, Value::Int(6)), Err(EvalError::DateOverflow));
    }

    #[test]
    fn mixed_kinds_do_not_add() {
        assert_eq!(eval(Value::Date(1), BinaryOp::Add, Value::Time(1)), Err(EvalError::BadType));
        assert_eq!(eval(Value::Date(1), BinaryOp::Mul, Value::Int(2)), Err(EvalError::BadType));
    }
}

// === Strings ===

mod strings {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn concatenation_coerces_the_other_side() {
        assert_eq!(
            eval(Value::string("ab"), BinaryOp::Add, Value::string("cd")),
            Ok(Value::string("abcd"))
        );
        assert_eq!(
            eval(Value::string("n="), BinaryOp::Add, Value::Int(4)),
            Ok(Value::string("n=4"))
        );
        assert_eq!(
            eval(Value::Time(75), BinaryOp::Add, Value::string("!")),
            Ok(Value::string("01:15!"))
        );
    }

    #[test]
    fn length_limit() {
        let ctx = ArithContext {
            max_string_len: Some(4),
            ..ArithContext::default()
        };
        assert_eq!(
            evaluate_binary(Value::string("ab"), Value::string("cd"), BinaryOp::Add, &ctx),
            Ok(Value::string("abcd"))
        );
        assert_eq!(
            evaluate_binary(Value::string("ab"), Value::string("cde"), BinaryOp::Add, &ctx),
            Err(EvalError::StringTooLong)
        );
    }

    #[test]
    fn subtraction_is_not_defined() {
        assert_eq!(eval(Value::string("a"), BinaryOp::Sub, Value::string("a")), Err(EvalError::BadType));
    }
}

// === Comparison ===

mod comparison {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn mismatched_kinds() {
        assert_eq!(eval(Value::Int(1), BinaryOp::Eq, Value::string("1")), Ok(Value::Int(0)));
        assert_eq!(eval(Value::Int(1), BinaryOp::NotEq, Value::string("1")), Ok(Value::Int(1)));
        assert_eq!(eval(Value::Int(1), BinaryOp::Lt, Value::string("1")), Err(EvalError::BadType));
        assert_eq!(eval(Value::Date(1), BinaryOp::GtEq, Value::Int(1)), Err(EvalError::BadType));
    }

    #[test]
    fn strings_compare_bytewise() {
        assert_eq!(eval(Value::string("B"), BinaryOp::Lt, Value::string("a")), Ok(Value::Int(1)));
        assert_eq!(eval(Value::string("ab"), BinaryOp::Gt, Value::string("a")), Ok(Value::Int(1)));
        assert_eq!(eval(Value::string("x"), BinaryOp::Eq, Value::string("x")), Ok(Value::Int(1)));
    }

    #[test]
    fn numbers_and_dates() {
        assert_eq!(eval(Value::Int(2), BinaryOp::LtEq, Value::Int(2)), Ok(Value::Int(1)));
        assert_eq!(eval(Value::Date(3), BinaryOp::Gt, Value::Date(4)), Ok(Value::Int(0)));
        assert_eq!(eval(Value::Time(3), BinaryOp::NotEq, Value::Time(4)), Ok(Value::Int(1)));
    }
}
