//! End-to-end evaluation scenarios through the public API: a host sets up
//! an environment, defines variables and functions, and evaluates reminder
//! expressions.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use pretty_assertions::assert_eq;
use rem_eval::{
    EvalConfig, EvalError, Environment, HostState, Interpreter, StrSource, TokenKind, UserFunctionTable,
    Value, ValueKind,
};

/// 2024-01-01, a Monday.
const JAN_1_2024: i32 = 12418;

fn host_on(today: i32) -> HostState {
    HostState {
        today,
        real_today: today,
        now: 9 * 60,
        real_now: 9 * 60,
        ..HostState::default()
    }
}

fn eval(text: &str) -> Result<Value, EvalError> {
    let mut env = Environment::default();
    Interpreter::builder(&mut env).build().eval_str(text)
}

#[test]
fn arithmetic_scenarios() {
    assert_eq!(eval("2+3*4"), Ok(Value::Int(14)));
    assert_eq!(eval("(2+3)*4"), Ok(Value::Int(20)));
    assert_eq!(eval("10-3-2"), Ok(Value::Int(5)));
    assert_eq!(eval("-5+3"), Ok(Value::Int(-2)));
    assert_eq!(eval("!0"), Ok(Value::Int(1)));
    assert_eq!(eval("!5"), Ok(Value::Int(0)));
    assert_eq!(eval("10/0"), Err(EvalError::DivisionByZero));
    assert_eq!(eval("10%0"), Err(EvalError::DivisionByZero));
}

#[test]
fn mixed_type_scenarios() {
    assert_eq!(eval("\"ab\"+\"cd\""), Ok(Value::string("abcd")));
    assert_eq!(eval("\"day \" + 5"), Ok(Value::string("day 5")));
    assert_eq!(eval("'2024-01-01' + 5"), Ok(Value::Date(JAN_1_2024 + 5)));
    assert_eq!(eval("'2024-01-06' - '2024-01-01'"), Ok(Value::Int(5)));
    assert_eq!(eval("coerce(\"int\", \"42\")"), Ok(Value::Int(42)));
    assert_eq!(eval("1 == \"1\""), Ok(Value::Int(0)));
    assert_eq!(eval("1 != \"1\""), Ok(Value::Int(1)));
    assert_eq!(eval("1 < \"1\""), Err(EvalError::BadType));
}

#[test]
fn error_codes_are_stable() {
    let err = eval("unknown_thing").unwrap_err();
    assert_eq!(err, EvalError::NoSuchVariable("unknown_thing".to_string()));
    assert_eq!(eval("strlen()").unwrap_err(), EvalError::TooFewArgs);
    assert_eq!(eval("strlen(1, 2)").unwrap_err(), EvalError::TooManyArgs);
    assert_ne!(EvalError::TooFewArgs.code(), EvalError::TooManyArgs.code());
}

#[test]
fn string_limit_is_a_system_variable() {
    let mut env = Environment::default();
    env.set_sysvar("MaxStringLen", Value::Int(4)).unwrap();
    let mut interp = Interpreter::builder(&mut env).build();
    assert_eq!(interp.eval_str("\"ab\" + \"cd\""), Ok(Value::string("abcd")));
    assert_eq!(interp.eval_str("\"ab\" + \"cde\""), Err(EvalError::StringTooLong));
    assert_eq!(interp.eval_str("$MaxStringLen"), Ok(Value::Int(4)));
}

#[test]
fn stack_limits() {
    let text = format!("{}1", "- ".repeat(31));
    assert_eq!(eval(&text), Err(EvalError::OperatorStackOverflow));

    let mut env = Environment::default();
    let mut interp = Interpreter::builder(&mut env)
        .config(EvalConfig::default().operand_stack_depth(3))
        .build();
    assert_eq!(interp.eval_str("1+(2+(3+(4)))"), Err(EvalError::OperandStackOverflow));
}

#[test]
fn reminder_for_next_week() {
    let mut env = Environment::new(host_on(JAN_1_2024));
    let mut interp = Interpreter::builder(&mut env).build();

    let eval = interp.evaluate(&mut StrSource::new("trigger(today() + 7)")).unwrap();
    assert_eq!(eval.value, Value::string("8 January 2024"));
    assert!(eval.nonconst);

    assert_eq!(
        interp.eval_str("iif($Uw == 0, \"Sunday\", \"weekday \" + wkday(today()))"),
        Ok(Value::string("weekday Monday"))
    );
    assert_eq!(interp.eval_str("now() + 90"), Ok(Value::Time(10 * 60 + 30)));
}

#[test]
fn host_defined_variables_and_functions() {
    let mut functions = UserFunctionTable::new();
    functions
        .define("daysuntil", &["d"], "d - today()")
        .unwrap();
    functions
        .define("label", &["n", "what"], "n + \" \" + plural(n, what)")
        .unwrap();

    let mut env = Environment::new(host_on(JAN_1_2024));
    env.variables.set("birthday", Value::Date(JAN_1_2024 + 40)).unwrap();
    env.variables.set("x", Value::Int(5)).unwrap();
    let mut interp = Interpreter::builder(&mut env).user_functions(&functions).build();

    assert_eq!(interp.eval_str("daysuntil(birthday)"), Ok(Value::Int(40)));
    assert_eq!(
        interp.eval_str("label(daysuntil(birthday), \"day\")"),
        Ok(Value::string("40 days"))
    );
    assert_eq!(interp.eval_str("label(1, \"week\")"), Ok(Value::string("1 week")));
    assert_eq!(interp.eval_str("daysuntil(today() + x)"), Ok(Value::Int(5)));
}

#[test]
fn separators_change_formatting() {
    let mut env = Environment::default();
    env.set_sysvar("DateSep", Value::string("-")).unwrap();
    env.set_sysvar("TimeSep", Value::string(".")).unwrap();
    let mut interp = Interpreter::builder(&mut env).build();
    assert_eq!(
        interp.eval_str("\"\" + '2024-03-05'"),
        Ok(Value::string("2024-03-05"))
    );
    assert_eq!(interp.eval_str("\"at \" + 9:05"), Ok(Value::string("at 09.05")));
    assert_eq!(interp.eval_str("typeof(coerce(\"time\", \"9.05\"))"), Ok(Value::string("TIME")));
}

#[test]
fn multiple_expressions_from_one_source() {
    let mut env = Environment::default();
    let mut interp = Interpreter::builder(&mut env).build();
    let mut src = StrSource::new("1 + 1, \"two\", 3 * 1)");

    let mut values = Vec::new();
    loop {
        let eval = interp.evaluate(&mut src).unwrap();
        values.push(eval.value);
        if eval.terminator != TokenKind::Comma {
            assert_eq!(eval.terminator, TokenKind::RightParen);
            break;
        }
    }
    assert_eq!(values, vec![Value::Int(2), Value::string("two"), Value::Int(3)]);
    assert_eq!(values[1].kind(), ValueKind::Str);
}
