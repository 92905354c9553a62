//! The two-stack operator-precedence evaluator.
//!
//! Expressions are evaluated straight from the token stream, without a tree.
//! Operands and pending operators live on two bounded stacks owned by the
//! [`Interpreter`]. Every nesting level (parenthesized group, function
//! argument, user-function body) records the stack heights at entry and only
//! touches entries above them, so nested evaluations share the stacks
//! without disturbing the levels below.
//!
//! One level alternates between two states:
//!
//! 1. seek an atom: unary operators are pushed until an operand is found;
//! 2. seek a binary operator or a terminator: operators of equal or higher
//!    precedence are applied before the new one is pushed, which makes every
//!    binary operator left-associative.
//!
//! A terminator (`,` `)` `]` or end of input) drains the level's operators
//! and yields its single remaining operand.

mod builder;

pub use builder::InterpreterBuilder;

use rem_lexer::{CharSource, Lexer, StrSource, TokenKind};
use rem_value::errors::{no_such_variable, undefined_function};
use rem_value::{parse_literal_date, EvalError, EvalResult, Separators, Value};

use crate::config::EvalConfig;
use crate::environment::Environment;
use crate::functions::{find_builtin, Args};
use crate::operators::{evaluate_binary, find_binary, BinaryOperator};
use crate::stack::with_nesting_headroom;
use crate::unary_operators::{evaluate_unary, find_unary, UnaryOperator};
use crate::user_functions::UserFunctions;
use crate::variables::Locals;

/// An operator waiting on the operator stack.
#[derive(Copy, Clone, Debug)]
enum PendingOp {
    Unary(&'static UnaryOperator),
    Binary(&'static BinaryOperator),
}

impl PendingOp {
    fn precedence(self) -> u8 {
        match self {
            PendingOp::Unary(op) => op.precedence,
            PendingOp::Binary(op) => op.precedence,
        }
    }

    fn name(self) -> &'static str {
        match self {
            PendingOp::Unary(op) => op.name,
            PendingOp::Binary(op) => op.name,
        }
    }
}

/// The result of one top-level evaluation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Evaluation {
    pub value: Value,
    /// The token that ended the expression: `End`, `Comma`, `RightParen`
    /// or `CloseBracket`. The source is positioned just after it.
    pub terminator: TokenKind,
    /// Set when the value depends on variables or host state and must not
    /// be cached.
    pub nonconst: bool,
}

pub struct Interpreter<'a> {
    env: &'a mut Environment,
    user_functions: &'a dyn UserFunctions,
    config: EvalConfig,
    operators: Vec<PendingOp>,
    operands: Vec<Value>,
    nonconst: bool,
}

impl<'a> Interpreter<'a> {
    pub fn builder(env: &'a mut Environment) -> InterpreterBuilder<'a> {
        InterpreterBuilder::new(env)
    }

    pub fn env(&self) -> &Environment {
        &*self.env
    }

    pub fn env_mut(&mut self) -> &mut Environment {
        &mut *self.env
    }

    pub fn user_functions(&self) -> &'a dyn UserFunctions {
        self.user_functions
    }

    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    /// Evaluates a complete expression string. Anything left after the
    /// terminator is ignored.
    pub fn eval_str(&mut self, text: &str) -> EvalResult {
        self.evaluate(&mut StrSource::new(text)).map(|eval| eval.value)
    }

    /// Evaluates one expression from `src` with no local bindings.
    pub fn evaluate(&mut self, src: &mut dyn CharSource) -> Result<Evaluation, EvalError> {
        self.evaluate_with_locals(src, None)
    }

    /// Evaluates one expression from `src`, resolving identifiers against
    /// `locals` before the global tables.
    ///
    /// On failure both stacks are cut back to their heights at entry, so the
    /// interpreter is ready for the next evaluation.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn evaluate_with_locals(
        &mut self,
        src: &mut dyn CharSource,
        locals: Option<&Locals>,
    ) -> Result<Evaluation, EvalError> {
        let op_base = self.operators.len();
        let val_base = self.operands.len();
        let outer_nonconst = std::mem::replace(&mut self.nonconst, false);

        let result = self.eval_level(src, locals);
        let nonconst = self.nonconst;
        self.nonconst = outer_nonconst || nonconst;

        match result {
            Ok((value, terminator)) => Ok(Evaluation {
                value,
                terminator,
                nonconst,
            }),
            Err(err) => {
                self.operators.truncate(op_base);
                self.operands.truncate(val_base);
                tracing::debug!(%err, code = err.code(), "evaluation failed");
                Err(err)
            }
        }
    }

    fn lexer(&self) -> Lexer {
        Lexer::new(self.env.host.separators.time).with_continuation(self.config.continuation)
    }

    /// One nesting level: evaluates up to a terminator and returns the
    /// level's value with the terminator kind.
    fn eval_level(
        &mut self,
        src: &mut dyn CharSource,
        locals: Option<&Locals>,
    ) -> Result<(Value, TokenKind), EvalError> {
        let op_base = self.operators.len();
        let val_base = self.operands.len();

        loop {
            self.seek_atom(src, locals)?;

            let token = self.lexer().next_token(src)?;
            if token.is_terminator() {
                while self.operators.len() > op_base {
                    self.apply_top()?;
                }
                if self.operands.len() != val_base + 1 {
                    return Err(EvalError::StackError);
                }
                let value = self.pop_operand()?;
                return Ok((value, token.kind));
            }

            let op = match token.kind {
                TokenKind::Operator => find_binary(&token.text),
                _ => None,
            }
            .ok_or(EvalError::ExpectingBinaryOp)?;

            while self.operators.len() > op_base
                && self
                    .operators
                    .last()
                    .is_some_and(|top| top.precedence() >= op.precedence)
            {
                self.apply_top()?;
            }
            self.push_operator(PendingOp::Binary(op))?;
        }
    }

    /// Reads unary operators up to and including one operand, which is
    /// pushed.
    fn seek_atom(&mut self, src: &mut dyn CharSource, locals: Option<&Locals>) -> Result<(), EvalError> {
        loop {
            let token = self.lexer().next_token(src)?;
            let value = match token.kind {
                TokenKind::End => return Err(EvalError::UnexpectedEol),
                TokenKind::LeftParen => {
                    let (value, terminator) =
                        with_nesting_headroom(|| self.eval_level(src, locals))?;
                    if terminator != TokenKind::RightParen {
                        return Err(EvalError::MissingRightParen);
                    }
                    value
                }
                TokenKind::Operator if token.text == "+" => continue,
                TokenKind::Operator => {
                    let op = find_unary(&token.text)
                        .ok_or_else(|| EvalError::IllegalChar(token.first_char()))?;
                    self.push_operator(PendingOp::Unary(op))?;
                    continue;
                }
                TokenKind::Call => self.eval_call(&token.text, src, locals)?,
                TokenKind::Str => Value::Str(token.text),
                TokenKind::Date => date_literal(&token.text, self.env.host.separators)?,
                TokenKind::Word => self.word_value(&token.text, locals)?,
                TokenKind::Comma | TokenKind::RightParen | TokenKind::CloseBracket => {
                    return Err(EvalError::IllegalChar(token.first_char()));
                }
            };
            return self.push_operand(value);
        }
    }

    /// Evaluates the arguments of `name(` onto the operand stack and calls
    /// the function.
    fn eval_call(
        &mut self,
        name: &str,
        src: &mut dyn CharSource,
        locals: Option<&Locals>,
    ) -> EvalResult {
        let mut argc = 0;
        if self.lexer().peek_non_blank(src) == Some(')') {
            src.advance();
        } else {
            loop {
                let (value, terminator) = with_nesting_headroom(|| self.eval_level(src, locals))?;
                self.push_operand(value)?;
                argc += 1;
                match terminator {
                    TokenKind::Comma => {}
                    TokenKind::RightParen => break,
                    _ => return Err(EvalError::ExpectComma),
                }
            }
        }
        self.call_function(name, argc)
    }

    /// Calls `name` with the top `argc` operands as arguments.
    ///
    /// Built-in arity is checked before anything is popped; user functions
    /// check their own arity in [`UserFunctions::invoke`]. On failure the
    /// caller's error path cuts the stacks back.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn call_function(&mut self, name: &str, argc: usize) -> EvalResult {
        if let Some(builtin) = find_builtin(name) {
            builtin.check_arity(argc)?;
            if !builtin.constant {
                self.nonconst = true;
            }
            let args = self.pop_args(argc)?;
            let result = (builtin.func)(self, args);
            match &result {
                Ok(value) => tracing::debug!(name = builtin.name, ?value, "built-in returned"),
                Err(err) => tracing::debug!(name = builtin.name, %err, "built-in failed"),
            }
            return result;
        }

        // The resolver checks recursion before arity.
        let user_functions = self.user_functions;
        if user_functions.arity(name).is_none() {
            return Err(undefined_function(name));
        }
        let args = self.pop_args(argc)?;
        user_functions.invoke(name, args, self)
    }

    /// Value of a word token: a number, a time or an identifier.
    fn word_value(&mut self, word: &str, locals: Option<&Locals>) -> EvalResult {
        if word.starts_with(|c: char| c.is_ascii_digit()) {
            number_or_time(word, self.env.host.separators.time)
        } else {
            self.resolve(word, locals)
        }
    }

    /// Looks up an identifier: locals first, then `$` system variables or
    /// globals. Anything but a local makes the expression non-constant.
    pub fn resolve(&mut self, name: &str, locals: Option<&Locals>) -> EvalResult {
        if let Some(value) = locals.and_then(|locals| locals.get(name)) {
            return Ok(value.clone());
        }
        self.nonconst = true;
        if let Some(sysvar) = name.strip_prefix('$') {
            return self.env.sysvar(sysvar);
        }
        self.env
            .variables
            .get(name)
            .cloned()
            .ok_or_else(|| no_such_variable(name))
    }

    // Stack primitives

    fn push_operator(&mut self, op: PendingOp) -> Result<(), EvalError> {
        if self.operators.len() >= self.config.operator_stack_depth {
            return Err(EvalError::OperatorStackOverflow);
        }
        self.operators.push(op);
        Ok(())
    }

    fn push_operand(&mut self, value: Value) -> Result<(), EvalError> {
        if self.operands.len() >= self.config.operand_stack_depth {
            return Err(EvalError::OperandStackOverflow);
        }
        self.operands.push(value);
        Ok(())
    }

    fn pop_operand(&mut self) -> EvalResult {
        self.operands.pop().ok_or(EvalError::OperandStackUnderflow)
    }

    fn pop_args(&mut self, argc: usize) -> Result<Args, EvalError> {
        let start = self
            .operands
            .len()
            .checked_sub(argc)
            .ok_or(EvalError::OperandStackUnderflow)?;
        Ok(self.operands.drain(start..).collect())
    }

    /// Pops the top operator, applies it and pushes the result.
    fn apply_top(&mut self) -> Result<(), EvalError> {
        let op = self.operators.pop().ok_or(EvalError::OperatorStackUnderflow)?;
        let result = match op {
            PendingOp::Unary(unary) => {
                let operand = self.pop_operand()?;
                evaluate_unary(&operand, unary.op)
            }
            PendingOp::Binary(binary) => {
                let right = self.pop_operand()?;
                let left = self.pop_operand()?;
                evaluate_binary(left, right, binary.op, &self.env.host.arith_context())
            }
        };
        let value = result.inspect_err(|err| tracing::debug!(op = op.name(), %err, "operator failed"))?;
        self.operands.push(value);
        Ok(())
    }
}

impl std::fmt::Debug for Interpreter<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Interpreter")
            .field("config", &self.config)
            .field("operators", &self.operators.len())
            .field("operands", &self.operands.len())
            .field("nonconst", &self.nonconst)
            .finish_non_exhaustive()
    }
}

/// A quoted date literal: the whole text must be a date or date-time.
fn date_literal(text: &str, separators: Separators) -> EvalResult {
    let (literal, rest) = parse_literal_date(text, separators)?;
    if !rest.is_empty() {
        return Err(EvalError::BadDate);
    }
    Ok(literal.into_value())
}

/// `123` or `H:MM`, where the time separator may also be `.` or the host's.
fn number_or_time(word: &str, time_sep: char) -> EvalResult {
    let digits_end = word
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(word.len());
    let (digits, rest) = word.split_at(digits_end);
    let number = digits.bytes().try_fold(0i64, |acc, b| {
        acc.checked_mul(10)?.checked_add(i64::from(b - b'0'))
    });

    let mut rest_chars = rest.chars();
    match rest_chars.next() {
        None => number.map(Value::Int).ok_or(EvalError::BadNumber),
        Some(sep) if sep == ':' || sep == '.' || sep == time_sep => {
            let minutes = rest_chars.as_str();
            if minutes.is_empty() || !minutes.bytes().all(|b| b.is_ascii_digit()) {
                return Err(EvalError::BadTime);
            }
            let hour = number.filter(|&h| h <= 23).ok_or(EvalError::BadTime)?;
            let minute = minutes
                .parse::<i64>()
                .ok()
                .filter(|&m| m <= 59)
                .ok_or(EvalError::BadTime)?;
            Ok(Value::time_wrapping(hour * 60 + minute))
        }
        Some(_) => Err(EvalError::BadNumber),
    }
}
