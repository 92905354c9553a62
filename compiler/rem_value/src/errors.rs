//! Error taxonomy for expression evaluation.
//!
//! Every variant maps to a stable numeric code through [`EvalError::code`].
//! Hosts that localize messages key on the code; the `Display` text is the
//! default English rendering.

use crate::value::Value;

/// Result of evaluation.
pub type EvalResult = Result<Value, EvalError>;

/// Errors raised while tokenizing, evaluating or coercing.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    // Syntax
    #[error("Missing quote")]
    MissingQuote,
    #[error("Missing ')'")]
    MissingRightParen,
    #[error("Illegal character `{0}'")]
    IllegalChar(char),
    #[error("Expecting binary operator")]
    ExpectingBinaryOp,
    #[error("Expecting comma")]
    ExpectComma,
    #[error("Unexpected end of line")]
    UnexpectedEol,
    #[error("Ill-formed number")]
    BadNumber,
    #[error("Ill-formed time")]
    BadTime,
    #[error("Bad date specification")]
    BadDate,

    // Stack
    #[error("Expression too complex - too many operators")]
    OperatorStackOverflow,
    #[error("Expression too complex - too many operands")]
    OperandStackOverflow,
    #[error("Internal error - operator stack underflow")]
    OperatorStackUnderflow,
    #[error("Internal error - operand stack underflow")]
    OperandStackUnderflow,
    #[error("Internal error - expression stack mismatch")]
    StackError,

    // Type
    #[error("Type mismatch")]
    BadType,
    #[error("Can't coerce")]
    CantCoerce,

    // Domain
    #[error("Division by zero")]
    DivisionByZero,
    #[error("Date overflow")]
    DateOverflow,
    #[error("Number too high")]
    TooHigh,
    #[error("Number too low")]
    TooLow,
    #[error("Domain error")]
    DomainError,
    #[error("Integer overflow in {0}")]
    IntegerOverflow(&'static str),

    // Arity
    #[error("Too few arguments")]
    TooFewArgs,
    #[error("Too many arguments")]
    TooManyArgs,
    #[error("IIF needs odd number of arguments")]
    IifOdd,

    // Identifier
    #[error("Undefined variable `{0}'")]
    NoSuchVariable(String),
    #[error("Can't modify system variable `{0}'")]
    CantModify(String),
    #[error("Undefined function `{0}'")]
    UndefinedFunction(String),
    #[error("Recursive function call detected in `{0}'")]
    RecursiveCall(String),
    #[error("Illegal identifier")]
    BadIdentifier,

    // Resource
    #[error("Out of memory")]
    NoMemory,
    #[error("String too long")]
    StringTooLong,
    #[error("Running disabled")]
    RunDisabled,
}

impl EvalError {
    /// Stable numeric code for this error.
    ///
    /// Codes are shared with the reminder host's message catalogue and never
    /// change once assigned.
    pub fn code(&self) -> u16 {
        match self {
            EvalError::MissingQuote => 2,
            EvalError::OperatorStackOverflow => 3,
            EvalError::OperandStackOverflow => 4,
            EvalError::MissingRightParen => 5,
            EvalError::UndefinedFunction(_) => 6,
            EvalError::IllegalChar(_) => 7,
            EvalError::ExpectingBinaryOp => 8,
            EvalError::NoMemory => 9,
            EvalError::BadNumber => 10,
            EvalError::OperatorStackUnderflow => 11,
            EvalError::OperandStackUnderflow => 12,
            EvalError::CantCoerce => 13,
            EvalError::BadType => 14,
            EvalError::DateOverflow => 15,
            EvalError::StackError => 16,
            EvalError::DivisionByZero => 17,
            EvalError::NoSuchVariable(_) => 18,
            EvalError::UnexpectedEol => 19,
            EvalError::BadDate => 24,
            EvalError::TooFewArgs => 25,
            EvalError::TooManyArgs => 26,
            EvalError::BadTime => 27,
            EvalError::TooHigh => 28,
            EvalError::TooLow => 29,
            EvalError::RunDisabled => 40,
            EvalError::DomainError => 41,
            EvalError::BadIdentifier => 42,
            EvalError::RecursiveCall(_) => 43,
            EvalError::CantModify(_) => 45,
            EvalError::IifOdd => 61,
            EvalError::ExpectComma => 63,
            EvalError::StringTooLong => 101,
            EvalError::IntegerOverflow(_) => 102,
        }
    }

    /// Returns `true` for errors that indicate an evaluator defect rather than
    /// a problem with the expression text.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            EvalError::OperatorStackUnderflow | EvalError::OperandStackUnderflow | EvalError::StackError
        )
    }
}

// Error constructors

#[cold]
pub fn no_such_variable(name: &str) -> EvalError {
    EvalError::NoSuchVariable(name.to_string())
}

#[cold]
pub fn undefined_function(name: &str) -> EvalError {
    EvalError::UndefinedFunction(name.to_string())
}

#[cold]
pub fn cant_modify(name: &str) -> EvalError {
    EvalError::CantModify(name.to_string())
}

#[cold]
pub fn integer_overflow(operation: &'static str) -> EvalError {
    EvalError::IntegerOverflow(operation)
}
