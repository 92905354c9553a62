//! Evaluator limits.

/// Default capacity of each evaluation stack.
pub const DEFAULT_STACK_DEPTH: usize = 30;

/// Limits and lexical settings fixed for the life of an interpreter.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct EvalConfig {
    /// Pending operators allowed at once, across all nesting levels.
    pub operator_stack_depth: usize,
    /// Operands allowed at once, across all nesting levels.
    pub operand_stack_depth: usize,
    /// Line-continuation character treated as whitespace by the lexer.
    pub continuation: Option<char>,
}

impl Default for EvalConfig {
    fn default() -> Self {
        EvalConfig {
            operator_stack_depth: DEFAULT_STACK_DEPTH,
            operand_stack_depth: DEFAULT_STACK_DEPTH,
            continuation: Some('\\'),
        }
    }
}

impl EvalConfig {
    #[must_use]
    pub fn operator_stack_depth(mut self, depth: usize) -> Self {
        self.operator_stack_depth = depth;
        self
    }

    #[must_use]
    pub fn operand_stack_depth(mut self, depth: usize) -> Self {
        self.operand_stack_depth = depth;
        self
    }

    #[must_use]
    pub fn continuation(mut self, continuation: Option<char>) -> Self {
        self.continuation = continuation;
        self
    }
}
