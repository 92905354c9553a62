//! `InterpreterBuilder` for creating Interpreter instances with various configurations.

use super::Interpreter;
use crate::config::EvalConfig;
use crate::environment::Environment;
use crate::user_functions::{NoUserFunctions, UserFunctions};

static NO_USER_FUNCTIONS: NoUserFunctions = NoUserFunctions;

/// Builder for creating Interpreter instances.
///
/// Only the environment is required. Without a user-function registry,
/// calls to anything but a built-in fail with an undefined-function error.
pub struct InterpreterBuilder<'a> {
    env: &'a mut Environment,
    user_functions: Option<&'a dyn UserFunctions>,
    config: EvalConfig,
}

impl<'a> InterpreterBuilder<'a> {
    pub fn new(env: &'a mut Environment) -> Self {
        Self {
            env,
            user_functions: None,
            config: EvalConfig::default(),
        }
    }

    /// Set the registry consulted for names that are not built-ins.
    #[must_use]
    pub fn user_functions(mut self, user_functions: &'a dyn UserFunctions) -> Self {
        self.user_functions = Some(user_functions);
        self
    }

    /// Set stack limits and lexer settings.
    #[must_use]
    pub fn config(mut self, config: EvalConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Interpreter<'a> {
        let config = self.config;
        Interpreter {
            env: self.env,
            user_functions: self.user_functions.unwrap_or(&NO_USER_FUNCTIONS),
            operators: Vec::with_capacity(config.operator_stack_depth),
            operands: Vec::with_capacity(config.operand_stack_depth),
            config,
            nonconst: false,
        }
    }
}
