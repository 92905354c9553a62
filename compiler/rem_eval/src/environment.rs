//! Host-owned state the evaluator reads and writes.

use rem_value::{EvalError, EvalResult, Value};

use crate::host::HostState;
use crate::sysvars::SystemVariables;
use crate::variables::Variables;

/// Everything that persists across evaluations: global variables, system
/// variables and the live host values behind them.
#[derive(Clone, Debug, Default)]
pub struct Environment {
    pub variables: Variables,
    pub sysvars: SystemVariables,
    pub host: HostState,
}

impl Environment {
    pub fn new(host: HostState) -> Self {
        Environment {
            variables: Variables::new(),
            sysvars: SystemVariables::new(),
            host,
        }
    }

    /// Reads `$name`; `name` excludes the `$`.
    pub fn sysvar(&self, name: &str) -> EvalResult {
        self.sysvars.get(&self.host, name)
    }

    /// Assigns `$name`; `name` excludes the `$`.
    pub fn set_sysvar(&mut self, name: &str, value: Value) -> Result<(), EvalError> {
        self.sysvars.set(&mut self.host, name, value)
    }
}
