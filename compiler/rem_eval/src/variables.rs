//! Global variables and function-local bindings.
//!
//! Names compare case-insensitively on their first [`VAR_NAME_LEN`]
//! characters: `Very_Long_Name_1` and `VERY_LONG_NAME_2` are the same
//! variable.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use rem_value::errors::no_such_variable;
use rem_value::{EvalError, Value};

/// Significant characters of a variable name.
pub const VAR_NAME_LEN: usize = 12;

/// The significant prefix of `name`, as written.
pub(crate) fn significant(name: &str) -> &str {
    match name.char_indices().nth(VAR_NAME_LEN) {
        Some((end, _)) => &name[..end],
        None => name,
    }
}

/// Normalized lookup key for a variable name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct VarKey(String);

impl VarKey {
    fn new(name: &str) -> Self {
        VarKey(normalized(name))
    }
}

/// The significant prefix of `name`, upper-cased.
pub(crate) fn normalized(name: &str) -> String {
    significant(name).to_ascii_uppercase()
}

/// Whether two names refer to the same variable.
pub fn same_name(a: &str, b: &str) -> bool {
    significant(a).eq_ignore_ascii_case(significant(b))
}

/// Variable names start with a letter or `_` and continue with letters,
/// digits or `_`.
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// A global variable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Variable {
    name: String,
    pub value: Value,
    /// Survives [`Variables::clear`] unless everything is cleared.
    pub preserve: bool,
}

impl Variable {
    /// The name as first defined, truncated to [`VAR_NAME_LEN`].
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// The global variable table.
#[derive(Clone, Debug, Default)]
pub struct Variables {
    table: FxHashMap<VarKey, Variable>,
}

impl Variables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.table.get(&VarKey::new(name)).map(|var| &var.value)
    }

    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.table.get(&VarKey::new(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.table.contains_key(&VarKey::new(name))
    }

    /// Defines or overwrites a variable. An existing preserve flag is kept.
    pub fn set(&mut self, name: &str, value: Value) -> Result<(), EvalError> {
        if !is_valid_name(name) {
            return Err(EvalError::BadIdentifier);
        }
        tracing::debug!(name, value = ?value, "set variable");
        self.table
            .entry(VarKey::new(name))
            .and_modify(|var| var.value = value.clone())
            .or_insert_with(|| Variable {
                name: significant(name).to_string(),
                value,
                preserve: false,
            });
        Ok(())
    }

    /// Removes a variable and returns its value.
    pub fn delete(&mut self, name: &str) -> Result<Value, EvalError> {
        self.table
            .remove(&VarKey::new(name))
            .map(|var| var.value)
            .ok_or_else(|| no_such_variable(name))
    }

    /// Marks a variable as preserved, creating it as `0` if needed.
    pub fn preserve(&mut self, name: &str) -> Result<(), EvalError> {
        if !self.contains(name) {
            self.set(name, Value::Int(0))?;
        }
        if let Some(var) = self.table.get_mut(&VarKey::new(name)) {
            var.preserve = true;
        }
        Ok(())
    }

    /// Drops every variable, or only the unpreserved ones when `all` is
    /// false.
    pub fn clear(&mut self, all: bool) {
        if all {
            self.table.clear();
        } else {
            self.table.retain(|_, var| var.preserve);
        }
    }

    /// Variables sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = &Variable> {
        let mut vars: Vec<&Variable> = self.table.values().collect();
        vars.sort_by(|a, b| crate::table::cmp_ignore_case(&a.name, &b.name));
        vars.into_iter()
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

/// Parameter bindings of one user-function call, searched linearly.
#[derive(Clone, Debug, Default)]
pub struct Locals {
    bindings: SmallVec<[(String, Value); 4]>,
}

impl Locals {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, name: &str, value: Value) {
        self.bindings.push((significant(name).to_string(), value));
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bindings
            .iter()
            .find(|(bound, _)| same_name(bound, name))
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
