//! System variables: the `$Name` namespace.
//!
//! Each entry declares a type, whether scripts may assign it, and optional
//! integer bounds. Most entries are plain storage owned by
//! [`SystemVariables`]; [`Special`] entries are computed from, or written
//! through to, the [`HostState`].
//!
//! Names here never include the leading `$`.

use rem_value::calendar::{weekday_sunday_first, ymd_from_days};
use rem_value::errors::{cant_modify, no_such_variable};
use rem_value::{EvalError, EvalResult, Value, ValueKind};

use crate::host::HostState;
use crate::table::{lookup, position, Named};
use crate::variables::VAR_NAME_LEN;

/// Accessors backed by host state.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Special {
    DateSep,
    TimeSep,
    MaxStringLen,
    RunOff,
    TrigDate,
    TrigDay,
    TrigMonth,
    TrigWeekday,
    TrigYear,
    Today,
    TodayDay,
    TodayMonth,
    TodayWeekday,
    TodayYear,
}

/// Where an entry's value lives.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Access {
    /// Stored in the table, starting from this integer.
    Int(i64),
    /// Stored in the table, starting from this string.
    Str(&'static str),
    Special(Special),
}

#[derive(Debug)]
pub struct SysVarSpec {
    pub name: &'static str,
    pub modifiable: bool,
    pub kind: ValueKind,
    pub access: Access,
    pub min: Option<i64>,
    pub max: Option<i64>,
}

impl Named for SysVarSpec {
    fn name(&self) -> &str {
        self.name
    }
}

const fn int(name: &'static str, modifiable: bool, initial: i64, min: Option<i64>, max: Option<i64>) -> SysVarSpec {
    SysVarSpec { name, modifiable, kind: ValueKind::Int, access: Access::Int(initial), min, max }
}

/// A host-maintained counter or mode flag that scripts may only read.
const fn flag(name: &'static str) -> SysVarSpec {
    int(name, false, 0, None, None)
}

const fn string(name: &'static str, initial: &'static str) -> SysVarSpec {
    SysVarSpec { name, modifiable: true, kind: ValueKind::Str, access: Access::Str(initial), min: None, max: None }
}

const fn special(name: &'static str, modifiable: bool, kind: ValueKind, special: Special, min: Option<i64>) -> SysVarSpec {
    SysVarSpec { name, modifiable, kind, access: Access::Special(special), min, max: None }
}

const fn view(name: &'static str, kind: ValueKind, special: Special) -> SysVarSpec {
    self::special(name, false, kind, special, None)
}

/// The system-variable table, sorted by name ignoring case.
pub static SYSTEM_VARIABLES: &[SysVarSpec] = &[
    int("CalcUTC", true, 1, Some(0), Some(1)),
    flag("CalMode"),
    flag("Daemon"),
    special("DateSep", true, ValueKind::Str, Special::DateSep, None),
    int("DefaultPrio", true, 5000, Some(0), Some(9999)),
    flag("DontFork"),
    flag("DontQueue"),
    flag("DontTrigAts"),
    string("EndSent", ".?!"),
    string("EndSentIg", "\"')]}>"),
    int("FirstIndent", true, 0, Some(0), Some(132)),
    int("FoldYear", true, 0, Some(0), Some(1)),
    int("FormWidth", true, 72, Some(20), Some(132)),
    flag("HushMode"),
    flag("IgnoreOnce"),
    flag("InfDelta"),
    int("LatDeg", true, 45, Some(-90), Some(90)),
    int("LatMin", true, 24, Some(-59), Some(59)),
    int("LatSec", true, 0, Some(-59), Some(59)),
    string("Location", "Ottawa"),
    int("LongDeg", true, 75, Some(-180), Some(180)),
    int("LongMin", true, 39, Some(-59), Some(59)),
    int("LongSec", true, 0, Some(-59), Some(59)),
    int("MaxSatIter", true, 150, Some(10), None),
    special("MaxStringLen", true, ValueKind::Int, Special::MaxStringLen, Some(-1)),
    int("MinsFromUTC", true, 0, Some(-13 * 60), Some(13 * 60)),
    flag("NextMode"),
    flag("NumQueued"),
    flag("NumTrig"),
    flag("PSCal"),
    view("RunOff", ValueKind::Int, Special::RunOff),
    flag("SimpleCal"),
    flag("SortByDate"),
    flag("SortByPrio"),
    flag("SortByTime"),
    int("SubsIndent", true, 0, Some(0), Some(132)),
    view("T", ValueKind::Date, Special::TrigDate),
    view("Td", ValueKind::Int, Special::TrigDay),
    special("TimeSep", true, ValueKind::Str, Special::TimeSep, None),
    view("Tm", ValueKind::Int, Special::TrigMonth),
    view("Tw", ValueKind::Int, Special::TrigWeekday),
    view("Ty", ValueKind::Int, Special::TrigYear),
    view("U", ValueKind::Date, Special::Today),
    view("Ud", ValueKind::Int, Special::TodayDay),
    view("Um", ValueKind::Int, Special::TodayMonth),
    view("Uw", ValueKind::Int, Special::TodayWeekday),
    view("Uy", ValueKind::Int, Special::TodayYear),
];

pub fn find_sysvar(name: &str) -> Option<&'static SysVarSpec> {
    lookup(SYSTEM_VARIABLES, name)
}

/// Storage for the stored entries of [`SYSTEM_VARIABLES`], by table index.
#[derive(Clone, Debug)]
pub struct SystemVariables {
    values: Vec<Option<Value>>,
}

impl Default for SystemVariables {
    fn default() -> Self {
        let values = SYSTEM_VARIABLES
            .iter()
            .map(|spec| match spec.access {
                Access::Int(n) => Some(Value::Int(n)),
                Access::Str(s) => Some(Value::string(s)),
                Access::Special(_) => None,
            })
            .collect();
        SystemVariables { values }
    }
}

impl SystemVariables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, host: &HostState, name: &str) -> EvalResult {
        let index = position(SYSTEM_VARIABLES, name).ok_or_else(|| no_such_variable(name))?;
        match SYSTEM_VARIABLES[index].access {
            Access::Special(special) => Ok(read_special(host, special)),
            Access::Int(_) | Access::Str(_) => self.values[index]
                .clone()
                .ok_or_else(|| no_such_variable(name)),
        }
    }

    /// Assigns a system variable on behalf of a script.
    ///
    /// Checks run in order: existence, type, modifiability, then bounds.
    pub fn set(&mut self, host: &mut HostState, name: &str, value: Value) -> Result<(), EvalError> {
        let index = position(SYSTEM_VARIABLES, name).ok_or_else(|| no_such_variable(name))?;
        let spec = &SYSTEM_VARIABLES[index];
        if value.kind() != spec.kind {
            return Err(EvalError::BadType);
        }
        if !spec.modifiable {
            return Err(cant_modify(name));
        }
        if let Value::Int(n) = value {
            if spec.max.is_some_and(|max| n > max) {
                return Err(EvalError::TooHigh);
            }
            if spec.min.is_some_and(|min| n < min) {
                return Err(EvalError::TooLow);
            }
        }
        tracing::debug!(name = spec.name, value = ?value, "set system variable");
        match spec.access {
            Access::Special(special) => write_special(host, special, &value),
            Access::Int(_) | Access::Str(_) => {
                self.values[index] = Some(value);
                Ok(())
            }
        }
    }

    /// Updates a stored entry from the host side, ignoring modifiability and
    /// bounds. Used for counters such as `NumTrig`.
    pub fn host_set(&mut self, name: &str, value: Value) -> Result<(), EvalError> {
        let index = position(SYSTEM_VARIABLES, name).ok_or_else(|| no_such_variable(name))?;
        let spec = &SYSTEM_VARIABLES[index];
        if value.kind() != spec.kind {
            return Err(EvalError::BadType);
        }
        match spec.access {
            Access::Special(_) => Err(cant_modify(name)),
            Access::Int(_) | Access::Str(_) => {
                self.values[index] = Some(value);
                Ok(())
            }
        }
    }

    /// One line per entry, for diagnostics: name, value and, for assignable
    /// integers, the accepted range.
    pub fn dump_lines(&self, host: &HostState) -> Vec<String> {
        SYSTEM_VARIABLES
            .iter()
            .map(|spec| {
                let label = format!("${}", spec.name);
                let value = match self.get(host, spec.name) {
                    Ok(value) => value,
                    Err(err) => return format!("{label:>VAR_NAME_LEN$}  {err}"),
                };
                let shown = value.print_form(host.separators);
                if spec.modifiable && spec.kind == ValueKind::Int {
                    let low = spec.min.map_or_else(|| "(-Inf".to_string(), |min| format!("[{min}"));
                    let high = spec.max.map_or_else(|| "Inf)".to_string(), |max| format!("{max}]"));
                    format!("{label:>VAR_NAME_LEN$}  {shown:<10}  {low}, {high}")
                } else {
                    format!("{label:>VAR_NAME_LEN$}  {shown}")
                }
            })
            .collect()
    }
}

fn read_special(host: &HostState, special: Special) -> Value {
    let trigger = ymd_from_days(host.trigger.date);
    let today = ymd_from_days(host.today);
    match special {
        Special::DateSep => Value::string(host.separators.date),
        Special::TimeSep => Value::string(host.separators.time),
        Special::MaxStringLen => Value::Int(host.max_string_len),
        Special::RunOff => Value::from_bool(host.run_disabled),
        Special::TrigDate => Value::Date(host.trigger.date),
        Special::TrigDay => Value::Int(i64::from(trigger.day)),
        Special::TrigMonth => Value::Int(i64::from(trigger.month)),
        Special::TrigWeekday => Value::Int(weekday_sunday_first(host.trigger.date)),
        Special::TrigYear => Value::Int(i64::from(trigger.year)),
        Special::Today => Value::Date(host.today),
        Special::TodayDay => Value::Int(i64::from(today.day)),
        Special::TodayMonth => Value::Int(i64::from(today.month)),
        Special::TodayWeekday => Value::Int(weekday_sunday_first(host.today)),
        Special::TodayYear => Value::Int(i64::from(today.year)),
    }
}

/// The single character of a separator assignment, if it is one of `allowed`.
fn separator(value: &Value, allowed: [char; 2]) -> Result<char, EvalError> {
    let text = value.as_str()?;
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if allowed.contains(&c) => Ok(c),
        _ => Err(EvalError::BadType),
    }
}

fn write_special(host: &mut HostState, special: Special, value: &Value) -> Result<(), EvalError> {
    match special {
        Special::DateSep => host.separators.date = separator(value, ['/', '-'])?,
        Special::TimeSep => host.separators.time = separator(value, [':', '.'])?,
        Special::MaxStringLen => host.max_string_len = value.as_int()?,
        _ => return Err(EvalError::BadType),
    }
    Ok(())
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "tests use unwrap for brevity")]
mod tests;
