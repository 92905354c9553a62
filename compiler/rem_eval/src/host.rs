//! Live host values that the evaluator reads but does not own.
//!
//! The reminder host updates these between evaluations: the date being
//! processed, the last trigger, the file being read. System variables such
//! as `$U`, `$T` and `$DateSep` are views onto this state.

use std::time::{SystemTime, UNIX_EPOCH};

use rem_value::calendar::MINUTES_PER_DAY;
use rem_value::Separators;

use crate::operators::ArithContext;

/// Default longest string `+` may build.
pub const DEFAULT_MAX_STRING_LEN: i64 = 65535;

/// Days from 1970-01-01 to the calendar base date 1990-01-01.
const UNIX_EPOCH_TO_BASE_DAYS: u64 = 7305;

/// The most recently computed trigger.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TriggerInfo {
    pub date: i32,
    /// Minutes past midnight.
    pub time: i32,
    pub valid: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HostState {
    /// The date being processed, which may differ from the real date.
    pub today: i32,
    pub real_today: i32,
    /// Minutes past midnight of the processing clock.
    pub now: i32,
    pub real_now: i32,
    pub trigger: TriggerInfo,
    pub separators: Separators,
    /// `<= 0` means unlimited.
    pub max_string_len: i64,
    /// The reminder file being read; empty when reading standard input.
    pub file_name: String,
    /// Set by the host when running external commands is forbidden.
    pub run_disabled: bool,
}

impl Default for HostState {
    fn default() -> Self {
        HostState {
            today: 0,
            real_today: 0,
            now: 0,
            real_now: 0,
            trigger: TriggerInfo::default(),
            separators: Separators::default(),
            max_string_len: DEFAULT_MAX_STRING_LEN,
            file_name: String::new(),
            run_disabled: false,
        }
    }
}

impl HostState {
    /// Host state with both clocks set from the system clock, in UTC.
    pub fn from_system_clock() -> Self {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| elapsed.as_secs());
        let days = (secs / 86_400).saturating_sub(UNIX_EPOCH_TO_BASE_DAYS);
        let today = i32::try_from(days).unwrap_or(i32::MAX);
        let now = i32::try_from((secs % 86_400) / 60).unwrap_or(0) % MINUTES_PER_DAY;
        tracing::debug!(today, now, "host clock");
        HostState {
            today,
            real_today: today,
            now,
            real_now: now,
            ..HostState::default()
        }
    }

    /// Settings for binary arithmetic.
    pub fn arith_context(&self) -> ArithContext {
        ArithContext {
            separators: self.separators,
            max_string_len: usize::try_from(self.max_string_len)
                .ok()
                .filter(|&max| max > 0),
        }
    }
}
