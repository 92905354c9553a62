//! Native stack headroom for nested sub-expressions.
//!
//! Each `(` and each function argument re-enters the evaluator, so native
//! recursion depth follows the text, not the operator and operand stack
//! limits. Hosts that raise those limits may feed arbitrarily deep input.

/// Space a nesting level may use before the next one is entered.
const LEVEL_HEADROOM: usize = 64 * 1024;

/// Size of each fresh stack segment.
const SEGMENT_SIZE: usize = 1024 * 1024;

/// Evaluates one nested level, moving to a new stack segment when fewer
/// than [`LEVEL_HEADROOM`] bytes remain.
#[inline]
pub fn with_nesting_headroom<R>(level: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(LEVEL_HEADROOM, SEGMENT_SIZE, level)
}
