//! Case-insensitive sorted name tables.
//!
//! Operators, built-in functions and system variables all live in static
//! slices sorted by name, ignoring ASCII case, and are found by binary
//! search. A mis-sorted entry silently hides every entry after it, so each
//! table has a unit test asserting [`is_sorted`].

use std::cmp::Ordering;

/// Something with a name that can sit in a sorted table.
pub(crate) trait Named {
    fn name(&self) -> &str;
}

/// Compares two names ignoring ASCII case.
pub(crate) fn cmp_ignore_case(a: &str, b: &str) -> Ordering {
    a.bytes()
        .map(|b| b.to_ascii_lowercase())
        .cmp(b.bytes().map(|b| b.to_ascii_lowercase()))
}

/// Binary search for `name` in a table sorted by [`cmp_ignore_case`].
pub(crate) fn lookup<'t, T: Named>(table: &'t [T], name: &str) -> Option<&'t T> {
    position(table, name).map(|index| &table[index])
}

/// Like [`lookup`], returning the entry's index.
pub(crate) fn position<T: Named>(table: &[T], name: &str) -> Option<usize> {
    debug_assert!(is_sorted(table), "name table is not sorted");
    table
        .binary_search_by(|entry| cmp_ignore_case(entry.name(), name))
        .ok()
}

/// Whether every name is strictly greater than its predecessor.
pub(crate) fn is_sorted<T: Named>(table: &[T]) -> bool {
    table
        .windows(2)
        .all(|pair| cmp_ignore_case(pair[0].name(), pair[1].name()) == Ordering::Less)
}
