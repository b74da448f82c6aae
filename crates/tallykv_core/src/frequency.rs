//! Value frequency index.

use std::collections::HashMap;

/// Counts how many keys currently hold each value.
///
/// The index never stores a zero count: a value's entry is removed as soon
/// as the last key holding it is reassigned or unset, so `len()` is the
/// number of distinct live values.
///
/// Only the store mutates this type, always in the same step as the visible
/// map it mirrors.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FrequencyIndex {
    counts: HashMap<String, usize>,
}

impl FrequencyIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one more key holding `value`.
    pub(crate) fn increment(&mut self, value: &str) {
        match self.counts.get_mut(value) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(value.to_owned(), 1);
            }
        }
    }

    /// Records one fewer key holding `value`, dropping the entry at zero.
    pub(crate) fn decrement(&mut self, value: &str) {
        if let Some(count) = self.counts.get_mut(value) {
            *count -= 1;
            if *count == 0 {
                self.counts.remove(value);
            }
        }
    }

    /// Returns the number of keys holding `value`.
    #[must_use]
    pub fn count(&self, value: &str) -> usize {
        self.counts.get(value).copied().unwrap_or(0)
    }

    /// Returns the number of distinct values held by at least one key.
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns true if no key holds any value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterates over `(value, count)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(value, count)| (value.as_str(), *count))
    }
}
