//! Per-block undo log.

use std::collections::hash_map::{Entry, HashMap};

/// Value a key held before a block first modified it.
///
/// `None` means the key was unset.
pub type PreImage = Option<String>;

/// Undo log for one open transaction block.
///
/// A key is recorded at most once: the first call to [`record`] for a key
/// wins and later calls for the same key are ignored, so the log always
/// holds the value from before the block's first modification.
///
/// [`record`]: TransactionLog::record
#[derive(Debug, Default, Clone)]
pub struct TransactionLog {
    entries: HashMap<String, PreImage>,
}

impl TransactionLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `key`'s pre-image unless the key is already logged.
    ///
    /// `current` is only called on first touch. Returns true if the key was
    /// newly recorded.
    pub fn record<F>(&mut self, key: &str, current: F) -> bool
    where
        F: FnOnce() -> PreImage,
    {
        if self.entries.contains_key(key) {
            return false;
        }
        match self.entries.entry(key.to_owned()) {
            Entry::Vacant(slot) => {
                slot.insert(current());
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    /// Returns true if `key` has been touched in this block.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns the recorded pre-image for `key`, if touched.
    #[must_use]
    pub fn pre_image(&self, key: &str) -> Option<&PreImage> {
        self.entries.get(key)
    }

    /// Returns the number of keys touched in this block.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing was touched in this block.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IntoIterator for TransactionLog {
    type Item = (String, PreImage);
    type IntoIter = std::collections::hash_map::IntoIter<String, PreImage>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
