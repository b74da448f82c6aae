//! Transactional key/value store.

use crate::error::{CoreError, CoreResult};
use crate::frequency::FrequencyIndex;
use crate::stats::StoreStats;
use crate::transaction::TransactionLog;
use std::collections::HashMap;
use tracing::{debug, trace};

/// In-memory key/value store with nested transaction blocks.
///
/// The store keeps three structures in step:
/// - the visible map, which every read observes,
/// - a [`FrequencyIndex`] counting keys per value, which makes
///   [`num_equal_to`](Store::num_equal_to) O(1),
/// - a stack of [`TransactionLog`]s, one per open block.
///
/// Writes always go straight to the visible map. An open block only
/// remembers the pre-image of each key it touches, so rolling back costs
/// O(keys touched in the block) and committing is a single `clear`.
///
/// ## Invariant
///
/// For every value `v`, `num_equal_to(v)` equals the number of keys `k`
/// with `get(k) == Some(v)`. The visible map and the index are only ever
/// written through the private `assign` and `remove` helpers, which update
/// both.
///
/// # Example
///
/// ```rust
/// use tallykv_core::{CoreError, Store};
///
/// let mut store = Store::new();
/// store.set("A", "10");
/// store.begin();
/// store.set("A", "20");
/// assert_eq!(store.get("A"), Some("20"));
///
/// store.rollback()?;
/// assert_eq!(store.get("A"), Some("10"));
/// assert!(matches!(store.rollback(), Err(CoreError::NoTransaction)));
/// # Ok::<(), CoreError>(())
/// ```
#[derive(Debug, Default)]
pub struct Store {
    /// Current value of every set key.
    visible: HashMap<String, String>,
    /// Number of keys holding each value.
    frequency: FrequencyIndex,
    /// Undo logs, innermost block last.
    blocks: Vec<TransactionLog>,
    /// Operation counters.
    stats: StoreStats,
}

impl Store {
    /// Creates an empty store with no open block.
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a new transaction block.
    ///
    /// Blocks nest without limit. Visible state is unchanged.
    pub fn begin(&mut self) {
        self.blocks.push(TransactionLog::new());
        self.stats.record_begin();
        debug!(depth = self.blocks.len(), "transaction block opened");
    }

    /// Sets `key` to `value`.
    pub fn set(&mut self, key: &str, value: &str) {
        self.log_pre_image(key);
        self.assign(key, value.to_owned());
        self.stats.record_set();
        trace!(key, value, "set");
    }

    /// Returns the value of `key`, or `None` if it is unset.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.stats.record_get();
        self.visible.get(key).map(String::as_str)
    }

    /// Unsets `key`. Unsetting an unset key changes nothing.
    pub fn unset(&mut self, key: &str) {
        self.log_pre_image(key);
        self.remove(key);
        self.stats.record_unset();
        trace!(key, "unset");
    }

    /// Returns the number of keys currently set to `value`.
    #[must_use]
    pub fn num_equal_to(&self, value: &str) -> usize {
        self.stats.record_lookup();
        self.frequency.count(value)
    }

    /// Closes every open block, keeping all their changes.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NoTransaction`] if no block is open. The store
    /// is left unchanged.
    pub fn commit(&mut self) -> CoreResult<()> {
        if self.blocks.is_empty() {
            self.stats.record_no_transaction();
            return Err(CoreError::NoTransaction);
        }

        let depth = self.blocks.len();
        // Visible state already holds every change; the logs are only undo data.
        self.blocks.clear();
        self.stats.record_commit();
        debug!(depth, "transaction blocks committed");
        Ok(())
    }

    /// Undoes every change made in the innermost open block and closes it.
    ///
    /// Enclosing blocks stay open with their own logs untouched.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NoTransaction`] if no block is open. The store
    /// is left unchanged.
    pub fn rollback(&mut self) -> CoreResult<()> {
        let Some(log) = self.blocks.pop() else {
            self.stats.record_no_transaction();
            return Err(CoreError::NoTransaction);
        };

        let restored = log.len();
        for (key, pre_image) in log {
            match pre_image {
                Some(value) => self.assign(&key, value),
                None => self.remove(&key),
            }
        }

        self.stats.record_rollback();
        debug!(
            depth = self.blocks.len(),
            restored, "transaction block rolled back"
        );
        Ok(())
    }

    /// Returns the number of open blocks.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.blocks.len()
    }

    /// Returns true if at least one block is open.
    #[must_use]
    pub fn in_transaction(&self) -> bool {
        !self.blocks.is_empty()
    }

    /// Returns the number of keys currently set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.visible.len()
    }

    /// Returns true if no key is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    /// Iterates over all set `(key, value)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.visible
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Returns the value frequency index.
    #[must_use]
    pub fn frequency(&self) -> &FrequencyIndex {
        &self.frequency
    }

    /// Returns the operation counters.
    #[must_use]
    pub fn stats(&self) -> &StoreStats {
        &self.stats
    }

    /// Records `key`'s current value in the innermost block on first touch.
    ///
    /// Must run before the visible map is modified.
    fn log_pre_image(&mut self, key: &str) {
        let visible = &self.visible;
        if let Some(log) = self.blocks.last_mut() {
            log.record(key, || visible.get(key).cloned());
        }
    }

    /// Maps `key` to `value`, keeping the index in step.
    fn assign(&mut self, key: &str, value: String) {
        self.frequency.increment(&value);
        if let Some(old) = self.visible.insert(key.to_owned(), value) {
            self.frequency.decrement(&old);
        }
    }

    /// Unmaps `key`, keeping the index in step.
    fn remove(&mut self, key: &str) {
        if let Some(old) = self.visible.remove(key) {
            self.frequency.decrement(&old);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Recounts the index from the visible map.
    fn assert_index_consistent(store: &Store) {
        let mut expected: HashMap<&str, usize> = HashMap::new();
        for (_, value) in store.iter() {
            *expected.entry(value).or_insert(0) += 1;
        }
        let actual: HashMap<&str, usize> = store.frequency().iter().collect();
        assert_eq!(actual, expected);
    }

    fn sorted_entries(store: &Store) -> Vec<(String, String)> {
        let mut entries: Vec<_> = store
            .iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        entries.sort();
        entries
    }

    #[test]
    fn get_missing_is_none() {
        let store = Store::new();
        assert_eq!(store.get("missing"), None);
    }

    #[test]
    fn set_and_get() {
        let mut store = Store::new();
        store.set("A", "10");
        assert_eq!(store.get("A"), Some("10"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn overwrite_moves_count() {
        let mut store = Store::new();
        store.set("A", "10");
        store.set("A", "20");
        assert_eq!(store.num_equal_to("10"), 0);
        assert_eq!(store.num_equal_to("20"), 1);
        assert_index_consistent(&store);
    }

    #[test]
    fn set_same_value_twice_counts_once() {
        let mut store = Store::new();
        store.set("A", "10");
        store.set("A", "10");
        assert_eq!(store.num_equal_to("10"), 1);
        assert_index_consistent(&store);
    }

    #[test]
    fn num_equal_to_tracks_unset() {
        let mut store = Store::new();
        store.set("A", "10");
        store.set("B", "10");
        assert_eq!(store.num_equal_to("10"), 2);

        store.unset("A");
        assert_eq!(store.num_equal_to("10"), 1);
        assert_eq!(store.get("A"), None);
        assert_index_consistent(&store);
    }

    #[test]
    fn unset_twice_is_idempotent() {
        let mut store = Store::new();
        store.set("A", "10");
        store.set("B", "10");
        store.unset("A");
        let once = sorted_entries(&store);

        store.unset("A");
        assert_eq!(sorted_entries(&store), once);
        assert_eq!(store.num_equal_to("10"), 1);
        assert_index_consistent(&store);
    }

    #[test]
    fn commit_without_transaction_fails() {
        let mut store = Store::new();
        store.set("A", "10");
        assert!(matches!(store.commit(), Err(CoreError::NoTransaction)));
        assert!(matches!(store.rollback(), Err(CoreError::NoTransaction)));
        assert_eq!(store.get("A"), Some("10"));
        assert_eq!(store.stats().no_transaction(), 2);
    }

    #[test]
    fn rollback_restores_pre_begin_state() {
        let mut store = Store::new();
        store.set("A", "10");
        store.set("B", "20");

        store.begin();
        store.set("A", "30");
        store.set("A", "40");
        store.unset("B");
        store.set("C", "10");
        store.rollback().unwrap();

        assert_eq!(store.get("A"), Some("10"));
        assert_eq!(store.get("B"), Some("20"));
        assert_eq!(store.get("C"), None);
        assert_eq!(store.num_equal_to("10"), 1);
        assert_eq!(store.num_equal_to("40"), 0);
        assert!(!store.in_transaction());
        assert_index_consistent(&store);
    }

    #[test]
    fn nested_rollback_isolation() {
        let mut store = Store::new();
        store.set("A", "1");
        store.begin();
        store.set("A", "2");
        store.begin();
        store.set("A", "3");

        store.rollback().unwrap();
        assert_eq!(store.get("A"), Some("2"));
        assert_eq!(store.depth(), 1);

        store.rollback().unwrap();
        assert_eq!(store.get("A"), Some("1"));
        assert_eq!(store.depth(), 0);
        assert_index_consistent(&store);
    }

    #[test]
    fn commit_flattens_nesting() {
        let mut store = Store::new();
        store.begin();
        store.begin();
        store.set("A", "1");
        store.commit().unwrap();

        assert_eq!(store.get("A"), Some("1"));
        assert_eq!(store.depth(), 0);
        assert!(matches!(store.rollback(), Err(CoreError::NoTransaction)));
    }

    #[test]
    fn rollback_of_inner_block_keeps_outer_changes() {
        let mut store = Store::new();
        store.begin();
        store.set("A", "10");
        store.begin();
        store.set("B", "10");
        assert_eq!(store.num_equal_to("10"), 2);

        store.rollback().unwrap();
        assert_eq!(store.get("A"), Some("10"));
        assert_eq!(store.get("B"), None);
        assert_eq!(store.num_equal_to("10"), 1);

        store.rollback().unwrap();
        assert_eq!(store.get("A"), None);
        assert_eq!(store.num_equal_to("10"), 0);
        assert!(store.frequency().is_empty());
    }

    #[test]
    fn unset_in_block_then_rollback_restores_value() {
        let mut store = Store::new();
        store.set("A", "10");
        store.begin();
        store.unset("A");
        store.unset("A");
        assert_eq!(store.num_equal_to("10"), 0);

        store.rollback().unwrap();
        assert_eq!(store.get("A"), Some("10"));
        assert_eq!(store.num_equal_to("10"), 1);
    }

    #[test]
    fn rollback_after_commit_sees_committed_state() {
        let mut store = Store::new();
        store.begin();
        store.set("A", "10");
        store.commit().unwrap();

        store.begin();
        store.set("A", "20");
        store.rollback().unwrap();
        assert_eq!(store.get("A"), Some("10"));
    }

    #[test]
    fn empty_block_rollback_changes_nothing() {
        let mut store = Store::new();
        store.set("A", "10");
        store.begin();
        store.rollback().unwrap();
        assert_eq!(store.get("A"), Some("10"));
        assert_eq!(store.num_equal_to("10"), 1);
    }

    #[test]
    fn stats_count_operations() {
        let mut store = Store::new();
        store.begin();
        store.set("A", "1");
        store.unset("A");
        let _ = store.get("A");
        let _ = store.num_equal_to("1");
        store.commit().unwrap();

        let snap = store.stats().snapshot();
        assert_eq!(snap.begins, 1);
        assert_eq!(snap.sets, 1);
        assert_eq!(snap.unsets, 1);
        assert_eq!(snap.gets, 1);
        assert_eq!(snap.lookups, 1);
        assert_eq!(snap.commits, 1);
        assert_eq!(snap.rollbacks, 0);
    }
}
