//! Store statistics.
//!
//! Counters for every store operation, readable at any time through
//! [`StoreStats::snapshot`].
//!
//! # Usage
//!
//! ```rust
//! use tallykv_core::Store;
//!
//! let mut store = Store::new();
//! store.set("A", "10");
//! let _ = store.get("A");
//!
//! let stats = store.stats().snapshot();
//! assert_eq!(stats.sets, 1);
//! assert_eq!(stats.gets, 1);
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

/// Store operation counters.
///
/// Counters are atomic so that read-only operations (`get`,
/// `num_equal_to`) can record themselves through `&self`. Values only ever
/// increase.
#[derive(Debug, Default)]
pub struct StoreStats {
    sets: AtomicU64,
    unsets: AtomicU64,
    gets: AtomicU64,
    lookups: AtomicU64,
    begins: AtomicU64,
    commits: AtomicU64,
    rollbacks: AtomicU64,
    /// `COMMIT`/`ROLLBACK` issued with no open block.
    no_transaction: AtomicU64,
}

impl StoreStats {
    /// Creates a new stats instance.
    pub fn new() -> Self {
        Self::default()
    }

    // === Increment methods (internal use) ===

    pub(crate) fn record_set(&self) {
        self.sets.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_unset(&self) {
        self.unsets.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_get(&self) {
        self.gets.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_lookup(&self) {
        self.lookups.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_begin(&self) {
        self.begins.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_commit(&self) {
        self.commits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_rollback(&self) {
        self.rollbacks.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_no_transaction(&self) {
        self.no_transaction.fetch_add(1, Ordering::Relaxed);
    }

    // === Getter methods (public API) ===

    /// Returns the number of `set` calls.
    pub fn sets(&self) -> u64 {
        self.sets.load(Ordering::Relaxed)
    }

    /// Returns the number of `unset` calls.
    pub fn unsets(&self) -> u64 {
        self.unsets.load(Ordering::Relaxed)
    }

    /// Returns the number of `get` calls.
    pub fn gets(&self) -> u64 {
        self.gets.load(Ordering::Relaxed)
    }

    /// Returns the number of `num_equal_to` calls.
    pub fn lookups(&self) -> u64 {
        self.lookups.load(Ordering::Relaxed)
    }

    /// Returns the number of blocks opened.
    pub fn begins(&self) -> u64 {
        self.begins.load(Ordering::Relaxed)
    }

    /// Returns the number of successful commits.
    pub fn commits(&self) -> u64 {
        self.commits.load(Ordering::Relaxed)
    }

    /// Returns the number of successful rollbacks.
    pub fn rollbacks(&self) -> u64 {
        self.rollbacks.load(Ordering::Relaxed)
    }

    /// Returns the number of commits and rollbacks refused for lack of a block.
    pub fn no_transaction(&self) -> u64 {
        self.no_transaction.load(Ordering::Relaxed)
    }

    /// Captures all counters at once.
    #[must_use]
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            sets: self.sets(),
            unsets: self.unsets(),
            gets: self.gets(),
            lookups: self.lookups(),
            begins: self.begins(),
            commits: self.commits(),
            rollbacks: self.rollbacks(),
            no_transaction: self.no_transaction(),
        }
    }
}

/// Point-in-time copy of [`StoreStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    /// `set` calls.
    pub sets: u64,
    /// `unset` calls.
    pub unsets: u64,
    /// `get` calls.
    pub gets: u64,
    /// `num_equal_to` calls.
    pub lookups: u64,
    /// Blocks opened.
    pub begins: u64,
    /// Successful commits.
    pub commits: u64,
    /// Successful rollbacks.
    pub rollbacks: u64,
    /// Commits and rollbacks refused for lack of a block.
    pub no_transaction: u64,
}

impl StatsSnapshot {
    /// Total number of store calls, refused ones included.
    #[must_use]
    pub fn total_operations(&self) -> u64 {
        self.sets
            + self.unsets
            + self.gets
            + self.lookups
            + self.begins
            + self.commits
            + self.rollbacks
            + self.no_transaction
    }
}
