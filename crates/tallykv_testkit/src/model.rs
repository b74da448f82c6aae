//! Naive reference model of the store.
//!
//! [`ReferenceStore`] copies the whole map on every `BEGIN` and counts values
//! by scanning. It is slow but obviously correct, which makes it a good
//! oracle for differential tests against [`tallykv_core::Store`].

use crate::generators::Operation;
use std::collections::BTreeMap;
use tallykv_core::Store;

/// What a caller can observe from one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Observation {
    /// The operation returns nothing.
    Nothing,
    /// Result of `get`.
    Value(Option<String>),
    /// Result of `num_equal_to`.
    Count(usize),
    /// Result of `commit`/`rollback`: `false` means `NO TRANSACTION`.
    Transaction(bool),
}

/// Snapshot-based model of the transactional store.
#[derive(Debug, Default, Clone)]
pub struct ReferenceStore {
    data: BTreeMap<String, String>,
    snapshots: Vec<BTreeMap<String, String>>,
}

impl ReferenceStore {
    /// Creates an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one operation.
    pub fn apply(&mut self, op: &Operation) -> Observation {
        match op {
            Operation::Begin => {
                self.snapshots.push(self.data.clone());
                Observation::Nothing
            }
            Operation::Set { key, value } => {
                self.data.insert(key.clone(), value.clone());
                Observation::Nothing
            }
            Operation::Get { key } => Observation::Value(self.data.get(key).cloned()),
            Operation::Unset { key } => {
                self.data.remove(key);
                Observation::Nothing
            }
            Operation::NumEqualTo { value } => {
                Observation::Count(self.data.values().filter(|v| *v == value).count())
            }
            Operation::Commit => {
                let open = !self.snapshots.is_empty();
                self.snapshots.clear();
                Observation::Transaction(open)
            }
            Operation::Rollback => match self.snapshots.pop() {
                Some(snapshot) => {
                    self.data = snapshot;
                    Observation::Transaction(true)
                }
                None => Observation::Transaction(false),
            },
        }
    }

    /// Returns the current contents.
    #[must_use]
    pub fn data(&self) -> &BTreeMap<String, String> {
        &self.data
    }

    /// Returns the number of open blocks.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.snapshots.len()
    }
}

/// Applies one operation to a real store.
pub fn apply(store: &mut Store, op: &Operation) -> Observation {
    match op {
        Operation::Begin => {
            store.begin();
            Observation::Nothing
        }
        Operation::Set { key, value } => {
            store.set(key, value);
            Observation::Nothing
        }
        Operation::Get { key } => Observation::Value(store.get(key).map(str::to_owned)),
        Operation::Unset { key } => {
            store.unset(key);
            Observation::Nothing
        }
        Operation::NumEqualTo { value } => Observation::Count(store.num_equal_to(value)),
        Operation::Commit => Observation::Transaction(store.commit().is_ok()),
        Operation::Rollback => Observation::Transaction(store.rollback().is_ok()),
    }
}

/// Returns the store's contents in key order.
#[must_use]
pub fn contents(store: &Store) -> BTreeMap<String, String> {
    store
        .iter()
        .map(|(key, value)| (key.to_owned(), value.to_owned()))
        .collect()
}

/// Recomputes value counts from the store's contents.
#[must_use]
pub fn recount(store: &Store) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for (_, value) in store.iter() {
        *counts.entry(value.to_owned()).or_insert(0) += 1;
    }
    counts
}

/// Returns the store's frequency index in value order.
#[must_use]
pub fn index_counts(store: &Store) -> BTreeMap<String, usize> {
    store
        .frequency()
        .iter()
        .map(|(value, count)| (value.to_owned(), count))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(key: &str, value: &str) -> Operation {
        Operation::Set {
            key: key.into(),
            value: value.into(),
        }
    }

    #[test]
    fn model_rollback_restores_snapshot() {
        let mut model = ReferenceStore::new();
        model.apply(&set("A", "1"));
        model.apply(&Operation::Begin);
        model.apply(&set("A", "2"));
        assert_eq!(
            model.apply(&Operation::Rollback),
            Observation::Transaction(true)
        );
        assert_eq!(
            model.apply(&Operation::Get { key: "A".into() }),
            Observation::Value(Some("1".into()))
        );
        assert_eq!(model.depth(), 0);
    }

    #[test]
    fn model_counts_by_scanning() {
        let mut model = ReferenceStore::new();
        model.apply(&set("A", "10"));
        model.apply(&set("B", "10"));
        assert_eq!(
            model.apply(&Operation::NumEqualTo { value: "10".into() }),
            Observation::Count(2)
        );
    }

    #[test]
    fn recount_matches_index_on_simple_store() {
        let mut store = Store::new();
        apply(&mut store, &set("A", "10"));
        apply(&mut store, &set("B", "10"));
        apply(&mut store, &set("C", "20"));
        assert_eq!(recount(&store), index_counts(&store));
        assert_eq!(contents(&store).len(), 3);
    }
}
