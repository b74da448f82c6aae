//! Property-based test generators using proptest.
//!
//! Keys and values are drawn from small alphabets so that generated
//! sequences overwrite, unset and recount the same keys and values often.

use proptest::prelude::*;
use std::fmt;

/// Strategy for generating keys from a small pool.
pub fn key_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["A", "B", "C", "D", "E"]).prop_map(str::to_owned)
}

/// Strategy for generating values from a small pool.
pub fn value_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["10", "20", "30", "X"]).prop_map(str::to_owned)
}

/// A single store operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Open a block.
    Begin,
    /// Set a key.
    Set {
        /// Key
        key: String,
        /// Value
        value: String,
    },
    /// Read a key.
    Get {
        /// Key
        key: String,
    },
    /// Unset a key.
    Unset {
        /// Key
        key: String,
    },
    /// Count keys holding a value.
    NumEqualTo {
        /// Value
        value: String,
    },
    /// Commit every open block.
    Commit,
    /// Roll back the innermost block.
    Rollback,
}

impl fmt::Display for Operation {
    /// Renders the operation as a command line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Begin => f.write_str("BEGIN"),
            Self::Set { key, value } => write!(f, "SET {key} {value}"),
            Self::Get { key } => write!(f, "GET {key}"),
            Self::Unset { key } => write!(f, "UNSET {key}"),
            Self::NumEqualTo { value } => write!(f, "NUMEQUALTO {value}"),
            Self::Commit => f.write_str("COMMIT"),
            Self::Rollback => f.write_str("ROLLBACK"),
        }
    }
}

/// Strategy for generating any operation.
pub fn operation_strategy() -> impl Strategy<Value = Operation> {
    prop_oneof![
        2 => Just(Operation::Begin),
        5 => (key_strategy(), value_strategy())
            .prop_map(|(key, value)| Operation::Set { key, value }),
        2 => key_strategy().prop_map(|key| Operation::Get { key }),
        2 => key_strategy().prop_map(|key| Operation::Unset { key }),
        2 => value_strategy().prop_map(|value| Operation::NumEqualTo { value }),
        1 => Just(Operation::Commit),
        2 => Just(Operation::Rollback),
    ]
}

/// Strategy for generating operations that never open or close a block.
pub fn mutation_strategy() -> impl Strategy<Value = Operation> {
    prop_oneof![
        3 => (key_strategy(), value_strategy())
            .prop_map(|(key, value)| Operation::Set { key, value }),
        1 => key_strategy().prop_map(|key| Operation::Unset { key }),
    ]
}

/// Strategy for generating a sequence of operations.
pub fn operation_sequence_strategy(
    min_ops: usize,
    max_ops: usize,
) -> impl Strategy<Value = Vec<Operation>> {
    prop::collection::vec(operation_strategy(), min_ops..max_ops)
}

/// Configuration for property tests.
#[derive(Debug, Clone)]
pub struct PropTestConfig {
    /// Number of test cases to run.
    pub cases: u32,
    /// Maximum shrink iterations.
    pub max_shrink_iters: u32,
}

impl Default for PropTestConfig {
    fn default() -> Self {
        Self {
            cases: 256,
            max_shrink_iters: 1000,
        }
    }
}

impl PropTestConfig {
    /// Creates a configuration for quick tests.
    #[must_use]
    pub fn quick() -> Self {
        Self {
            cases: 32,
            max_shrink_iters: 100,
        }
    }

    /// Converts to proptest config.
    #[must_use]
    pub fn to_proptest_config(&self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            ..ProptestConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::apply;
    use tallykv_core::{Command, Config, Store};

    proptest! {
        #![proptest_config(PropTestConfig::quick().to_proptest_config())]

        #[test]
        fn operation_lines_parse(op in operation_strategy()) {
            let line = op.to_string();
            let parsed = Command::parse(&line, &Config::default()).unwrap();
            prop_assert!(parsed.is_some());
            prop_assert_eq!(parsed.unwrap().to_string(), line);
        }

        #[test]
        fn mutations_keep_block_depth(
            depth in 1usize..4,
            ops in prop::collection::vec(mutation_strategy(), 0..30),
        ) {
            let mut store = Store::new();
            for _ in 0..depth {
                store.begin();
            }
            for op in &ops {
                apply(&mut store, op);
            }
            prop_assert_eq!(store.depth(), depth);
        }
    }
}
