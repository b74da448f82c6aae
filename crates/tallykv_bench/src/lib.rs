//! Benchmark helpers for TallyKV.

#![warn(missing_docs)]

pub mod utils;
