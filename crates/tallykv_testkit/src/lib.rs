//! # TallyKV Testkit
//!
//! Test utilities for TallyKV.
//!
//! This crate provides:
//! - Property-based operation generators using proptest
//! - A naive reference model of the store for differential testing
//! - Script and transcript fixtures
//!
//! ## Usage
//!
//! ```rust
//! use tallykv_testkit::prelude::*;
//!
//! let out = run_transcript("SET a 10\nGET a\n", tallykv_core::Config::default());
//! assert_eq!(out, "10\n");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod model;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use crate::model::*;
}

pub use fixtures::*;
pub use generators::*;
pub use model::*;
