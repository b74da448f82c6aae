//! # TallyKV Core
//!
//! Transactional in-memory key/value engine for TallyKV.
//!
//! This crate provides:
//! - [`Store`]: string keys and values with nested `BEGIN`/`ROLLBACK`/`COMMIT`
//!   blocks and an O(1) count of keys holding a value
//! - [`Command`]: parsing of the line-oriented command language
//! - [`Session`] and [`run_lines`]: the interpreter loop shared by script
//!   files and interactive input

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod command;
pub mod config;
pub mod error;
pub mod frequency;
pub mod session;
pub mod stats;
pub mod store;
pub mod transaction;

pub use command::Command;
pub use config::Config;
pub use error::{CoreError, CoreResult};
pub use frequency::FrequencyIndex;
pub use session::{run_lines, Outcome, RunSummary, Session};
pub use stats::{StatsSnapshot, StoreStats};
pub use store::Store;
pub use transaction::{PreImage, TransactionLog};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
