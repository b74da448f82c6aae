//! CLI command implementations.

pub mod file;
pub mod help;
pub mod interactive;
pub mod stats;
