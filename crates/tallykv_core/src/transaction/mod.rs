//! Nested transaction blocks.
//!
//! Each open block is represented by an undo log holding the first
//! pre-image of every key the block touched. Rolling a block back replays
//! its log; committing drops every log at once.

mod log;

pub use log::{PreImage, TransactionLog};
