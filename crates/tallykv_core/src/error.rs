//! Error types for TallyKV core.

use std::io;
use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in TallyKV core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// `COMMIT` or `ROLLBACK` was issued with no open transaction block.
    #[error("NO TRANSACTION")]
    NoTransaction,

    /// The command word on a line is not recognised.
    #[error("unknown command: {command}")]
    UnknownCommand {
        /// The offending command word, as typed.
        command: String,
    },

    /// A command was issued without one of its required arguments.
    #[error("{command} requires a {argument} argument")]
    MissingArgument {
        /// Canonical command name.
        command: &'static str,
        /// Name of the missing argument.
        argument: &'static str,
    },

    /// I/O error while reading commands or writing output.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl CoreError {
    /// Creates an unknown command error.
    pub fn unknown_command(command: impl Into<String>) -> Self {
        Self::UnknownCommand {
            command: command.into(),
        }
    }

    /// Creates a missing argument error.
    pub fn missing_argument(command: &'static str, argument: &'static str) -> Self {
        Self::MissingArgument { command, argument }
    }

    /// Returns true if the error should stop the command loop.
    ///
    /// Everything except I/O failures is reported and skipped.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}
