//! CLI error types.

use std::path::PathBuf;
use tallykv_core::CoreError;
use thiserror::Error;

/// Result type for CLI commands.
pub type CliResult<T> = Result<T, CliError>;

/// Errors that end a CLI run.
#[derive(Debug, Error)]
pub enum CliError {
    /// A script file could not be opened.
    #[error("cannot open script {path:?}: {source}")]
    ScriptOpen {
        /// Path given on the command line.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The command loop failed.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Statistics could not be serialised.
    #[error("failed to encode statistics: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing to the terminal failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
