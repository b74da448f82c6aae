//! Command session and line driver.
//!
//! A [`Session`] owns one [`Store`] and turns parsed [`Command`]s into
//! [`Outcome`]s. [`run_lines`] is the loop shared by script files and
//! interactive input: it reads lines, executes them, and writes results in
//! either interactive or transcript layout.

use crate::command::Command;
use crate::config::Config;
use crate::error::{CoreError, CoreResult};
use crate::store::Store;
use std::borrow::Cow;
use std::fmt;
use std::io::{BufRead, Write};
use tracing::{debug, warn};

/// Result of executing one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The command produces no output.
    Silent,
    /// Result of `GET`; `None` renders as `NULL`.
    Value(Option<String>),
    /// Result of `NUMEQUALTO`.
    Count(usize),
    /// `COMMIT` or `ROLLBACK` with no open block.
    NoTransaction,
    /// `END` was reached.
    End,
}

impl Outcome {
    /// Returns true if the outcome writes nothing.
    #[must_use]
    pub fn is_silent(&self) -> bool {
        matches!(self, Self::Silent | Self::End)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Silent | Self::End => Ok(()),
            Self::Value(Some(value)) => f.write_str(value),
            Self::Value(None) => f.write_str("NULL"),
            Self::Count(count) => write!(f, "{count}"),
            Self::NoTransaction => write!(f, "{}", CoreError::NoTransaction),
        }
    }
}

/// An interpreter bound to one store.
#[derive(Debug, Default)]
pub struct Session {
    store: Store,
    config: Config,
}

impl Session {
    /// Creates a session over an empty store.
    pub fn new(config: Config) -> Self {
        Self {
            store: Store::new(),
            config,
        }
    }

    /// Returns the session configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the underlying store.
    #[must_use]
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Returns the underlying store for direct manipulation.
    pub fn store_mut(&mut self) -> &mut Store {
        &mut self.store
    }

    /// Consumes the session, returning its store.
    #[must_use]
    pub fn into_store(self) -> Store {
        self.store
    }

    /// Executes a parsed command.
    pub fn execute(&mut self, command: &Command) -> Outcome {
        let store = &mut self.store;
        match command {
            Command::Begin => {
                store.begin();
                Outcome::Silent
            }
            Command::Set { key, value } => {
                store.set(key, value);
                Outcome::Silent
            }
            Command::Get { key } => Outcome::Value(store.get(key).map(str::to_owned)),
            Command::Unset { key } => {
                store.unset(key);
                Outcome::Silent
            }
            Command::NumEqualTo { value } => Outcome::Count(store.num_equal_to(value)),
            Command::Commit => Self::transaction_outcome(store.commit()),
            Command::Rollback => Self::transaction_outcome(store.rollback()),
            Command::End => Outcome::End,
        }
    }

    /// Parses and executes one input line.
    ///
    /// Returns `Ok(None)` for blank and comment lines.
    ///
    /// # Errors
    ///
    /// Returns the parse error if the line is not a valid command.
    pub fn execute_line(&mut self, line: &str) -> CoreResult<Option<Outcome>> {
        match Command::parse(line, &self.config)? {
            Some(command) => Ok(Some(self.execute(&command))),
            None => Ok(None),
        }
    }

    fn transaction_outcome(result: CoreResult<()>) -> Outcome {
        match result {
            Ok(()) => Outcome::Silent,
            Err(_) => Outcome::NoTransaction,
        }
    }
}

/// Totals for one run of [`run_lines`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Input lines read, including blank ones.
    pub lines: usize,
    /// Commands executed.
    pub commands: usize,
    /// Lines rejected by the parser.
    pub errors: usize,
    /// Whether the run stopped at `END`.
    pub ended: bool,
}

/// Runs every line of `input` through `session`, writing results to `output`.
///
/// With `echo_input` off, each non-silent outcome is written on its own
/// line. With it on, every input line is echoed and its outcome, if any,
/// follows on the same line after a single space. Rejected lines produce an
/// `ERROR: <message>` line and the loop carries on. The output is flushed
/// after every line so interactive users see results immediately.
///
/// Lines are split on `\n` with an optional trailing `\r`. Bytes that are
/// not valid UTF-8 are replaced with U+FFFD and the line runs as usual.
///
/// # Errors
///
/// Returns [`CoreError::Io`] if reading input or writing output fails.
pub fn run_lines<R, W>(
    session: &mut Session,
    mut input: R,
    mut output: W,
) -> CoreResult<RunSummary>
where
    R: BufRead,
    W: Write,
{
    let mut summary = RunSummary::default();
    let echo = session.config().echo_input;
    let stop_on_end = session.config().stop_on_end;
    let mut raw = Vec::new();

    loop {
        raw.clear();
        if input.read_until(b'\n', &mut raw)? == 0 {
            break;
        }
        summary.lines += 1;
        let line = decode_line(&raw);
        if matches!(line, Cow::Owned(_)) {
            warn!(line = summary.lines, "input line is not valid UTF-8");
        }

        let outcome = match session.execute_line(&line) {
            Ok(outcome) => outcome,
            Err(err) if err.is_fatal() => return Err(err),
            Err(err) => {
                warn!(line = summary.lines, error = %err, "rejected command");
                summary.errors += 1;
                if echo {
                    writeln!(output, "{line}")?;
                }
                writeln!(output, "ERROR: {err}")?;
                output.flush()?;
                continue;
            }
        };

        if outcome.is_some() {
            summary.commands += 1;
        }

        match (&outcome, echo) {
            (Some(outcome), true) if !outcome.is_silent() => {
                writeln!(output, "{line} {outcome}")?;
            }
            (_, true) => writeln!(output, "{line}")?,
            (Some(outcome), false) if !outcome.is_silent() => writeln!(output, "{outcome}")?,
            (_, false) => {}
        }
        output.flush()?;

        if stop_on_end && outcome == Some(Outcome::End) {
            summary.ended = true;
            break;
        }
    }

    debug!(
        lines = summary.lines,
        commands = summary.commands,
        errors = summary.errors,
        ended = summary.ended,
        "command stream finished"
    );
    Ok(summary)
}

/// Strips the line terminator and decodes, replacing invalid UTF-8.
fn decode_line(raw: &[u8]) -> Cow<'_, str> {
    let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    String::from_utf8_lossy(raw)
}
