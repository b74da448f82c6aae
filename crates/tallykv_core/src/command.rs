//! Command line parsing.

use crate::config::Config;
use crate::error::{CoreError, CoreResult};
use std::fmt;

/// A single parsed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `BEGIN`: open a transaction block.
    Begin,
    /// `SET key value`.
    Set {
        /// Variable name.
        key: String,
        /// New value.
        value: String,
    },
    /// `GET key`.
    Get {
        /// Variable name.
        key: String,
    },
    /// `UNSET key`.
    Unset {
        /// Variable name.
        key: String,
    },
    /// `NUMEQUALTO value`.
    NumEqualTo {
        /// Value to count.
        value: String,
    },
    /// `COMMIT`: close every open block.
    Commit,
    /// `ROLLBACK`: undo the innermost block.
    Rollback,
    /// `END`: stop reading commands.
    End,
}

impl Command {
    /// Parses one input line.
    ///
    /// Returns `Ok(None)` for blank lines and `#` comments. The command word
    /// is case-insensitive; keys and values are upper-cased when
    /// `config.normalize_case` is set. Tokens past the ones a command needs
    /// are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownCommand`] for an unrecognised command word
    /// and [`CoreError::MissingArgument`] when a required token is absent.
    pub fn parse(line: &str, config: &Config) -> CoreResult<Option<Self>> {
        let mut tokens = line.split_ascii_whitespace();
        let Some(word) = tokens.next() else {
            return Ok(None);
        };
        if word.starts_with('#') {
            return Ok(None);
        }

        let mut arg = |command: &'static str, argument: &'static str| {
            tokens
                .next()
                .map(|token| normalize(token, config))
                .ok_or_else(|| CoreError::missing_argument(command, argument))
        };

        let command = match word.to_ascii_uppercase().as_str() {
            "BEGIN" => Self::Begin,
            "SET" => {
                let key = arg("SET", "key")?;
                let value = arg("SET", "value")?;
                Self::Set { key, value }
            }
            "GET" => Self::Get {
                key: arg("GET", "key")?,
            },
            "UNSET" => Self::Unset {
                key: arg("UNSET", "key")?,
            },
            "NUMEQUALTO" => Self::NumEqualTo {
                value: arg("NUMEQUALTO", "value")?,
            },
            "COMMIT" => Self::Commit,
            "ROLLBACK" => Self::Rollback,
            "END" => Self::End,
            _ => return Err(CoreError::unknown_command(word)),
        };
        Ok(Some(command))
    }

    /// Returns the canonical command word.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Begin => "BEGIN",
            Self::Set { .. } => "SET",
            Self::Get { .. } => "GET",
            Self::Unset { .. } => "UNSET",
            Self::NumEqualTo { .. } => "NUMEQUALTO",
            Self::Commit => "COMMIT",
            Self::Rollback => "ROLLBACK",
            Self::End => "END",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Set { key, value } => write!(f, "SET {key} {value}"),
            Self::Get { key } | Self::Unset { key } => write!(f, "{} {key}", self.name()),
            Self::NumEqualTo { value } => write!(f, "NUMEQUALTO {value}"),
            _ => f.write_str(self.name()),
        }
    }
}

fn normalize(token: &str, config: &Config) -> String {
    if config.normalize_case {
        token.to_ascii_uppercase()
    } else {
        token.to_owned()
    }
}
