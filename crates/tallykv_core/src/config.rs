//! Session configuration.

/// Configuration for a command session.
#[derive(Debug, Clone)]
pub struct Config {
    /// Whether to upper-case keys and values before they reach the store.
    ///
    /// Command words are matched case-insensitively regardless.
    pub normalize_case: bool,

    /// Whether to echo each input line in front of its result.
    pub echo_input: bool,

    /// Whether `END` stops the command loop.
    pub stop_on_end: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            normalize_case: true,
            echo_input: false,
            stop_on_end: true,
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration for running a script file: input lines are echoed.
    #[must_use]
    pub fn transcript() -> Self {
        Self::default().echo_input(true)
    }

    /// Sets whether keys and values are upper-cased.
    #[must_use]
    pub const fn normalize_case(mut self, value: bool) -> Self {
        self.normalize_case = value;
        self
    }

    /// Sets whether input lines are echoed.
    #[must_use]
    pub const fn echo_input(mut self, value: bool) -> Self {
        self.echo_input = value;
        self
    }

    /// Sets whether `END` stops the command loop.
    #[must_use]
    pub const fn stop_on_end(mut self, value: bool) -> Self {
        self.stop_on_end = value;
        self
    }
}
