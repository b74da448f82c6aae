//! TallyKV CLI
//!
//! Line-oriented interpreter for the TallyKV transactional store.
//!
//! # Modes
//!
//! - `--file <PATH>` - Run a script file, echoing each line with its result
//! - `--interactive` - Read commands from standard input
//!
//! With neither, the help text is printed.

mod commands;
mod error;

use clap::{CommandFactory, Parser};
use commands::help::COMMAND_REFERENCE;
use commands::stats::StatsFormat;
use std::io;
use std::path::PathBuf;
use tallykv_core::Config;
use tracing_subscriber::EnvFilter;

/// In-memory key/value store with nested transactions.
#[derive(Parser)]
#[command(name = "tallykv")]
#[command(author, version, about, long_about = None)]
#[command(after_long_help = COMMAND_REFERENCE)]
struct Cli {
    /// Script file to run; repeat to run several, each with a fresh store
    #[arg(short, long = "file", value_name = "PATH", conflicts_with = "interactive")]
    files: Vec<PathBuf>,

    /// Read commands from standard input
    #[arg(short, long)]
    interactive: bool,

    /// Keep names and values exactly as typed instead of upper-casing them
    #[arg(long)]
    preserve_case: bool,

    /// Do not echo script lines in file mode
    #[arg(long)]
    no_echo: bool,

    /// Print store statistics to stderr after each run
    #[arg(long, value_enum, value_name = "FORMAT", num_args = 0..=1, default_missing_value = "text")]
    stats: Option<StatsFormat>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn config(&self) -> Config {
        let echo = !self.files.is_empty() && !self.no_echo;
        Config::new()
            .normalize_case(!self.preserve_case)
            .echo_input(echo)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging; stdout is reserved for command output
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) if cli.verbose => EnvFilter::new("debug"),
        Err(_) => EnvFilter::new("warn"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let config = cli.config();

    if !cli.files.is_empty() {
        let stdout = io::stdout();
        let stderr = io::stderr();
        commands::file::run(
            &cli.files,
            &config,
            cli.stats,
            &mut stdout.lock(),
            &mut stderr.lock(),
        )?;
    } else if cli.interactive {
        commands::interactive::run_stdio(&config, cli.stats)?;
    } else {
        Cli::command().print_long_help()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn file_mode_echoes_by_default() {
        let cli = Cli::parse_from(["tallykv", "--file", "script.txt"]);
        assert_eq!(cli.files, vec![PathBuf::from("script.txt")]);
        let config = cli.config();
        assert!(config.echo_input);
        assert!(config.normalize_case);
    }

    #[test]
    fn interactive_does_not_echo() {
        let cli = Cli::parse_from(["tallykv", "-i", "--preserve-case"]);
        let config = cli.config();
        assert!(cli.interactive);
        assert!(!config.echo_input);
        assert!(!config.normalize_case);
    }

    #[test]
    fn file_and_interactive_conflict() {
        assert!(Cli::try_parse_from(["tallykv", "-f", "a.txt", "-i"]).is_err());
    }

    #[test]
    fn stats_defaults_to_text() {
        let cli = Cli::parse_from(["tallykv", "-i", "--stats"]);
        assert_eq!(cli.stats, Some(StatsFormat::Text));
        let cli = Cli::parse_from(["tallykv", "-i", "--stats", "json"]);
        assert_eq!(cli.stats, Some(StatsFormat::Json));
    }

    #[test]
    fn multiple_files() {
        let cli = Cli::parse_from(["tallykv", "-f", "a.txt", "-f", "b.txt", "--no-echo"]);
        assert_eq!(cli.files.len(), 2);
        assert!(!cli.config().echo_input);
    }
}
