//! Script and transcript fixtures.
//!
//! Helpers that push command text through the same line driver the CLI
//! uses, either from memory or from a temporary script file.

use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;
use tallykv_core::{run_lines, Config, RunSummary, Session};
use tempfile::NamedTempFile;

/// Output and totals of one scripted run.
#[derive(Debug)]
pub struct Transcript {
    /// Everything written by the driver.
    pub output: String,
    /// Run totals.
    pub summary: RunSummary,
    /// The session, for inspecting the final store.
    pub session: Session,
}

/// Runs `script` through a fresh session and returns the full transcript.
pub fn run_script(script: &str, config: Config) -> Transcript {
    let mut session = Session::new(config);
    let mut out = Vec::new();
    let summary =
        run_lines(&mut session, script.as_bytes(), &mut out).expect("in-memory run failed");
    Transcript {
        output: String::from_utf8(out).expect("output is not UTF-8"),
        summary,
        session,
    }
}

/// Runs `script` through a fresh session and returns only its output.
pub fn run_transcript(script: &str, config: Config) -> String {
    run_script(script, config).output
}

/// Writes `script` to a temporary file and passes its path to `f`.
///
/// The file is removed when `f` returns.
pub fn with_script_file<F, R>(script: &str, f: F) -> R
where
    F: FnOnce(&Path) -> R,
{
    let mut file = NamedTempFile::new().expect("Failed to create temp script");
    file.write_all(script.as_bytes())
        .expect("Failed to write temp script");
    file.flush().expect("Failed to flush temp script");
    f(file.path())
}

/// Runs a script file through a fresh session, as the CLI's file mode does.
pub fn run_script_file(path: &Path, config: Config) -> Transcript {
    let file = File::open(path).expect("Failed to open script");
    let mut session = Session::new(config);
    let mut out = Vec::new();
    let summary =
        run_lines(&mut session, BufReader::new(file), &mut out).expect("file run failed");
    Transcript {
        output: String::from_utf8(out).expect("output is not UTF-8"),
        summary,
        session,
    }
}

/// Canned command scripts.
pub mod scenarios {
    /// Two keys share a value, then one is unset.
    pub const NUM_EQUAL_TO: &str = "\
SET a 10
SET b 10
NUMEQUALTO 10
NUMEQUALTO 20
UNSET a
NUMEQUALTO 10
SET b 30
NUMEQUALTO 10
END
";

    /// Nested blocks rolled back one at a time.
    pub const NESTED_ROLLBACK: &str = "\
BEGIN
SET a 10
GET a
BEGIN
SET a 20
GET a
ROLLBACK
GET a
ROLLBACK
GET a
END
";

    /// Commit closes every block at once.
    pub const COMMIT_FLATTENS: &str = "\
BEGIN
SET a 30
BEGIN
SET a 40
COMMIT
GET a
ROLLBACK
END
";

    /// Frequency index across blocks.
    pub const COUNTS_ACROSS_BLOCKS: &str = "\
SET a 50
BEGIN
GET a
SET a 60
BEGIN
UNSET a
GET a
ROLLBACK
GET a
COMMIT
GET a
END
";

    /// Transaction commands with nothing open.
    pub const NO_TRANSACTION: &str = "\
SET a 10
COMMIT
ROLLBACK
GET a
END
";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_and_file_runs_agree() {
        let script = scenarios::NESTED_ROLLBACK;
        let in_memory = run_transcript(script, Config::transcript());
        let from_file =
            with_script_file(script, |path| run_script_file(path, Config::transcript()));
        assert_eq!(in_memory, from_file.output);
        assert!(from_file.summary.ended);
    }

    #[test]
    fn transcript_keeps_session() {
        let transcript = run_script("SET a 10\n", Config::default());
        assert_eq!(transcript.session.store().get("A"), Some("10"));
        assert_eq!(transcript.summary.commands, 1);
    }
}
