//! Script file mode.

use crate::commands::stats::{StatsFormat, StatsReport};
use crate::error::{CliError, CliResult};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};
use tallykv_core::{run_lines, Config, RunSummary, Session};
use tracing::info;

/// Runs each script with its own fresh store.
///
/// Results go to `out`; the optional statistics report goes to `report_out`
/// after each script.
pub fn run<W, E>(
    paths: &[PathBuf],
    config: &Config,
    stats: Option<StatsFormat>,
    out: &mut W,
    report_out: &mut E,
) -> CliResult<()>
where
    W: Write,
    E: Write,
{
    for path in paths {
        let (summary, session) = run_script(path, config, out)?;
        if let Some(format) = stats {
            StatsReport::new(path.display().to_string(), &summary, session.store())
                .write_to(format, report_out)?;
        }
    }
    Ok(())
}

/// Runs a single script file against a new session.
pub fn run_script<W: Write>(
    path: &Path,
    config: &Config,
    out: &mut W,
) -> CliResult<(RunSummary, Session)> {
    info!("Running script {:?}", path);

    let file = File::open(path).map_err(|source| CliError::ScriptOpen {
        path: path.to_path_buf(),
        source,
    })?;

    let mut session = Session::new(config.clone());
    let summary = run_lines(&mut session, BufReader::new(file), &mut *out)?;

    info!(
        "Finished {:?}: {} commands, {} errors",
        path, summary.commands, summary.errors
    );
    Ok((summary, session))
}
