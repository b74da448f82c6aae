//! Interactive mode.

use crate::commands::stats::{StatsFormat, StatsReport};
use crate::error::CliResult;
use std::io::{self, BufRead, Write};
use tallykv_core::{run_lines, Config, Session};
use tracing::info;

/// Reads commands from `input` until `END` or end of input.
///
/// Results are written to `out` one per line, flushed as they are produced.
pub fn run<R, W, E>(
    config: &Config,
    stats: Option<StatsFormat>,
    input: R,
    out: &mut W,
    report_out: &mut E,
) -> CliResult<()>
where
    R: BufRead,
    W: Write,
    E: Write,
{
    info!("Starting interactive session");

    let mut session = Session::new(config.clone());
    let summary = run_lines(&mut session, input, &mut *out)?;

    if let Some(format) = stats {
        StatsReport::new("<stdin>", &summary, session.store()).write_to(format, report_out)?;
    }
    Ok(())
}

/// Runs an interactive session on the process's standard streams.
pub fn run_stdio(config: &Config, stats: Option<StatsFormat>) -> CliResult<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let stderr = io::stderr();
    run(
        config,
        stats,
        stdin.lock(),
        &mut stdout.lock(),
        &mut stderr.lock(),
    )
}
