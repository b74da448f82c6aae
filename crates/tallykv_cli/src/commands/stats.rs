//! Store statistics report.

use crate::error::CliResult;
use clap::ValueEnum;
use serde::Serialize;
use std::io::Write;
use tallykv_core::{RunSummary, Store};

/// Output format for the statistics report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatsFormat {
    /// Human-readable text.
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Statistics gathered after a run.
#[derive(Debug, Serialize)]
pub struct StatsReport {
    /// Input source (file path or `<stdin>`).
    pub source: String,
    /// Input lines read.
    pub lines: usize,
    /// Commands executed.
    pub commands: usize,
    /// Lines rejected by the parser.
    pub errors: usize,
    /// Keys set when the run finished.
    pub keys: usize,
    /// Distinct values held when the run finished.
    pub distinct_values: usize,
    /// Transaction blocks still open when the run finished.
    pub open_blocks: usize,
    /// Per-operation counters.
    pub operations: OperationCounts,
}

/// Per-operation counters.
#[derive(Debug, Serialize)]
pub struct OperationCounts {
    /// `SET` calls.
    pub set: u64,
    /// `UNSET` calls.
    pub unset: u64,
    /// `GET` calls.
    pub get: u64,
    /// `NUMEQUALTO` calls.
    pub num_equal_to: u64,
    /// `BEGIN` calls.
    pub begin: u64,
    /// Successful `COMMIT` calls.
    pub commit: u64,
    /// Successful `ROLLBACK` calls.
    pub rollback: u64,
    /// `COMMIT`/`ROLLBACK` answered with `NO TRANSACTION`.
    pub no_transaction: u64,
}

impl StatsReport {
    /// Builds a report from a finished run.
    pub fn new(source: impl Into<String>, summary: &RunSummary, store: &Store) -> Self {
        let snap = store.stats().snapshot();
        Self {
            source: source.into(),
            lines: summary.lines,
            commands: summary.commands,
            errors: summary.errors,
            keys: store.len(),
            distinct_values: store.frequency().len(),
            open_blocks: store.depth(),
            operations: OperationCounts {
                set: snap.sets,
                unset: snap.unsets,
                get: snap.gets,
                num_equal_to: snap.lookups,
                begin: snap.begins,
                commit: snap.commits,
                rollback: snap.rollbacks,
                no_transaction: snap.no_transaction,
            },
        }
    }

    /// Writes the report in the requested format.
    pub fn write_to<W: Write>(&self, format: StatsFormat, out: &mut W) -> CliResult<()> {
        match format {
            StatsFormat::Json => {
                writeln!(out, "{}", serde_json::to_string_pretty(self)?)?;
            }
            StatsFormat::Text => self.write_text(out)?,
        }
        Ok(())
    }

    fn write_text<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        let ops = &self.operations;
        writeln!(out, "TallyKV Statistics: {}", self.source)?;
        writeln!(out, "==========================")?;
        writeln!(out, "Input:")?;
        writeln!(out, "  Lines:     {}", self.lines)?;
        writeln!(out, "  Commands:  {}", self.commands)?;
        writeln!(out, "  Errors:    {}", self.errors)?;
        writeln!(out, "Store:")?;
        writeln!(out, "  Keys:            {}", self.keys)?;
        writeln!(out, "  Distinct values: {}", self.distinct_values)?;
        writeln!(out, "  Open blocks:     {}", self.open_blocks)?;
        writeln!(out, "Operations:")?;
        writeln!(
            out,
            "  SET {}  UNSET {}  GET {}  NUMEQUALTO {}",
            ops.set, ops.unset, ops.get, ops.num_equal_to
        )?;
        writeln!(
            out,
            "  BEGIN {}  COMMIT {}  ROLLBACK {}  NO TRANSACTION {}",
            ops.begin, ops.commit, ops.rollback, ops.no_transaction
        )?;
        Ok(())
    }
}
