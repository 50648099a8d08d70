#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! Batch mode: stream puzzles from an input file, write one solution block
//! per puzzle, keep a diagnostic log on the side.
//!
//! The solver core knows nothing about files; this module owns all paths
//! and I/O and only calls [`solve_one`](crate::solver::solve_one).

use crate::solver::error::Error;
use crate::solver::parse::parse_batch;
use crate::solver::search::{solve_one, SolveOutcome};
use crate::solver::SolveOptions;
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use std::time::Instant;

/// Default input stream.
pub const INPUT_FILE: &str = "input.txt";
/// Default solution output.
pub const OUTPUT_FILE: &str = "solution.txt";
/// Default diagnostic log, appended to.
pub const LOG_FILE: &str = "log.txt";

/// Marker line written in place of a grid for an unsolvable puzzle.
pub const CONTRADICTION_MARKER: &str = "CONTRADICTION";

/// Runs the default batch: `input.txt` to `solution.txt`, diagnostics
/// appended to `log.txt`.
///
/// # Errors
///
/// [`Error::Io`] when any file fails to open, read or write;
/// [`Error::MalformedInput`] when the stream structure is broken beyond
/// per-puzzle recovery.
pub fn run_default(options: &SolveOptions) -> Result<(), Error> {
    run(
        Path::new(INPUT_FILE),
        Path::new(OUTPUT_FILE),
        Path::new(LOG_FILE),
        options,
    )
}

/// Solves every puzzle in `input`, writing solutions to `output` and
/// per-puzzle diagnostics to `log`.
///
/// Malformed puzzles are skipped with a log entry; solver outcomes
/// (including contradictions) are recorded per puzzle and never abort the
/// batch.
///
/// # Errors
///
/// See [`run_default`].
pub fn run(input: &Path, output: &Path, log: &Path, options: &SolveOptions) -> Result<(), Error> {
    let entries = parse_batch(BufReader::new(File::open(input)?))?;

    let mut out = BufWriter::new(File::create(output)?);
    let mut log = BufWriter::new(OpenOptions::new().create(true).append(true).open(log)?);

    let batch_start = Instant::now();
    for entry in entries {
        let start = Instant::now();
        match entry.puzzle {
            Err(e) => {
                writeln!(log, "#{}\tskipped: {e}", entry.index)?;
            }
            Ok(puzzle) => {
                let report = solve_one(&puzzle, options);
                writeln!(out, "${}", entry.index)?;
                match report.outcome {
                    SolveOutcome::Solved(grid) => write!(out, "{grid}")?,
                    SolveOutcome::Contradiction => writeln!(out, "{CONTRADICTION_MARKER}")?,
                    SolveOutcome::NodeLimit => writeln!(out, "NODE LIMIT")?,
                    SolveOutcome::Cancelled => writeln!(out, "CANCELLED")?,
                }
                writeln!(out)?;
                writeln!(
                    log,
                    "#{}\t{:.6}\t{} nodes\t{}",
                    entry.index,
                    start.elapsed().as_secs_f64(),
                    report.stats.nodes,
                    outcome_tag(report.outcome)
                )?;
            }
        }
        out.flush()?;
        log.flush()?;
    }
    writeln!(log, "total time: {:.6}", batch_start.elapsed().as_secs_f64())?;
    log.flush()?;

    Ok(())
}

const fn outcome_tag(outcome: SolveOutcome) -> &'static str {
    match outcome {
        SolveOutcome::Solved(_) => "solved",
        SolveOutcome::Contradiction => "contradiction",
        SolveOutcome::NodeLimit => "node-limit",
        SolveOutcome::Cancelled => "cancelled",
    }
}
