#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! Argument parsing and command dispatch.
//!
//! Uses `clap` for parsing. Three entry points: `solve` prints node count,
//! elapsed seconds and the solved grid; `generate` prints a single integer
//! encoding uniqueness; no subcommand runs the default batch over
//! `input.txt`.

use clap::{Args, Parser, Subcommand};
use nonogram_solver::batch;
use nonogram_solver::solver::context::{DEFAULT_CACHE_CAPACITY, DEFAULT_SEED};
use nonogram_solver::solver::error::Error;
use nonogram_solver::solver::parse::parse_puzzle;
use nonogram_solver::solver::search::{solve_one, verify_unique, SolveOutcome, VerifyOutcome};
use nonogram_solver::solver::{Puzzle, SolveOptions, SolveStats};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::time::Instant;

/// Environment variable overriding the Zobrist seed.
const SEED_ENV: &str = "NONOGRAM_SEED";

/// Defines the command-line interface for the nonogram solver application.
#[derive(Parser, Debug)]
#[command(name = "nonogram_solver", version, about = "A bitmask Nonogram solver")]
pub(crate) struct Cli {
    /// Specifies the subcommand to execute. Without one, the solver runs in
    /// batch mode over `input.txt`.
    #[clap(subcommand)]
    pub command: Option<Commands>,

    /// Common options applicable to all commands.
    #[command(flatten)]
    pub common: CommonOptions,
}

/// Enumerates the available subcommands.
#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Solve a single puzzle and print the grid.
    Solve {
        /// Path to the puzzle file (2 * SIZE clue lines, columns first).
        path: PathBuf,
    },

    /// Check a single puzzle for solution uniqueness.
    ///
    /// Prints the node count when the solution is unique, -1 when there is
    /// no solution, -2 when there are several.
    Generate {
        /// Path to the puzzle file.
        path: PathBuf,
    },
}

/// Options shared by every command.
#[derive(Args, Debug, Default, Clone)]
pub(crate) struct CommonOptions {
    /// Zobrist seed; defaults to the NONOGRAM_SEED environment variable,
    /// then to a fixed constant.
    #[arg(long)]
    seed: Option<u64>,

    /// Line-cache capacity in entries.
    #[arg(long)]
    cache_capacity: Option<usize>,

    /// Print solver statistics to stderr after each puzzle.
    #[arg(short, long, default_value_t = false)]
    stats: bool,
}

impl CommonOptions {
    fn to_options(&self) -> SolveOptions {
        let env_seed = std::env::var(SEED_ENV)
            .ok()
            .and_then(|s| s.trim().parse().ok());
        SolveOptions {
            seed: self.seed.or(env_seed).unwrap_or(DEFAULT_SEED),
            cache_capacity: self.cache_capacity.unwrap_or(DEFAULT_CACHE_CAPACITY),
            ..SolveOptions::default()
        }
    }
}

/// Executes the parsed command line.
///
/// # Errors
///
/// Propagates parse and I/O errors; the caller maps them to the exit code.
pub(crate) fn run(cli: &Cli) -> Result<(), Error> {
    let options = cli.common.to_options();
    match &cli.command {
        Some(Commands::Solve { path }) => solve_command(path, &options, cli.common.stats),
        Some(Commands::Generate { path }) => generate_command(path, &options, cli.common.stats),
        None => batch::run_default(&options),
    }
}

fn read_puzzle(path: &PathBuf) -> Result<Puzzle, Error> {
    parse_puzzle(BufReader::new(File::open(path)?))
}

fn solve_command(path: &PathBuf, options: &SolveOptions, stats: bool) -> Result<(), Error> {
    let puzzle = read_puzzle(path)?;
    let start = Instant::now();
    let report = solve_one(&puzzle, options);
    let elapsed = start.elapsed().as_secs_f64();

    println!("{}\t{elapsed:.3}", report.stats.nodes);
    match report.outcome {
        SolveOutcome::Solved(grid) => print!("{grid}"),
        SolveOutcome::Contradiction => println!("{}", batch::CONTRADICTION_MARKER),
        SolveOutcome::NodeLimit => println!("NODE LIMIT"),
        SolveOutcome::Cancelled => println!("CANCELLED"),
    }

    if stats {
        print_stats(&report.stats, elapsed);
    }
    Ok(())
}

fn generate_command(path: &PathBuf, options: &SolveOptions, stats: bool) -> Result<(), Error> {
    let puzzle = read_puzzle(path)?;
    let start = Instant::now();
    let report = verify_unique(&puzzle, options);
    let elapsed = start.elapsed().as_secs_f64();

    match report.outcome {
        VerifyOutcome::Unique(_) => println!("{}", report.stats.nodes),
        VerifyOutcome::NoSolution => println!("-1"),
        VerifyOutcome::MultipleSolutions => println!("-2"),
        VerifyOutcome::NodeLimit => println!("NODE LIMIT"),
        VerifyOutcome::Cancelled => println!("CANCELLED"),
    }

    if stats {
        print_stats(&report.stats, elapsed);
    }
    Ok(())
}

fn stat_line(label: &str, value: impl std::fmt::Display) {
    eprintln!("|  {label:<24} {value:>14}  |");
}

fn print_stats(stats: &SolveStats, elapsed: f64) {
    eprintln!("===========[ Search Statistics ]===========");
    stat_line("Nodes", stats.nodes);
    stat_line("Probe rounds", stats.probe_rounds);
    stat_line("Cache hits", stats.cache_hits);
    stat_line("Cache misses", stats.cache_misses);
    stat_line("CPU time (s)", format!("{elapsed:.3}"));
    eprintln!("===========================================");
}
