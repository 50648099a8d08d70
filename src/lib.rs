#![deny(missing_docs)]
//! This crate solves Nonogram puzzles on a fixed-size square board.
//!
//! The pipeline is: a per-line dynamic-programming routine that extracts the
//! strongest cell-wise inference from a single clue, a Zobrist-keyed cache
//! memoizing those line results, a queue-driven constraint-propagation loop
//! across rows and columns, a 2-SAT-style probe that case-splits single
//! unknown cells, and a DFS search that branches when everything else stalls.

/// The `solver` module implements the solving pipeline: board model, line
/// inference, propagation, probing and search.
pub mod solver;

/// The `batch` module iterates a stream of puzzles from an input file and
/// writes one solution block per puzzle.
pub mod batch;
