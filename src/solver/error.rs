#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! Error taxonomy for the solver and its collaborators.
//!
//! Only genuinely exceptional conditions are errors: malformed puzzle input
//! and I/O failures. A provably unsolvable or ambiguous puzzle is a normal
//! solve outcome, not an error.

use thiserror::Error;

/// Errors surfaced by parsing and batch processing.
#[derive(Debug, Error)]
pub enum Error {
    /// The input stream did not describe a well-formed puzzle: wrong number
    /// of clue lines, a non-numeric token, or an infeasible clue.
    #[error("malformed input at line {line}: {reason}")]
    MalformedInput {
        /// 1-based line number in the input stream.
        line: usize,
        /// Human-readable description of what was wrong.
        reason: String,
    },

    /// An underlying file operation failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Shorthand for a [`Error::MalformedInput`] at the given input line.
    pub fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            line,
            reason: reason.into(),
        }
    }
}
