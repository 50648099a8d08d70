#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! Fixpoint propagation: re-solve queued lines until nothing changes.
//!
//! Each dequeued line is solved against its clue (through the memo table);
//! newly forced cells are written into both board views and every touched
//! cross line is queued in turn. Every iteration either detects a
//! contradiction or strictly grows the set of decided cells, so the loop
//! terminates in at most `CELL_COUNT` updates.

use crate::solver::bitline::bits;
use crate::solver::context::SolveContext;
use crate::solver::line_solver::{solve_line, LineVerdict};
use crate::solver::puzzle::Puzzle;

/// Result of running the queue to fixpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    /// Every cell is decided and no line objected.
    Solved,
    /// Fixpoint reached with unknowns remaining.
    Stalled,
    /// Some line admits no placement; the queue has been cleared.
    Contradiction,
}

/// Drains the work queue, applying line deductions as they come.
pub fn run(ctx: &mut SolveContext, puzzle: &Puzzle) -> Propagation {
    while let Some(line) = ctx.queue.pop() {
        let cells = ctx.board.line(line);
        let verdict = ctx.cache.lookup(line, cells).unwrap_or_else(|| {
            let computed = solve_line(puzzle.clue(line), cells);
            ctx.cache.store(line, cells, computed);
            computed
        });

        match verdict {
            LineVerdict::Contradiction => {
                ctx.queue.clear();
                return Propagation::Contradiction;
            }
            LineVerdict::Forced { fill, empty } => {
                for p in bits(fill) {
                    ctx.board.set_on_line(line, p, true);
                    ctx.queue.push(line.cross(p));
                }
                for p in bits(empty) {
                    ctx.board.set_on_line(line, p, false);
                    ctx.queue.push(line.cross(p));
                }
            }
        }
    }

    debug_assert!(ctx.board.views_agree());
    if ctx.board.is_complete() {
        Propagation::Solved
    } else {
        Propagation::Stalled
    }
}
