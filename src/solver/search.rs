#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! DFS search on top of propagation and probing.
//!
//! Every node first propagates to fixpoint, then probes; only when both
//! stall does it branch on the suggested cell, trying filled before empty.
//! Branch state is a value copy of the board; nothing else needs saving,
//! the memo table stays valid across branches because entries are keyed by
//! full line states.
//!
//! Two drivers share the recursion shape: [`solve_one`] stops at the first
//! solved leaf, [`verify_unique`] keeps going until a second distinct
//! solution shows up or the tree is exhausted.

use crate::solver::board::Grid;
use crate::solver::context::{SolveContext, SolveOptions, SolveStats};
use crate::solver::probe::{self, ProbeOutcome, VerifyProbeOutcome};
use crate::solver::propagation::{self, Propagation};
use crate::solver::puzzle::{LineId, Puzzle};

/// Result of a first-solution search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveOutcome {
    /// A solution was found.
    Solved(Grid),
    /// The clues admit no assignment.
    Contradiction,
    /// The node budget ran out first.
    NodeLimit,
    /// The caller cancelled the search.
    Cancelled,
}

/// Result of a uniqueness verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyOutcome {
    /// Exactly one solution exists.
    Unique(Grid),
    /// The clues admit no assignment.
    NoSolution,
    /// At least two distinct solutions exist.
    MultipleSolutions,
    /// The node budget ran out first.
    NodeLimit,
    /// The caller cancelled the search.
    Cancelled,
}

/// A solve outcome together with its counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolveReport {
    /// What the search concluded.
    pub outcome: SolveOutcome,
    /// Search counters.
    pub stats: SolveStats,
}

/// A verification outcome together with its counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifyReport {
    /// What the verification concluded.
    pub outcome: VerifyOutcome,
    /// Search counters.
    pub stats: SolveStats,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Signal {
    Solved,
    Contradiction,
    NodeLimit,
    Cancelled,
}

fn dfs(ctx: &mut SolveContext, puzzle: &Puzzle) -> Signal {
    if ctx.is_cancelled() {
        return Signal::Cancelled;
    }
    if ctx.node_budget_spent() {
        return Signal::NodeLimit;
    }
    ctx.nodes += 1;

    match propagation::run(ctx, puzzle) {
        Propagation::Solved => return Signal::Solved,
        Propagation::Contradiction => return Signal::Contradiction,
        Propagation::Stalled => {}
    }

    match probe::probe(ctx, puzzle) {
        ProbeOutcome::Solved => Signal::Solved,
        ProbeOutcome::Contradiction => Signal::Contradiction,
        ProbeOutcome::Stalled { branch: (r, c) } => {
            let saved = ctx.board;

            ctx.board.set_cell(r, c, true);
            ctx.queue.push(LineId::row(r));
            ctx.queue.push(LineId::col(c));
            match dfs(ctx, puzzle) {
                Signal::Contradiction => {}
                other => return other,
            }

            ctx.board = saved;
            ctx.board.set_cell(r, c, false);
            ctx.queue.push(LineId::row(r));
            ctx.queue.push(LineId::col(c));
            dfs(ctx, puzzle)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VerifySignal {
    Solved,
    Contradiction,
    Multiple,
    NodeLimit,
    Cancelled,
}

fn dfs_verify(ctx: &mut SolveContext, puzzle: &Puzzle, found: &mut Option<Grid>) -> VerifySignal {
    if ctx.is_cancelled() {
        return VerifySignal::Cancelled;
    }
    if ctx.node_budget_spent() {
        return VerifySignal::NodeLimit;
    }
    ctx.nodes += 1;

    match propagation::run(ctx, puzzle) {
        Propagation::Solved => {
            return if probe::second_solution(found, ctx.board.grid()) {
                VerifySignal::Multiple
            } else {
                VerifySignal::Solved
            };
        }
        Propagation::Contradiction => return VerifySignal::Contradiction,
        Propagation::Stalled => {}
    }

    match probe::probe_verify(ctx, puzzle, found) {
        VerifyProbeOutcome::Solved => VerifySignal::Solved,
        VerifyProbeOutcome::Contradiction => VerifySignal::Contradiction,
        VerifyProbeOutcome::Multiple => VerifySignal::Multiple,
        VerifyProbeOutcome::Stalled { branch: (r, c) } => {
            let saved = ctx.board;

            ctx.board.set_cell(r, c, true);
            ctx.queue.push(LineId::row(r));
            ctx.queue.push(LineId::col(c));
            let first = dfs_verify(ctx, puzzle, found);
            match first {
                VerifySignal::Multiple | VerifySignal::NodeLimit | VerifySignal::Cancelled => {
                    return first;
                }
                VerifySignal::Solved | VerifySignal::Contradiction => {}
            }

            ctx.board = saved;
            ctx.board.set_cell(r, c, false);
            ctx.queue.push(LineId::row(r));
            ctx.queue.push(LineId::col(c));
            let second = dfs_verify(ctx, puzzle, found);
            match second {
                VerifySignal::Multiple | VerifySignal::NodeLimit | VerifySignal::Cancelled => {
                    second
                }
                VerifySignal::Solved => VerifySignal::Solved,
                VerifySignal::Contradiction => first,
            }
        }
    }
}

/// Searches for one solution of the puzzle.
#[must_use]
pub fn solve_one(puzzle: &Puzzle, options: &SolveOptions) -> SolveReport {
    let mut ctx = SolveContext::new(options);
    let outcome = match dfs(&mut ctx, puzzle) {
        Signal::Solved => SolveOutcome::Solved(ctx.board.grid()),
        Signal::Contradiction => SolveOutcome::Contradiction,
        Signal::NodeLimit => SolveOutcome::NodeLimit,
        Signal::Cancelled => SolveOutcome::Cancelled,
    };
    SolveReport {
        outcome,
        stats: ctx.stats(),
    }
}

/// Checks whether the puzzle has exactly one solution.
#[must_use]
pub fn verify_unique(puzzle: &Puzzle, options: &SolveOptions) -> VerifyReport {
    let mut ctx = SolveContext::new(options);
    let mut found = None;
    let outcome = match dfs_verify(&mut ctx, puzzle, &mut found) {
        VerifySignal::Solved => match found {
            Some(grid) => VerifyOutcome::Unique(grid),
            None => VerifyOutcome::NoSolution,
        },
        VerifySignal::Contradiction => VerifyOutcome::NoSolution,
        VerifySignal::Multiple => VerifyOutcome::MultipleSolutions,
        VerifySignal::NodeLimit => VerifyOutcome::NodeLimit,
        VerifySignal::Cancelled => VerifyOutcome::Cancelled,
    };
    VerifyReport {
        outcome,
        stats: ctx.stats(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::bitline::{bit, full};
    use crate::solver::clue::Clue;
    use crate::solver::context::CancelToken;
    use crate::solver::SIZE;

    fn uniform_puzzle(clue: &Clue) -> Puzzle {
        Puzzle::new(vec![clue.clone(); SIZE], vec![clue.clone(); SIZE]).unwrap()
    }

    #[test]
    fn test_solve_all_filled_in_one_node() {
        let puzzle = uniform_puzzle(&Clue::new([SIZE]).unwrap());
        let report = solve_one(&puzzle, &SolveOptions::default());
        assert_eq!(report.outcome, SolveOutcome::Solved(Grid([full(); SIZE])));
        assert_eq!(report.stats.nodes, 1);
    }

    #[test]
    fn test_solve_all_empty_in_one_node() {
        let puzzle = uniform_puzzle(&Clue::empty());
        let report = solve_one(&puzzle, &SolveOptions::default());
        assert_eq!(report.outcome, SolveOutcome::Solved(Grid([0; SIZE])));
        assert_eq!(report.stats.nodes, 1);
    }

    #[test]
    fn test_solve_contradictory_totals() {
        let mut rows = vec![Clue::new([SIZE - 1]).unwrap()];
        rows.extend(vec![Clue::new([SIZE]).unwrap(); SIZE - 1]);
        let cols = vec![Clue::new([SIZE]).unwrap(); SIZE];
        let puzzle = Puzzle::new(rows, cols).unwrap();

        let report = solve_one(&puzzle, &SolveOptions::default());
        assert_eq!(report.outcome, SolveOutcome::Contradiction);
    }

    #[test]
    fn test_solve_permutation_finds_a_valid_solution() {
        let puzzle = uniform_puzzle(&Clue::new([1]).unwrap());
        let report = solve_one(&puzzle, &SolveOptions::default());
        let SolveOutcome::Solved(grid) = report.outcome else {
            panic!("expected a solution, got {:?}", report.outcome);
        };
        // Every row and every column carries exactly one filled cell.
        let mut col_union = 0;
        for &row in &grid.0 {
            assert_eq!(crate::solver::bitline::count(row), 1);
            assert_eq!(col_union & row, 0);
            col_union |= row;
        }
        assert_eq!(col_union, full());
        assert!(report.stats.nodes >= 1);
    }

    #[test]
    fn test_solve_is_deterministic() {
        let puzzle = uniform_puzzle(&Clue::new([1]).unwrap());
        let a = solve_one(&puzzle, &SolveOptions::default());
        let b = solve_one(&puzzle, &SolveOptions::default());
        assert_eq!(a.outcome, b.outcome);
        assert_eq!(a.stats.nodes, b.stats.nodes);
    }

    #[test]
    fn test_verify_unique_box_outline() {
        let edge = Clue::new([SIZE]).unwrap();
        let mid = Clue::new([1, 1]).unwrap();
        let mut rows = vec![edge.clone()];
        rows.extend(vec![mid; SIZE - 2]);
        rows.push(edge);
        let cols = rows.clone();
        let puzzle = Puzzle::new(rows, cols).unwrap();

        let report = verify_unique(&puzzle, &SolveOptions::default());
        let VerifyOutcome::Unique(grid) = report.outcome else {
            panic!("expected unique, got {:?}", report.outcome);
        };
        assert_eq!(grid.0[0], full());
        assert_eq!(grid.0[SIZE - 1], full());
        assert_eq!(grid.0[1], bit(0) | bit(SIZE - 1));
        assert!(report.stats.nodes >= 1);
    }

    #[test]
    fn test_verify_multiple_on_permutation_clues() {
        let puzzle = uniform_puzzle(&Clue::new([1]).unwrap());
        let report = verify_unique(&puzzle, &SolveOptions::default());
        assert_eq!(report.outcome, VerifyOutcome::MultipleSolutions);
    }

    #[test]
    fn test_verify_no_solution() {
        let mut rows = vec![Clue::new([SIZE - 1]).unwrap()];
        rows.extend(vec![Clue::new([SIZE]).unwrap(); SIZE - 1]);
        let cols = vec![Clue::new([SIZE]).unwrap(); SIZE];
        let puzzle = Puzzle::new(rows, cols).unwrap();

        let report = verify_unique(&puzzle, &SolveOptions::default());
        assert_eq!(report.outcome, VerifyOutcome::NoSolution);
    }

    #[test]
    fn test_solution_satisfies_derived_clues() {
        // Solvability law: recomputing the clues of the returned grid gives
        // back the input clues.
        let mut grid = [0; SIZE];
        for (r, row) in grid.iter_mut().enumerate() {
            *row = (full() >> (r % 7)) & full();
        }
        let puzzle = Puzzle::from_grid(&grid);
        let report = solve_one(&puzzle, &SolveOptions::default());
        let SolveOutcome::Solved(solution) = report.outcome else {
            panic!("expected a solution, got {:?}", report.outcome);
        };
        assert_eq!(Puzzle::from_grid(&solution.0), puzzle);
    }

    #[test]
    fn test_cancellation_stops_the_search() {
        let token = CancelToken::new();
        token.cancel();
        let options = SolveOptions {
            cancel: Some(token),
            ..SolveOptions::default()
        };
        let puzzle = uniform_puzzle(&Clue::new([1]).unwrap());
        let report = solve_one(&puzzle, &options);
        assert_eq!(report.outcome, SolveOutcome::Cancelled);
        assert_eq!(report.stats.nodes, 0);
    }

    #[test]
    fn test_node_limit_is_honored() {
        let options = SolveOptions {
            node_limit: Some(0),
            ..SolveOptions::default()
        };
        let puzzle = uniform_puzzle(&Clue::new([1]).unwrap());
        let report = solve_one(&puzzle, &options);
        assert_eq!(report.outcome, SolveOutcome::NodeLimit);
    }
}
