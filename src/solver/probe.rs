#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! Single-cell case analysis, run when propagation stalls.
//!
//! Each unknown cell is trial-assigned both ways and each trial is
//! propagated to fixpoint. If both trials contradict, so does the whole
//! board; if exactly one does, the other outcome is committed wholesale;
//! if both stall, every cell the two outcomes decide identically is forced
//! (the probed cell itself stays unknown, since the trials disagree on it
//! by construction). Rounds repeat until a full pass commits nothing, at
//! which point the caller receives a branch cell for the DFS.
//!
//! Cells are visited tightest-line-first: fewest remaining unknowns on the
//! cell's row or column, ties broken by row then column. The same ordering
//! picks the branch cell.

use crate::solver::bitline::{bit, bits};
use crate::solver::board::{Board, CellState, Grid};
use crate::solver::context::SolveContext;
use crate::solver::propagation::{self, Propagation};
use crate::solver::puzzle::{LineId, Puzzle};
use crate::solver::SIZE;
use itertools::Itertools;

/// Outcome of probing in first-solution mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// A trial or a committed deduction completed the board.
    Solved,
    /// No further cell is forced; branch on the given `(row, col)`.
    Stalled {
        /// Suggested DFS branch cell.
        branch: (usize, usize),
    },
    /// Both values of some cell contradict.
    Contradiction,
}

/// Outcome of probing in two-solution (verification) mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyProbeOutcome {
    /// This subtree holds exactly the recorded solution.
    Solved,
    /// No further cell is forced; branch on the given `(row, col)`.
    Stalled {
        /// Suggested DFS branch cell.
        branch: (usize, usize),
    },
    /// Both values of some cell contradict.
    Contradiction,
    /// Two distinct solutions exist.
    Multiple,
}

/// Unknown cells ordered by the pressure heuristic.
fn unknown_cells(board: &Board) -> Vec<(usize, usize)> {
    let row_unknowns: Vec<u32> = (0..SIZE)
        .map(|r| board.line(LineId::row(r)).unknown_count())
        .collect();
    let col_unknowns: Vec<u32> = (0..SIZE)
        .map(|c| board.line(LineId::col(c)).unknown_count())
        .collect();

    (0..SIZE)
        .cartesian_product(0..SIZE)
        .filter(|&(r, c)| board.cell(r, c) == CellState::Unknown)
        .sorted_by_key(|&(r, c)| (row_unknowns[r].min(col_unknowns[c]), r, c))
        .collect()
}

/// The DFS branch cell for a stalled board.
fn branch_cell(board: &Board) -> Option<(usize, usize)> {
    unknown_cells(board).into_iter().next()
}

/// One trial assignment propagated to fixpoint; the board is left at the
/// trial's result and must be restored by the caller.
fn trial(
    ctx: &mut SolveContext,
    puzzle: &Puzzle,
    (r, c): (usize, usize),
    filled: bool,
) -> (Propagation, Board) {
    debug_assert!(ctx.queue.is_empty());
    ctx.board.set_cell(r, c, filled);
    ctx.queue.push(LineId::row(r));
    ctx.queue.push(LineId::col(c));
    let outcome = propagation::run(ctx, puzzle);
    (outcome, ctx.board)
}

/// Forces every cell the two stalled outcomes agree on; returns whether
/// anything changed. Changed lines are queued for the follow-up propagation.
fn commit_agreement(ctx: &mut SolveContext, a: &Board, b: &Board) -> bool {
    let mut changed = false;
    for r in 0..SIZE {
        let a_row = a.line(LineId::row(r));
        let b_row = b.line(LineId::row(r));
        let agree = a_row.known & b_row.known & !(a_row.filled ^ b_row.filled);
        let fresh = agree & !ctx.board.line(LineId::row(r)).known;
        if fresh == 0 {
            continue;
        }
        changed = true;
        for p in bits(fresh) {
            ctx.board.set_cell(r, p, a_row.filled & bit(p) != 0);
            ctx.queue.push(LineId::col(p));
        }
        ctx.queue.push(LineId::row(r));
    }
    changed
}

/// Probes until fixpoint in first-solution mode.
pub fn probe(ctx: &mut SolveContext, puzzle: &Puzzle) -> ProbeOutcome {
    loop {
        ctx.probe_rounds += 1;
        let mut progressed = false;

        for (r, c) in unknown_cells(&ctx.board) {
            if ctx.board.cell(r, c) != CellState::Unknown {
                continue;
            }
            let saved = ctx.board;

            let (filled_out, filled_board) = trial(ctx, puzzle, (r, c), true);
            ctx.board = saved;
            let (empty_out, empty_board) = trial(ctx, puzzle, (r, c), false);
            ctx.board = saved;

            match (filled_out, empty_out) {
                (Propagation::Contradiction, Propagation::Contradiction) => {
                    return ProbeOutcome::Contradiction;
                }
                (Propagation::Solved, _) => {
                    ctx.board = filled_board;
                    return ProbeOutcome::Solved;
                }
                (_, Propagation::Solved) => {
                    ctx.board = empty_board;
                    return ProbeOutcome::Solved;
                }
                (Propagation::Contradiction, Propagation::Stalled) => {
                    ctx.board = empty_board;
                    progressed = true;
                }
                (Propagation::Stalled, Propagation::Contradiction) => {
                    ctx.board = filled_board;
                    progressed = true;
                }
                (Propagation::Stalled, Propagation::Stalled) => {
                    if commit_agreement(ctx, &filled_board, &empty_board) {
                        progressed = true;
                        match propagation::run(ctx, puzzle) {
                            Propagation::Solved => return ProbeOutcome::Solved,
                            Propagation::Contradiction => return ProbeOutcome::Contradiction,
                            Propagation::Stalled => {}
                        }
                    }
                }
            }
        }

        if !progressed {
            break;
        }
    }

    branch_cell(&ctx.board).map_or(ProbeOutcome::Solved, |branch| ProbeOutcome::Stalled { branch })
}

/// Registers a complete grid against the recorded first solution.
///
/// Returns `true` when the grid is a *second*, distinct solution.
pub(crate) fn second_solution(found: &mut Option<Grid>, grid: Grid) -> bool {
    match found {
        None => {
            *found = Some(grid);
            false
        }
        Some(first) => *first != grid,
    }
}

/// Probes until fixpoint in two-solution mode.
///
/// Trials that complete the board are candidate solutions rather than
/// immediate wins: the first is recorded, a distinct second one ends the
/// whole verification with [`VerifyProbeOutcome::Multiple`].
pub fn probe_verify(
    ctx: &mut SolveContext,
    puzzle: &Puzzle,
    found: &mut Option<Grid>,
) -> VerifyProbeOutcome {
    loop {
        ctx.probe_rounds += 1;
        let mut progressed = false;

        for (r, c) in unknown_cells(&ctx.board) {
            if ctx.board.cell(r, c) != CellState::Unknown {
                continue;
            }
            let saved = ctx.board;

            let (filled_out, filled_board) = trial(ctx, puzzle, (r, c), true);
            ctx.board = saved;
            let (empty_out, empty_board) = trial(ctx, puzzle, (r, c), false);
            ctx.board = saved;

            match (filled_out, empty_out) {
                (Propagation::Contradiction, Propagation::Contradiction) => {
                    return VerifyProbeOutcome::Contradiction;
                }
                (Propagation::Solved, Propagation::Solved) => {
                    // The two grids differ at (r, c): two solutions.
                    if found.is_none() {
                        *found = Some(filled_board.grid());
                    }
                    return VerifyProbeOutcome::Multiple;
                }
                (Propagation::Solved, Propagation::Contradiction) => {
                    // The cell is forced filled and its completion is the
                    // only assignment left in this subtree.
                    ctx.board = filled_board;
                    return if second_solution(found, filled_board.grid()) {
                        VerifyProbeOutcome::Multiple
                    } else {
                        VerifyProbeOutcome::Solved
                    };
                }
                (Propagation::Contradiction, Propagation::Solved) => {
                    ctx.board = empty_board;
                    return if second_solution(found, empty_board.grid()) {
                        VerifyProbeOutcome::Multiple
                    } else {
                        VerifyProbeOutcome::Solved
                    };
                }
                (Propagation::Solved, Propagation::Stalled) => {
                    // One side already reaches a full solution; register it
                    // and keep searching, the stalled side may hide another.
                    if second_solution(found, filled_board.grid()) {
                        return VerifyProbeOutcome::Multiple;
                    }
                }
                (Propagation::Stalled, Propagation::Solved) => {
                    if second_solution(found, empty_board.grid()) {
                        return VerifyProbeOutcome::Multiple;
                    }
                }
                (Propagation::Contradiction, Propagation::Stalled) => {
                    ctx.board = empty_board;
                    progressed = true;
                }
                (Propagation::Stalled, Propagation::Contradiction) => {
                    ctx.board = filled_board;
                    progressed = true;
                }
                (Propagation::Stalled, Propagation::Stalled) => {
                    if commit_agreement(ctx, &filled_board, &empty_board) {
                        progressed = true;
                        match propagation::run(ctx, puzzle) {
                            Propagation::Solved => {
                                let grid = ctx.board.grid();
                                return if second_solution(found, grid) {
                                    VerifyProbeOutcome::Multiple
                                } else {
                                    VerifyProbeOutcome::Solved
                                };
                            }
                            Propagation::Contradiction => {
                                return VerifyProbeOutcome::Contradiction;
                            }
                            Propagation::Stalled => {}
                        }
                    }
                }
            }
        }

        if !progressed {
            break;
        }
    }

    branch_cell(&ctx.board)
        .map_or(VerifyProbeOutcome::Solved, |branch| VerifyProbeOutcome::Stalled { branch })
}
