#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! Per-line inference: the strongest cell-wise deduction one clue allows.
//!
//! Given a clue and the line's current masks, the solver considers every
//! placement of the runs that is consistent with the decided cells, without
//! materializing them: a forward table `f[i][p]` ("the first `i` runs fit in
//! the first `p` cells") and a backward table `g[i][p]` ("runs `i..` fit in
//! cells `p..`") are filled in Θ(runs · SIZE), then every cell is classified
//! by whether some feasible placement covers it and whether some leaves it
//! out. A cell no placement leaves out is forced filled; a cell no placement
//! covers is forced empty. If no placement exists at all the line is
//! contradictory.
//!
//! The returned masks carry only newly forced cells: a line that is already
//! fully decided and consistent yields two zero masks.

use crate::solver::bitline::{bit, full, run_mask, span, LineMask};
use crate::solver::board::LineCells;
use crate::solver::clue::Clue;
use crate::solver::{MAX_RUNS, SIZE};

/// Outcome of solving one line against its clue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineVerdict {
    /// No placement of the clue is consistent with the decided cells.
    Contradiction,
    /// The cells every feasible placement agrees on, minus already-known
    /// ones. Both masks may be zero.
    Forced {
        /// Cells forced filled.
        fill: LineMask,
        /// Cells forced empty.
        empty: LineMask,
    },
}

impl LineVerdict {
    /// `true` when the verdict forces nothing new.
    #[must_use]
    pub const fn is_settled(self) -> bool {
        matches!(self, Self::Forced { fill: 0, empty: 0 })
    }
}

/// Computes the tightest cell-wise deduction for one line.
#[must_use]
pub fn solve_line(clue: &Clue, cells: LineCells) -> LineVerdict {
    let k = clue.count();
    // Cells a run may not cover, and cells that may not stay empty.
    let blocked = cells.empty_mask();
    let committed = cells.filled;

    // f[i][p]: the first i runs can be placed within cells [0, p).
    let mut f = [[false; SIZE + 1]; MAX_RUNS + 1];
    f[0][0] = true;
    for p in 1..=SIZE {
        f[0][p] = f[0][p - 1] && committed & bit(p - 1) == 0;
    }
    for i in 1..=k {
        let r = clue.run(i - 1);
        for p in 1..=SIZE {
            // Leave cell p-1 empty, or end run i exactly at it.
            let mut ok = f[i][p - 1] && committed & bit(p - 1) == 0;
            if !ok && p >= r && blocked & span(p - r, p) == 0 {
                let s = p - r;
                ok = if i == 1 {
                    f[0][s]
                } else {
                    s >= 1 && committed & bit(s - 1) == 0 && f[i - 1][s - 1]
                };
            }
            f[i][p] = ok;
        }
    }

    if !f[k][SIZE] {
        return LineVerdict::Contradiction;
    }

    // g[i][p]: runs i..=k can be placed within cells [p, SIZE).
    let mut g = [[false; SIZE + 1]; MAX_RUNS + 2];
    g[k + 1][SIZE] = true;
    for p in (0..SIZE).rev() {
        g[k + 1][p] = g[k + 1][p + 1] && committed & bit(p) == 0;
    }
    for i in (1..=k).rev() {
        let r = clue.run(i - 1);
        for p in (0..SIZE).rev() {
            // Leave cell p empty, or start run i exactly at it.
            let mut ok = g[i][p + 1] && committed & bit(p) == 0;
            if !ok && p + r <= SIZE && blocked & span(p, p + r) == 0 {
                let e = p + r;
                ok = if i == k {
                    g[k + 1][e]
                } else {
                    e < SIZE && committed & bit(e) == 0 && g[i + 1][e + 1]
                };
            }
            g[i][p] = ok;
        }
    }

    // Projection: which cells can some feasible placement leave empty, and
    // which can some placement cover.
    let mut can_empty: LineMask = 0;
    for c in 0..SIZE {
        if committed & bit(c) != 0 {
            continue;
        }
        if (0..=k).any(|i| f[i][c] && g[i + 1][c + 1]) {
            can_empty |= bit(c);
        }
    }

    let mut can_fill: LineMask = 0;
    for i in 1..=k {
        let r = clue.run(i - 1);
        for s in 0..=(SIZE - r) {
            if blocked & span(s, s + r) != 0 {
                continue;
            }
            let before = if i == 1 {
                f[0][s]
            } else {
                s >= 1 && committed & bit(s - 1) == 0 && f[i - 1][s - 1]
            };
            if !before {
                continue;
            }
            let e = s + r;
            let after = if i == k {
                g[k + 1][e]
            } else {
                e < SIZE && committed & bit(e) == 0 && g[i + 1][e + 1]
            };
            if after {
                can_fill |= run_mask(r) << s;
            }
        }
    }

    LineVerdict::Forced {
        fill: full() & !can_empty & !cells.known,
        empty: full() & !can_fill & !cells.known,
    }
}
