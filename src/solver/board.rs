#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! The mutable board: three-valued cell state as paired bitmasks.
//!
//! Each line carries a `known` mask (1 where the cell is decided) and a
//! `filled` mask (1 where decided-and-filled); `known & !filled` is the
//! decided-empty set. The board stores every line twice, row-indexed and
//! column-indexed, and the two views are projections of the same cell
//! array: every write goes through [`Board::set_cell`], which updates both.
//!
//! The whole board is a few hundred bytes and `Copy`; search snapshots are
//! plain value copies.

use crate::solver::bitline::{bit, count, full, LineMask};
use crate::solver::puzzle::LineId;
use crate::solver::{CELL_COUNT, SIZE};
use std::fmt::Display;

/// Decision state of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellState {
    /// Not yet decided.
    #[default]
    Unknown,
    /// Decided filled.
    Filled,
    /// Decided empty.
    Empty,
}

/// The two masks describing one line's cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LineCells {
    /// 1 where the cell is decided.
    pub known: LineMask,
    /// 1 where the cell is decided and filled. Always a subset of `known`.
    pub filled: LineMask,
}

impl LineCells {
    /// Mask of decided-empty cells.
    #[must_use]
    pub const fn empty_mask(self) -> LineMask {
        self.known & !self.filled
    }

    /// Number of undecided cells on the line.
    #[must_use]
    pub const fn unknown_count(self) -> u32 {
        count(!self.known)
    }

    /// `true` when every cell of the line is decided.
    #[must_use]
    pub const fn is_decided(self) -> bool {
        self.known == full()
    }
}

/// The partial assignment for the whole board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    rows: [LineCells; SIZE],
    cols: [LineCells; SIZE],
    known_count: usize,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// An all-unknown board.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            rows: [LineCells {
                known: 0,
                filled: 0,
            }; SIZE],
            cols: [LineCells {
                known: 0,
                filled: 0,
            }; SIZE],
            known_count: 0,
        }
    }

    /// The mask pair of a line, read from the view that owns it.
    #[must_use]
    pub const fn line(&self, line: LineId) -> LineCells {
        if line.is_row() {
            self.rows[line.offset()]
        } else {
            self.cols[line.offset()]
        }
    }

    /// State of cell `(r, c)`.
    #[must_use]
    pub const fn cell(&self, r: usize, c: usize) -> CellState {
        let row = self.rows[r];
        if row.known & bit(c) == 0 {
            CellState::Unknown
        } else if row.filled & bit(c) != 0 {
            CellState::Filled
        } else {
            CellState::Empty
        }
    }

    /// Decides cell `(r, c)`, updating both views.
    ///
    /// The cell must currently be unknown; deciding a decided cell would
    /// desynchronize `known_count`.
    pub fn set_cell(&mut self, r: usize, c: usize, filled: bool) {
        debug_assert!(matches!(self.cell(r, c), CellState::Unknown));
        self.rows[r].known |= bit(c);
        self.cols[c].known |= bit(r);
        if filled {
            self.rows[r].filled |= bit(c);
            self.cols[c].filled |= bit(r);
        }
        self.known_count += 1;
    }

    /// Decides cell position `p` along `line`, updating both views.
    pub fn set_on_line(&mut self, line: LineId, p: usize, filled: bool) {
        let (r, c) = line.cell(p);
        self.set_cell(r, c, filled);
    }

    /// Number of decided cells.
    #[must_use]
    pub const fn known_count(&self) -> usize {
        self.known_count
    }

    /// `true` when every cell is decided.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.known_count == CELL_COUNT
    }

    /// The filled masks of all rows. Only meaningful once complete.
    #[must_use]
    pub fn grid(&self) -> Grid {
        debug_assert!(self.is_complete());
        let mut rows = [0; SIZE];
        for (r, out) in rows.iter_mut().enumerate() {
            *out = self.rows[r].filled;
        }
        Grid(rows)
    }

    /// Checks that the row view and the column view describe the same cells
    /// and that `filled` never escapes `known`. Used by tests and debug
    /// assertions.
    #[must_use]
    pub fn views_agree(&self) -> bool {
        let mut count = 0;
        for r in 0..SIZE {
            if self.rows[r].filled & !self.rows[r].known != 0
                || self.cols[r].filled & !self.cols[r].known != 0
                || self.rows[r].known & !full() != 0
                || self.cols[r].known & !full() != 0
            {
                return false;
            }
            count += crate::solver::bitline::count(self.rows[r].known) as usize;
        }
        for r in 0..SIZE {
            for c in 0..SIZE {
                let via_row = (
                    self.rows[r].known & bit(c) != 0,
                    self.rows[r].filled & bit(c) != 0,
                );
                let via_col = (
                    self.cols[c].known & bit(r) != 0,
                    self.cols[c].filled & bit(r) != 0,
                );
                if via_row != via_col {
                    return false;
                }
            }
        }
        count == self.known_count
    }
}

/// A fully decided board: one filled-mask per row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid(
    /// Filled mask of each row, row 0 first.
    pub [LineMask; SIZE],
);

impl Display for Grid {
    /// Renders `SIZE` lines of `SIZE` characters from `{0, 1}`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in &self.0 {
            for c in 0..SIZE {
                write!(f, "{}", u32::from(row & bit(c) != 0))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl Display for Board {
    /// Debug rendering: `#` filled, `.` empty, `?` unknown.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for r in 0..SIZE {
            for c in 0..SIZE {
                let glyph = match self.cell(r, c) {
                    CellState::Filled => '#',
                    CellState::Empty => '.',
                    CellState::Unknown => '?',
                };
                write!(f, "{glyph}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_unknown() {
        let board = Board::new();
        assert_eq!(board.known_count(), 0);
        assert!(!board.is_complete());
        assert_eq!(board.cell(0, 0), CellState::Unknown);
        assert!(board.views_agree());
    }

    #[test]
    fn test_set_cell_updates_both_views() {
        let mut board = Board::new();
        board.set_cell(2, 5, true);
        board.set_cell(2, 6, false);

        assert_eq!(board.cell(2, 5), CellState::Filled);
        assert_eq!(board.cell(2, 6), CellState::Empty);
        assert_eq!(board.known_count(), 2);

        let row = board.line(LineId::row(2));
        assert_eq!(row.known, bit(5) | bit(6));
        assert_eq!(row.filled, bit(5));

        let col = board.line(LineId::col(5));
        assert_eq!(col.known, bit(2));
        assert_eq!(col.filled, bit(2));
        assert!(board.views_agree());
    }

    #[test]
    fn test_set_on_line_orientation() {
        let mut board = Board::new();
        board.set_on_line(LineId::col(4), 9, true);
        assert_eq!(board.cell(9, 4), CellState::Filled);
        assert!(board.views_agree());
    }

    #[test]
    fn test_snapshot_restore_is_value_copy() {
        let mut board = Board::new();
        board.set_cell(0, 0, true);
        let saved = board;
        board.set_cell(1, 1, false);
        assert_eq!(board.known_count(), 2);
        board = saved;
        assert_eq!(board.known_count(), 1);
        assert_eq!(board.cell(1, 1), CellState::Unknown);
    }

    #[test]
    fn test_grid_display() {
        let mut board = Board::new();
        for r in 0..SIZE {
            for c in 0..SIZE {
                board.set_cell(r, c, r == c);
            }
        }
        assert!(board.is_complete());
        let text = board.grid().to_string();
        let first = text.lines().next().unwrap();
        assert_eq!(first.len(), SIZE);
        assert!(first.starts_with('1'));
        assert_eq!(first.matches('1').count(), 1);
    }
}
