#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! The immutable puzzle: one clue per line, plus flat line addressing.
//!
//! Lines are numbered `0..LINE_COUNT`: rows first, then columns. The flat id
//! is what the work queue and the Zobrist tags key on; the typed accessors
//! keep orientation arithmetic in one place.

use crate::solver::bitline::LineMask;
use crate::solver::clue::Clue;
use crate::solver::error::Error;
use crate::solver::{LINE_COUNT, SIZE};
use std::fmt::Display;

/// Identifier of a single line: rows occupy `0..SIZE`, columns
/// `SIZE..2*SIZE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineId(usize);

impl LineId {
    /// The id of row `r`.
    #[must_use]
    pub const fn row(r: usize) -> Self {
        debug_assert!(r < SIZE);
        Self(r)
    }

    /// The id of column `c`.
    #[must_use]
    pub const fn col(c: usize) -> Self {
        debug_assert!(c < SIZE);
        Self(SIZE + c)
    }

    /// Flat index in `0..LINE_COUNT`.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }

    /// Rebuilds a `LineId` from its flat index.
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        debug_assert!(index < LINE_COUNT);
        Self(index)
    }

    /// `true` for rows, `false` for columns.
    #[must_use]
    pub const fn is_row(self) -> bool {
        self.0 < SIZE
    }

    /// Position of the line within its own orientation.
    #[must_use]
    pub const fn offset(self) -> usize {
        if self.is_row() {
            self.0
        } else {
            self.0 - SIZE
        }
    }

    /// The perpendicular line through cell position `p` of this line.
    #[must_use]
    pub const fn cross(self, p: usize) -> Self {
        if self.is_row() {
            Self::col(p)
        } else {
            Self::row(p)
        }
    }

    /// Board coordinates `(row, col)` of cell position `p` on this line.
    #[must_use]
    pub const fn cell(self, p: usize) -> (usize, usize) {
        if self.is_row() {
            (self.offset(), p)
        } else {
            (p, self.offset())
        }
    }
}

impl Display for LineId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_row() {
            write!(f, "row {}", self.offset())
        } else {
            write!(f, "col {}", self.offset())
        }
    }
}

/// A puzzle: the full clue set, immutable for the lifetime of a solve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    /// Clues indexed by flat line id: rows then columns.
    lines: Vec<Clue>,
}

impl Puzzle {
    /// Builds a puzzle from `SIZE` row clues and `SIZE` column clues.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedInput`] when either list has the wrong
    /// length.
    pub fn new(rows: Vec<Clue>, cols: Vec<Clue>) -> Result<Self, Error> {
        if rows.len() != SIZE || cols.len() != SIZE {
            return Err(Error::malformed(
                0,
                format!(
                    "expected {SIZE} row and {SIZE} column clues, got {} and {}",
                    rows.len(),
                    cols.len()
                ),
            ));
        }
        let mut lines = rows;
        lines.extend(cols);
        Ok(Self { lines })
    }

    /// Derives the puzzle whose unique pencil-and-paper reading matches the
    /// given solved grid (row filled-masks, one per row).
    #[must_use]
    pub fn from_grid(rows: &[LineMask; SIZE]) -> Self {
        let row_clues = rows.iter().map(|&m| Clue::from_mask(m)).collect();
        let col_clues = (0..SIZE)
            .map(|c| {
                let mut mask: LineMask = 0;
                for (r, &row) in rows.iter().enumerate() {
                    if row & crate::solver::bitline::bit(c) != 0 {
                        mask |= crate::solver::bitline::bit(r);
                    }
                }
                Clue::from_mask(mask)
            })
            .collect();
        let mut lines: Vec<Clue> = row_clues;
        let mut cols: Vec<Clue> = col_clues;
        lines.append(&mut cols);
        Self { lines }
    }

    /// The clue of the given line.
    #[must_use]
    pub fn clue(&self, line: LineId) -> &Clue {
        &self.lines[line.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::bitline::{bit, full};

    #[test]
    fn test_line_id_addressing() {
        let r = LineId::row(3);
        let c = LineId::col(7);
        assert!(r.is_row());
        assert!(!c.is_row());
        assert_eq!(r.offset(), 3);
        assert_eq!(c.offset(), 7);
        assert_eq!(r.cross(7), c.cross(3).cross(7));
        assert_eq!(r.cell(7), (3, 7));
        assert_eq!(c.cell(3), (3, 7));
        assert_eq!(LineId::from_index(r.index()), r);
        assert_eq!(LineId::from_index(c.index()), c);
    }

    #[test]
    fn test_new_rejects_wrong_counts() {
        let rows = vec![Clue::empty(); SIZE];
        let cols = vec![Clue::empty(); SIZE - 1];
        assert!(Puzzle::new(rows, cols).is_err());
    }

    #[test]
    fn test_from_grid_diagonal() {
        let mut grid = [0; SIZE];
        for (r, row) in grid.iter_mut().enumerate() {
            *row = bit(r);
        }
        let puzzle = Puzzle::from_grid(&grid);
        for i in 0..SIZE {
            assert_eq!(*puzzle.clue(LineId::row(i)), Clue::new([1]).unwrap());
            assert_eq!(*puzzle.clue(LineId::col(i)), Clue::new([1]).unwrap());
        }
    }

    #[test]
    fn test_from_grid_full() {
        let grid = [full(); SIZE];
        let puzzle = Puzzle::from_grid(&grid);
        for i in 0..SIZE {
            assert_eq!(*puzzle.clue(LineId::row(i)), Clue::new([SIZE]).unwrap());
            assert_eq!(*puzzle.clue(LineId::col(i)), Clue::new([SIZE]).unwrap());
        }
    }
}
