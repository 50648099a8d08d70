#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! Clues: the ordered run-lengths attached to one line.

use crate::solver::bitline::{bits, LineMask};
use crate::solver::error::Error;
use crate::solver::{MAX_RUNS, SIZE};
use smallvec::SmallVec;
use std::fmt::Display;

/// The ordered list of run lengths for a single row or column.
///
/// A clue with zero runs is legal and means the line is entirely empty.
/// Every stored run is at least 1 and the whole clue satisfies the
/// feasibility invariant `sum(runs) + (count - 1) <= SIZE`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Clue {
    runs: SmallVec<[u8; MAX_RUNS]>,
}

impl Clue {
    /// Builds a clue from run lengths, validating feasibility.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedInput`] (reported at input line 0; callers
    /// with position information attach their own) when a run is zero or the
    /// runs plus mandatory gaps cannot fit in a line.
    pub fn new(runs: impl IntoIterator<Item = usize>) -> Result<Self, Error> {
        let runs: SmallVec<[u8; MAX_RUNS]> = runs
            .into_iter()
            .map(|r| {
                if r == 0 || r > SIZE {
                    Err(Error::malformed(0, format!("run length {r} out of range")))
                } else {
                    #[allow(clippy::cast_possible_truncation)]
                    Ok(r as u8)
                }
            })
            .collect::<Result<_, _>>()?;

        let clue = Self { runs };
        if clue.min_len() > SIZE {
            return Err(Error::malformed(
                0,
                format!("clue needs {} cells but the line has {SIZE}", clue.min_len()),
            ));
        }
        Ok(clue)
    }

    /// The all-empty clue.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            runs: SmallVec::new(),
        }
    }

    /// Reads the clue back off a fully decided line, given its filled mask.
    #[must_use]
    pub fn from_mask(filled: LineMask) -> Self {
        let mut runs = SmallVec::new();
        let mut current = 0u8;
        let mut prev: Option<usize> = None;
        for p in bits(filled) {
            if prev == Some(p.wrapping_sub(1)) {
                current += 1;
            } else {
                if current > 0 {
                    runs.push(current);
                }
                current = 1;
            }
            prev = Some(p);
        }
        if current > 0 {
            runs.push(current);
        }
        Self { runs }
    }

    /// Number of runs.
    #[must_use]
    pub fn count(&self) -> usize {
        self.runs.len()
    }

    /// `true` when the clue has no runs at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Length of run `i` (0-based).
    #[must_use]
    pub fn run(&self, i: usize) -> usize {
        usize::from(self.runs[i])
    }

    /// Iterator over the run lengths in order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.runs.iter().map(|&r| usize::from(r))
    }

    /// Minimum cells any placement of this clue occupies: the run total plus
    /// one separator per adjacent pair.
    #[must_use]
    pub fn min_len(&self) -> usize {
        if self.runs.is_empty() {
            0
        } else {
            self.iter().sum::<usize>() + self.runs.len() - 1
        }
    }
}

impl Display for Clue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.runs.is_empty() {
            return write!(f, "0");
        }
        for (i, r) in self.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{r}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::bitline::{full, run_mask};

    #[test]
    fn test_new_validates_runs() {
        assert!(Clue::new([1, 2, 3]).is_ok());
        assert!(Clue::new([0]).is_err());
        assert!(Clue::new([SIZE + 1]).is_err());
    }

    #[test]
    fn test_new_validates_feasibility() {
        // 13 runs of 1 need 25 cells: exactly feasible.
        assert!(Clue::new(vec![1; MAX_RUNS]).is_ok());
        // 14 runs of 1 need 27.
        assert!(Clue::new(vec![1; MAX_RUNS + 1]).is_err());
        assert!(Clue::new([12, 12]).is_ok());
        assert!(Clue::new([13, 12]).is_err());
    }

    #[test]
    fn test_min_len() {
        assert_eq!(Clue::empty().min_len(), 0);
        assert_eq!(Clue::new([SIZE]).unwrap().min_len(), SIZE);
        assert_eq!(Clue::new([1, 1]).unwrap().min_len(), 3);
    }

    #[test]
    fn test_from_mask() {
        assert_eq!(Clue::from_mask(0), Clue::empty());
        assert_eq!(Clue::from_mask(full()), Clue::new([SIZE]).unwrap());
        // 0b1101 = runs 1 then 2, low bits first.
        assert_eq!(Clue::from_mask(0b1101), Clue::new([1, 2]).unwrap());
        assert_eq!(
            Clue::from_mask(run_mask(3) | (run_mask(2) << 10)),
            Clue::new([3, 2]).unwrap()
        );
    }
}
