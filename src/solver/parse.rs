#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! Parser for the TAAI clue-stream format.
//!
//! A stream is a sequence of puzzles, each introduced by a `$<index>` line
//! and followed by exactly `2 * SIZE` clue lines: the first `SIZE` describe
//! columns (column 0 first), the next `SIZE` describe rows. A clue line is
//! whitespace-separated positive integers; an empty line or a line of only
//! zeros is the empty clue. Feasibility is validated here, not assumed.
//!
//! Single-puzzle files carry the same `2 * SIZE` clue lines and may omit
//! the `$` header.

use crate::solver::clue::Clue;
use crate::solver::error::Error;
use crate::solver::puzzle::Puzzle;
use crate::solver::SIZE;
use rustc_hash::FxHashSet;
use std::io::BufRead;

/// One entry of a parsed batch stream.
#[derive(Debug)]
pub struct BatchEntry {
    /// The index from the `$` header.
    pub index: usize,
    /// The parsed puzzle, or what went wrong with it. A malformed puzzle
    /// does not poison the rest of the stream.
    pub puzzle: Result<Puzzle, Error>,
}

/// Parses one clue line into a [`Clue`].
fn parse_clue_line(text: &str, line_no: usize) -> Result<Clue, Error> {
    let mut runs = Vec::new();
    let mut zeros = 0usize;
    for token in text.split_whitespace() {
        let value: usize = token
            .parse()
            .map_err(|_| Error::malformed(line_no, format!("bad clue token {token:?}")))?;
        if value == 0 {
            zeros += 1;
        } else {
            runs.push(value);
        }
    }
    if zeros > 0 && !runs.is_empty() {
        return Err(Error::malformed(
            line_no,
            "zero mixed with nonzero run lengths",
        ));
    }
    Clue::new(runs).map_err(|e| match e {
        Error::MalformedInput { reason, .. } => Error::malformed(line_no, reason),
        other => other,
    })
}

/// Reads `2 * SIZE` clue lines (columns first) and builds a puzzle.
fn parse_clue_block<I>(lines: &mut I, start_line: usize) -> Result<Puzzle, Error>
where
    I: Iterator<Item = (usize, String)>,
{
    let mut cols = Vec::with_capacity(SIZE);
    let mut rows = Vec::with_capacity(SIZE);
    for i in 0..2 * SIZE {
        let Some((line_no, text)) = lines.next() else {
            return Err(Error::malformed(
                start_line,
                format!("expected {} clue lines, stream ended after {i}", 2 * SIZE),
            ));
        };
        let clue = parse_clue_line(&text, line_no)?;
        if i < SIZE {
            cols.push(clue);
        } else {
            rows.push(clue);
        }
    }
    Puzzle::new(rows, cols)
}

/// Parses a single-puzzle file, tolerating an optional `$` header line.
///
/// # Errors
///
/// [`Error::MalformedInput`] on bad tokens, infeasible clues or a short
/// stream; [`Error::Io`] when reading fails.
pub fn parse_puzzle<R: BufRead>(reader: R) -> Result<Puzzle, Error> {
    let mut lines = read_lines(reader)?.into_iter().peekable();
    let has_header = lines
        .peek()
        .is_some_and(|(_, first)| first.trim_start().starts_with('$'));
    if has_header {
        lines.next();
    }
    parse_clue_block(&mut lines, 1)
}

/// Parses a whole batch stream.
///
/// Puzzles are resynchronized at `$` lines, so one malformed puzzle is
/// reported in its [`BatchEntry`] and the next header starts clean.
///
/// # Errors
///
/// [`Error::Io`] when reading fails; [`Error::MalformedInput`] when the
/// stream structure itself is broken (no `$` header where one is required,
/// or a duplicated puzzle index).
pub fn parse_batch<R: BufRead>(reader: R) -> Result<Vec<BatchEntry>, Error> {
    let mut lines = read_lines(reader)?.into_iter().peekable();
    let mut entries = Vec::new();
    let mut seen = FxHashSet::default();

    loop {
        // Skip blank padding between puzzles.
        while lines
            .peek()
            .is_some_and(|(_, text)| text.trim().is_empty())
        {
            lines.next();
        }
        let Some((line_no, header)) = lines.next() else {
            break;
        };
        let header = header.trim();
        let Some(index_text) = header.strip_prefix('$') else {
            return Err(Error::malformed(
                line_no,
                format!("expected a $<index> header, got {header:?}"),
            ));
        };
        let index: usize = index_text.trim().parse().map_err(|_| {
            Error::malformed(line_no, format!("bad puzzle index {index_text:?}"))
        })?;
        if !seen.insert(index) {
            return Err(Error::malformed(
                line_no,
                format!("duplicate puzzle index {index}"),
            ));
        }

        let puzzle = parse_clue_block(&mut lines, line_no);
        if puzzle.is_err() {
            // Resynchronize at the next header so one bad puzzle does not
            // take the rest of the stream down with it.
            while lines
                .peek()
                .is_some_and(|(_, text)| !text.trim_start().starts_with('$'))
            {
                lines.next();
            }
        }
        entries.push(BatchEntry { index, puzzle });
    }

    Ok(entries)
}

/// Reads the stream into `(1-based line number, text)` pairs.
fn read_lines<R: BufRead>(reader: R) -> Result<Vec<(usize, String)>, Error> {
    let mut out = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        out.push((i + 1, line?));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::puzzle::LineId;
    use itertools::Itertools;
    use std::io::Cursor;

    /// A stream of `2 * SIZE` identical clue lines.
    fn uniform_block(clue_text: &str) -> String {
        std::iter::repeat(clue_text).take(2 * SIZE).join("\n")
    }

    #[test]
    fn test_parse_single_puzzle() {
        let input = uniform_block("25");
        let puzzle = parse_puzzle(Cursor::new(input)).unwrap();
        assert_eq!(*puzzle.clue(LineId::row(0)), Clue::new([SIZE]).unwrap());
        assert_eq!(*puzzle.clue(LineId::col(SIZE - 1)), Clue::new([SIZE]).unwrap());
    }

    #[test]
    fn test_parse_single_puzzle_with_header() {
        let input = format!("$1\n{}", uniform_block("1 2 3"));
        let puzzle = parse_puzzle(Cursor::new(input)).unwrap();
        assert_eq!(*puzzle.clue(LineId::row(3)), Clue::new([1, 2, 3]).unwrap());
    }

    #[test]
    fn test_empty_and_zero_lines_are_empty_clues() {
        let mut lines = vec![String::new(); SIZE];
        lines.extend(vec!["0".to_string(); SIZE]);
        let puzzle = parse_puzzle(Cursor::new(lines.join("\n"))).unwrap();
        assert_eq!(*puzzle.clue(LineId::col(0)), Clue::empty());
        assert_eq!(*puzzle.clue(LineId::row(0)), Clue::empty());
    }

    #[test]
    fn test_columns_come_first() {
        // Column clues all (2), row clues all (3).
        let mut lines = vec!["2".to_string(); SIZE];
        lines.extend(vec!["3".to_string(); SIZE]);
        let puzzle = parse_puzzle(Cursor::new(lines.join("\n"))).unwrap();
        assert_eq!(*puzzle.clue(LineId::col(7)), Clue::new([2]).unwrap());
        assert_eq!(*puzzle.clue(LineId::row(7)), Clue::new([3]).unwrap());
    }

    #[test]
    fn test_rejects_bad_token() {
        let mut lines = vec!["1".to_string(); 2 * SIZE];
        lines[4] = "2 x 3".to_string();
        let err = parse_puzzle(Cursor::new(lines.join("\n"))).unwrap_err();
        assert!(matches!(err, Error::MalformedInput { line: 5, .. }));
    }

    #[test]
    fn test_rejects_infeasible_clue() {
        let mut lines = vec!["1".to_string(); 2 * SIZE];
        lines[0] = "13 12".to_string(); // needs 26 cells
        assert!(parse_puzzle(Cursor::new(lines.join("\n"))).is_err());
    }

    #[test]
    fn test_rejects_short_stream() {
        let input = "1\n2\n3\n";
        assert!(parse_puzzle(Cursor::new(input)).is_err());
    }

    #[test]
    fn test_rejects_zero_mixed_with_runs() {
        let mut lines = vec!["1".to_string(); 2 * SIZE];
        lines[0] = "0 2".to_string();
        assert!(parse_puzzle(Cursor::new(lines.join("\n"))).is_err());
    }

    #[test]
    fn test_parse_batch_two_puzzles() {
        let input = format!(
            "$1\n{}\n$2\n{}\n",
            uniform_block("25"),
            uniform_block("1")
        );
        let entries = parse_batch(Cursor::new(input)).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].index, 1);
        assert_eq!(entries[1].index, 2);
        assert!(entries[0].puzzle.is_ok());
        assert!(entries[1].puzzle.is_ok());
    }

    #[test]
    fn test_parse_batch_rejects_duplicate_index() {
        let input = format!(
            "$1\n{}\n$1\n{}\n",
            uniform_block("1"),
            uniform_block("1")
        );
        assert!(parse_batch(Cursor::new(input)).is_err());
    }

    #[test]
    fn test_parse_batch_requires_header() {
        let input = uniform_block("1");
        assert!(parse_batch(Cursor::new(input)).is_err());
    }

    #[test]
    fn test_malformed_entry_does_not_poison_the_stream() {
        let mut bad_block = vec!["1".to_string(); 2 * SIZE];
        bad_block[0] = "nope".to_string();
        let input = format!(
            "$1\n{}\n$2\n{}\n",
            bad_block.join("\n"),
            uniform_block("2")
        );
        let entries = parse_batch(Cursor::new(input)).unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries[0].puzzle.is_err());
        assert!(entries[1].puzzle.is_ok());
    }
}
