#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! FIFO work queue over line ids with set semantics.
//!
//! A ring buffer of `LINE_COUNT + 1` slots plus a membership bitmask (the
//! 2·SIZE line ids fit in one `u64`). Pushing an id already in the queue is
//! a no-op, so the queue never holds duplicates and never overflows.

use crate::solver::puzzle::LineId;
use crate::solver::LINE_COUNT;

const SLOTS: usize = LINE_COUNT + 1;

/// The set of lines awaiting a re-solve, dequeued first-in first-out.
#[derive(Debug, Clone)]
pub struct LineQueue {
    data: [usize; SLOTS],
    head: usize,
    tail: usize,
    members: u64,
}

impl Default for LineQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl LineQueue {
    /// An empty queue.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            data: [0; SLOTS],
            head: 0,
            tail: 0,
            members: 0,
        }
    }

    /// Enqueues a line unless it is already pending.
    pub fn push(&mut self, line: LineId) {
        let index = line.index();
        if self.members & (1 << index) != 0 {
            return;
        }
        self.members |= 1 << index;
        self.data[self.tail] = index;
        self.tail = (self.tail + 1) % SLOTS;
    }

    /// Dequeues the oldest pending line.
    pub fn pop(&mut self) -> Option<LineId> {
        if self.head == self.tail {
            return None;
        }
        let index = self.data[self.head];
        self.head = (self.head + 1) % SLOTS;
        self.members &= !(1 << index);
        Some(LineId::from_index(index))
    }

    /// `true` when nothing is pending.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.head == self.tail
    }

    /// `true` when the line is pending.
    #[must_use]
    pub const fn contains(&self, line: LineId) -> bool {
        self.members & (1 << line.index()) != 0
    }

    /// Drops everything pending.
    pub fn clear(&mut self) {
        self.head = 0;
        self.tail = 0;
        self.members = 0;
    }

    /// Enqueues every line on the board, rows first.
    pub fn seed_all(&mut self) {
        for index in 0..LINE_COUNT {
            self.push(LineId::from_index(index));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_order() {
        let mut q = LineQueue::new();
        q.push(LineId::row(3));
        q.push(LineId::col(1));
        q.push(LineId::row(0));
        assert_eq!(q.pop(), Some(LineId::row(3)));
        assert_eq!(q.pop(), Some(LineId::col(1)));
        assert_eq!(q.pop(), Some(LineId::row(0)));
        assert_eq!(q.pop(), None);
    }

    #[test]
    fn test_set_semantics() {
        let mut q = LineQueue::new();
        q.push(LineId::row(5));
        q.push(LineId::row(5));
        q.push(LineId::row(5));
        assert!(q.contains(LineId::row(5)));
        assert_eq!(q.pop(), Some(LineId::row(5)));
        assert!(q.is_empty());
    }

    #[test]
    fn test_seed_all_holds_every_line() {
        let mut q = LineQueue::new();
        q.seed_all();
        let mut seen = 0;
        while q.pop().is_some() {
            seen += 1;
        }
        assert_eq!(seen, LINE_COUNT);
    }

    #[test]
    fn test_wraparound() {
        let mut q = LineQueue::new();
        // Cycle more entries through than the buffer holds.
        for round in 0..3 {
            q.seed_all();
            let mut seen = 0;
            while let Some(line) = q.pop() {
                assert!(line.index() < LINE_COUNT, "round {round}");
                seen += 1;
            }
            assert_eq!(seen, LINE_COUNT);
        }
    }

    #[test]
    fn test_clear() {
        let mut q = LineQueue::new();
        q.seed_all();
        q.clear();
        assert!(q.is_empty());
        assert!(!q.contains(LineId::row(0)));
    }
}
