#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! Zobrist-keyed memo table for line-solver verdicts.
//!
//! Every (line id, bit position, plane) triple gets a random 64-bit tag at
//! construction, drawn from a seeded generator so runs are reproducible.
//! The key of a line state XORs the tags of the set bits of both masks with
//! a per-line tag, which also makes incremental re-keying possible even
//! though nothing here depends on it.
//!
//! The table is open-addressed with linear probing and stores the full
//! `(line, known, filled)` key next to each verdict: a hash collision can
//! cost a miss, never a wrong answer. When no free slot turns up within the
//! probe bound the store is skipped and solving continues uncached.

use crate::solver::bitline::{bits, LineMask};
use crate::solver::board::LineCells;
use crate::solver::line_solver::LineVerdict;
use crate::solver::puzzle::LineId;
use crate::solver::{LINE_COUNT, SIZE};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Slots examined before a lookup or store gives up.
const PROBE_LIMIT: usize = 32;

/// The random tag tables the cache key is built from.
#[derive(Debug, Clone)]
pub struct ZobristKeys {
    line: [u64; LINE_COUNT],
    known: [[u64; SIZE]; LINE_COUNT],
    filled: [[u64; SIZE]; LINE_COUNT],
}

impl ZobristKeys {
    /// Generates the tag tables from a seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut keys = Self {
            line: [0; LINE_COUNT],
            known: [[0; SIZE]; LINE_COUNT],
            filled: [[0; SIZE]; LINE_COUNT],
        };
        for l in 0..LINE_COUNT {
            keys.line[l] = rng.gen();
            for p in 0..SIZE {
                keys.known[l][p] = rng.gen();
                keys.filled[l][p] = rng.gen();
            }
        }
        keys
    }

    /// The fingerprint of one line state.
    #[must_use]
    pub fn key(&self, line: LineId, cells: LineCells) -> u64 {
        let l = line.index();
        let mut key = self.line[l];
        for p in bits(cells.known) {
            key ^= self.known[l][p];
        }
        for p in bits(cells.filled) {
            key ^= self.filled[l][p];
        }
        key
    }
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    line: u16,
    known: LineMask,
    filled: LineMask,
    verdict: LineVerdict,
}

/// Memo table from line states to line-solver verdicts.
#[derive(Debug)]
pub struct LineCache {
    keys: ZobristKeys,
    slots: Vec<Option<Entry>>,
    mask: usize,
    hits: u64,
    misses: u64,
    skipped_stores: u64,
}

impl LineCache {
    /// Builds a cache with at least `capacity` slots (rounded up to a power
    /// of two) and tags drawn from `seed`.
    #[must_use]
    pub fn new(capacity: usize, seed: u64) -> Self {
        let capacity = capacity.max(PROBE_LIMIT).next_power_of_two();
        Self {
            keys: ZobristKeys::new(seed),
            slots: vec![None; capacity],
            mask: capacity - 1,
            hits: 0,
            misses: 0,
            skipped_stores: 0,
        }
    }

    /// Looks up the verdict cached for this exact line state.
    ///
    /// A hit requires the stored full key to match; the fingerprint alone is
    /// never trusted.
    pub fn lookup(&mut self, line: LineId, cells: LineCells) -> Option<LineVerdict> {
        let start = self.keys.key(line, cells) as usize & self.mask;
        for i in 0..PROBE_LIMIT {
            let slot = (start + i) & self.mask;
            match &self.slots[slot] {
                None => break,
                Some(entry) => {
                    if entry.line as usize == line.index()
                        && entry.known == cells.known
                        && entry.filled == cells.filled
                    {
                        self.hits += 1;
                        return Some(entry.verdict);
                    }
                }
            }
        }
        self.misses += 1;
        None
    }

    /// Records a verdict for this line state.
    ///
    /// If every probed slot is occupied by a different key the store is
    /// dropped; the cache degrades to recomputation rather than evicting.
    pub fn store(&mut self, line: LineId, cells: LineCells, verdict: LineVerdict) {
        let start = self.keys.key(line, cells) as usize & self.mask;
        for i in 0..PROBE_LIMIT {
            let slot = (start + i) & self.mask;
            let replace = match &self.slots[slot] {
                None => true,
                Some(entry) => {
                    entry.line as usize == line.index()
                        && entry.known == cells.known
                        && entry.filled == cells.filled
                }
            };
            if replace {
                #[allow(clippy::cast_possible_truncation)]
                let entry = Entry {
                    line: line.index() as u16,
                    known: cells.known,
                    filled: cells.filled,
                    verdict,
                };
                self.slots[slot] = Some(entry);
                return;
            }
        }
        self.skipped_stores += 1;
    }

    /// Number of lookups answered from the table.
    #[must_use]
    pub const fn hits(&self) -> u64 {
        self.hits
    }

    /// Number of lookups that fell through to recomputation.
    #[must_use]
    pub const fn misses(&self) -> u64 {
        self.misses
    }

    /// Number of stores dropped because the probe window was full.
    #[must_use]
    pub const fn skipped_stores(&self) -> u64 {
        self.skipped_stores
    }
}
