#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! Per-solve state: board, queue, cache, counters, cancellation.
//!
//! Everything a single solve mutates lives in one [`SolveContext`] passed
//! explicitly through the pipeline. Distinct puzzles get distinct contexts
//! and therefore share nothing, which is what makes batch-level parallelism
//! possible without any locking.

use crate::solver::board::Board;
use crate::solver::queue::LineQueue;
use crate::solver::zobrist::LineCache;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Default Zobrist seed; override with [`SolveOptions::seed`] or the
/// `NONOGRAM_SEED` environment variable (resolved by the CLI).
pub const DEFAULT_SEED: u64 = 0x9e37_79b9_7f4a_7c15;

/// Default memo-table capacity in entries.
pub const DEFAULT_CACHE_CAPACITY: usize = 1 << 20;

/// Tunables for one solve.
#[derive(Debug, Clone)]
pub struct SolveOptions {
    /// Seed for the Zobrist tag tables. Fixed seed, reproducible run.
    pub seed: u64,
    /// Memo-table capacity in entries, rounded up to a power of two.
    pub cache_capacity: usize,
    /// Abort the search after this many DFS nodes, if set.
    pub node_limit: Option<u64>,
    /// Cooperative cancellation flag, checked between DFS nodes.
    pub cancel: Option<CancelToken>,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            node_limit: None,
            cancel: None,
        }
    }
}

/// Shared flag for cancelling a solve from another thread.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// A token in the not-cancelled state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation; the solver notices at its next DFS node.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// `true` once [`CancelToken::cancel`] has been called.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Counters reported after a solve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolveStats {
    /// DFS entries, counting the root pass.
    pub nodes: u64,
    /// Probe rounds across the whole search.
    pub probe_rounds: u64,
    /// Memo-table hits.
    pub cache_hits: u64,
    /// Memo-table misses.
    pub cache_misses: u64,
}

/// The mutable state of one solve in flight.
#[derive(Debug)]
pub struct SolveContext {
    /// Current partial assignment.
    pub(crate) board: Board,
    /// Lines awaiting a re-solve.
    pub(crate) queue: LineQueue,
    /// Line-verdict memo table, private to this solve.
    pub(crate) cache: LineCache,
    /// DFS entries so far.
    pub(crate) nodes: u64,
    /// Probe rounds so far.
    pub(crate) probe_rounds: u64,
    node_limit: Option<u64>,
    cancel: Option<CancelToken>,
}

impl SolveContext {
    /// A fresh context: blank board, every line queued for a first pass.
    #[must_use]
    pub fn new(options: &SolveOptions) -> Self {
        let mut queue = LineQueue::new();
        queue.seed_all();
        Self {
            board: Board::new(),
            queue,
            cache: LineCache::new(options.cache_capacity, options.seed),
            nodes: 0,
            probe_rounds: 0,
            node_limit: options.node_limit,
            cancel: options.cancel.clone(),
        }
    }

    /// `true` when the caller asked the search to stop.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancelToken::is_cancelled)
    }

    /// `true` when the node budget, if any, is spent.
    #[must_use]
    pub const fn node_budget_spent(&self) -> bool {
        match self.node_limit {
            Some(limit) => self.nodes >= limit,
            None => false,
        }
    }

    /// Snapshot of the counters.
    #[must_use]
    pub fn stats(&self) -> SolveStats {
        SolveStats {
            nodes: self.nodes,
            probe_rounds: self.probe_rounds,
            cache_hits: self.cache.hits(),
            cache_misses: self.cache.misses(),
        }
    }
}
