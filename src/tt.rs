//! Transposition table keyed by Zobrist fingerprint.
//!
//! Stores are unconditional (last write wins). Scores are always from the
//! perspective of the side to move at the stored node. Fingerprints ignore
//! the side to move, so each entry records it and an entry stored for the
//! other side is treated as a miss.

use std::collections::HashMap;

use crate::board::{Color, Move};

/// How a stored score relates to the true value of the node.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Bound {
    /// The score is the exact value.
    Exact,
    /// The search failed high: the true value is at least the score.
    Lower,
    /// The search failed low: the true value is at most the score.
    Upper,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Entry {
    pub side: Color,
    pub depth: u32,
    pub score: f64,
    pub bound: Bound,
    pub best_move: Option<Move>,
}

/// Outcome of consulting the table before searching a node.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Probe {
    /// The entry settles the node; return it without searching.
    Cutoff { score: f64, best_move: Option<Move> },
    /// Search the node with this (possibly narrowed) window.
    Window { alpha: f64, beta: f64 },
}

#[derive(Clone, Debug, Default)]
pub struct TranspositionTable {
    entries: HashMap<u64, Entry>,
}

impl TranspositionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lookup(&self, key: u64) -> Option<&Entry> {
        self.entries.get(&key)
    }

    /// Entry for `key` stored with `side` to move.
    fn entry_for(&self, key: u64, side: Color) -> Option<&Entry> {
        self.lookup(key).filter(|e| e.side == side)
    }

    pub fn store(
        &mut self,
        key: u64,
        side: Color,
        depth: u32,
        score: f64,
        bound: Bound,
        best_move: Option<Move>,
    ) {
        self.entries.insert(
            key,
            Entry {
                side,
                depth,
                score,
                bound,
                best_move,
            },
        );
    }

    /// Apply the lookup policy for a node with `side` to move, searched to
    /// `depth` with window `(alpha, beta)`.
    ///
    /// Entries for the other side or shallower than `depth` are ignored. An exact entry settles the
    /// node; bound entries tighten the window, and an emptied window settles
    /// it with the entry's score.
    pub fn probe(
        &self,
        key: u64,
        side: Color,
        depth: u32,
        mut alpha: f64,
        mut beta: f64,
    ) -> Probe {
        let Some(entry) = self.entry_for(key, side).filter(|e| e.depth >= depth) else {
            return Probe::Window { alpha, beta };
        };

        match entry.bound {
            Bound::Exact => {
                return Probe::Cutoff {
                    score: entry.score,
                    best_move: entry.best_move,
                };
            }
            Bound::Lower if entry.score > alpha => alpha = entry.score,
            Bound::Upper if entry.score < beta => beta = entry.score,
            _ => {}
        }

        if alpha >= beta {
            Probe::Cutoff {
                score: entry.score,
                best_move: entry.best_move,
            }
        } else {
            Probe::Window { alpha, beta }
        }
    }

    /// Remembered best move for `key` with `side` to move, at any depth.
    pub fn best_move(&self, key: u64, side: Color) -> Option<Move> {
        self.entry_for(key, side).and_then(|e| e.best_move)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
