//! Negamax alpha-beta search with a transposition table.
//!
//! Scores are always from the perspective of the side to move at the node
//! being searched; a child's score is negated on the way up. The search is
//! single-threaded and checks a wall-clock deadline at every node and before
//! every child. Missing the deadline unwinds the whole stack with
//! [`Timeout`], carrying no partial result.

use std::time::Instant;

use log::trace;
use thiserror::Error;

use crate::board::{Board, Color, Move};
use crate::constants::MAX_DEPTH;
use crate::eval::evaluate;
use crate::ordering::order_moves;
use crate::tt::{Bound, Probe, TranspositionTable};
use crate::zobrist::ZobristHasher;

/// The search deadline passed before the search finished.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
#[error("search deadline exceeded")]
pub struct Timeout;

/// Alpha-beta engine state: the transposition table and the hasher keying it.
///
/// Both persist across decisions and are reset only when the board size
/// changes. Not safe for concurrent use; give each thread its own engine.
pub struct AlphaBeta {
    pub(crate) tt: TranspositionTable,
    pub(crate) hasher: ZobristHasher,
    pub(crate) max_depth: u32,
    nodes: u64,
}

impl Default for AlphaBeta {
    fn default() -> Self {
        Self::new()
    }
}

impl AlphaBeta {
    pub fn new() -> Self {
        Self::with_hasher(ZobristHasher::new())
    }

    /// Create an engine with reproducible Zobrist keys.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_hasher(ZobristHasher::with_seed(seed))
    }

    fn with_hasher(hasher: ZobristHasher) -> Self {
        Self {
            tt: TranspositionTable::new(),
            hasher,
            max_depth: MAX_DEPTH,
            nodes: 0,
        }
    }

    /// Deepest ply iterative deepening will attempt.
    pub fn with_max_depth(mut self, depth: u32) -> Self {
        self.max_depth = depth.max(1);
        self
    }

    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    /// Nodes visited since the last [`AlphaBeta::reset_nodes`].
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    pub fn reset_nodes(&mut self) {
        self.nodes = 0;
    }

    pub fn table(&self) -> &TranspositionTable {
        &self.tt
    }

    /// Drop cached results if `size` differs from the size they were built for.
    pub(crate) fn prepare(&mut self, size: usize) {
        if self.hasher.size() != size {
            self.tt.clear();
            self.hasher.init(size);
        }
    }

    /// Search `board` to `depth` plies for `side` within `(alpha, beta)`.
    ///
    /// Returns the node's score and the best move found. The move is `None`
    /// only at leaves (depth exhausted or no legal move) or when a table
    /// entry without a move settles the node.
    pub fn search(
        &mut self,
        board: &Board,
        depth: u32,
        mut alpha: f64,
        mut beta: f64,
        side: Color,
        deadline: Instant,
    ) -> Result<(f64, Option<Move>), Timeout> {
        if Instant::now() > deadline {
            return Err(Timeout);
        }
        self.nodes += 1;
        self.prepare(board.size());

        let key = self.hasher.hash(board);
        match self.tt.probe(key, side, depth, alpha, beta) {
            Probe::Cutoff { score, best_move } => {
                trace!("tt cutoff depth={depth} score={score}");
                return Ok((score, best_move));
            }
            Probe::Window { alpha: a, beta: b } => {
                alpha = a;
                beta = b;
            }
        }

        let legal = board.legal_moves(side);
        if depth == 0 || legal.is_empty() {
            return Ok((evaluate(board, side), None));
        }

        // Window actually searched; the result is classified against it.
        let (alpha_searched, beta_searched) = (alpha, beta);

        let moves = order_moves(board, &legal, side, self.tt.best_move(key, side));
        let mut best_move = moves.first().copied();
        let mut value = f64::NEG_INFINITY;

        for mv in moves {
            if Instant::now() > deadline {
                return Err(Timeout);
            }

            let mut child = board.clone();
            child.apply_move(mv, side);
            let (child_score, _) =
                self.search(&child, depth - 1, -beta, -alpha, side.opponent(), deadline)?;
            let score = -child_score;

            if score > value {
                value = score;
                best_move = Some(mv);
            }
            alpha = alpha.max(value);
            if alpha >= beta {
                break;
            }
        }

        let bound = if value <= alpha_searched {
            Bound::Upper
        } else if value >= beta_searched {
            Bound::Lower
        } else {
            Bound::Exact
        };
        self.tt.store(key, side, depth, value, bound, best_move);

        Ok((value, best_move))
    }
}
