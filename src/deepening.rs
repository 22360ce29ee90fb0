//! Iterative deepening on top of [`AlphaBeta::search`].

use std::time::{Duration, Instant};

use log::debug;

use crate::alphabeta::{AlphaBeta, Timeout};
use crate::board::{Board, Color, Move};
use crate::constants::FAR_FUTURE;
use crate::eval::evaluate;

impl AlphaBeta {
    /// Pick a move for `side` within `budget`.
    ///
    /// Searches depth 1, 2, ... up to the configured maximum against one
    /// shared deadline and keeps the move of the deepest depth that finished.
    /// A depth cut short by the deadline is discarded. When no depth
    /// finishes, falls back to [`greedy_move`]. Returns `None` only when
    /// `side` has no legal move.
    pub fn decide(&mut self, board: &Board, side: Color, budget: Duration) -> Option<Move> {
        let start = Instant::now();
        let deadline = deadline_after(start, budget);

        let legal = board.legal_moves(side);
        if legal.is_empty() {
            return None;
        }
        self.prepare(board.size());
        self.reset_nodes();

        let mut best = None;
        for depth in 1..=self.max_depth {
            match self.search(board, depth, f64::NEG_INFINITY, f64::INFINITY, side, deadline) {
                Ok((score, Some(mv))) if legal.contains(&mv) => {
                    debug!(
                        "depth {depth} done: move={mv} score={score:.1} nodes={} elapsed={:?}",
                        self.nodes(),
                        start.elapsed()
                    );
                    best = Some(mv);
                }
                Ok((score, mv)) => {
                    debug!("depth {depth} returned unusable move {mv:?} (score {score:.1})");
                }
                Err(Timeout) => {
                    debug!("depth {depth} cancelled after {:?}", start.elapsed());
                    break;
                }
            }
        }

        best.or_else(|| {
            debug!("no depth completed, using greedy fallback");
            greedy_move(board, side, &legal)
        })
        .or_else(|| legal.first().copied())
    }
}

/// `start + budget`, saturating to a far-future instant on overflow.
pub(crate) fn deadline_after(start: Instant, budget: Duration) -> Instant {
    start
        .checked_add(budget)
        .or_else(|| start.checked_add(FAR_FUTURE))
        .unwrap_or(start)
}

/// One-ply fallback: the move whose resulting position evaluates best for
/// `side`, ties going to the earlier move.
pub fn greedy_move(board: &Board, side: Color, moves: &[Move]) -> Option<Move> {
    let mut best: Option<(f64, Move)> = None;
    for &mv in moves {
        let mut child = board.clone();
        child.apply_move(mv, side);
        let score = evaluate(&child, side);
        if best.is_none_or(|(best_score, _)| score > best_score) {
            best = Some((score, mv));
        }
    }
    best.map(|(_, mv)| mv)
}
