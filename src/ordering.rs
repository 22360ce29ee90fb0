//! Move ordering for alpha-beta.

use std::cmp::Reverse;

use crate::board::{Board, Color, Move};

/// Order `moves` so the likeliest cutoffs are searched first.
///
/// `preferred` (normally the table's remembered best move) goes first when
/// it is among `moves`. The rest are ranked by the disc differential after
/// playing them on a private copy; ties keep enumeration order.
pub fn order_moves(
    board: &Board,
    moves: &[Move],
    side: Color,
    preferred: Option<Move>,
) -> Vec<Move> {
    let opponent = side.opponent();
    let mut scored: Vec<(i64, Move)> = moves
        .iter()
        .filter(|&&mv| Some(mv) != preferred)
        .map(|&mv| {
            let mut child = board.clone();
            child.apply_move(mv, side);
            let diff = child.count(side) as i64 - child.count(opponent) as i64;
            (diff, mv)
        })
        .collect();
    scored.sort_by_key(|&(diff, _)| Reverse(diff));

    let mut ordered = Vec::with_capacity(moves.len());
    if let Some(mv) = preferred.filter(|mv| moves.contains(mv)) {
        ordered.push(mv);
    }
    ordered.extend(scored.into_iter().map(|(_, mv)| mv));
    ordered
}
