//! Static evaluation used at alpha-beta leaves and by the greedy fallback.

use crate::board::{Board, Color};
use crate::constants::{
    CORNER_WEIGHT, MOBILITY_WEIGHT, OPPONENT_MOBILITY_PENALTY, PIECE_DIFF_WEIGHT,
};

/// Score `board` from `side`'s point of view; higher is better for `side`.
///
/// Combines the disc differential, corners held, and the mobility of both
/// sides. Pure: the board is only read.
pub fn evaluate(board: &Board, side: Color) -> f64 {
    let opponent = side.opponent();

    let diff = board.count(side) as f64 - board.count(opponent) as f64;
    let corners = board
        .corners()
        .iter()
        .filter(|&&(r, c)| board.get(r, c) == Some(side))
        .count() as f64;
    let opp_moves = board.legal_moves(opponent).len() as f64;
    let my_moves = board.legal_moves(side).len() as f64;

    diff * PIECE_DIFF_WEIGHT + corners * CORNER_WEIGHT - opp_moves * OPPONENT_MOBILITY_PENALTY
        + my_moves * MOBILITY_WEIGHT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opening_is_symmetric() {
        let board = Board::standard(8).unwrap();
        // 0 diff, 0 corners, 4 moves each: -4 + 0.8
        let black = evaluate(&board, Color::Black);
        let white = evaluate(&board, Color::White);
        assert!((black - (-3.2)).abs() < 1e-9);
        assert!((black - white).abs() < 1e-9);
    }

    #[test]
    fn test_corner_and_diff() {
        let board = Board::parse(
            "B . . .
             . . . .
             . . . .
             . . . .",
        )
        .unwrap();
        // diff 1 => 10, one corner => 5, no moves for either side
        assert!((evaluate(&board, Color::Black) - 15.0).abs() < 1e-9);
        assert!((evaluate(&board, Color::White) + 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_evaluate_does_not_mutate() {
        let board = Board::standard(6).unwrap();
        let copy = board.clone();
        evaluate(&board, Color::White);
        assert_eq!(board, copy);
    }
}
