//! Heuristic-guided rollouts (random game simulation).
//!
//! A rollout plays a fixed number of plies from a position. At each ply the
//! mover prefers moves that set up a sandwich across a gap; among the
//! candidates it picks uniformly at random between the best-scoring ones:
//! - Capture bonus: long flips
//! - Gap-fill bonus: an empty cell followed by an own disc along a ray
//! - Corner bonus
//! - Mobility left to the mover afterwards

use crate::board::{Board, Color, Move};
use crate::constants::{
    CAPTURE_WEIGHT, CORNER_BONUS, DIRECTIONS, GAP_FILL_BONUS, MAX_GAP, ROLLOUT_MOBILITY_WEIGHT,
};

/// `CAPTURE_WEIGHT` per opponent disc in every run from `mv` that ends on a
/// disc of `mover`.
///
/// Scans the board *before* the move: once the move is applied those runs
/// have been flipped and nothing is left to count.
pub fn capture_bonus(before: &Board, mv: Move, mover: Color) -> f64 {
    let opp = mover.opponent();
    let mut bonus = 0.0;
    for dir in DIRECTIONS {
        let mut count = 0;
        let mut steps = 1;
        while let Some((r, c)) = before.offset(mv.row, mv.col, dir, steps) {
            match before.get(r, c) {
                Some(color) if color == opp => {
                    count += 1;
                    steps += 1;
                }
                Some(_) => {
                    bonus += CAPTURE_WEIGHT * count as f64;
                    break;
                }
                None => break,
            }
        }
    }
    bonus
}

/// `GAP_FILL_BONUS` for each direction from `mv` where, within `MAX_GAP`
/// cells, an empty cell is immediately followed by a disc of `mover`.
///
/// Each direction counts at most once. Evaluated on the board after the move.
pub fn gap_fill_bonus(after: &Board, mv: Move, mover: Color) -> f64 {
    let directions = DIRECTIONS
        .iter()
        .filter(|&&dir| {
            (1..=MAX_GAP).any(|gap| {
                let empty = after.offset(mv.row, mv.col, dir, gap);
                let own = after.offset(mv.row, mv.col, dir, gap + 1);
                match (empty, own) {
                    (Some((er, ec)), Some((or, oc))) => {
                        after.get(er, ec).is_none() && after.get(or, oc) == Some(mover)
                    }
                    _ => false,
                }
            })
        })
        .count();
    GAP_FILL_BONUS * directions as f64
}

pub fn corner_bonus(board: &Board, mv: Move) -> f64 {
    if board.is_corner(mv.row, mv.col) {
        CORNER_BONUS
    } else {
        0.0
    }
}

pub fn mobility_bonus(after: &Board, mover: Color) -> f64 {
    ROLLOUT_MOBILITY_WEIGHT * after.legal_moves(mover).len() as f64
}

/// Composite rollout score of `mv`, given the boards before and after it.
pub fn rollout_score(before: &Board, after: &Board, mv: Move, mover: Color) -> f64 {
    capture_bonus(before, mv, mover)
        + gap_fill_bonus(after, mv, mover)
        + corner_bonus(after, mv)
        + mobility_bonus(after, mover)
}

/// Choose the rollout move for `side`, or `None` if it must pass.
///
/// Only moves with a positive gap-fill bonus are considered when any exist.
/// Ties on the composite score are broken uniformly at random.
pub fn choose_rollout_move(board: &Board, side: Color, rng: &mut fastrand::Rng) -> Option<Move> {
    let candidates: Vec<(Move, Board, f64)> = board
        .legal_moves(side)
        .into_iter()
        .map(|mv| {
            let mut after = board.clone();
            after.apply_move(mv, side);
            let gap = gap_fill_bonus(&after, mv, side);
            (mv, after, gap)
        })
        .collect();
    if candidates.is_empty() {
        return None;
    }

    let any_gap = candidates.iter().any(|&(_, _, gap)| gap > 0.0);
    let scored: Vec<(Move, f64)> = candidates
        .iter()
        .filter(|&&(_, _, gap)| !any_gap || gap > 0.0)
        .map(|(mv, after, _)| (*mv, rollout_score(board, after, *mv, side)))
        .collect();

    let top = scored
        .iter()
        .map(|&(_, s)| s)
        .fold(f64::NEG_INFINITY, f64::max);
    let best: Vec<Move> = scored
        .iter()
        .filter(|&&(_, s)| s == top)
        .map(|&(mv, _)| mv)
        .collect();
    if best.is_empty() {
        return None;
    }
    Some(best[rng.usize(..best.len())])
}

/// Play a rollout of `depth` plies from `board` with `to_move` to play.
///
/// A side without a legal move passes; two passes in a row end the game.
/// Returns 1.0 if `root_side` has more discs at the end, 0.5 on a tie and
/// 0.0 otherwise.
pub fn rollout(
    board: &Board,
    to_move: Color,
    root_side: Color,
    depth: usize,
    rng: &mut fastrand::Rng,
) -> f64 {
    let mut board = board.clone();
    let mut side = to_move;
    let mut passes = 0;

    for _ in 0..depth {
        if passes >= 2 {
            break;
        }
        match choose_rollout_move(&board, side, rng) {
            Some(mv) => {
                board.apply_move(mv, side);
                passes = 0;
            }
            None => passes += 1,
        }
        side = side.opponent();
    }

    outcome(&board, root_side)
}

fn outcome(board: &Board, root_side: Color) -> f64 {
    let mine = board.count(root_side);
    let theirs = board.count(root_side.opponent());
    match mine.cmp(&theirs) {
        std::cmp::Ordering::Greater => 1.0,
        std::cmp::Ordering::Equal => 0.5,
        std::cmp::Ordering::Less => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::ROLLOUT_DEPTH;

    #[test]
    fn test_capture_bonus_counts_bracketed_runs() {
        let board = Board::parse(
            ". W W B
             W . . .
             B . . .
             . . . .",
        )
        .unwrap();
        // east: 2 discs, south: 1 disc
        assert_eq!(capture_bonus(&board, Move::new(0, 0), Color::Black), 30.0);
        // nothing bracketed for white
        assert_eq!(capture_bonus(&board, Move::new(0, 0), Color::White), 0.0);
    }

    #[test]
    fn test_capture_bonus_ignores_open_runs() {
        let board = Board::parse(
            ". W W .
             . . . .
             . . . .
             . . . .",
        )
        .unwrap();
        assert_eq!(capture_bonus(&board, Move::new(0, 0), Color::Black), 0.0);
    }

    #[test]
    fn test_gap_fill_bonus() {
        let board = Board::parse(
            "B . B . .
             . . . . .
             . . . . .
             . . . . B
             . . . . .",
        )
        .unwrap();
        // east: gap at (0,1) then own disc at (0,2); other rays have no pattern
        assert_eq!(gap_fill_bonus(&board, Move::new(0, 0), Color::Black), 40.0);
        // no white discs to close a gap
        assert_eq!(gap_fill_bonus(&board, Move::new(0, 0), Color::White), 0.0);
    }

    #[test]
    fn test_gap_fill_counts_each_direction_once() {
        let board = Board::parse(
            "B . B . B
             . . . . .
             B . . . .
             . . . . .
             . . . . .",
        )
        .unwrap();
        // east matches at gap 1 and gap 3, south at gap 1
        assert_eq!(gap_fill_bonus(&board, Move::new(0, 0), Color::Black), 80.0);
    }

    #[test]
    fn test_corner_and_mobility() {
        let board = Board::standard(4).unwrap();
        assert_eq!(corner_bonus(&board, Move::new(3, 0)), CORNER_BONUS);
        assert_eq!(corner_bonus(&board, Move::new(1, 0)), 0.0);
        assert!((mobility_bonus(&board, Color::Black) - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_choose_rollout_move_is_legal() {
        let board = Board::standard(8).unwrap();
        let mut rng = fastrand::Rng::with_seed(42);
        for _ in 0..20 {
            let mv = choose_rollout_move(&board, Color::Black, &mut rng).unwrap();
            assert!(board.legal_moves(Color::Black).contains(&mv));
        }
    }

    #[test]
    fn test_choose_rollout_move_passes() {
        let board = Board::parse(
            "B B
             B B",
        )
        .unwrap();
        let mut rng = fastrand::Rng::with_seed(1);
        assert_eq!(choose_rollout_move(&board, Color::White, &mut rng), None);
    }

    #[test]
    fn test_rollout_outcome() {
        let won = Board::parse(
            "B B
             B W",
        )
        .unwrap();
        let mut rng = fastrand::Rng::with_seed(5);
        assert_eq!(rollout(&won, Color::White, Color::Black, 20, &mut rng), 1.0);
        assert_eq!(rollout(&won, Color::Black, Color::White, 20, &mut rng), 0.0);

        let tied = Board::parse(
            "B W
             W B",
        )
        .unwrap();
        assert_eq!(rollout(&tied, Color::Black, Color::Black, 20, &mut rng), 0.5);
    }

    #[test]
    fn test_rollout_leaves_input_untouched() {
        let board = Board::standard(6).unwrap();
        let copy = board.clone();
        let mut rng = fastrand::Rng::with_seed(9);
        let value = rollout(&board, Color::Black, Color::Black, ROLLOUT_DEPTH, &mut rng);
        assert!([0.0, 0.5, 1.0].contains(&value));
        assert_eq!(board, copy);
    }
}
