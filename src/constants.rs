//! Constants for board geometry, evaluation weights, and search parameters.
//!
//! The heuristic weights are empirically chosen. Changing any of them changes
//! which move the engines pick, so tests pinned to literal positions treat
//! them as fixed inputs.

use std::time::Duration;

// =============================================================================
// Board Geometry
// =============================================================================

/// Smallest accepted board side length.
pub const MIN_BOARD_SIZE: usize = 2;

/// Largest accepted board side length (one column letter per file).
pub const MAX_BOARD_SIZE: usize = 26;

/// Ray directions as (row, column) steps.
/// Order: North, NE, East, SE, South, SW, West, NW
pub const DIRECTIONS: [(isize, isize); 8] = [
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
];

// =============================================================================
// Static Evaluation Weights
// =============================================================================

/// Weight of the piece-count differential.
pub const PIECE_DIFF_WEIGHT: f64 = 10.0;

/// Bonus per corner held by the side being evaluated.
pub const CORNER_WEIGHT: f64 = 5.0;

/// Penalty per legal move available to the opponent.
pub const OPPONENT_MOBILITY_PENALTY: f64 = 1.0;

/// Bonus per legal move available to the side being evaluated.
pub const MOBILITY_WEIGHT: f64 = 0.2;

// =============================================================================
// Alpha-Beta Parameters
// =============================================================================

/// Deepest ply iterative deepening will attempt.
pub const MAX_DEPTH: u32 = 8;

/// Default wall-clock budget per decision.
pub const DEFAULT_TIME_BUDGET: Duration = Duration::from_millis(1900);

/// Deadline distance used when a budget is too large to add to the clock.
pub const FAR_FUTURE: Duration = Duration::from_secs(365 * 24 * 60 * 60);

// =============================================================================
// Rollout Heuristics
// =============================================================================

/// Bonus per opponent disc in a bracketed run from the destination.
pub const CAPTURE_WEIGHT: f64 = 10.0;

/// Flat bonus per direction that sets up a future sandwich across a gap.
pub const GAP_FILL_BONUS: f64 = 40.0;

/// Longest gap considered by the gap-fill pattern.
pub const MAX_GAP: usize = 3;

/// Flat bonus for playing into a corner.
pub const CORNER_BONUS: f64 = 15.0;

/// Bonus per legal move left to the mover after the move.
pub const ROLLOUT_MOBILITY_WEIGHT: f64 = 0.2;

// =============================================================================
// MCTS (Monte Carlo Tree Search) Parameters
// =============================================================================

/// UCB1 exploration constant.
pub const UCB_EXPLORATION: f64 = 1.3;

/// Added to visit counts in UCB1 denominators.
pub const UCB_EPSILON: f64 = 1e-9;

/// Plies simulated by each rollout.
pub const ROLLOUT_DEPTH: usize = 20;
