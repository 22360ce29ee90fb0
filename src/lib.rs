//! Reversi-Search: time-bounded move selection for a capture game on an n×n grid.
//!
//! Two interchangeable engines pick a move for one side before a wall-clock
//! deadline: iterative-deepening negamax with alpha-beta pruning and a
//! transposition table, and Monte Carlo Tree Search with heuristic rollouts.
//!
//! ## Modules
//!
//! - [`constants`] - Evaluation weights and search parameters
//! - [`board`] - Board representation and capture rules
//! - [`zobrist`] - Position fingerprints
//! - [`eval`] - Static evaluation
//! - [`ordering`] - Move ordering for alpha-beta
//! - [`tt`] - Transposition table
//! - [`alphabeta`] - Negamax alpha-beta search
//! - [`deepening`] - Iterative deepening driver
//! - [`playout`] - Rollout heuristics and playouts
//! - [`mcts`] - Monte Carlo Tree Search
//! - [`agent`] - Move-selection entry point
//!
//! ## Example
//!
//! ```
//! use std::time::Duration;
//! use reversi_search::agent::{Agent, SearchConfig, Strategy};
//! use reversi_search::board::{Board, Color};
//!
//! let board = Board::standard(8).unwrap();
//! let config = SearchConfig::default()
//!     .with_strategy(Strategy::AlphaBeta)
//!     .with_time_budget(Duration::from_millis(50));
//!
//! let mut agent = Agent::new(config);
//! let mv = agent.select_move(&board, Color::Black).unwrap();
//! assert!(board.legal_moves(Color::Black).contains(&mv));
//! println!("Best move: {mv}");
//! ```

pub mod agent;
pub mod alphabeta;
pub mod board;
pub mod constants;
pub mod deepening;
pub mod eval;
pub mod mcts;
pub mod ordering;
pub mod playout;
pub mod tt;
pub mod zobrist;
