//! Move-selection entry point.
//!
//! An [`Agent`] owns the state of both engines and dispatches each decision
//! to the strategy named in its [`SearchConfig`]. It returns `None` only when
//! the side to move has no legal move.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use log::info;
use thiserror::Error;

use crate::alphabeta::AlphaBeta;
use crate::board::{Board, Color, Move};
use crate::constants::{DEFAULT_TIME_BUDGET, MAX_DEPTH};
use crate::mcts::Mcts;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Strategy {
    /// Iterative-deepening negamax with alpha-beta pruning.
    #[default]
    AlphaBeta,
    /// Monte Carlo Tree Search with heuristic rollouts.
    Mcts,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown strategy {0:?} (expected \"alphabeta\" or \"mcts\")")]
pub struct ParseStrategyError(String);

impl FromStr for Strategy {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "alphabeta" | "alpha-beta" | "ab" => Ok(Strategy::AlphaBeta),
            "mcts" => Ok(Strategy::Mcts),
            _ => Err(ParseStrategyError(s.to_string())),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::AlphaBeta => f.write_str("alphabeta"),
            Strategy::Mcts => f.write_str("mcts"),
        }
    }
}

/// Per-agent search settings.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchConfig {
    pub strategy: Strategy,
    /// Wall-clock budget per decision.
    pub time_budget: Duration,
    /// Deepest alpha-beta ply.
    pub max_depth: u32,
    /// Seed for Zobrist keys and MCTS randomness; random when `None`.
    pub seed: Option<u64>,
    /// Optional MCTS simulation cap on top of the time budget.
    pub max_simulations: Option<u32>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            time_budget: DEFAULT_TIME_BUDGET,
            max_depth: MAX_DEPTH,
            seed: None,
            max_simulations: None,
        }
    }
}

impl SearchConfig {
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = budget;
        self
    }

    pub fn with_max_depth(mut self, depth: u32) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_max_simulations(mut self, sims: u32) -> Self {
        self.max_simulations = Some(sims);
        self
    }
}

/// A move-selecting agent. Keeps its transposition table between decisions.
///
/// Not safe for concurrent decisions; use one agent per thread.
pub struct Agent {
    config: SearchConfig,
    alphabeta: AlphaBeta,
    mcts: Mcts,
}

impl Default for Agent {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

impl Agent {
    pub fn new(config: SearchConfig) -> Self {
        let (alphabeta, mcts) = match config.seed {
            Some(seed) => (AlphaBeta::with_seed(seed), Mcts::with_seed(seed)),
            None => (AlphaBeta::new(), Mcts::new()),
        };
        Self {
            alphabeta: alphabeta.with_max_depth(config.max_depth),
            mcts: mcts.with_max_simulations(config.max_simulations),
            config,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Choose a move for `side` on `board`.
    ///
    /// The caller's board is never modified.
    pub fn select_move(&mut self, board: &Board, side: Color) -> Option<Move> {
        let budget = self.config.time_budget;
        let mv = match self.config.strategy {
            Strategy::AlphaBeta => self.alphabeta.decide(board, side, budget),
            Strategy::Mcts => self.mcts.decide(board, side, budget),
        };
        match mv {
            Some(mv) => info!("{} plays {mv} ({})", side, self.config.strategy),
            None => info!("{side} has no legal move"),
        }
        mv
    }
}

/// One-shot convenience wrapper around [`Agent::select_move`].
pub fn select_move(board: &Board, side: Color, config: &SearchConfig) -> Option<Move> {
    Agent::new(config.clone()).select_move(board, side)
}
