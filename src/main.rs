//! Reversi-Search: pick a move for one side of a capture-game position.
//!
//! ## Usage
//!
//! - `reversi-search` - Show a demo on the standard opening
//! - `reversi-search select --board pos.txt --side black` - Choose a move
//! - `reversi-search demo --size 6` - Run the demo on another board size
//!
//! Logging goes to stderr; set `RUST_LOG=debug` for per-depth search output.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use reversi_search::agent::{Agent, SearchConfig, Strategy};
use reversi_search::board::{Board, Color};
use reversi_search::constants::MAX_DEPTH;

/// Reversi-Search: time-bounded move selection for Reversi-style games
#[derive(Parser)]
#[command(name = "reversi-search")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Choose a move for a position read from a file or stdin
    Select {
        /// Board file (`B`/`W`/`.` per cell, one row per line); `-` for stdin
        #[arg(long, default_value = "-")]
        board: PathBuf,
        /// Side to move
        #[arg(long, value_enum)]
        side: Side,
        /// Search strategy (`alphabeta` or `mcts`)
        #[arg(long, default_value_t = Strategy::AlphaBeta)]
        strategy: Strategy,
        /// Time budget in milliseconds
        #[arg(long, default_value_t = 1900)]
        time_ms: u64,
        /// Deepest alpha-beta ply
        #[arg(long, default_value_t = MAX_DEPTH)]
        depth: u32,
        /// Seed for reproducible hashing and rollouts
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Show each strategy's choice on the standard opening
    Demo {
        /// Board size (even)
        #[arg(long, default_value_t = 8)]
        size: usize,
        /// Time budget per strategy in milliseconds
        #[arg(long, default_value_t = 500)]
        time_ms: u64,
    },
}

#[derive(Copy, Clone, ValueEnum)]
enum Side {
    Black,
    White,
}

impl From<Side> for Color {
    fn from(side: Side) -> Self {
        match side {
            Side::Black => Color::Black,
            Side::White => Color::White,
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Select {
            board: path,
            side,
            strategy,
            time_ms,
            depth,
            seed,
        }) => {
            let text = read_board(&path)?;
            let board = Board::parse(&text)
                .with_context(|| format!("invalid board in {}", board_name(&path)))?;

            let mut config = SearchConfig::default()
                .with_strategy(strategy)
                .with_time_budget(Duration::from_millis(time_ms))
                .with_max_depth(depth);
            if let Some(seed) = seed {
                config = config.with_seed(seed);
            }

            let mut agent = Agent::new(config);
            match agent.select_move(&board, side.into()) {
                Some(mv) => println!("{mv}"),
                None => println!("pass"),
            }
        }
        Some(Commands::Demo { size, time_ms }) => run_demo(size, Duration::from_millis(time_ms))?,
        None => run_demo(8, Duration::from_millis(500))?,
    }

    Ok(())
}

fn board_name(path: &Path) -> String {
    if path.as_os_str() == "-" {
        "stdin".to_string()
    } else {
        path.display().to_string()
    }
}

fn read_board(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("failed to read board from stdin")?;
        Ok(text)
    } else {
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
    }
}

fn run_demo(size: usize, budget: Duration) -> Result<()> {
    println!("Reversi-Search: time-bounded move selection\n");

    let board = Board::standard(size).context("cannot set up the standard opening")?;
    println!("{board}");

    for strategy in [Strategy::AlphaBeta, Strategy::Mcts] {
        let config = SearchConfig::default()
            .with_strategy(strategy)
            .with_time_budget(budget);
        let mut agent = Agent::new(config);
        match agent.select_move(&board, Color::Black) {
            Some(mv) => println!("{strategy}: black plays {mv}"),
            None => println!("{strategy}: black passes"),
        }
    }
    Ok(())
}
