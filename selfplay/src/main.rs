//! Self-play driver: two engines play TEN against each other until the game
//! is decided, printing the board and per-move statistics along the way.
//!
//! Useful for eyeballing engine strength and as a long-running exerciser of
//! the full search stack.

use anyhow::Result;
use clap::Parser;
use std::time::Duration;
use tracing::info;

use ten_game::{Board, BLACK};
use ten_mcts::{select_move, SearchConfig};

#[derive(Parser, Debug)]
#[command(name = "ten-selfplay")]
#[command(about = "Runs two TEN engines against each other")]
pub struct Config {
    /// Thinking time per move in milliseconds
    #[arg(long, default_value_t = 1500)]
    pub think_time_ms: u64,

    /// Number of games to play
    #[arg(long, default_value_t = 1)]
    pub games: u32,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

/// Play one game to completion and return the winner.
fn run_game(config: &SearchConfig) -> Result<i8> {
    let mut board = Board::new();
    let mut move_index = 0u32;
    loop {
        let status = board.game_status();
        if status != 0 {
            return Ok(status);
        }

        let result = select_move(&board, config.clone())?;
        let side = if board.current_player() == BLACK {
            "black"
        } else {
            "white"
        };
        board = board.apply(result.best_move);
        move_index += 1;

        info!(
            move_index,
            side,
            big = result.best_move.big,
            tile = result.best_move.tile,
            winning_percentage = result.winning_percentage,
            simulations = result.simulations,
            "played"
        );
        println!("{board}");
    }
}

fn main() -> Result<()> {
    let cli = Config::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(cli.log_level.clone())),
        )
        .init();

    let config =
        SearchConfig::default().with_time_budget(Duration::from_millis(cli.think_time_ms));
    info!(
        think_time_ms = cli.think_time_ms,
        games = cli.games,
        workers = config.workers,
        "self-play starting"
    );

    let mut black_wins = 0u32;
    let mut white_wins = 0u32;
    for game in 1..=cli.games {
        let winner = run_game(&config)?;
        if winner == BLACK {
            black_wins += 1;
        } else {
            white_wins += 1;
        }
        info!(game, winner, "game over");
    }

    info!(black_wins, white_wins, "self-play finished");
    Ok(())
}
