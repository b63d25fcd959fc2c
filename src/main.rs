//! GuaGua: a NoGo engine speaking GTP.
//!
//! - `guagua gtp` (default) - run the GTP dispatch loop on stdin/stdout
//! - `guagua selfplay` - play Random vs Mcts games and print the results

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use guagua::agent::Agent;
use guagua::board::{Board, Color};
use guagua::constants::{MIN_PLAYOUTS, NUM_POINTS, RESIGN_POINT, TIME_BUDGET_MS};
use guagua::gtp::GtpEngine;
use guagua::mcts::SearchBudget;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "guagua")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the GTP dispatch loop on stdin/stdout.
    Gtp {
        #[arg(long, default_value_t = MIN_PLAYOUTS)]
        min_playouts: u64,
        #[arg(long, default_value_t = TIME_BUDGET_MS)]
        time_budget_ms: u64,
        #[arg(long, default_value_t = 1)]
        seed: u64,
    },
    /// Play Random vs Mcts games to completion and print the results.
    Selfplay {
        #[arg(long, default_value_t = 10)]
        games: u32,
        #[arg(long, default_value_t = 1)]
        seed: u64,
        #[arg(long, default_value_t = 1_000)]
        min_playouts: u64,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Gtp {
        min_playouts: MIN_PLAYOUTS,
        time_budget_ms: TIME_BUDGET_MS,
        seed: 1,
    }) {
        Commands::Gtp {
            min_playouts,
            time_budget_ms,
            seed,
        } => run_gtp(min_playouts, time_budget_ms, seed),
        Commands::Selfplay {
            games,
            seed,
            min_playouts,
        } => {
            run_selfplay(games, seed, min_playouts);
            Ok(())
        }
    }
}

fn run_gtp(min_playouts: u64, time_budget_ms: u64, seed: u64) -> Result<()> {
    let budget = SearchBudget {
        time_budget: Duration::from_millis(time_budget_ms),
        min_playouts,
    };
    let mut engine = GtpEngine::new(budget, seed);
    engine.run().context("GTP session ended with an I/O error")
}

fn run_selfplay(games: u32, seed: u64, min_playouts: u64) {
    let budget = SearchBudget {
        time_budget: Duration::ZERO,
        min_playouts,
    };
    let mut rng = fastrand::Rng::with_seed(seed);
    let mut mcts_wins = 0u32;
    let mut random_wins = 0u32;

    for game in 0..games {
        // Alternate which side the MCTS agent plays to avoid a first-move bias.
        let mcts_is_black = game % 2 == 0;
        let mut board = Board::new();
        let mut mover = Color::Black;
        let mut moves_played = 0usize;

        let winner = loop {
            if !board.has_legal_move(mover) {
                break mover.opponent();
            }
            if moves_played >= NUM_POINTS {
                break mover.opponent();
            }
            let mover_is_mcts = (mover == Color::Black) == mcts_is_black;
            let agent = if mover_is_mcts {
                Agent::Mcts(budget)
            } else {
                Agent::Random
            };
            let point = agent.take_action(&board, mover, &mut rng);
            if point == RESIGN_POINT {
                break mover.opponent();
            }
            board.place(mover, point);
            moves_played += 1;
            mover = mover.opponent();
        };

        let mcts_won = (winner == Color::Black) == mcts_is_black;
        if mcts_won {
            mcts_wins += 1;
        } else {
            random_wins += 1;
        }
        println!(
            "game {:>3}: mcts played {}, winner {winner} ({} moves)",
            game + 1,
            if mcts_is_black { "black" } else { "white" },
            moves_played
        );
    }

    println!("mcts {mcts_wins} - {random_wins} random, over {games} games");
}
