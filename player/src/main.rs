//! Player - command-line move chooser
//!
//! Reads a position, runs a time-bounded MCTS for the side to move and
//! prints the chosen move in coordinate notation on stdout.

use anyhow::{Context, Result};
use clap::Parser;
use games_chess::ChessGame;
use tracing::{error, info};

use player::{choose_move_with, Config};

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    Ok(())
}

fn main() -> Result<()> {
    // Parse configuration
    let config = Config::parse();

    // Validate configuration
    config.validate()?;

    // Initialize tracing
    init_tracing(&config.log_level)?;
    info!(
        log_level = %config.log_level,
        time_budget_ms = config.time_budget_ms,
        seed = config.seed,
        "Player starting"
    );

    let mut game = ChessGame::from_fen(&config.fen)
        .with_context(|| format!("invalid position '{}'", config.fen))?;

    match choose_move_with(&mut game, &config) {
        Ok(result) => {
            println!("{}", result.action);
            Ok(())
        }
        Err(e) => {
            error!("Move search failed: {:#}", e);
            Err(e)
        }
    }
}
