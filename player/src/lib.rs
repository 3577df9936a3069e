//! Move chooser front end
//!
//! Glues the chess adapter, the MCTS core and the layered configuration
//! together:
//! 1. Parses the position from FEN
//! 2. Starts a wall clock for the request
//! 3. Runs the search with a seeded generator
//! 4. Returns the best root move

use anyhow::{Context, Result};
use engine_core::WallClock;
use games_chess::{ChessGame, ChessMove};
use mcts::{run_mcts, MaterialEvaluator, SearchResult};
use tracing::{debug, info};

pub mod config;

pub use config::Config;

/// Choose a move for the side to move in `position_fen` within
/// `time_budget_ms`, using every other setting from the central config.
pub fn choose_move(position_fen: &str, time_budget_ms: u64) -> Result<ChessMove> {
    let config = Config {
        fen: position_fen.to_string(),
        time_budget_ms,
        ..Config::default()
    };
    config.validate()?;

    let mut game = ChessGame::from_fen(&config.fen)
        .with_context(|| format!("invalid position '{}'", config.fen))?;
    let result = choose_move_with(&mut game, &config)?;
    Ok(result.action)
}

/// Search `game` with the settings in `config`.
///
/// `config.fen` is ignored; the game is searched as given and is back in
/// its original state when this returns.
pub fn choose_move_with(game: &mut ChessGame, config: &Config) -> Result<SearchResult<ChessMove>> {
    let clock = WallClock::start();
    let evaluator = MaterialEvaluator::new();
    let mut rng = config.rng();

    let result = run_mcts(game, &evaluator, config.mcts_config(), &clock, &mut rng)
        .with_context(|| format!("search failed for position '{}'", game.fen()))?;

    for child in &result.root_children {
        debug!(
            mv = %child.action,
            visits = child.visits,
            mean = child.mean_value,
            "root move"
        );
    }
    info!(
        mv = %result.action,
        value = result.value,
        iterations = result.iterations,
        elapsed_ms = result.elapsed_ms,
        "Move chosen"
    );

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine_core::GameState;
    use mcts::SearchError;

    fn fast_config() -> Config {
        Config {
            time_budget_ms: 50,
            num_rollouts: 4,
            simulation_depth: 6,
            ..Config::default()
        }
    }

    #[test]
    fn choose_move_returns_legal_move() {
        let mv = choose_move(games_chess::START_FEN, 50).unwrap();
        let game = ChessGame::new();
        assert!(game.legal_moves().contains(&mv));
    }

    #[test]
    fn choose_move_takes_mate_in_one() {
        let mv = choose_move("6k1/5ppp/8/8/8/8/8/R6K w - - 0 1", 200).unwrap();
        assert_eq!(mv.to_string(), "a1a8");
    }

    #[test]
    fn choose_move_rejects_stalemate() {
        let err = choose_move("k7/8/8/8/8/8/5q2/7K w - - 0 1", 50).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SearchError>(),
            Some(SearchError::NoLegalMoves)
        ));
    }

    #[test]
    fn choose_move_rejects_garbage_fen() {
        let err = choose_move("not a position", 50).unwrap_err();
        assert!(err.to_string().contains("invalid position"));
    }

    #[test]
    fn choose_move_with_restores_game() {
        let mut game = ChessGame::new();
        let mv = game.parse_move("d2d4").unwrap();
        game.apply(&mv);
        let before = game.clone();

        let result = choose_move_with(&mut game, &fast_config()).unwrap();
        assert!(game.legal_moves().contains(&result.action));
        assert_eq!(game, before);
        assert!(result.iterations >= 1);
    }

    #[test]
    fn forced_move_with_zero_budget() {
        let mut game = ChessGame::from_fen("k7/8/8/8/8/8/6q1/7K w - - 0 1").unwrap();
        let config = Config {
            time_budget_ms: 0,
            ..fast_config()
        };

        let result = choose_move_with(&mut game, &config).unwrap();
        assert_eq!(result.action.to_string(), "h1g2");
        assert_eq!(result.iterations, 1);
    }
}
