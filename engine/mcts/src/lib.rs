//! Monte Carlo Tree Search (MCTS) move chooser for two-player games.
//!
//! This crate provides a game-agnostic, time-bounded MCTS that works with any
//! game implementing the `engine-core` [`GameState`](engine_core::GameState)
//! trait.
//!
//! # Overview
//!
//! Each iteration of the search consists of three phases:
//!
//! 1. **Selection**: Walk down the tree using UCB1 for our own moves. Every
//!    move we pick is answered by one uniformly sampled opponent reply
//! 2. **Expansion**: At the first node with an untried move, add that move
//!    and score it with the average of several random rollouts
//! 3. **Backpropagation**: Fold the score into each node on the path back up
//!
//! Moves are played on the caller's state and undone in reverse order, so
//! the state is unchanged once the search returns.
//!
//! # Usage
//!
//! ```rust,ignore
//! use engine_core::WallClock;
//! use games_chess::ChessGame;
//! use mcts::{run_mcts, MaterialEvaluator, MctsConfig};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha20Rng;
//!
//! let mut game = ChessGame::new();
//! let evaluator = MaterialEvaluator::new();
//! let config = MctsConfig::default().with_time_budget_ms(500);
//!
//! let mut rng = ChaCha20Rng::seed_from_u64(42);
//! let result = run_mcts(&mut game, &evaluator, config, &WallClock::start(), &mut rng).unwrap();
//!
//! println!("Best move: {}", result.action);
//! println!("Value: {}", result.value);
//! ```
//!
//! # Configuration
//!
//! The [`MctsConfig`] struct controls search behavior:
//!
//! - `exploration_weight`: UCB1 exploration constant (default: 1.0)
//! - `num_rollouts`: Rollouts averaged per expansion (default: 10)
//! - `simulation_depth`: Maximum plies per rollout (default: 10)
//! - `time_budget_ms`: Budget checked between iterations (default: 1000)
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         MctsSearch                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌─────────────┐  ┌─────────────┐  ┌─────────────────────┐  │
//! │  │  MctsTree   │  │  MoveScope  │  │     Evaluator       │  │
//! │  │  (arena)    │  │ (make/undo) │  │ (material, mate)    │  │
//! │  └──────┬──────┘  └──────┬──────┘  └──────────┬──────────┘  │
//! │         │                │                    │             │
//! │         ▼                ▼                    ▼             │
//! │  ┌───────────────────────────────────────────────────────┐  │
//! │  │        select → expand → rollout → backpropagate      │  │
//! │  └───────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod evaluator;
pub mod node;
pub mod rollout;
pub mod scope;
pub mod search;
pub mod tree;

// Re-export main types
pub use config::MctsConfig;
pub use evaluator::{
    Evaluator, EvaluatorError, MaterialEvaluator, MaterialWeights, MAX_MATERIAL_DIFFERENTIAL,
};
pub use node::{MctsNode, NodeId};
pub use rollout::{average_rollouts, rollout};
pub use scope::MoveScope;
pub use search::{run_mcts, MctsSearch, RootChild, SearchError, SearchResult};
pub use tree::{MctsTree, TreeStats};
