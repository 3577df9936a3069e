//! Centralized configuration loading from config.toml.
//!
//! This crate provides the configuration structs and loading logic shared
//! by the search binaries.
//!
//! # Configuration Priority
//!
//! Settings are loaded with the following priority (highest to lowest):
//! 1. Environment variables (`CHESS_MCTS_<SECTION>_<KEY>`)
//! 2. config.toml file
//! 3. Built-in defaults
//!
//! # Environment Variable Override Pattern
//!
//! ```text
//! CHESS_MCTS_<SECTION>_<KEY>=value
//!
//! Examples:
//!     CHESS_MCTS_COMMON_LOG_LEVEL=debug
//!     CHESS_MCTS_SEARCH_TIME_BUDGET_MS=250
//!     CHESS_MCTS_SEARCH_NUM_ROLLOUTS=20
//!     CHESS_MCTS_SEARCH_SEED=42
//! ```

mod defaults;
mod loader;
mod structs;

pub use defaults::*;
pub use loader::{
    apply_env_overrides, load_config, load_from_path, CONFIG_PATH_ENV, CONFIG_SEARCH_PATHS,
};
pub use structs::*;

#[cfg(test)]
mod tests;
