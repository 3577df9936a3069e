//! Configuration for the player binary
//!
//! Configuration is loaded from config.toml with environment variable overrides.
//! CLI arguments take highest priority, followed by env vars, then config.toml.

use anyhow::{anyhow, Result};
use clap::Parser;
use engine_config::{load_config, CentralConfig};
use mcts::MctsConfig;
use once_cell::sync::Lazy;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use tracing::level_filters::LevelFilter;

// Load central config once at startup
static CENTRAL_CONFIG: Lazy<CentralConfig> = Lazy::new(load_config);

// Default value functions that read from central config
fn default_fen() -> String {
    games_chess::START_FEN.to_string()
}

fn default_time_budget_ms() -> u64 {
    CENTRAL_CONFIG.search.time_budget_ms
}

fn default_seed() -> u64 {
    CENTRAL_CONFIG.search.seed
}

fn default_exploration_weight() -> f32 {
    CENTRAL_CONFIG.search.exploration_weight
}

fn default_num_rollouts() -> u32 {
    CENTRAL_CONFIG.search.num_rollouts
}

fn default_simulation_depth() -> u32 {
    CENTRAL_CONFIG.search.simulation_depth
}

fn default_log_level() -> String {
    CENTRAL_CONFIG.common.log_level.clone()
}

#[derive(Parser, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[command(name = "player")]
#[command(about = "Chooses a chess move with a time-bounded Monte Carlo Tree Search")]
#[command(
    long_about = "Reads a position in FEN, searches it for the given time budget and
prints the chosen move in coordinate notation (e.g. e2e4).

Configuration is loaded from config.toml with environment variable overrides.
CLI arguments take highest priority."
)]
pub struct Config {
    /// Position to search, in Forsyth-Edwards Notation
    #[arg(long, default_value_t = default_fen())]
    pub fen: String,

    /// Time budget for the move in milliseconds
    #[arg(long, default_value_t = default_time_budget_ms())]
    pub time_budget_ms: u64,

    /// Seed for the search's random number generator
    #[arg(long, default_value_t = default_seed())]
    pub seed: u64,

    /// UCB1 exploration weight
    #[arg(long, default_value_t = default_exploration_weight())]
    pub exploration_weight: f32,

    /// Rollouts averaged for every expanded node
    #[arg(long, default_value_t = default_num_rollouts())]
    pub num_rollouts: u32,

    /// Maximum plies per rollout
    #[arg(long, default_value_t = default_simulation_depth())]
    pub simulation_depth: u32,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value_t = default_log_level())]
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fen: default_fen(),
            time_budget_ms: default_time_budget_ms(),
            seed: default_seed(),
            exploration_weight: default_exploration_weight(),
            num_rollouts: default_num_rollouts(),
            simulation_depth: default_simulation_depth(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.fen.trim().is_empty() {
            return Err(anyhow!("fen cannot be empty"));
        }

        if self.num_rollouts == 0 {
            return Err(anyhow!("num_rollouts must be greater than 0"));
        }

        if !self.exploration_weight.is_finite() || self.exploration_weight < 0.0 {
            return Err(anyhow!(
                "exploration_weight must be finite and non-negative, got {}",
                self.exploration_weight
            ));
        }

        if self.log_level.parse::<LevelFilter>().is_err() {
            return Err(anyhow!(
                "invalid log level '{}', expected one of trace, debug, info, warn, error",
                self.log_level
            ));
        }

        Ok(())
    }

    /// Search parameters for the MCTS core.
    pub fn mcts_config(&self) -> MctsConfig {
        MctsConfig::default()
            .with_exploration_weight(self.exploration_weight)
            .with_rollouts(self.num_rollouts)
            .with_simulation_depth(self.simulation_depth)
            .with_time_budget_ms(self.time_budget_ms)
    }

    /// Fresh generator seeded from `seed`.
    pub fn rng(&self) -> ChaCha20Rng {
        ChaCha20Rng::seed_from_u64(self.seed)
    }
}
